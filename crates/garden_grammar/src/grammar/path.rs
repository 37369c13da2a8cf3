//! PATH_SYSTEM production: one path along every border between sectors.
use std::collections::HashSet;

use tracing::debug;

use crate::geometry::{snap_to_grid, Rect};
use crate::grammar::{Production, Rewrite, RewriteContext};
use crate::graph::{EdgeKind, Graph, NodeId, NodeKind, Symbol};

/// Unique snapped borders of all adjacency edges, clamped into `bounds`.
///
/// Borders are deduplicated both before and after clamping, so no two
/// returned rectangles are equal.
pub fn path_segments(graph: &Graph, bounds: &Rect) -> Vec<Rect> {
    let mut seen_borders = HashSet::new();
    let mut seen_paths = HashSet::new();
    let mut segments = Vec::new();

    for edge in graph.edges() {
        if edge.kind != EdgeKind::Adjacent {
            continue;
        }
        let Some(border) = edge.border else {
            continue;
        };
        let border = snap_to_grid(&border);
        if !seen_borders.insert(border.key()) {
            continue;
        }
        let path = border.clamped_into(bounds);
        if seen_paths.insert(path.key()) {
            segments.push(path);
        }
    }

    segments
}

/// PATH_SYSTEM -> n * PATH_RECT.
///
/// Reads the adjacency edges present when it runs, so it must only fire once
/// every sector is final and adjacency has been rebuilt.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathNetwork;

impl Production for PathNetwork {
    fn name(&self) -> &'static str {
        "path_network"
    }

    fn symbol(&self) -> Symbol {
        Symbol::PathSystem
    }

    fn apply(&self, ctx: &mut RewriteContext<'_>, id: NodeId) -> Rewrite {
        let Some(NodeKind::PathSystem { rect, intensity }) = ctx.graph.node(id).map(|n| n.kind)
        else {
            return Rewrite::Skipped;
        };

        let segments = path_segments(ctx.graph, &rect);
        debug!(
            "Laying {} path segments (intensity {}).",
            segments.len(),
            intensity
        );
        for segment in segments {
            ctx.graph.add_node(NodeKind::PathRect(segment));
        }
        ctx.graph.remove_node(id);

        Rewrite::Applied
    }
}
