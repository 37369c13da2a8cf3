//! Recomputes which sectors touch once their geometry has settled.
use tracing::debug;

use crate::geometry::border::keep_long_border;
use crate::geometry::{border_between, Rect};
use crate::graph::{EdgeKind, Graph, NodeId};

/// Replaces every adjacency edge with edges derived from the current sector
/// rectangles.
///
/// All existing [`EdgeKind::Adjacent`] edges are dropped first, so repeated
/// calls leave the same edge set. Each touching pair of sectors gets one edge
/// carrying the snapped border strip of `thickness`; borders shorter than the
/// minimum length are dropped from the payload but the pair stays adjacent.
///
/// Returns the number of edges inserted.
pub fn rebuild_adjacency(graph: &mut Graph, thickness: f32) -> usize {
    graph.clear_edges(EdgeKind::Adjacent);

    let sectors: Vec<(NodeId, Rect)> = graph
        .nodes()
        .filter(|n| n.symbol().is_sector())
        .filter_map(|n| n.kind.rect().map(|r| (n.id, r)))
        .collect();

    let mut inserted = 0;
    for (i, (a_id, a)) in sectors.iter().enumerate() {
        for (b_id, b) in &sectors[i + 1..] {
            let Some(border) = border_between(a, b, thickness) else {
                continue;
            };
            if graph.add_edge(*a_id, *b_id, EdgeKind::Adjacent, keep_long_border(border)) {
                inserted += 1;
            }
        }
    }

    debug!(
        "Rebuilt adjacency over {} sectors: {} edges.",
        sectors.len(),
        inserted
    );
    inserted
}
