//! GARDEN -> AREA + PATH_SYSTEM.
use crate::grammar::{Production, Rewrite, RewriteContext};
use crate::graph::{NodeId, NodeKind, Symbol};

/// Seeds the derivation: the garden rectangle becomes one AREA carrying the
/// full subdivision depth and one PATH_SYSTEM carrying the path intensity.
///
/// No edge links the two. The path system later finds the sectors through
/// the rebuilt adjacency alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct GardenSplit;

impl Production for GardenSplit {
    fn name(&self) -> &'static str {
        "garden_split"
    }

    fn symbol(&self) -> Symbol {
        Symbol::Garden
    }

    fn apply(&self, ctx: &mut RewriteContext<'_>, id: NodeId) -> Rewrite {
        let Some(NodeKind::Garden(rect)) = ctx.graph.node(id).map(|n| n.kind) else {
            return Rewrite::Skipped;
        };

        ctx.graph.remove_node(id);
        ctx.graph.add_node(NodeKind::Area {
            rect,
            depth: ctx.params.divisions,
        });
        ctx.graph.add_node(NodeKind::PathSystem {
            rect,
            intensity: ctx.params.paths_intensity,
        });
        Rewrite::Applied
    }
}
