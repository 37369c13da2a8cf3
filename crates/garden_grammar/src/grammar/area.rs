//! AREA productions: recursive subdivision and conversion into terrain.
use glam::Vec2;
use rand::RngCore;
use tracing::trace;

use crate::geometry::border::keep_long_border;
use crate::geometry::split::{is_splittable, split_fits};
use crate::geometry::{
    choose_split_mode, clamp_lo, shared_border, snap_to_grid, split, Circle, Rect,
};
use crate::grammar::terrain::{pick_terrain, TerrainKind, TerrainWeights};
use crate::grammar::{Production, Rewrite, RewriteContext, MIN_SPLIT_SIDE};
use crate::graph::{EdgeKind, Graph, Node, NodeId, NodeKind, Symbol};
use crate::sampling::{chance, rand_int, CircleScatter};

/// Probability of the thin border strip when an area is split.
const THIN_BORDER_CHANCE: f32 = 0.7;
const THIN_BORDER: f32 = 10.0;
const THICK_BORDER: f32 = 15.0;

/// Ground area per requested tree.
const AREA_PER_TREE: f32 = 6000.0;
const MIN_TREES: usize = 3;
const MAX_TREES: usize = 16;
const TREE_RADIUS: (i32, i32) = (19, 37);
const TREE_TRIES: usize = 20;

/// Offset between a twin pond's lobes and its center, in radii.
const LOBE_OFFSET: f32 = 0.55;

fn area_of(node: &Node) -> Option<(Rect, u32)> {
    match node.kind {
        NodeKind::Area { rect, depth } => Some((rect, depth)),
        _ => None,
    }
}

/// AREA (depth > 0) -> AREA + AREA.
///
/// Cuts the area in two children one level shallower and records their shared
/// border as an adjacency edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct AreaSplit;

impl Production for AreaSplit {
    fn name(&self) -> &'static str {
        "area_split"
    }

    fn symbol(&self) -> Symbol {
        Symbol::Area
    }

    fn accepts(&self, node: &Node) -> bool {
        area_of(node).is_some_and(|(rect, depth)| depth > 0 && is_splittable(&rect, MIN_SPLIT_SIDE))
    }

    fn apply(&self, ctx: &mut RewriteContext<'_>, id: NodeId) -> Rewrite {
        let Some((rect, depth)) = ctx.graph.node(id).and_then(area_of) else {
            return Rewrite::Skipped;
        };
        if depth == 0 {
            return Rewrite::Skipped;
        }

        let mode = choose_split_mode(&rect, ctx.rng);
        if !split_fits(&rect, mode, MIN_SPLIT_SIDE) {
            trace!("Split {:?} of area {} leaves a sliver; keeping it.", mode, id);
            return Rewrite::Rejected;
        }
        let (r1, r2) = split(&rect, mode);

        ctx.graph.remove_node(id);
        let a1 = ctx.graph.add_node(NodeKind::Area {
            rect: r1,
            depth: depth - 1,
        });
        let a2 = ctx.graph.add_node(NodeKind::Area {
            rect: r2,
            depth: depth - 1,
        });

        let thickness = if chance(THIN_BORDER_CHANCE, ctx.rng) {
            THIN_BORDER
        } else {
            THICK_BORDER
        };
        let border = shared_border(&r1, &r2, thickness)
            .map(|b| snap_to_grid(&b))
            .and_then(keep_long_border);
        ctx.graph.add_edge(a1, a2, EdgeKind::Adjacent, border);

        Rewrite::Applied
    }
}

/// AREA (depth = 0) -> terrain.
///
/// Also rewrites deeper areas that no split mode can cut without leaving a
/// sliver, so subdivision always bottoms out.
#[derive(Debug, Clone, Copy, Default)]
pub struct AreaTerminal;

impl Production for AreaTerminal {
    fn name(&self) -> &'static str {
        "area_terminal"
    }

    fn symbol(&self) -> Symbol {
        Symbol::Area
    }

    fn accepts(&self, node: &Node) -> bool {
        area_of(node)
            .is_some_and(|(rect, depth)| depth == 0 || !is_splittable(&rect, MIN_SPLIT_SIDE))
    }

    fn apply(&self, ctx: &mut RewriteContext<'_>, id: NodeId) -> Rewrite {
        let Some((rect, _)) = ctx.graph.node(id).and_then(area_of) else {
            return Rewrite::Skipped;
        };

        let weights = TerrainWeights::from_params(ctx.params);
        let terrain = pick_terrain(&weights, ctx.rng);
        trace!("Area {} becomes {:?}.", id, terrain);

        match terrain {
            TerrainKind::Grass => {
                ctx.graph.replace(id, NodeKind::GrassRect(rect));
            }
            TerrainKind::Flowers => {
                ctx.graph.replace(id, NodeKind::FlowerArea(rect));
            }
            TerrainKind::Trees => {
                ctx.graph.replace(id, NodeKind::GrassRect(rect));
                plant_trees(ctx.graph, &rect, ctx.rng);
            }
            TerrainKind::Water => {
                ctx.graph.replace(id, NodeKind::GrassRect(rect));
                dig_pond(ctx.graph, &rect, ctx.rng);
            }
        }

        Rewrite::Applied
    }
}

/// Number of trees requested for a grove on `rect`.
pub fn tree_count(rect: &Rect) -> usize {
    ((rect.area() / AREA_PER_TREE).floor().max(0.0) as usize).clamp(MIN_TREES, MAX_TREES)
}

/// Scatters non-overlapping TREE_CIRCLE nodes over `rect`. Returns how many
/// were placed.
pub fn plant_trees(graph: &mut Graph, rect: &Rect, rng: &mut dyn RngCore) -> usize {
    let trees = CircleScatter::new(tree_count(rect), TREE_RADIUS, TREE_TRIES).generate(rect, rng);
    for tree in &trees {
        graph.add_node(NodeKind::TreeCircle(*tree));
    }
    trees.len()
}

/// Pond layouts a water area can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PondShape {
    /// A single round pond.
    Round,
    /// Two round lobes joined by a rectangular channel.
    TwinLobe,
}

/// Center of `rect` moved by up to a tenth of each side, in whole units.
fn jittered_center(rect: &Rect, rng: &mut dyn RngCore) -> Vec2 {
    let jx = (rect.w / 10.0).floor() as i32;
    let jy = (rect.h / 10.0).floor() as i32;
    let dx = rand_int(-jx, jx, rng) as f32;
    let dy = rand_int(-jy, jy, rng) as f32;
    rect.center() + Vec2::new(dx, dy)
}

/// Adds a water feature to `rect`: either a round pond or a twin-lobe pond.
///
/// The radius follows the sector size within fixed bounds, then shrinks if
/// needed so the whole feature stays inside `rect`.
pub fn dig_pond(graph: &mut Graph, rect: &Rect, rng: &mut dyn RngCore) -> PondShape {
    let center = jittered_center(rect, rng);
    let min_side = rect.min_side();

    if rand_int(0, 1, rng) == 0 {
        let r = (min_side * 0.30).clamp(35.0, 80.0).min(min_side / 2.0);
        let cx = clamp_lo(center.x, rect.x + r, rect.right() - r);
        let cy = clamp_lo(center.y, rect.y + r, rect.bottom() - r);
        graph.add_node(NodeKind::WaterCircle(Circle::new(cx, cy, r)));
        PondShape::Round
    } else {
        let half_span = 1.0 + LOBE_OFFSET;
        let r = (min_side * 0.18)
            .clamp(30.0, 65.0)
            .min(rect.h / 2.0)
            .min(rect.w / (2.0 * half_span));
        let cx = clamp_lo(
            center.x,
            rect.x + half_span * r,
            rect.right() - half_span * r,
        );
        let cy = clamp_lo(center.y, rect.y + r, rect.bottom() - r);
        let offset = LOBE_OFFSET * r;

        graph.add_node(NodeKind::WaterCircle(Circle::new(cx + offset, cy, r)));
        graph.add_node(NodeKind::WaterCircle(Circle::new(cx - offset, cy, r)));
        graph.add_node(NodeKind::WaterRect(Rect::new(
            cx - offset,
            cy - r,
            2.0 * offset,
            2.0 * r,
        )));
        PondShape::TwinLobe
    }
}
