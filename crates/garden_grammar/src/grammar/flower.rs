//! FLOWER_AREA productions: flower compositions laid out on grass.
use crate::geometry::{Circle, Rect};
use crate::grammar::{Production, Rewrite, RewriteContext};
use crate::graph::{Graph, Node, NodeId, NodeKind, Symbol};
use crate::sampling::chance;

/// Lawn kept free between the sector edge and the composition.
const PAD: f32 = 10.0;
/// Gap between the two rose beds.
const ROSE_GAP: f32 = 10.0;
/// Width of the crossing paths implied around a fountain.
const CROSS_PATH: f32 = 10.0;
/// Planting gap between tulip beds and the crossing paths.
const TULIP_GAP: f32 = 8.0;
const MIN_FOUNTAIN_RADIUS: f32 = 18.0;

fn flower_rect(graph: &Graph, id: NodeId) -> Option<Rect> {
    match graph.node(id)?.kind {
        NodeKind::FlowerArea(rect) => Some(rect),
        _ => None,
    }
}

/// Adds a bed of `make` for `rect` unless it collapsed to nothing.
fn add_bed(graph: &mut Graph, rect: Rect, make: fn(Rect) -> NodeKind) -> bool {
    if !rect.is_positive() {
        return false;
    }
    graph.add_node(make(rect));
    true
}

/// The two rose beds of `rect`, side by side or stacked.
pub fn rose_beds(rect: &Rect, side_by_side: bool) -> [Rect; 2] {
    let inner = rect.inset(PAD);
    let half_gap = ROSE_GAP / 2.0;
    if side_by_side {
        let w = inner.w / 2.0 - half_gap;
        [
            Rect::new(inner.x, inner.y, w, inner.h),
            Rect::new(inner.x + inner.w / 2.0 + half_gap, inner.y, w, inner.h),
        ]
    } else {
        let h = inner.h / 2.0 - half_gap;
        [
            Rect::new(inner.x, inner.y, inner.w, h),
            Rect::new(inner.x, inner.y + inner.h / 2.0 + half_gap, inner.w, h),
        ]
    }
}

/// Fountain circle and the four tulip beds around it, for `rect`.
///
/// Beds are ordered top-left, top-right, bottom-left, bottom-right.
pub fn fountain_court(rect: &Rect) -> (Circle, [Rect; 4]) {
    let inner = rect.inset(PAD);
    let c = inner.center();
    let r = MIN_FOUNTAIN_RADIUS.max(inner.min_side() * 0.12);

    let half_path = CROSS_PATH / 2.0;
    let left_w = (c.x - half_path) - inner.x - TULIP_GAP;
    let right_w = inner.right() - (c.x + half_path) - TULIP_GAP;
    let top_h = (c.y - half_path) - inner.y - TULIP_GAP;
    let bottom_h = inner.bottom() - (c.y + half_path) - TULIP_GAP;
    let right_x = c.x + half_path + TULIP_GAP;
    let bottom_y = c.y + half_path + TULIP_GAP;

    (
        Circle::new(c.x, c.y, r),
        [
            Rect::new(inner.x, inner.y, left_w, top_h),
            Rect::new(right_x, inner.y, right_w, top_h),
            Rect::new(inner.x, bottom_y, left_w, bottom_h),
            Rect::new(right_x, bottom_y, right_w, bottom_h),
        ],
    )
}

/// FLOWER_AREA -> GRASS_RECT + 2 * ROSE_BED.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoseBeds;

impl Production for RoseBeds {
    fn name(&self) -> &'static str {
        "rose_beds"
    }

    fn symbol(&self) -> Symbol {
        Symbol::FlowerArea
    }

    fn accepts(&self, node: &Node) -> bool {
        matches!(node.kind, NodeKind::FlowerArea(_))
    }

    fn apply(&self, ctx: &mut RewriteContext<'_>, id: NodeId) -> Rewrite {
        let Some(rect) = flower_rect(ctx.graph, id) else {
            return Rewrite::Skipped;
        };
        ctx.graph.replace(id, NodeKind::GrassRect(rect));

        let side_by_side = chance(0.5, ctx.rng);
        for bed in rose_beds(&rect, side_by_side) {
            add_bed(ctx.graph, bed, NodeKind::RoseBed);
        }
        Rewrite::Applied
    }
}

/// FLOWER_AREA -> GRASS_RECT + FOUNTAIN + 4 * TULIP_BED.
#[derive(Debug, Clone, Copy, Default)]
pub struct FountainCourt;

impl Production for FountainCourt {
    fn name(&self) -> &'static str {
        "fountain_court"
    }

    fn symbol(&self) -> Symbol {
        Symbol::FlowerArea
    }

    fn accepts(&self, node: &Node) -> bool {
        matches!(node.kind, NodeKind::FlowerArea(_))
    }

    fn apply(&self, ctx: &mut RewriteContext<'_>, id: NodeId) -> Rewrite {
        let Some(rect) = flower_rect(ctx.graph, id) else {
            return Rewrite::Skipped;
        };
        ctx.graph.replace(id, NodeKind::GrassRect(rect));

        let (fountain, beds) = fountain_court(&rect);
        ctx.graph.add_node(NodeKind::Fountain(fountain));
        for bed in beds {
            add_bed(ctx.graph, bed, NodeKind::TulipBed);
        }
        Rewrite::Applied
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::config::GardenParams;

    fn rewrite(rule: &dyn Production, rect: Rect, seed: u64) -> (Graph, NodeId) {
        let mut graph = Graph::new();
        let id = graph.add_node(NodeKind::FlowerArea(rect));
        let params = GardenParams::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ctx = RewriteContext {
            graph: &mut graph,
            params: &params,
            rng: &mut rng,
        };
        assert_eq!(rule.apply(&mut ctx, id), Rewrite::Applied);
        (graph, id)
    }

    #[test]
    fn rose_beds_split_the_inner_rect_with_a_gap() {
        let rect = Rect::new(0.0, 0.0, 120.0, 80.0);
        let [a, b] = rose_beds(&rect, true);
        assert_eq!(a, Rect::new(10.0, 10.0, 45.0, 60.0));
        assert_eq!(b, Rect::new(65.0, 10.0, 45.0, 60.0));
        assert_eq!(b.x - a.right(), ROSE_GAP);

        let [a, b] = rose_beds(&rect, false);
        assert_eq!(a, Rect::new(10.0, 10.0, 100.0, 25.0));
        assert_eq!(b, Rect::new(10.0, 45.0, 100.0, 25.0));
    }

    #[test]
    fn roses_turn_area_into_grass_with_two_beds() {
        let rect = Rect::new(10.0, 10.0, 200.0, 150.0);
        for seed in 0..5 {
            let (graph, id) = rewrite(&RoseBeds, rect, seed);
            assert_eq!(graph.node(id).map(|n| n.kind), Some(NodeKind::GrassRect(rect)));
            assert_eq!(graph.count(Symbol::RoseBed), 2);
            for bed in graph.nodes_with(Symbol::RoseBed) {
                assert!(rect.contains_rect(&bed.shape().bounds(), 0.0));
            }
        }
    }

    #[test]
    fn fountain_sits_in_the_middle_of_four_beds() {
        let rect = Rect::new(0.0, 0.0, 220.0, 160.0);
        let (fountain, beds) = fountain_court(&rect);
        assert_eq!(fountain.center, rect.center());
        assert_eq!(fountain.r, 18.0);

        let [tl, tr, bl, br] = beds;
        assert_eq!(tl, Rect::new(10.0, 10.0, 87.0, 57.0));
        assert_eq!(tr, Rect::new(123.0, 10.0, 87.0, 57.0));
        assert_eq!(bl, Rect::new(10.0, 93.0, 87.0, 57.0));
        assert_eq!(br, Rect::new(123.0, 93.0, 87.0, 57.0));

        let big = fountain_court(&Rect::new(0.0, 0.0, 520.0, 420.0)).0;
        assert!((big.r - 48.0).abs() < 1e-4);
    }

    #[test]
    fn fountain_rule_spawns_fountain_and_tulips() {
        let rect = Rect::new(10.0, 10.0, 220.0, 160.0);
        let (graph, id) = rewrite(&FountainCourt, rect, 1);
        assert_eq!(graph.node(id).map(|n| n.symbol()), Some(Symbol::GrassRect));
        assert_eq!(graph.count(Symbol::Fountain), 1);
        assert_eq!(graph.count(Symbol::TulipBed), 4);
        assert_eq!(graph.count(Symbol::FlowerArea), 0);
    }

    #[test]
    fn cramped_courts_skip_empty_beds() {
        let rect = Rect::new(0.0, 0.0, 40.0, 40.0);
        let (graph, _) = rewrite(&FountainCourt, rect, 1);
        assert_eq!(graph.count(Symbol::Fountain), 1);
        assert_eq!(graph.count(Symbol::TulipBed), 0);
    }
}
