use std::collections::{HashMap, HashSet};

use garden_grammar::geometry::border::MIN_TOUCH_OVERLAP;
use garden_grammar::geometry::{circles_collide, GRID_UNIT};
use garden_grammar::grammar::TerrainWeights;
use garden_grammar::prelude::*;

const SEEDS: std::ops::Range<u64> = 0..24;

fn derive(plot: &Plot, params: GardenParams, seed: u64) -> (Graph, RunOutcome) {
    let (graph, outcome) = run_garden(plot, params, seed).expect("valid input");
    assert!(outcome.complete, "seed {seed} did not complete");
    (graph, outcome)
}

fn grass_rects(graph: &Graph) -> Vec<Rect> {
    graph
        .nodes_with(Symbol::GrassRect)
        .filter_map(|n| n.kind.rect())
        .collect()
}

fn varied_params() -> Vec<GardenParams> {
    vec![
        GardenParams::default(),
        GardenParams::new(5, 1, 1.0, 0.0),
        GardenParams::new(4, 5, 0.0, 1.0),
        GardenParams::new(2, 2, 0.3, 0.8),
    ]
}

/// Runs a derivation step by step and records, for every node a rewrite
/// spawned, the sector it was spawned into.
fn derive_with_origins(
    working: Rect,
    params: GardenParams,
    seed: u64,
) -> (Graph, HashMap<NodeId, Rect>) {
    let mut engine = GrammarEngine::seeded(working, params, seed).expect("valid input");
    let mut sink = VecSink::only([GrammarEventKind::RuleApplied]);
    let mut origins = HashMap::new();
    let mut high_water = max_id(engine.graph());

    for _ in 0..DEFAULT_MAX_STEPS {
        if !engine.step_with_events(&mut sink) {
            break;
        }
        let Some(GrammarEvent::RuleApplied { node, symbol, .. }) = sink.as_slice().last().cloned()
        else {
            panic!("seed {seed}: step without a RuleApplied event");
        };
        sink.clear();

        // Leaf rewrites keep the sector's id; the path system spans the garden.
        let sector = match symbol {
            Symbol::Area | Symbol::FlowerArea => engine.graph().node(node).and_then(|n| n.kind.rect()),
            Symbol::PathSystem => Some(working),
            _ => None,
        };
        if let Some(sector) = sector {
            for spawned in engine.graph().nodes().filter(|n| n.id > high_water) {
                origins.insert(spawned.id, sector);
            }
        }
        high_water = high_water.max(max_id(engine.graph()));
    }

    assert!(engine.is_complete(), "seed {seed} did not complete");
    (engine.into_graph(), origins)
}

fn max_id(graph: &Graph) -> NodeId {
    graph.nodes().map(|n| n.id).max().unwrap_or(0)
}

#[test]
fn terminals_stay_inside_their_sector() {
    let plot = Plot::from_meters(60.0, 50.0);
    let working = plot.working_rect();

    for params in varied_params() {
        for seed in SEEDS {
            let (graph, origins) = derive_with_origins(working, params, seed);

            for node in graph.nodes() {
                let bounds = node.shape().bounds();
                assert!(
                    working.contains_rect(&bounds, GRID_UNIT),
                    "seed {seed}: {} {:?} leaves the garden",
                    node.symbol(),
                    bounds
                );
                if node.symbol() == Symbol::GrassRect {
                    continue;
                }
                let Some(sector) = origins.get(&node.id) else {
                    panic!("seed {seed}: {} {} has no originating sector", node.symbol(), node.id);
                };
                assert!(
                    sector.contains_rect(&bounds, GRID_UNIT),
                    "seed {seed}: {} {:?} escapes its sector {:?}",
                    node.symbol(),
                    bounds,
                    sector
                );
            }
        }
    }
}

/// True when the rectangles share an edge over more than the minimum overlap,
/// allowing for rounding in the split arithmetic.
fn touching(a: &Rect, b: &Rect) -> bool {
    const TOL: f32 = 1e-2;
    let span_y = a.bottom().min(b.bottom()) - a.y.max(b.y);
    let span_x = a.right().min(b.right()) - a.x.max(b.x);
    let side = (a.right() - b.x).abs() < TOL || (b.right() - a.x).abs() < TOL;
    let stacked = (a.bottom() - b.y).abs() < TOL || (b.bottom() - a.y).abs() < TOL;
    (side && span_y > MIN_TOUCH_OVERLAP) || (stacked && span_x > MIN_TOUCH_OVERLAP)
}

#[test]
fn every_touching_pair_is_adjacent_and_gets_a_path() {
    let plot = Plot::from_meters(75.0, 60.0);
    let working = plot.working_rect();
    let params = GardenParams::default().with_divisions(5);

    for seed in 0..50 {
        let (graph, _) = derive(&plot, params, seed);
        let sectors: Vec<(NodeId, Rect)> = graph
            .nodes_with(Symbol::GrassRect)
            .filter_map(|n| n.kind.rect().map(|r| (n.id, r)))
            .collect();
        let paths: Vec<Rect> = graph
            .nodes_with(Symbol::PathRect)
            .filter_map(|n| n.kind.rect())
            .collect();

        for (i, (a_id, a)) in sectors.iter().enumerate() {
            for (b_id, b) in &sectors[i + 1..] {
                let edge = graph.edge(*a_id, *b_id);
                assert_eq!(
                    edge.is_some(),
                    touching(a, b),
                    "seed {seed}: {a:?} / {b:?} adjacency disagrees with geometry"
                );
            }
        }

        for edge in graph.edges() {
            let Some(border) = edge.border else {
                continue;
            };
            let expected = border.clamped_into(&working);
            assert!(
                paths.contains(&expected),
                "seed {seed}: border {border:?} between {} and {} has no path",
                edge.a,
                edge.b
            );
        }
    }
}

#[test]
fn leaf_count_is_bounded_by_depth() {
    let plot = Plot::from_meters(75.0, 60.0);
    for divisions in 0..=6 {
        let params = GardenParams::default().with_divisions(divisions);
        for seed in 0..8 {
            let (graph, _) = derive(&plot, params, seed);
            let leaves = graph.count(Symbol::GrassRect);
            assert!(leaves >= 1);
            assert!(
                leaves <= 1 << divisions,
                "depth {divisions} produced {leaves} sectors"
            );
        }
    }
}

#[test]
fn trees_never_overlap() {
    let plot = Plot::from_meters(75.0, 60.0);
    let params = GardenParams::new(3, 3, 0.0, 1.0);

    for seed in SEEDS {
        let (graph, _) = derive(&plot, params, seed);
        let sectors = grass_rects(&graph);
        let trees: Vec<Circle> = graph
            .nodes_with(Symbol::TreeCircle)
            .filter_map(|n| match n.kind {
                NodeKind::TreeCircle(c) => Some(c),
                _ => None,
            })
            .collect();

        for sector in &sectors {
            let inside: Vec<&Circle> = trees
                .iter()
                .filter(|t| sector.contains_rect(&t.bounds(), 0.0))
                .collect();
            for (i, a) in inside.iter().enumerate() {
                for b in &inside[i + 1..] {
                    assert!(!circles_collide(a, b), "seed {seed}: {a:?} hits {b:?}");
                }
            }
        }
    }
}

#[test]
fn adjacency_is_symmetric_and_links_sectors() {
    let plot = Plot::from_meters(60.0, 50.0);
    for seed in SEEDS {
        let (graph, _) = derive(&plot, GardenParams::default(), seed);
        for edge in graph.edges() {
            assert_eq!(graph.edge(edge.a, edge.b), graph.edge(edge.b, edge.a));
            assert!(graph.neighbors(edge.a).any(|n| n == edge.b));
            assert!(graph.neighbors(edge.b).any(|n| n == edge.a));
            for end in [edge.a, edge.b] {
                let symbol = graph.node(end).map(|n| n.symbol());
                assert_eq!(symbol, Some(Symbol::GrassRect));
            }
        }
    }
}

#[test]
fn paths_are_unique() {
    let plot = Plot::from_meters(75.0, 60.0);
    for seed in SEEDS {
        let (graph, _) = derive(&plot, GardenParams::default().with_divisions(5), seed);
        let mut seen = HashSet::new();
        for node in graph.nodes_with(Symbol::PathRect) {
            let Some(r) = node.kind.rect() else {
                panic!("path without a rectangle");
            };
            let key = [r.x, r.y, r.w, r.h].map(f32::to_bits);
            assert!(seen.insert(key), "seed {seed}: duplicate path {r:?}");
        }
        assert!(!seen.is_empty(), "seed {seed}: no paths");
    }
}

#[test]
fn terrain_weights_are_positive_across_inputs() {
    for paths in 1..=5 {
        for step in 0..=10 {
            let bias = step as f32 / 10.0;
            let params = GardenParams::new(3, paths, bias, 1.0 - bias);
            let weights = TerrainWeights::from_params(&params);
            for (kind, w) in weights.entries() {
                assert!(w > 0.0, "{kind:?} has weight {w} for {params:?}");
            }
        }
    }
}

#[test]
fn small_grass_only_garden_completes_within_budget() {
    let plot = Plot::from_meters(60.0, 50.0);
    assert_eq!(plot.working_rect(), Rect::new(10.0, 10.0, 580.0, 480.0));
    let params = GardenParams::new(2, 3, 0.0, 0.0);

    for seed in SEEDS {
        let mut engine = GrammarEngine::seeded(plot.working_rect(), params, seed).unwrap();
        let outcome = engine.run(100);
        assert!(outcome.complete, "seed {seed}");
        assert!(outcome.steps < 100);

        let graph = engine.graph();
        assert!(!graph.has_nonterminals());
        assert_eq!(graph.count(Symbol::Area), 0);
        assert_eq!(graph.count(Symbol::FlowerArea), 0);
        let leaves = graph.count(Symbol::GrassRect);
        assert!((1..=4).contains(&leaves), "seed {seed}: {leaves} leaves");
    }
}

#[test]
fn unsplittable_gardens_still_terminate() {
    // Too small for any split to leave both halves wide enough.
    let working = Rect::new(0.0, 0.0, 60.0, 50.0);
    let params = GardenParams::default().with_divisions(4);

    for seed in SEEDS {
        let mut engine = GrammarEngine::seeded(working, params, seed).unwrap();
        let outcome = engine.run(DEFAULT_MAX_STEPS);
        assert!(outcome.complete, "seed {seed}");
        assert_eq!(engine.graph().count(Symbol::GrassRect), 1);
        assert_eq!(engine.graph().count(Symbol::PathRect), 0);
    }
}

#[test]
fn derivation_is_reproducible_per_seed() {
    let plot = Plot::from_meters(70.0, 55.0);
    let params = GardenParams::new(4, 2, 0.5, 0.5);
    for seed in [1, 99, 4242] {
        let (a, oa) = derive(&plot, params, seed);
        let (b, ob) = derive(&plot, params, seed);
        assert_eq!(oa, ob);
        assert_eq!(a.into_nodes(), b.into_nodes());
    }
}

#[test]
fn events_trace_every_productive_step() {
    let plot = Plot::from_meters(60.0, 50.0);
    let mut engine = GrammarEngine::seeded(plot.working_rect(), GardenParams::default(), 17).unwrap();
    let mut sink = VecSink::only([GrammarEventKind::RuleApplied]);
    let outcome = engine.run_with_events(DEFAULT_MAX_STEPS, &mut sink);

    assert!(outcome.complete);
    assert_eq!(sink.len(), outcome.steps);
    let productions: HashSet<&str> = sink
        .as_slice()
        .iter()
        .filter_map(|e| match e {
            GrammarEvent::RuleApplied { production, .. } => Some(*production),
            _ => None,
        })
        .collect();
    assert!(productions.contains("garden_split"));
    assert!(productions.contains("path_network"));
}
