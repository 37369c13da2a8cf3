//! Per-priority worklists of pending nonterminal nodes.
use std::collections::HashMap;

use rand::RngCore;

use crate::graph::{Graph, NodeId, Symbol};
use crate::sampling::rand_index;

/// Scheduling tier of a nonterminal, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    Area,
    FlowerArea,
    PathSystem,
    Other,
}

impl Tier {
    pub const ORDER: [Tier; 4] = [Tier::Area, Tier::FlowerArea, Tier::PathSystem, Tier::Other];

    /// Tier of `symbol`, or `None` for terminals.
    pub fn of(symbol: Symbol) -> Option<Tier> {
        match symbol {
            Symbol::Area => Some(Tier::Area),
            Symbol::FlowerArea => Some(Tier::FlowerArea),
            Symbol::PathSystem => Some(Tier::PathSystem),
            s if s.is_nonterminal() => Some(Tier::Other),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Pending node ids bucketed by [`Tier`].
///
/// Buckets are refilled from the graph's change log instead of rescanning the
/// graph. Entries whose node was since removed or moved to another tier are
/// discarded lazily when drawn.
#[derive(Debug, Default)]
pub struct Agenda {
    tiers: [Vec<NodeId>; 4],
    queued: HashMap<NodeId, Tier>,
}

impl Agenda {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `id` under the tier of `symbol`. Terminals are ignored, as is a
    /// node already queued in that tier.
    pub fn schedule(&mut self, id: NodeId, symbol: Symbol) {
        let Some(tier) = Tier::of(symbol) else {
            self.queued.remove(&id);
            return;
        };
        if self.queued.get(&id) == Some(&tier) {
            return;
        }
        self.queued.insert(id, tier);
        self.tiers[tier.index()].push(id);
    }

    /// Schedules every node the graph reports as added or relabeled. The
    /// graph must have change tracking on.
    pub fn absorb(&mut self, graph: &mut Graph) {
        debug_assert!(graph.is_tracking_changes(), "graph change log is off");
        for id in graph.take_touched() {
            if let Some(node) = graph.node(id) {
                self.schedule(id, node.symbol());
            }
        }
    }

    /// Removes and returns a uniformly drawn live node from the highest
    /// non-empty tier.
    pub fn next(&mut self, graph: &Graph, rng: &mut dyn RngCore) -> Option<(Tier, NodeId)> {
        for tier in Tier::ORDER {
            loop {
                let bucket = &mut self.tiers[tier.index()];
                if bucket.is_empty() {
                    break;
                }
                let idx = if bucket.len() == 1 {
                    0
                } else {
                    rand_index(bucket.len(), rng)
                };
                let id = bucket.swap_remove(idx);

                if self.queued.get(&id) != Some(&tier) {
                    continue;
                }
                self.queued.remove(&id);

                let live = graph
                    .node(id)
                    .is_some_and(|n| Tier::of(n.symbol()) == Some(tier));
                if live {
                    return Some((tier, id));
                }
            }
        }
        None
    }

    /// Number of queued ids, stale ones included.
    pub fn len(&self) -> usize {
        self.tiers.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::geometry::Rect;
    use crate::graph::NodeKind;

    fn rect() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 100.0)
    }

    #[test]
    fn tiers_follow_priority() {
        let mut g = Graph::new();
        g.track_changes();
        let garden = g.add_node(NodeKind::Garden(rect()));
        let ps = g.add_node(NodeKind::PathSystem {
            rect: rect(),
            intensity: 1,
        });
        let flower = g.add_node(NodeKind::FlowerArea(rect()));
        let area = g.add_node(NodeKind::Area {
            rect: rect(),
            depth: 0,
        });
        g.add_node(NodeKind::GrassRect(rect()));

        let mut agenda = Agenda::new();
        agenda.absorb(&mut g);
        assert_eq!(agenda.len(), 4);

        let mut rng = StdRng::seed_from_u64(0);
        let order: Vec<NodeId> = std::iter::from_fn(|| agenda.next(&g, &mut rng).map(|(_, id)| id))
            .collect();
        assert_eq!(order, vec![area, flower, ps, garden]);
        assert!(agenda.is_empty());
    }

    #[test]
    fn removed_and_relabeled_nodes_are_skipped() {
        let mut g = Graph::new();
        g.track_changes();
        let a = g.add_node(NodeKind::Area {
            rect: rect(),
            depth: 0,
        });
        let b = g.add_node(NodeKind::Area {
            rect: rect(),
            depth: 0,
        });
        let mut agenda = Agenda::new();
        agenda.absorb(&mut g);

        g.remove_node(a);
        g.replace(b, NodeKind::FlowerArea(rect()));
        agenda.absorb(&mut g);

        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(agenda.next(&g, &mut rng), Some((Tier::FlowerArea, b)));
        assert_eq!(agenda.next(&g, &mut rng), None);
    }

    #[test]
    fn scheduling_twice_queues_once() {
        let mut agenda = Agenda::new();
        agenda.schedule(7, Symbol::Area);
        agenda.schedule(7, Symbol::Area);
        agenda.schedule(8, Symbol::GrassRect);
        assert_eq!(agenda.len(), 1);
    }

    #[test]
    fn draws_are_uniform_within_a_tier() {
        let mut g = Graph::new();
        g.track_changes();
        let ids: Vec<NodeId> = (0..4)
            .map(|_| {
                g.add_node(NodeKind::Area {
                    rect: rect(),
                    depth: 0,
                })
            })
            .collect();
        let mut firsts = std::collections::HashSet::new();
        for seed in 0..64 {
            let mut agenda = Agenda::new();
            for &id in &ids {
                agenda.schedule(id, Symbol::Area);
            }
            let mut rng = StdRng::seed_from_u64(seed);
            if let Some((_, id)) = agenda.next(&g, &mut rng) {
                firsts.insert(id);
            }
        }
        assert_eq!(firsts.len(), 4);
    }
}
