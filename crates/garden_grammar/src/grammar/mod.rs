//! Production rules of the garden grammar.
//!
//! ```text
//! GARDEN      -> AREA + PATH_SYSTEM
//! AREA        -> AREA + AREA                      (depth > 0)
//! AREA        -> GRASS_RECT | FLOWER_AREA         (depth = 0)
//!              | GRASS_RECT + n * TREE_CIRCLE
//!              | GRASS_RECT + WATER_CIRCLE [+ WATER_CIRCLE + WATER_RECT]
//! FLOWER_AREA -> GRASS_RECT + 2 * ROSE_BED
//!              | GRASS_RECT + FOUNTAIN + 4 * TULIP_BED
//! PATH_SYSTEM -> n * PATH_RECT                    (one per sector border)
//! ```
//!
//! Each rule implements [`Production`]; a [`RuleSet`] maps symbols to the rules
//! that may rewrite them.
use std::collections::BTreeMap;

use rand::RngCore;

use crate::config::GardenParams;
use crate::graph::{Graph, Node, NodeId, Symbol};

pub mod area;
pub mod flower;
pub mod garden;
pub mod path;
pub mod terrain;

pub use area::{AreaSplit, AreaTerminal};
pub use flower::{FountainCourt, RoseBeds};
pub use garden::GardenSplit;
pub use path::PathNetwork;
pub use terrain::{pick_terrain, TerrainKind, TerrainWeights};

/// Shorter side below which a split half is rejected.
pub const MIN_SPLIT_SIDE: f32 = 35.0;

/// Everything a production may read or mutate while rewriting one node.
pub struct RewriteContext<'a> {
    pub graph: &'a mut Graph,
    pub params: &'a GardenParams,
    pub rng: &'a mut dyn RngCore,
}

/// What applying a production did to the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rewrite {
    /// The graph changed.
    Applied,
    /// The rule drew a candidate that violated a constraint and left the node
    /// as it was. The node stays pending.
    Rejected,
    /// The node was missing or not of the expected shape.
    Skipped,
}

/// A rewrite rule for one nonterminal symbol.
pub trait Production: Send + Sync {
    /// Short identifier used in logs and events.
    fn name(&self) -> &'static str;

    /// Symbol this rule rewrites.
    fn symbol(&self) -> Symbol;

    /// Guard deciding whether the rule may rewrite `node`. Defaults to any
    /// node carrying [`Production::symbol`].
    fn accepts(&self, node: &Node) -> bool {
        node.symbol() == self.symbol()
    }

    /// Rewrites node `id`.
    fn apply(&self, ctx: &mut RewriteContext<'_>, id: NodeId) -> Rewrite;
}

/// Productions registered per nonterminal symbol.
#[derive(Default)]
pub struct RuleSet {
    rules: BTreeMap<Symbol, Vec<Box<dyn Production>>>,
}

impl RuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// The garden grammar.
    pub fn standard() -> Self {
        Self::new()
            .with_rule(GardenSplit)
            .with_rule(AreaSplit)
            .with_rule(AreaTerminal)
            .with_rule(RoseBeds)
            .with_rule(FountainCourt)
            .with_rule(PathNetwork)
    }

    /// Registers a rule under its symbol.
    pub fn with_rule<P: Production + 'static>(mut self, rule: P) -> Self {
        self.push(Box::new(rule));
        self
    }

    pub fn push(&mut self, rule: Box<dyn Production>) {
        self.rules.entry(rule.symbol()).or_default().push(rule);
    }

    /// Rules registered for `symbol`, in registration order.
    pub fn rules_for(&self, symbol: Symbol) -> &[Box<dyn Production>] {
        self.rules.get(&symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rules for the node's symbol whose guard accepts it.
    pub fn applicable<'s>(&'s self, node: &Node) -> Vec<&'s dyn Production> {
        self.rules_for(node.symbol())
            .iter()
            .map(|r| r.as_ref())
            .filter(|r| r.accepts(node))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (symbol, rules) in &self.rules {
            let names: Vec<&str> = rules.iter().map(|r| r.name()).collect();
            map.entry(symbol, &names);
        }
        map.finish()
    }
}
