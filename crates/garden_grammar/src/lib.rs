#![forbid(unsafe_code)]
//! garden_grammar: procedural garden layouts derived by graph rewriting.
//!
//! Modules:
//! - geometry: rectangles, circles, splits, borders and grid snapping
//! - graph: typed node/edge store and sector adjacency
//! - grammar: production rules and the rule set
//! - engine: priority scheduling, runs and events
//! - sampling: seeded random draws and circle scattering
//! - config: garden parameters and plot dimensions
//!
//! For a rendered example, see the `garden_grammar_examples` crate.
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod grammar;
pub mod graph;
pub mod sampling;

/// Convenient re-exports for common types. Import with `use garden_grammar::prelude::*;`.
pub mod prelude {
    pub use crate::config::{GardenParams, Plot};
    pub use crate::engine::{
        layout, run_garden, EventSink, FnSink, GrammarEngine, GrammarEvent, GrammarEventKind,
        RunOutcome, VecSink, DEFAULT_MAX_STEPS,
    };
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{Circle, Rect};
    pub use crate::grammar::{Production, Rewrite, RewriteContext, RuleSet};
    pub use crate::graph::{Edge, EdgeKind, Graph, Node, NodeId, NodeKind, Shape, Symbol};
    pub use crate::sampling::CircleScatter;
}
