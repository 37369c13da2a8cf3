//! Event types and sinks for observing derivations.
//!
//! [`GrammarEvent`]s are emitted by
//! [`GrammarEngine::run_with_events`](crate::engine::GrammarEngine::run_with_events)
//! and [`GrammarEngine::step_with_events`](crate::engine::GrammarEngine::step_with_events).
use crate::engine::RunOutcome;
use crate::grammar::Rewrite;
use crate::graph::{NodeId, Symbol};

/// Describes events emitted while a grammar is derived.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum GrammarEvent {
    /// Emitted when a run starts.
    RunStarted {
        /// Step budget of the run.
        max_steps: usize,
        /// Nodes in the graph when the run started.
        nodes: usize,
    },

    /// Emitted after a production was applied to a node, including rewrites
    /// that were rejected and left the node pending.
    RuleApplied {
        /// Engine step counter after this step.
        step: usize,
        /// Rewritten node.
        node: NodeId,
        /// Symbol the node carried before the rewrite.
        symbol: Symbol,
        /// Name of the production.
        production: &'static str,
        /// What the production did.
        outcome: Rewrite,
    },

    /// Emitted after adjacency was recomputed ahead of path layout.
    AdjacencyRebuilt {
        /// Adjacency edges now in the graph.
        edges: usize,
    },

    /// Emitted when a run stops on its budget with nonterminals pending.
    BudgetExhausted {
        /// Steps taken by the run.
        steps: usize,
        /// Nonterminal nodes left.
        pending: usize,
    },

    /// Emitted when a run ends.
    RunFinished {
        /// Summary of the run.
        outcome: RunOutcome,
    },

    /// Non-fatal warning generated during derivation.
    Warning {
        /// Context string (e.g. node id and symbol).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

impl GrammarEvent {
    pub fn kind(&self) -> GrammarEventKind {
        match self {
            GrammarEvent::RunStarted { .. } => GrammarEventKind::RunStarted,
            GrammarEvent::RuleApplied { .. } => GrammarEventKind::RuleApplied,
            GrammarEvent::AdjacencyRebuilt { .. } => GrammarEventKind::AdjacencyRebuilt,
            GrammarEvent::BudgetExhausted { .. } => GrammarEventKind::BudgetExhausted,
            GrammarEvent::RunFinished { .. } => GrammarEventKind::RunFinished,
            GrammarEvent::Warning { .. } => GrammarEventKind::Warning,
        }
    }
}

/// Payload-free discriminant of [`GrammarEvent`], used to filter sinks.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammarEventKind {
    RunStarted,
    RuleApplied,
    AdjacencyRebuilt,
    BudgetExhausted,
    RunFinished,
    Warning,
}

/// A generic event sink that accepts [`GrammarEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: GrammarEvent);

    /// Whether events of `kind` should be built at all. The engine skips
    /// constructing events a sink does not want.
    fn wants(&self, _kind: GrammarEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = GrammarEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: GrammarEvent) {}

    #[inline]
    fn wants(&self, _kind: GrammarEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(GrammarEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(GrammarEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(GrammarEvent),
{
    #[inline]
    fn send(&mut self, event: GrammarEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally only some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<GrammarEvent>,
    only: Option<Vec<GrammarEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink that keeps only events of the given kinds.
    pub fn only(kinds: impl IntoIterator<Item = GrammarEventKind>) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.into_iter().collect()),
        }
    }

    pub fn into_inner(self) -> Vec<GrammarEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[GrammarEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: GrammarEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: GrammarEventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}
