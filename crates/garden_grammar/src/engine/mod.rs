//! Grammar engine: schedules nonterminals and applies productions until the
//! graph holds only terminals.
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info, warn};

use crate::config::{validate_working_rect, GardenParams, Plot};
use crate::error::Result;
use crate::geometry::Rect;
use crate::grammar::{Production, Rewrite, RewriteContext, RuleSet};
use crate::graph::adjacency::rebuild_adjacency;
use crate::graph::{Graph, Node, NodeKind};
use crate::sampling::rand_index;

pub mod agenda;
pub mod events;

pub use agenda::{Agenda, Tier};
pub use events::{EventSink, FnSink, GrammarEvent, GrammarEventKind, VecSink};

/// Step budget used by [`run_garden`].
pub const DEFAULT_MAX_STEPS: usize = 1500;

/// Strip thickness of the borders computed before paths are laid.
pub const ADJACENCY_THICKNESS: f32 = 10.0;

/// Summary of a [`GrammarEngine::run`].
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunOutcome {
    /// Steps that made progress during the run.
    pub steps: usize,
    /// True when no nonterminal is left.
    pub complete: bool,
    /// Nodes in the graph when the run stopped.
    pub nodes: usize,
}

/// Derives a garden layout from a single GARDEN node.
///
/// The engine owns the graph and the random generator; every production draws
/// from that generator, so a seed and the inputs fully determine the result.
pub struct GrammarEngine<R: RngCore = StdRng> {
    graph: Graph,
    params: GardenParams,
    rules: RuleSet,
    rng: R,
    agenda: Agenda,
    steps: usize,
}

impl<R: RngCore> GrammarEngine<R> {
    /// Creates an engine for the working rectangle `working`, validating the
    /// inputs first.
    pub fn try_new(working: Rect, params: GardenParams, rng: R) -> Result<Self> {
        params.validate()?;
        validate_working_rect(&working)?;
        Ok(Self::new(working, params, rng))
    }

    /// Creates an engine for the working rectangle of `plot`.
    pub fn for_plot(plot: &Plot, params: GardenParams, rng: R) -> Result<Self> {
        plot.validate()?;
        Self::try_new(plot.working_rect(), params, rng)
    }

    /// Creates an engine without validating the inputs beyond debug
    /// assertions.
    pub fn new(working: Rect, params: GardenParams, rng: R) -> Self {
        debug_assert!(working.is_positive(), "working rect must have positive extent");
        debug_assert!(params.validate().is_ok(), "garden params out of range");

        let mut graph = Graph::new();
        graph.track_changes();
        graph.add_node(NodeKind::Garden(working));
        let mut agenda = Agenda::new();
        agenda.absorb(&mut graph);

        Self {
            graph,
            params,
            rules: RuleSet::standard(),
            rng,
            agenda,
            steps: 0,
        }
    }

    /// Replaces the productions used by later steps.
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }

    pub fn params(&self) -> &GardenParams {
        &self.params
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Steps that made progress since the engine was created.
    pub fn steps_taken(&self) -> usize {
        self.steps
    }

    pub fn is_complete(&self) -> bool {
        !self.graph.has_nonterminals()
    }

    /// Nonterminal nodes still waiting to be rewritten.
    pub fn pending(&self) -> usize {
        self.graph
            .nodes()
            .filter(|n| n.symbol().is_nonterminal())
            .count()
    }

    /// Nodes ordered for drawing: by [`Symbol::draw_layer`](crate::graph::Symbol::draw_layer),
    /// then by id.
    pub fn layout(&self) -> Vec<&Node> {
        layout(&self.graph)
    }

    /// Performs one rewrite. Returns whether the graph progressed.
    pub fn step(&mut self) -> bool {
        self.step_with_events(&mut ())
    }

    pub fn step_with_events(&mut self, sink: &mut dyn EventSink) -> bool {
        self.agenda.absorb(&mut self.graph);
        let Some((tier, id)) = self.agenda.next(&self.graph, &mut self.rng) else {
            return false;
        };

        if tier == Tier::PathSystem {
            let edges = rebuild_adjacency(&mut self.graph, ADJACENCY_THICKNESS);
            if sink.wants(GrammarEventKind::AdjacencyRebuilt) {
                sink.send(GrammarEvent::AdjacencyRebuilt { edges });
            }
        }

        let Some(node) = self.graph.node(id).copied() else {
            return false;
        };
        let Some(rule) = pick_rule(&self.rules, &node, &mut self.rng) else {
            warn!("No production accepts node {} ({}).", id, node.symbol());
            if sink.wants(GrammarEventKind::Warning) {
                sink.send(GrammarEvent::Warning {
                    context: format!("node:{} symbol:{}", id, node.symbol()),
                    message: "No production accepts this node".into(),
                });
            }
            self.agenda.schedule(id, node.symbol());
            return false;
        };

        let mut ctx = RewriteContext {
            graph: &mut self.graph,
            params: &self.params,
            rng: &mut self.rng,
        };
        let outcome = rule.apply(&mut ctx, id);
        let production = rule.name();

        self.agenda.absorb(&mut self.graph);
        if let Some(still) = self.graph.node(id) {
            self.agenda.schedule(id, still.symbol());
        }

        let progressed = outcome != Rewrite::Skipped;
        if progressed {
            self.steps += 1;
            debug!(
                "Step {}: {} on node {} ({}) -> {:?}.",
                self.steps,
                production,
                id,
                node.symbol(),
                outcome
            );
        } else {
            warn!(
                "Production {} skipped node {} ({}).",
                production,
                id,
                node.symbol()
            );
        }

        if sink.wants(GrammarEventKind::RuleApplied) {
            sink.send(GrammarEvent::RuleApplied {
                step: self.steps,
                node: id,
                symbol: node.symbol(),
                production,
                outcome,
            });
        }

        progressed
    }

    /// Steps until no rewrite makes progress or `max_steps` is reached.
    pub fn run(&mut self, max_steps: usize) -> RunOutcome {
        self.run_with_events(max_steps, &mut ())
    }

    pub fn run_with_events(&mut self, max_steps: usize, sink: &mut dyn EventSink) -> RunOutcome {
        info!(
            "Deriving garden: {} nodes, budget {} steps.",
            self.graph.node_count(),
            max_steps
        );
        if sink.wants(GrammarEventKind::RunStarted) {
            sink.send(GrammarEvent::RunStarted {
                max_steps,
                nodes: self.graph.node_count(),
            });
        }

        let mut steps = 0;
        while steps < max_steps && self.step_with_events(sink) {
            steps += 1;
        }

        let outcome = RunOutcome {
            steps,
            complete: self.is_complete(),
            nodes: self.graph.node_count(),
        };

        if !outcome.complete {
            let pending = self.pending();
            warn!(
                "Derivation stopped after {} steps with {} nonterminals pending.",
                steps, pending
            );
            if steps == max_steps && sink.wants(GrammarEventKind::BudgetExhausted) {
                sink.send(GrammarEvent::BudgetExhausted { steps, pending });
            }
        }

        info!(
            "Derivation finished: {} steps, {} nodes, complete: {}.",
            outcome.steps, outcome.nodes, outcome.complete
        );
        if sink.wants(GrammarEventKind::RunFinished) {
            sink.send(GrammarEvent::RunFinished { outcome });
        }

        outcome
    }
}

/// Uniform choice among the productions accepting `node`. Draws nothing when
/// only one applies.
fn pick_rule<'r>(
    rules: &'r RuleSet,
    node: &Node,
    rng: &mut dyn RngCore,
) -> Option<&'r dyn Production> {
    let mut applicable = rules.applicable(node);
    match applicable.len() {
        0 => None,
        1 => applicable.pop(),
        n => Some(applicable.swap_remove(rand_index(n, rng))),
    }
}

impl GrammarEngine<StdRng> {
    /// Engine with a [`StdRng`] seeded from `seed`.
    pub fn seeded(working: Rect, params: GardenParams, seed: u64) -> Result<Self> {
        Self::try_new(working, params, StdRng::seed_from_u64(seed))
    }
}

/// Nodes of `graph` ordered for drawing.
pub fn layout(graph: &Graph) -> Vec<&Node> {
    let mut nodes: Vec<&Node> = graph.nodes().collect();
    nodes.sort_by_key(|n| (n.symbol().draw_layer(), n.id));
    nodes
}

/// Derives a garden for `plot` with a seeded generator and the default step
/// budget, returning the finished graph and the run summary.
pub fn run_garden(plot: &Plot, params: GardenParams, seed: u64) -> Result<(Graph, RunOutcome)> {
    let mut engine = GrammarEngine::for_plot(plot, params, StdRng::seed_from_u64(seed))?;
    let outcome = engine.run(DEFAULT_MAX_STEPS);
    Ok((engine.into_graph(), outcome))
}
