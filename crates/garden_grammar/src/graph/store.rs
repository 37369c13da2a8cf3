//! Id-indexed node table with an undirected edge set.
use std::collections::{BTreeMap, BTreeSet};

use crate::geometry::Rect;
use crate::graph::{Edge, EdgeKind, Node, NodeId, NodeKind, Symbol};

/// Node and edge container the grammar rewrites.
///
/// Nodes are kept in id order so iteration is deterministic. Each unordered
/// pair of nodes holds at most one edge; the border payload is stored once and
/// reads the same from either endpoint.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: BTreeMap<NodeId, Node>,
    edges: BTreeMap<(NodeId, NodeId), Edge>,
    incident: BTreeMap<NodeId, BTreeSet<NodeId>>,
    next_id: NodeId,
    /// Nodes added or relabeled since the last [`Graph::take_touched`].
    /// `None` until a scheduler asks for it with [`Graph::track_changes`].
    touched: Option<Vec<NodeId>>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn edge_key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl Graph {
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
            incident: BTreeMap::new(),
            next_id: 1,
            touched: None,
        }
    }

    /// Inserts a node and returns its freshly allocated id.
    pub fn add_node(&mut self, kind: NodeKind) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.insert(id, Node { id, kind });
        self.log_change(id);
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Swaps the kind of an existing node, keeping its id and edges. Returns
    /// the previous kind, or `None` when the node does not exist.
    pub fn replace(&mut self, id: NodeId, kind: NodeKind) -> Option<NodeKind> {
        let node = self.nodes.get_mut(&id)?;
        let previous = std::mem::replace(&mut node.kind, kind);
        self.log_change(id);
        Some(previous)
    }

    /// Removes a node together with every edge touching it.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let node = self.nodes.remove(&id)?;
        if let Some(neighbors) = self.incident.remove(&id) {
            for other in neighbors {
                self.edges.remove(&edge_key(id, other));
                if let Some(set) = self.incident.get_mut(&other) {
                    set.remove(&id);
                }
            }
        }
        Some(node)
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    /// Nodes carrying `symbol`, in id order.
    pub fn nodes_with(&self, symbol: Symbol) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values().filter(move |n| n.symbol() == symbol)
    }

    pub fn count(&self, symbol: Symbol) -> usize {
        self.nodes_with(symbol).count()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// True while any node still carries a nonterminal symbol.
    pub fn has_nonterminals(&self) -> bool {
        self.nodes.values().any(|n| n.symbol().is_nonterminal())
    }

    /// Connects `a` and `b`. An existing edge between the pair is replaced.
    ///
    /// Returns `false` without changing anything when either endpoint is
    /// missing or both are the same node.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, kind: EdgeKind, border: Option<Rect>) -> bool {
        if a == b || !self.contains(a) || !self.contains(b) {
            return false;
        }
        let (lo, hi) = edge_key(a, b);
        self.edges.insert(
            (lo, hi),
            Edge {
                a: lo,
                b: hi,
                kind,
                border,
            },
        );
        self.incident.entry(lo).or_default().insert(hi);
        self.incident.entry(hi).or_default().insert(lo);
        true
    }

    /// Edge between `a` and `b` regardless of argument order.
    pub fn edge(&self, a: NodeId, b: NodeId) -> Option<&Edge> {
        self.edges.get(&edge_key(a, b))
    }

    /// All edges ordered by their endpoint ids.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.values()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Ids of the nodes sharing an edge with `id`.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.incident
            .get(&id)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Drops every edge of `kind`, leaving the nodes untouched.
    pub fn clear_edges(&mut self, kind: EdgeKind) {
        let doomed: Vec<(NodeId, NodeId)> = self
            .edges
            .iter()
            .filter(|(_, e)| e.kind == kind)
            .map(|(k, _)| *k)
            .collect();
        for (a, b) in doomed {
            self.edges.remove(&(a, b));
            if let Some(set) = self.incident.get_mut(&a) {
                set.remove(&b);
            }
            if let Some(set) = self.incident.get_mut(&b) {
                set.remove(&a);
            }
        }
        self.incident.retain(|_, set| !set.is_empty());
    }

    /// Starts recording added and relabeled nodes for [`Graph::take_touched`].
    ///
    /// Graphs used without a scheduler never record, so the log cannot grow
    /// unless someone drains it.
    pub(crate) fn track_changes(&mut self) {
        self.touched.get_or_insert_with(Vec::new);
    }

    pub(crate) fn is_tracking_changes(&self) -> bool {
        self.touched.is_some()
    }

    fn log_change(&mut self, id: NodeId) {
        if let Some(log) = self.touched.as_mut() {
            log.push(id);
        }
    }

    /// Drains the ids of nodes added or relabeled since the previous call.
    /// Empty while change tracking is off.
    pub(crate) fn take_touched(&mut self) -> Vec<NodeId> {
        self.touched.as_mut().map(std::mem::take).unwrap_or_default()
    }

    /// Consumes the graph, returning its nodes in id order.
    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes.into_values().collect()
    }
}
