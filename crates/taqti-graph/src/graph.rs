// Automaton storage: weight-class nodes, directed edges, and the
// bad-combination table consulted when edges are created.

use hashbrown::HashMap;
use taqti_core::WeightClass;

/// Dense node identifier, assigned monotonically at creation.
pub type NodeId = usize;

/// A node of the meter automaton.
#[derive(Debug, Clone)]
pub struct Node {
    /// Identifier; equals the node's index in the graph.
    pub id: NodeId,
    /// Weight class. `Start` only for node 0.
    pub class: WeightClass,
    /// True if a path may legally terminate at this node.
    pub ending: bool,
}

/// A directed edge of the meter automaton.
///
/// At most one edge exists per ordered node pair; re-adding an edge
/// replaces its attributes.
#[derive(Debug, Clone)]
pub struct Edge {
    /// Target node.
    pub to: NodeId,
    /// Traversal-order tie-break; lower weight is tried first.
    pub weight: u32,
    /// True for "skip this prefix" shortcut edges wired around an
    /// optional component.
    pub optional: bool,
    /// If any complete scan already exists, this edge must not be taken.
    pub skip_if_matched: bool,
    /// Forbidden (previous-production, next-production) pairs: choosing
    /// this edge is disallowed when the previous accepted match produced
    /// the first element and the candidate produces the second.
    pub bad_combos: Vec<(&'static str, &'static str)>,
}

/// Forbidden adjacent-production pairs keyed by the structural
/// (source weight class, target weight class) pair of an edge.
///
/// Consulted once at edge-construction time; the matching pairs are
/// attached to the edge itself.
#[derive(Debug, Clone, Default)]
pub struct BadComboTable {
    map: HashMap<(WeightClass, WeightClass), Vec<(&'static str, &'static str)>>,
}

impl BadComboTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forbid the given production pairs on edges from `from`-class nodes
    /// to `to`-class nodes.
    pub fn forbid(
        &mut self,
        from: WeightClass,
        to: WeightClass,
        pairs: &[(&'static str, &'static str)],
    ) {
        self.map.entry((from, to)).or_default().extend_from_slice(pairs);
    }

    /// Forbidden pairs for an edge between the given weight classes.
    pub fn forbidden(&self, from: WeightClass, to: WeightClass) -> &[(&'static str, &'static str)] {
        self.map.get(&(from, to)).map_or(&[], Vec::as_slice)
    }
}

/// The compiled meter automaton: a directed graph of weight-class nodes.
///
/// Node 0 always exists, has class `Start`, and is never a match target.
/// Every other node is reachable from node 0 by construction. The graph is
/// immutable once scanning starts and may be shared across concurrent
/// scans of different phrases.
#[derive(Debug, Clone)]
pub struct MeterGraph {
    nodes: Vec<Node>,
    /// Outgoing edges, parallel to `nodes`, in insertion order.
    edges: Vec<Vec<Edge>>,
}

impl MeterGraph {
    /// Create a graph containing only the start node.
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node {
                id: 0,
                class: WeightClass::Start,
                ending: false,
            }],
            edges: vec![Vec::new()],
        }
    }

    /// Number of nodes, including the start node.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Access a node by id.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Outgoing edges of a node, in insertion order.
    pub fn edges(&self, id: NodeId) -> &[Edge] {
        &self.edges[id]
    }

    /// Outgoing edges sorted ascending by weight.
    ///
    /// The sort is stable, so edges of equal weight keep insertion order
    /// (first-wired is tried first).
    pub fn sorted_successors(&self, id: NodeId) -> Vec<&Edge> {
        let mut out: Vec<&Edge> = self.edges[id].iter().collect();
        out.sort_by_key(|e| e.weight);
        out
    }

    /// Append a node of the given weight class and return its id.
    pub(crate) fn add_node(&mut self, class: WeightClass) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            id,
            class,
            ending: false,
        });
        self.edges.push(Vec::new());
        id
    }

    /// Mark a node as a legal path terminus.
    pub(crate) fn set_ending(&mut self, id: NodeId) {
        self.nodes[id].ending = true;
    }

    /// Wire an edge `from -> to`, attaching any bad-combination pairs the
    /// table declares for the structural class pair. Re-wiring an existing
    /// ordered pair replaces the edge's attributes.
    pub(crate) fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        weight: u32,
        optional: bool,
        skip_if_matched: bool,
        combos: &BadComboTable,
    ) {
        let bad_combos = combos
            .forbidden(self.nodes[from].class, self.nodes[to].class)
            .to_vec();
        let edge = Edge {
            to,
            weight,
            optional,
            skip_if_matched,
            bad_combos,
        };
        if let Some(existing) = self.edges[from].iter_mut().find(|e| e.to == to) {
            *existing = edge;
        } else {
            self.edges[from].push(edge);
        }
    }
}
