// Graph construction: appending segments and forks to the automaton.
//
// Components are appended left to right; each component attaches to the
// end nodes of the previous one (the frontier). When the previous
// component is optional, the new component's first node additionally
// receives an optional skip edge from the nodes *before* the optional
// component, so the optional component can be bypassed entirely.
//
// Known limitation: only the single immediately-previous component is
// consulted for skip wiring, so two consecutive optional components do
// not chain their skips.

use log::debug;
use taqti_core::WeightClass;

use crate::MeterError;
use crate::graph::{BadComboTable, MeterGraph, NodeId};

/// Optionality of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Optionality {
    /// The component must be traversed.
    #[default]
    NotOptional,
    /// The component may be skipped.
    Optional,
    /// The component may be skipped, but traversing it is preferred.
    OptionalPreferred,
}

impl Optionality {
    /// True for both optional variants.
    pub fn is_optional(self) -> bool {
        !matches!(self, Optionality::NotOptional)
    }
}

/// One alternative of a fork.
#[derive(Debug, Clone)]
pub struct Branch {
    /// Weight symbols of the branch (`=`/`-`).
    pub syllables: String,
    /// Mark the branch's last node as a legal terminus.
    pub ending: bool,
    /// Repeat request. Repeats are only honored at fork level; a repeat
    /// on an individual branch is recorded but never wired.
    pub repeats: bool,
    /// Traversal-order key for the branch's entry edges; lower is tried
    /// first, so the first-listed alternative wins ties.
    pub weight: u32,
    /// If set, the branch's entry edges are skipped once any complete
    /// scan exists (fallback-only branch).
    pub skip_if_matched: bool,
}

impl Branch {
    /// A plain branch with the given symbols and sibling weight.
    pub fn new(syllables: impl Into<String>, weight: u32) -> Self {
        Self {
            syllables: syllables.into(),
            ending: false,
            repeats: false,
            weight,
            skip_if_matched: false,
        }
    }
}

/// Options for appending a linear segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentOptions {
    /// Mark the segment's last node as a legal terminus.
    pub ending: bool,
    /// Wire a self-loop from the segment's last node back to its first.
    pub repeats: bool,
    /// Optionality of the segment.
    pub optional: Optionality,
}

/// A built linear chain of weight nodes.
#[derive(Debug, Clone)]
pub struct MeterSegment {
    pub syllables: String,
    pub ending: bool,
    pub repeats: bool,
    pub optional: Optionality,
    pub start_node: NodeId,
    pub end_node: NodeId,
}

/// A set of alternative segments sharing entry (and, when repeating,
/// exit) wiring.
#[derive(Debug, Clone)]
pub struct Fork {
    pub segments: Vec<MeterSegment>,
    pub optional: Optionality,
}

/// A built component: either a single segment or a fork.
#[derive(Debug, Clone)]
pub enum Component {
    Segment(MeterSegment),
    Fork(Fork),
}

impl Component {
    /// The last node of the component's chain(s): where the next
    /// component attaches.
    pub fn end_nodes(&self) -> Vec<NodeId> {
        match self {
            Component::Segment(s) => vec![s.end_node],
            Component::Fork(f) => f.segments.iter().map(|s| s.end_node).collect(),
        }
    }

    /// Optionality of the component.
    pub fn optional(&self) -> Optionality {
        match self {
            Component::Segment(s) => s.optional,
            Component::Fork(f) => f.optional,
        }
    }
}

/// Builder for the meter automaton.
///
/// Owns the graph under construction, the append-only component list that
/// determines where the next component attaches, and the bad-combination
/// table consulted at every edge creation.
#[derive(Debug)]
pub struct GraphBuilder {
    graph: MeterGraph,
    components: Vec<Component>,
    combos: BadComboTable,
}

impl GraphBuilder {
    /// Create a builder with the given bad-combination table.
    pub fn new(combos: BadComboTable) -> Self {
        Self {
            graph: MeterGraph::new(),
            components: Vec::new(),
            combos,
        }
    }

    /// Finish construction and return the immutable automaton.
    pub fn finish(self) -> MeterGraph {
        self.graph
    }

    /// The built components, in append order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// End nodes of the last component and its optionality, or the start
    /// node when nothing has been appended yet.
    fn frontier(&self) -> (Vec<NodeId>, Optionality) {
        match self.components.last() {
            Some(c) => (c.end_nodes(), c.optional()),
            None => (vec![0], Optionality::NotOptional),
        }
    }

    /// Skip-edge sources when the previous component is optional: the end
    /// nodes of the component before it, or the start node if there is
    /// none. Only one component back is consulted.
    fn skip_sources(&self) -> Vec<NodeId> {
        if self.components.len() >= 2 {
            self.components[self.components.len() - 2].end_nodes()
        } else {
            vec![0]
        }
    }

    fn parse_syllables(syllables: &str) -> Result<Vec<WeightClass>, MeterError> {
        if syllables.is_empty() {
            return Err(MeterError::EmptySegment);
        }
        syllables
            .chars()
            .map(|c| WeightClass::from_symbol(c).ok_or(MeterError::InvalidSymbol { symbol: c }))
            .collect()
    }

    /// Build one chain of nodes for `classes`, starting from `prev_nodes`.
    ///
    /// Wires the optional skip edge into the chain's first node when the
    /// previous component was optional. Entry edges carry `entry_weight`
    /// and `skip_if_matched`; interior edges are plain. Returns the
    /// (start, end) node ids.
    fn build_chain(
        &mut self,
        classes: &[WeightClass],
        prev_nodes: &[NodeId],
        prev_optional: Optionality,
        ending: bool,
        entry_weight: u32,
        skip_if_matched: bool,
    ) -> (NodeId, NodeId) {
        let mut curr_nodes: Vec<NodeId> = prev_nodes.to_vec();
        let mut start_node = 0;
        let mut end_node = 0;
        let last = classes.len() - 1;

        for (i, &class) in classes.iter().enumerate() {
            let new_node = self.graph.add_node(class);
            if i == 0 {
                start_node = new_node;
            }
            if i == last {
                end_node = new_node;
                if ending {
                    self.graph.set_ending(new_node);
                }
            }

            let (weight, skip) = if i == 0 {
                (entry_weight, skip_if_matched)
            } else {
                (0, false)
            };
            for &from in &curr_nodes {
                self.graph.add_edge(from, new_node, weight, false, skip, &self.combos);
            }
            curr_nodes = vec![new_node];

            if i == 0 && prev_optional.is_optional() {
                let sources = self.skip_sources();
                debug!("optional skip edges {:?} -> {}", sources, start_node);
                for from in sources {
                    self.graph
                        .add_edge(from, start_node, entry_weight, true, skip_if_matched, &self.combos);
                }
            }
        }
        (start_node, end_node)
    }

    /// Append a linear segment of weight symbols.
    pub fn add_segment(&mut self, syllables: &str, opts: SegmentOptions) -> Result<(), MeterError> {
        let classes = Self::parse_syllables(syllables)?;
        let (prev_nodes, prev_optional) = self.frontier();
        debug!(
            "add_segment {:?} ending={} repeats={} optional={:?} after {:?}",
            syllables, opts.ending, opts.repeats, opts.optional, prev_nodes
        );

        let (start_node, end_node) =
            self.build_chain(&classes, &prev_nodes, prev_optional, opts.ending, 0, false);

        if opts.repeats {
            self.graph.add_edge(end_node, start_node, 0, false, false, &self.combos);
        }

        self.components.push(Component::Segment(MeterSegment {
            syllables: syllables.to_string(),
            ending: opts.ending,
            repeats: opts.repeats,
            optional: opts.optional,
            start_node,
            end_node,
        }));
        Ok(())
    }

    /// Append a fork of alternative branches.
    ///
    /// All branches share the same predecessor set; interior nodes are
    /// never shared. When `repeats` is set, loop edges are wired from
    /// every branch end back to every branch start, so any branch may
    /// repeat into any branch.
    pub fn add_fork(
        &mut self,
        branches: &[Branch],
        optional: Optionality,
        repeats: bool,
    ) -> Result<(), MeterError> {
        if branches.is_empty() {
            return Err(MeterError::EmptyFork);
        }
        let (prev_nodes, prev_optional) = self.frontier();
        debug!(
            "add_fork {} branches repeats={} optional={:?} after {:?}",
            branches.len(),
            repeats,
            optional,
            prev_nodes
        );

        let mut segments = Vec::with_capacity(branches.len());
        let mut branch_starts = Vec::with_capacity(branches.len());
        let mut branch_ends = Vec::with_capacity(branches.len());

        for branch in branches {
            let classes = Self::parse_syllables(&branch.syllables)?;
            let (start_node, end_node) = self.build_chain(
                &classes,
                &prev_nodes,
                prev_optional,
                branch.ending,
                branch.weight,
                branch.skip_if_matched,
            );
            branch_starts.push(start_node);
            branch_ends.push(end_node);
            if branch.repeats {
                // Repeats on individual branches are not wired; only the
                // fork-level repeat below creates loop edges.
                debug!("ignoring repeat on branch {:?}", branch.syllables);
            }
            segments.push(MeterSegment {
                syllables: branch.syllables.clone(),
                ending: branch.ending,
                repeats: branch.repeats,
                optional,
                start_node,
                end_node,
            });
        }

        if repeats {
            for &start in &branch_starts {
                for &end in &branch_ends {
                    self.graph.add_edge(end, start, 0, false, false, &self.combos);
                }
            }
        }

        self.components.push(Component::Fork(Fork { segments, optional }));
        Ok(())
    }
}
