//! Arena-backed search tree with a best-first frontier.
//!
//! Nodes live in a `Vec` and refer to each other by [`NodeId`]. The frontier
//! holds every node that has not been expanded yet, ordered by lower bound
//! and then by creation order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use courier_core::SolveError;

use crate::node::{Node, NodeId};

#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    bound: f64,
    id: NodeId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    // `BinaryHeap` is a max-heap; reverse so the lowest bound pops first and
    // older nodes win ties.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .bound
            .total_cmp(&self.bound)
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// Every node created during one solve.
#[derive(Debug)]
pub(crate) struct SearchTree {
    nodes: Vec<Node>,
    frontier: BinaryHeap<FrontierEntry>,
    expanded: usize,
}

impl SearchTree {
    pub(crate) fn new(root: Node) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            frontier: BinaryHeap::new(),
            expanded: 0,
        };
        tree.push(root);
        tree
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = node.id();
        self.frontier.push(FrontierEntry {
            bound: node.lower_bound(),
            id,
        });
        self.nodes.push(node);
        id
    }

    const fn next_id(&self) -> NodeId {
        NodeId::new(self.nodes.len())
    }

    pub(crate) fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Nodes created so far, including the root.
    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Nodes that have been split into children.
    pub(crate) const fn expanded(&self) -> usize {
        self.expanded
    }

    /// Remove and return the frontier node with the smallest bound.
    pub(crate) fn pop_best(&mut self) -> Option<NodeId> {
        self.frontier.pop().map(|entry| entry.id)
    }

    /// Split `id` on its largest-regret edge into an include child and an
    /// exclude child, in that order.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::InternalInvariantViolation`] when `id` is unknown,
    /// already has children or offers no zero-cost edge to split on.
    pub(crate) fn expand(&mut self, id: NodeId) -> Result<(NodeId, NodeId), SolveError> {
        let include_id = self.next_id();
        let exclude_id = NodeId::new(include_id.index() + 1);

        let parent = self.node_mut(id).ok_or_else(|| unknown_node(id))?;
        if parent.children().is_some() {
            return Err(SolveError::InternalInvariantViolation {
                reason: format!("node {} has already been expanded", id.index()),
            });
        }
        let edge = parent
            .select_split_edge()
            .ok_or_else(|| SolveError::InternalInvariantViolation {
                reason: format!("node {} has no zero-cost edge to branch on", id.index()),
            })?;
        let parent_bound = parent.lower_bound();

        let mut include = parent.branch(include_id);
        include.add_edge_to_tour(edge);
        include.eliminate_subtours();
        include.calculate_lower_bound(parent_bound);

        let mut exclude = parent.branch(exclude_id);
        exclude.exclude_edge(edge);
        exclude.calculate_lower_bound(parent_bound);

        parent.set_children(include_id, exclude_id);
        self.expanded += 1;
        self.push(include);
        self.push(exclude);
        Ok((include_id, exclude_id))
    }

    /// Handles from `id` up to the root.
    pub(crate) fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), |current| {
            self.node(*current).and_then(Node::parent)
        })
    }
}

fn unknown_node(id: NodeId) -> SolveError {
    SolveError::InternalInvariantViolation {
        reason: format!("node {} is not part of the search tree", id.index()),
    }
}
