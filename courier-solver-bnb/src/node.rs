//! Search-tree nodes and the matrix operations of Little's algorithm.
//!
//! Each [`Node`] owns a private reduced copy of the cost matrix together
//! with its [`ConstraintMatrix`]. Children are deep copies of their parent,
//! so no node ever observes another node's edits.

use courier_core::{CostMatrix, Edge, UNREACHABLE};

use crate::constraint::{Axis, ConstraintMatrix, EdgeState, build_constraints};

/// Handle of a node inside a [`crate::search::SearchTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    pub(crate) const fn index(self) -> usize {
        self.0
    }
}

/// One state of the branch-and-bound search.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    id: NodeId,
    parent: Option<NodeId>,
    children: Option<(NodeId, NodeId)>,
    size: usize,
    reduced: Vec<f64>,
    constraints: ConstraintMatrix,
    lower_bound: f64,
    tour: Vec<Edge>,
    next_split: Option<Edge>,
}

impl Node {
    /// Build the root node for `matrix` and compute its lower bound.
    pub(crate) fn root(matrix: &CostMatrix) -> Self {
        let size = matrix.size();
        let mut node = Self {
            id: NodeId::new(0),
            parent: None,
            children: None,
            size,
            reduced: matrix.as_slice().to_vec(),
            constraints: build_constraints(size),
            lower_bound: 0.0,
            tour: Vec::with_capacity(size),
            next_split: None,
        };
        node.calculate_lower_bound(0.0);
        node
    }

    /// Copy this node into a fresh child with handle `id`.
    ///
    /// The child starts from the parent's bound; callers refine it with
    /// [`Node::calculate_lower_bound`] once its constraints are applied.
    pub(crate) fn branch(&self, id: NodeId) -> Self {
        Self {
            id,
            parent: Some(self.id),
            children: None,
            size: self.size,
            reduced: self.reduced.clone(),
            constraints: self.constraints.clone(),
            lower_bound: self.lower_bound,
            tour: self.tour.clone(),
            next_split: None,
        }
    }

    pub(crate) const fn id(&self) -> NodeId {
        self.id
    }

    pub(crate) const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub(crate) const fn children(&self) -> Option<(NodeId, NodeId)> {
        self.children
    }

    pub(crate) const fn set_children(&mut self, include: NodeId, exclude: NodeId) {
        self.children = Some((include, exclude));
    }

    pub(crate) const fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    pub(crate) const fn tour(&self) -> &[Edge] {
        self.tour.as_slice()
    }

    pub(crate) const fn next_split(&self) -> Option<Edge> {
        self.next_split
    }

    #[cfg(test)]
    pub(crate) const fn constraints(&self) -> &ConstraintMatrix {
        &self.constraints
    }

    pub(crate) fn reduced_cost(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.reduced.get(row * self.size + col).copied()
    }

    fn reduced_cost_mut(&mut self, row: usize, col: usize) -> Option<&mut f64> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.reduced.get_mut(row * self.size + col)
    }

    /// Reduced cost of `(row, col)` if the edge is still undecided.
    fn open_cost(&self, row: usize, col: usize) -> Option<f64> {
        if self.constraints.is_undecided(row, col) {
            self.reduced_cost(row, col)
        } else {
            None
        }
    }

    /// Smallest finite open cost on `line`, ignoring the cell at `skip`.
    fn line_minimum(&self, axis: Axis, line: usize, skip: Option<usize>) -> Option<f64> {
        (0..self.size)
            .filter(|&offset| Some(offset) != skip)
            .filter_map(|offset| {
                let (row, col) = axis.cell(line, offset);
                self.open_cost(row, col)
            })
            .filter(|cost| cost.is_finite())
            .min_by(f64::total_cmp)
    }

    /// Subtract each unresolved line's minimum open cost from that line.
    ///
    /// Lines already holding a committed edge are skipped. Returns the sum of
    /// the subtracted minima, or [`UNREACHABLE`] as soon as an unresolved line
    /// has no finite open cell left.
    #[expect(
        clippy::float_arithmetic,
        reason = "matrix reduction subtracts floating-point costs"
    )]
    pub(crate) fn reduce(&mut self, axis: Axis) -> f64 {
        let mut total = 0.0;
        for line in 0..self.size {
            if self.constraints.line_has_used(axis, line) {
                continue;
            }
            let Some(minimum) = self.line_minimum(axis, line, None) else {
                return UNREACHABLE;
            };
            if minimum > 0.0 {
                for offset in 0..self.size {
                    let (row, col) = axis.cell(line, offset);
                    if !self.constraints.is_undecided(row, col) {
                        continue;
                    }
                    if let Some(cost) = self.reduced_cost_mut(row, col) {
                        *cost -= minimum;
                    }
                }
            }
            total += minimum;
        }
        total
    }

    /// Reduce rows then columns and add the parent's bound.
    ///
    /// Returns and stores the new bound, [`UNREACHABLE`] when the node cannot
    /// be completed.
    #[expect(
        clippy::float_arithmetic,
        reason = "bounds are sums of floating-point reductions"
    )]
    pub(crate) fn calculate_lower_bound(&mut self, parent_bound: f64) -> f64 {
        let rows = self.reduce(Axis::Rows);
        let columns = if rows.is_finite() {
            self.reduce(Axis::Columns)
        } else {
            UNREACHABLE
        };
        self.lower_bound = if columns.is_finite() {
            parent_bound + rows + columns
        } else {
            UNREACHABLE
        };
        self.lower_bound
    }

    /// Penalty for not using the zero-cost edge `(row, col)`.
    #[expect(
        clippy::float_arithmetic,
        reason = "regret adds two floating-point minima"
    )]
    fn regret(&self, row: usize, col: usize) -> f64 {
        let leaving = self
            .line_minimum(Axis::Rows, row, Some(col))
            .unwrap_or(UNREACHABLE);
        let entering = self
            .line_minimum(Axis::Columns, col, Some(row))
            .unwrap_or(UNREACHABLE);
        leaving + entering
    }

    /// Choose the zero-cost open edge with the largest regret.
    ///
    /// Ties go to the first edge in row-major order. Returns `None` when no
    /// open edge has zero reduced cost.
    pub(crate) fn select_split_edge(&mut self) -> Option<Edge> {
        let mut best: Option<(Edge, f64)> = None;
        for row in 0..self.size {
            for col in 0..self.size {
                if !self.open_cost(row, col).is_some_and(|cost| cost == 0.0) {
                    continue;
                }
                let regret = self.regret(row, col);
                if best.is_none_or(|(_, best_regret)| regret > best_regret) {
                    best = Some((Edge::new(row, col), regret));
                }
            }
        }
        self.next_split = best.map(|(edge, _)| edge);
        self.next_split
    }

    /// Mark `edge` forbidden and make it unaffordable.
    fn forbid(&mut self, edge: Edge) {
        self.constraints
            .set(edge.from, edge.to, EdgeState::Forbidden);
        if let Some(cost) = self.reduced_cost_mut(edge.from, edge.to) {
            *cost = UNREACHABLE;
        }
    }

    /// Commit `edge` to the tour.
    ///
    /// Every other edge leaving `edge.from` or entering `edge.to` is
    /// forbidden, as is the reverse edge unless only two stops exist (then
    /// the reverse edge closes the only tour).
    pub(crate) fn add_edge_to_tour(&mut self, edge: Edge) {
        for offset in 0..self.size {
            self.constraints
                .set(edge.from, offset, EdgeState::Forbidden);
            self.constraints.set(offset, edge.to, EdgeState::Forbidden);
        }
        self.constraints.set(edge.from, edge.to, EdgeState::Used);
        if self.size > 2 {
            self.forbid(edge.reversed());
        }
        self.tour.push(edge);
    }

    /// Rule `edge` out without touching any other cell.
    pub(crate) fn exclude_edge(&mut self, edge: Edge) {
        self.forbid(edge);
    }

    /// Forbid every edge that would close a chain of committed edges into a
    /// cycle shorter than the full tour.
    pub(crate) fn eliminate_subtours(&mut self) {
        let successors = self.constraints.successors();
        let mut has_predecessor = vec![false; self.size];
        for &to in successors.iter().flatten() {
            if let Some(flag) = has_predecessor.get_mut(to) {
                *flag = true;
            }
        }

        for head in 0..self.size {
            if has_predecessor.get(head).copied().unwrap_or(true) {
                continue;
            }
            let mut tail = head;
            let mut length = 0;
            while let Some(next) = successors.get(tail).copied().flatten() {
                tail = next;
                length += 1;
                if length >= self.size {
                    break;
                }
            }
            if length > 0 && length + 1 < self.size && self.constraints.is_undecided(tail, head) {
                self.forbid(Edge::new(tail, head));
            }
        }
    }

    /// Whether every stop has exactly one committed outgoing edge.
    pub(crate) fn is_complete_tour(&self) -> bool {
        (0..self.size).all(|row| self.constraints.used_in_row(row) == 1)
    }
}
