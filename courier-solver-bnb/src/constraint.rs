//! Per-edge branching decisions.
//!
//! Every ordered pair of stops is `Undecided` until the search either commits
//! it to the tour (`Used`) or rules it out (`Forbidden`).

use courier_core::Edge;

/// Branching state of a single directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeState {
    /// Still open for the search to decide.
    Undecided,
    /// Committed to the tour.
    Used,
    /// Excluded from every tour below this node.
    Forbidden,
}

/// Orientation of a matrix line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Lines are rows: outgoing edges of one stop.
    Rows,
    /// Lines are columns: incoming edges of one stop.
    Columns,
}

impl Axis {
    /// `(row, column)` of the `offset`-th cell on `line`.
    #[must_use]
    pub const fn cell(self, line: usize, offset: usize) -> (usize, usize) {
        match self {
            Self::Rows => (line, offset),
            Self::Columns => (offset, line),
        }
    }
}

/// Square matrix of [`EdgeState`]s.
///
/// # Examples
/// ```
/// use courier_solver_bnb::{EdgeState, build_constraints};
///
/// let constraints = build_constraints(3);
/// assert_eq!(constraints.state(1, 1), Some(EdgeState::Forbidden));
/// assert_eq!(constraints.state(1, 2), Some(EdgeState::Undecided));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintMatrix {
    size: usize,
    cells: Vec<EdgeState>,
}

/// Initial constraints for `size` stops: every self-loop is forbidden and
/// every other edge is undecided.
#[must_use]
pub fn build_constraints(size: usize) -> ConstraintMatrix {
    let cells = (0..size)
        .flat_map(|row| {
            (0..size).map(move |col| {
                if row == col {
                    EdgeState::Forbidden
                } else {
                    EdgeState::Undecided
                }
            })
        })
        .collect();
    ConstraintMatrix { size, cells }
}

impl ConstraintMatrix {
    /// Number of stops.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// State of the edge `(row, col)`, or `None` when out of range.
    #[must_use]
    pub fn state(&self, row: usize, col: usize) -> Option<EdgeState> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells.get(row * self.size + col).copied()
    }

    /// Whether `(row, col)` is still open.
    #[must_use]
    pub fn is_undecided(&self, row: usize, col: usize) -> bool {
        self.state(row, col) == Some(EdgeState::Undecided)
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, state: EdgeState) {
        if row >= self.size || col >= self.size {
            return;
        }
        if let Some(cell) = self.cells.get_mut(row * self.size + col) {
            *cell = state;
        }
    }

    /// Whether the line already holds a committed edge.
    #[must_use]
    pub fn line_has_used(&self, axis: Axis, line: usize) -> bool {
        (0..self.size).any(|offset| {
            let (row, col) = axis.cell(line, offset);
            self.state(row, col) == Some(EdgeState::Used)
        })
    }

    /// Number of committed edges leaving `row`.
    #[must_use]
    pub fn used_in_row(&self, row: usize) -> usize {
        (0..self.size)
            .filter(|&col| self.state(row, col) == Some(EdgeState::Used))
            .count()
    }

    /// Committed edges in row-major order.
    pub fn used_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.cells
            .chunks(self.size.max(1))
            .enumerate()
            .flat_map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .filter(|(_, state)| **state == EdgeState::Used)
                    .map(move |(col, _)| Edge::new(row, col))
            })
    }

    /// For each stop, the stop its committed outgoing edge leads to.
    #[must_use]
    pub fn successors(&self) -> Vec<Option<usize>> {
        let mut successors = vec![None; self.size];
        for edge in self.used_edges() {
            if let Some(slot) = successors.get_mut(edge.from) {
                *slot = Some(edge.to);
            }
        }
        successors
    }
}
