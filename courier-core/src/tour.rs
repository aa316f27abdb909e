//! Closed tours through a courier's stops.
//!
//! A [`Tour`] stores the edges in the order a solver committed them, which is
//! not necessarily the order they are driven. Use [`Tour::visit_order`] to
//! render the cycle from a chosen depot.

use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A directed edge between two stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    /// Stop the courier leaves.
    pub from: usize,
    /// Stop the courier arrives at.
    pub to: usize,
}

impl Edge {
    /// Construct an edge from `from` to `to`.
    #[must_use]
    pub const fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// The same edge travelled in the opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self::new(self.to, self.from)
    }
}

impl From<(usize, usize)> for Edge {
    fn from((from, to): (usize, usize)) -> Self {
        Self::new(from, to)
    }
}

/// A closed tour and its total cost.
///
/// # Examples
/// ```
/// use courier_core::{Edge, Tour};
///
/// let tour = Tour::new(
///     vec![Edge::new(1, 2), Edge::new(0, 1), Edge::new(2, 0)],
///     12.0,
/// );
/// assert_eq!(tour.visit_order(0), Some(vec![0, 1, 2]));
/// assert_eq!(tour.visit_order(2), Some(vec![2, 0, 1]));
/// assert!(tour.is_hamiltonian_cycle(3));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tour {
    edges: Vec<Edge>,
    cost: f64,
}

impl Tour {
    /// Construct a tour from committed edges and their total cost.
    #[must_use]
    pub const fn new(edges: Vec<Edge>, cost: f64) -> Self {
        Self { edges, cost }
    }

    /// Edges in the order they were committed.
    #[must_use]
    pub const fn edges(&self) -> &[Edge] {
        self.edges.as_slice()
    }

    /// Total cost of the tour.
    #[must_use]
    pub const fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of edges, which equals the number of stops for a closed tour.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the tour has no edges.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The stop visited after `stop`, if `stop` is left by any edge.
    #[must_use]
    pub fn successor(&self, stop: usize) -> Option<usize> {
        self.edges
            .iter()
            .find(|edge| edge.from == stop)
            .map(|edge| edge.to)
    }

    /// Stops in driving order, starting at `start`.
    ///
    /// Returns `None` when `start` is not on the tour or the edges do not
    /// form one cycle through every stop they mention.
    #[must_use]
    pub fn visit_order(&self, start: usize) -> Option<Vec<usize>> {
        let mut order = Vec::with_capacity(self.edges.len());
        let mut seen = HashSet::with_capacity(self.edges.len());
        let mut current = start;
        for _ in 0..self.edges.len() {
            if !seen.insert(current) {
                return None;
            }
            order.push(current);
            current = self.successor(current)?;
        }
        (current == start && !order.is_empty()).then_some(order)
    }

    /// Whether the edges form one cycle visiting each of `stops` stops once.
    #[must_use]
    pub fn is_hamiltonian_cycle(&self, stops: usize) -> bool {
        if self.edges.len() != stops {
            return false;
        }
        let Some(first) = self.edges.first() else {
            return false;
        };
        self.visit_order(first.from)
            .is_some_and(|order| order.iter().all(|stop| *stop < stops))
    }
}
