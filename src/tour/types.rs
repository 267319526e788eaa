//! Tour representation, validity and cost.

use crate::error::{Result, TourError};
use crate::graph::Graph;

/// A closed walk that visits every location once before returning to its start.
///
/// Stored as `N + 1` node indices with `path[0] == path[N]`. Every value in
/// circulation has been checked against a [`Graph`]: positions `0..N` are a
/// permutation of all nodes and each consecutive step follows a nonzero edge.
/// Tours are never edited in place; perturbation produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tour {
    path: Vec<usize>,
}

impl Tour {
    /// Validates `path` as a closed tour on `graph`.
    ///
    /// # Errors
    ///
    /// - [`TourError::InvalidIndex`] if a node is outside the graph.
    /// - [`TourError::InvalidTour`] if the length is not `N + 1`, the walk is
    ///   not closed, a node repeats, or a step has no edge.
    ///
    /// # Examples
    ///
    /// ```
    /// use sa_tour::{Graph, Tour};
    ///
    /// let graph = Graph::from_edges(
    ///     ["A", "B", "C"],
    ///     &[(0, 1, 1.0), (1, 2, 2.0), (2, 0, 3.0)],
    /// ).unwrap();
    /// let tour = Tour::new(vec![0, 1, 2, 0], &graph).unwrap();
    /// assert_eq!(tour.cost(&graph), 6.0);
    /// ```
    pub fn new(path: Vec<usize>, graph: &Graph) -> Result<Self> {
        let n = graph.node_count();
        if path.len() != n + 1 {
            return Err(TourError::InvalidTour(format!(
                "expected {} entries for {n} nodes, got {}",
                n + 1,
                path.len()
            )));
        }
        for &node in &path {
            graph.check_index(node)?;
        }
        if path[0] != path[n] {
            return Err(TourError::InvalidTour(format!(
                "walk starts at {} but ends at {}",
                path[0], path[n]
            )));
        }

        let mut seen = vec![false; n];
        for &node in &path[..n] {
            if std::mem::replace(&mut seen[node], true) {
                return Err(TourError::InvalidTour(format!("node {node} visited twice")));
            }
        }

        if let Some(step) = path.windows(2).find(|w| !graph.has_edge(w[0], w[1])) {
            return Err(TourError::InvalidTour(format!(
                "no edge between {} and {}",
                step[0], step[1]
            )));
        }

        Ok(Self { path })
    }

    /// Closes an open visiting order (`N` entries) back to its first node and validates it.
    pub fn from_order(order: &[usize], graph: &Graph) -> Result<Self> {
        let first = order
            .first()
            .copied()
            .ok_or_else(|| TourError::InvalidTour("empty visiting order".into()))?;
        let mut path = Vec::with_capacity(order.len() + 1);
        path.extend_from_slice(order);
        path.push(first);
        Self::new(path, graph)
    }

    /// Wraps a path the caller has already checked with [`is_valid`].
    pub(crate) fn from_valid_path(path: Vec<usize>) -> Self {
        Self { path }
    }

    /// The node sequence, including the repeated start at the end.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// First (and last) node of the walk.
    pub fn start(&self) -> usize {
        self.path[0]
    }

    /// Number of distinct locations visited.
    pub fn node_count(&self) -> usize {
        self.path.len() - 1
    }

    /// Total edge weight along the walk.
    pub fn cost(&self, graph: &Graph) -> f64 {
        cost(&self.path, graph)
    }

    /// Whether every step still follows an edge of `graph`.
    pub fn is_valid(&self, graph: &Graph) -> bool {
        is_valid(&self.path, graph)
    }

    /// Location labels in visiting order.
    pub fn labels<'g>(&self, graph: &'g Graph) -> Vec<&'g str> {
        self.path.iter().map(|&node| graph.label(node)).collect()
    }

    /// The path with every occurrence of nodes `a` and `b` exchanged.
    ///
    /// The result is not checked against any graph.
    pub fn swap_nodes(&self, a: usize, b: usize) -> Vec<usize> {
        self.path
            .iter()
            .map(|&node| {
                if node == a {
                    b
                } else if node == b {
                    a
                } else {
                    node
                }
            })
            .collect()
    }

    /// Whether swapping some pair of non-start nodes yields another valid tour.
    ///
    /// Swapping is its own inverse, so every tour reachable by valid swaps
    /// from one with a valid neighbor has one too.
    pub fn has_valid_neighbor(&self, graph: &Graph) -> bool {
        let n = self.node_count();
        let start = self.start();
        (0..n)
            .filter(|&a| a != start)
            .flat_map(|a| ((a + 1)..n).filter(move |&b| b != start).map(move |b| (a, b)))
            .any(|(a, b)| is_valid(&self.swap_nodes(a, b), graph))
    }
}

impl AsRef<[usize]> for Tour {
    fn as_ref(&self) -> &[usize] {
        &self.path
    }
}

/// Whether every consecutive pair in `path` is joined by a nonzero edge.
///
/// Total: an out-of-range node makes the path invalid rather than panicking.
pub fn is_valid(path: &[usize], graph: &Graph) -> bool {
    path.windows(2).all(|w| graph.has_edge(w[0], w[1]))
}

/// Sum of edge weights over consecutive pairs of `path`.
///
/// The path must be valid: a missing edge weighs 0 and would silently
/// under-count, so debug builds assert validity.
///
/// # Panics
///
/// Panics if a node is out of range.
pub fn cost(path: &[usize], graph: &Graph) -> f64 {
    debug_assert!(is_valid(path, graph), "cost of an invalid tour: {path:?}");
    path.windows(2).map(|w| graph.weight(w[0], w[1])).sum()
}

/// Energy change from `current` to `candidate`; positive when the candidate is cheaper.
pub fn energy_delta(current_cost: f64, candidate_cost: f64) -> f64 {
    current_cost - candidate_cost
}
