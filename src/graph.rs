//! Immutable weighted adjacency over a small set of labeled locations.
//!
//! A weight of zero means "no edge". The table is symmetric with a zero
//! diagonal, so `weight(a, a)` is always 0 and a valid tour never steps
//! from a location to itself.

use crate::error::{Result, TourError};

/// Symmetric, non-negative weight table over `N` labeled nodes.
///
/// # Examples
///
/// ```
/// use sa_tour::Graph;
///
/// let graph = Graph::from_edges(
///     ["A", "B", "C"],
///     &[(0, 1, 3.0), (1, 2, 4.0), (0, 2, 5.0)],
/// ).unwrap();
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.weight(2, 1), 4.0);
/// assert!(!graph.has_edge(1, 1));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Graph {
    labels: Vec<String>,
    /// Row-major `n * n` table.
    weights: Vec<f64>,
    n: usize,
}

impl Graph {
    /// Builds a graph from labels and a full `N x N` weight matrix.
    ///
    /// Fails with [`TourError::InvalidGraph`] if the matrix is not square,
    /// does not match the label count, is asymmetric, has a nonzero
    /// diagonal, or holds a negative or non-finite weight.
    pub fn new<I, S>(labels: I, matrix: Vec<Vec<f64>>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let n = labels.len();

        if matrix.len() != n {
            return Err(TourError::InvalidGraph(format!(
                "{} labels but {} matrix rows",
                n,
                matrix.len()
            )));
        }

        if let Some((i, row)) = matrix.iter().enumerate().find(|(_, row)| row.len() != n) {
            return Err(TourError::InvalidGraph(format!(
                "row {i} has {} entries, expected {n}",
                row.len()
            )));
        }

        let mut weights = Vec::with_capacity(n * n);
        for (i, row) in matrix.iter().enumerate() {
            for (j, &w) in row.iter().enumerate() {
                check_weight(i, j, w)?;
                if i == j && w != 0.0 {
                    return Err(TourError::InvalidGraph(format!(
                        "diagonal entry ({i}, {i}) must be zero, got {w}"
                    )));
                }
                if w != matrix[j][i] {
                    return Err(TourError::InvalidGraph(format!(
                        "weight ({i}, {j}) = {w} differs from ({j}, {i}) = {}",
                        matrix[j][i]
                    )));
                }
                weights.push(w);
            }
        }

        Ok(Self { labels, weights, n })
    }

    /// Builds a graph from labels and an undirected edge list.
    ///
    /// Pairs not listed have no edge. Listing the same pair twice keeps the
    /// last weight.
    pub fn from_edges<I, S>(labels: I, edges: &[(usize, usize, f64)]) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let n = labels.len();
        let mut weights = vec![0.0; n * n];

        for &(a, b, w) in edges {
            for index in [a, b] {
                if index >= n {
                    return Err(TourError::InvalidIndex {
                        index,
                        node_count: n,
                    });
                }
            }
            check_weight(a, b, w)?;
            if a == b && w != 0.0 {
                return Err(TourError::InvalidGraph(format!(
                    "self-loop on node {a} is not allowed"
                )));
            }
            weights[a * n + b] = w;
            weights[b * n + a] = w;
        }

        Ok(Self { labels, weights, n })
    }

    /// Number of locations.
    pub fn node_count(&self) -> usize {
        self.n
    }

    /// Location labels, indexed by node.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Label of `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node >= node_count()`.
    pub fn label(&self, node: usize) -> &str {
        &self.labels[node]
    }

    /// Edge weight between `a` and `b`; 0 if there is no edge or `a == b`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range. Use [`Graph::try_weight`]
    /// for a checked lookup.
    pub fn weight(&self, a: usize, b: usize) -> f64 {
        assert!(
            a < self.n && b < self.n,
            "node index out of range: ({a}, {b}) with {} nodes",
            self.n
        );
        self.weights[a * self.n + b]
    }

    /// Checked variant of [`Graph::weight`].
    pub fn try_weight(&self, a: usize, b: usize) -> Result<f64> {
        self.check_index(a)?;
        self.check_index(b)?;
        Ok(self.weights[a * self.n + b])
    }

    /// Whether a nonzero edge joins `a` and `b`. Out-of-range indices have no edges.
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        a < self.n && b < self.n && self.weights[a * self.n + b] != 0.0
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        (0..self.n)
            .flat_map(|a| ((a + 1)..self.n).map(move |b| (a, b)))
            .filter(|&(a, b)| self.has_edge(a, b))
            .count()
    }

    /// Fails with [`TourError::InvalidIndex`] unless `node < node_count()`.
    pub fn check_index(&self, node: usize) -> Result<()> {
        if node < self.n {
            Ok(())
        } else {
            Err(TourError::InvalidIndex {
                index: node,
                node_count: self.n,
            })
        }
    }
}

fn check_weight(a: usize, b: usize, w: f64) -> Result<()> {
    if !w.is_finite() || w < 0.0 {
        return Err(TourError::InvalidGraph(format!(
            "weight ({a}, {b}) must be finite and non-negative, got {w}"
        )));
    }
    Ok(())
}
