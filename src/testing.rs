//! Shared fixtures for unit tests.

use crate::graph::Graph;

/// Five locations, eight roads; three location pairs are not connected.
pub(crate) fn five_locations() -> Graph {
    Graph::from_edges(
        ["Snell's Farm", "Planter's Farm", "School", "Gym", "Movies"],
        &[
            (0, 1, 20.0),
            (0, 4, 7.0),
            (1, 2, 14.0),
            (1, 3, 8.0),
            (1, 4, 12.0),
            (2, 3, 10.0),
            (2, 4, 10.0),
            (3, 4, 15.0),
        ],
    )
    .expect("fixture graph is valid")
}

/// A ring `0 - 1 - ... - (n-1) - 0`: exactly one undirected Hamiltonian cycle.
pub(crate) fn ring(n: usize) -> Graph {
    let edges: Vec<(usize, usize, f64)> = (0..n).map(|i| (i, (i + 1) % n, 1.0 + i as f64)).collect();
    let labels: Vec<String> = (0..n).map(|i| format!("n{i}")).collect();
    Graph::from_edges(labels, &edges).expect("ring graph is valid")
}
