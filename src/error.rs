//! Error type shared by graph construction, tour handling and the annealing runner.

use thiserror::Error;

/// Errors surfaced by this crate.
///
/// Every variant is an entry precondition: operations either succeed with a
/// valid value or fail before doing any search work. The one exception is
/// [`TourError::NoValidTourFound`], which is raised after a rejection sampler
/// has spent its whole retry budget.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TourError {
    /// A node index outside `0..node_count`.
    #[error("node index {index} is out of range for a graph of {node_count} nodes")]
    InvalidIndex { index: usize, node_count: usize },

    /// Rejection sampling drew `attempts` candidates without finding a valid tour.
    #[error("no valid tour found after {attempts} attempts")]
    NoValidTourFound { attempts: usize },

    /// Cooling parameters that would not terminate or make no sense.
    #[error("invalid annealing schedule: {0}")]
    InvalidSchedule(String),

    /// Weight table violating symmetry, zero diagonal or non-negativity.
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// A caller-supplied tour that is not a closed Hamiltonian walk on the graph.
    #[error("invalid tour: {0}")]
    InvalidTour(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TourError>;
