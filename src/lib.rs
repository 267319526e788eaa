//! Simulated-annealing search for short closed tours.
//!
//! Given a small set of locations joined by a weighted, possibly-incomplete
//! graph, find a cheap closed walk that visits every location once and
//! returns to its start.
//!
//! - [`Graph`]: immutable symmetric weight table; weight 0 means "no edge".
//! - [`Tour`]: validated closed walk, with [`tour::cost`] and [`tour::is_valid`].
//! - [`tour::generate_random_tour`] and [`tour::perturb`]: rejection-sampled
//!   generation and the two-location swap, both with a retry budget.
//! - [`sa`]: the annealing controller, geometric cooling and the Metropolis
//!   acceptance rule.
//! - [`sample`]: tour / perturbed-tour pairs as plain data.
//!
//! # Example
//!
//! ```
//! use sa_tour::{Graph, SaConfig, SaRunner, Tour, TourProblem};
//!
//! let graph = Graph::from_edges(
//!     ["Snell's Farm", "Planter's Farm", "School", "Gym", "Movies"],
//!     &[
//!         (0, 1, 20.0), (0, 4, 7.0), (1, 2, 14.0), (1, 3, 8.0),
//!         (1, 4, 12.0), (2, 3, 10.0), (2, 4, 10.0), (3, 4, 15.0),
//!     ],
//! ).unwrap();
//!
//! let problem = TourProblem::new(&graph, 0).unwrap();
//! let seed = Tour::new(vec![0, 1, 2, 3, 4, 0], &graph).unwrap();
//! let config = SaConfig::default()
//!     .with_initial_temperature(1.0)
//!     .with_decay_factor(0.999)
//!     .with_iterations_per_temperature(10)
//!     .with_stop_temperature(0.0001)
//!     .with_seed(42);
//!
//! let result = SaRunner::run_from(&problem, seed, &config).unwrap();
//! assert!(result.best_cost <= 66.0);
//! println!("{:?} = {}", result.best.labels(&graph), result.best_cost);
//! ```

pub mod error;
pub mod graph;
pub mod random;
pub mod sa;
pub mod sample;
pub mod tour;

#[cfg(test)]
mod testing;

pub use error::{Result, TourError};
pub use graph::Graph;
pub use sa::{acceptance_probability, SaConfig, SaProblem, SaResult, SaRunner, StopReason};
pub use tour::{Tour, TourProblem};
