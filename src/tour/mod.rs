//! Closed tours over a [`Graph`](crate::Graph): validity, cost and the
//! rejection-sampled generation and swap operators.

mod operators;
mod problem;
mod types;

pub use operators::{generate_random_tour, perturb, DEFAULT_MAX_ATTEMPTS};
pub use problem::TourProblem;
pub use types::{cost, energy_delta, is_valid, Tour};
