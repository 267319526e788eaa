//! Core trait for Simulated Annealing.

use rand::Rng;

use crate::error::Result;

/// Defines a Simulated Annealing problem.
///
/// The implementor supplies initial-solution generation, cost evaluation
/// and neighbor proposal. The runner handles temperature, acceptance and
/// cooling.
///
/// # Minimization
///
/// SA minimizes the cost function. For maximization, negate the cost.
///
/// # Fallible moves
///
/// Generation and neighbor proposal may be rejection samplers with a retry
/// budget. A failed [`SaProblem::initial_solution`] aborts the run before it
/// starts; a failed [`SaProblem::neighbor`] only counts as a rejected trial.
pub trait SaProblem: Send + Sync {
    /// The solution representation type.
    type Solution: Clone + Send;

    /// Creates a random initial solution.
    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Result<Self::Solution>;

    /// Computes the cost of a solution. Lower is better.
    fn cost(&self, solution: &Self::Solution) -> f64;

    /// Proposes a neighbor of `solution` without modifying it.
    fn neighbor<R: Rng>(&self, solution: &Self::Solution, rng: &mut R)
        -> Result<Self::Solution>;

    /// Checks a caller-supplied seed before a run starts from it.
    fn check_solution(&self, _solution: &Self::Solution) -> Result<()> {
        Ok(())
    }

    /// Whether [`SaProblem::neighbor`] can ever succeed from `solution`.
    ///
    /// The neighbor relation is assumed symmetric, so a `true` answer for
    /// the starting solution holds for every solution the run reaches.
    fn has_neighbor(&self, _solution: &Self::Solution) -> bool {
        true
    }
}
