//! Binds a graph and a start location to the annealing runner.

use rand::Rng;

use super::operators::{generate_random_tour, perturb, DEFAULT_MAX_ATTEMPTS};
use super::types::Tour;
use crate::error::{Result, TourError};
use crate::graph::Graph;
use crate::sa::SaProblem;

/// Closed-tour search over `graph`, anchored at `start`.
///
/// # Examples
///
/// ```
/// use sa_tour::{Graph, SaConfig, SaRunner, TourProblem};
///
/// let graph = Graph::from_edges(
///     ["A", "B", "C", "D"],
///     &[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (3, 0, 1.0), (0, 2, 5.0), (1, 3, 5.0)],
/// ).unwrap();
/// let problem = TourProblem::new(&graph, 0).unwrap();
/// let config = SaConfig::default().with_seed(42);
///
/// let result = SaRunner::run(&problem, &config).unwrap();
/// assert_eq!(result.best_cost, 4.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TourProblem<'g> {
    graph: &'g Graph,
    start: usize,
    max_attempts: usize,
}

impl<'g> TourProblem<'g> {
    /// Fails with [`TourError::InvalidIndex`] if `start` is not a node of `graph`.
    pub fn new(graph: &'g Graph, start: usize) -> Result<Self> {
        graph.check_index(start)?;
        Ok(Self {
            graph,
            start,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        })
    }

    /// Sets the retry budget for generation and perturbation.
    pub fn with_max_attempts(mut self, n: usize) -> Self {
        self.max_attempts = n;
        self
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }
}

impl SaProblem for TourProblem<'_> {
    type Solution = Tour;

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Result<Tour> {
        generate_random_tour(self.graph, self.start, rng, self.max_attempts)
    }

    fn cost(&self, tour: &Tour) -> f64 {
        tour.cost(self.graph)
    }

    fn neighbor<R: Rng>(&self, tour: &Tour, rng: &mut R) -> Result<Tour> {
        perturb(tour, self.graph, self.start, rng, self.max_attempts)
    }

    fn check_solution(&self, tour: &Tour) -> Result<()> {
        if tour.start() != self.start {
            return Err(TourError::InvalidTour(format!(
                "seed tour starts at {}, expected {}",
                tour.start(),
                self.start
            )));
        }
        // Revalidate: the seed may have been built against another graph.
        Tour::new(tour.path().to_vec(), self.graph).map(|_| ())
    }

    fn has_neighbor(&self, tour: &Tour) -> bool {
        self.graph.node_count() >= 3 && tour.has_valid_neighbor(self.graph)
    }
}
