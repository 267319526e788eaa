//! Random tour / perturbed-tour pairs, returned as plain data.

use rand::Rng;

use crate::error::Result;
use crate::graph::Graph;
use crate::tour::{energy_delta, generate_random_tour, perturb, Tour};

/// One random tour, one perturbation of it, and the energy change between them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Transition {
    pub tour: Tour,
    pub cost: f64,
    pub perturbed: Tour,
    pub perturbed_cost: f64,
    /// `cost - perturbed_cost`; positive when the perturbation is cheaper.
    pub delta: f64,
}

impl Transition {
    /// Draws a random tour anchored at `start` and perturbs it once.
    pub fn sample<R: Rng>(
        graph: &Graph,
        start: usize,
        rng: &mut R,
        max_attempts: usize,
    ) -> Result<Self> {
        let tour = generate_random_tour(graph, start, rng, max_attempts)?;
        let perturbed = perturb(&tour, graph, start, rng, max_attempts)?;
        let cost = tour.cost(graph);
        let perturbed_cost = perturbed.cost(graph);
        Ok(Self {
            delta: energy_delta(cost, perturbed_cost),
            tour,
            cost,
            perturbed,
            perturbed_cost,
        })
    }
}

/// Draws `count` independent [`Transition`]s.
pub fn sample_transitions<R: Rng>(
    graph: &Graph,
    start: usize,
    count: usize,
    rng: &mut R,
    max_attempts: usize,
) -> Result<Vec<Transition>> {
    (0..count)
        .map(|_| Transition::sample(graph, start, rng, max_attempts))
        .collect()
}
