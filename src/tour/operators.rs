//! Random tour generation and the swap perturbation.
//!
//! Both operators are rejection samplers: draw a candidate, keep it if every
//! step follows an edge, otherwise draw again. Each is bounded by
//! `max_attempts` and fails with [`TourError::NoValidTourFound`] once the
//! budget is spent. On graphs where valid cycles are rare the expected
//! number of draws grows quickly; that tail is accepted for small graphs.

use rand::seq::SliceRandom;
use rand::Rng;

use super::types::{is_valid, Tour};
use crate::error::{Result, TourError};
use crate::graph::Graph;

/// Default retry budget for both rejection samplers.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

/// Draws a uniformly random valid tour anchored at `start`.
///
/// Each attempt shuffles the non-start nodes, places `start` at both ends,
/// and keeps the result only if it is valid under `graph`.
///
/// # Errors
///
/// - [`TourError::InvalidIndex`] if `start` is not a node of `graph`.
/// - [`TourError::NoValidTourFound`] after `max_attempts` invalid draws.
pub fn generate_random_tour<R: Rng>(
    graph: &Graph,
    start: usize,
    rng: &mut R,
    max_attempts: usize,
) -> Result<Tour> {
    graph.check_index(start)?;

    let n = graph.node_count();
    let mut rest: Vec<usize> = (0..n).filter(|&node| node != start).collect();
    let mut path = Vec::with_capacity(n + 1);

    for _ in 0..max_attempts {
        rest.shuffle(rng);

        path.clear();
        path.push(start);
        path.extend_from_slice(&rest);
        path.push(start);

        if is_valid(&path, graph) {
            return Ok(Tour::from_valid_path(path));
        }
    }

    Err(TourError::NoValidTourFound {
        attempts: max_attempts,
    })
}

/// Proposes a neighbor of `tour` by exchanging two locations other than `start`.
///
/// Each attempt starts again from the unmodified input: two distinct nodes
/// `r1`, `r2`, both different from `start`, are drawn from the whole node
/// range and every occurrence of them is exchanged. The first valid result
/// is returned. The input is never modified.
///
/// # Errors
///
/// - [`TourError::InvalidIndex`] if `start` is not a node of `graph`.
/// - [`TourError::NoValidTourFound`] after `max_attempts` invalid swaps, or
///   immediately (with `attempts: 0`) when fewer than two non-start nodes exist.
pub fn perturb<R: Rng>(
    tour: &Tour,
    graph: &Graph,
    start: usize,
    rng: &mut R,
    max_attempts: usize,
) -> Result<Tour> {
    graph.check_index(start)?;

    let n = graph.node_count();
    if n < 3 {
        return Err(TourError::NoValidTourFound { attempts: 0 });
    }

    for _ in 0..max_attempts {
        let (r1, r2) = draw_swap_pair(n, start, rng);
        let candidate = tour.swap_nodes(r1, r2);
        if is_valid(&candidate, graph) {
            return Ok(Tour::from_valid_path(candidate));
        }
    }

    Err(TourError::NoValidTourFound {
        attempts: max_attempts,
    })
}

/// Draws `r1 != r2` from `0..n`, both different from `start`. Requires `n >= 3`.
fn draw_swap_pair<R: Rng>(n: usize, start: usize, rng: &mut R) -> (usize, usize) {
    loop {
        let r1 = rng.random_range(0..n);
        let r2 = rng.random_range(0..n);
        if r1 != r2 && r1 != start && r2 != start {
            return (r1, r2);
        }
    }
}
