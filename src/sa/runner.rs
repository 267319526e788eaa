//! SA execution loop.

use super::config::SaConfig;
use super::types::SaProblem;
use crate::error::{Result, TourError};
use crate::random::rng_from_seed;
use crate::tour::energy_delta;
use log::{debug, trace};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Trials between wall-clock checks inside a temperature level.
const TIME_CHECK_INTERVAL: usize = 64;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// Temperature fell to or below `stop_temperature`.
    Cooled,
    /// `max_iterations` trials were spent.
    IterationLimit,
    /// `time_limit_ms` elapsed.
    TimeLimit,
    /// The cancellation flag was raised.
    Cancelled,
    /// The starting solution has no valid neighbor; it is returned unchanged.
    Frozen,
}

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SaResult<S: Clone> {
    /// The best solution seen during the run.
    pub best: S,

    /// Cost of the best solution.
    pub best_cost: f64,

    /// The current solution when the run terminated.
    pub current: S,

    /// Cost of the current solution.
    pub current_cost: f64,

    /// Total number of trials (neighbor proposals).
    pub iterations: usize,

    /// Number of completed temperature levels.
    pub temperature_levels: usize,

    /// Temperature when the algorithm stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Trials whose neighbor proposal exhausted its retry budget.
    pub stalled_moves: usize,

    pub stop_reason: StopReason,

    /// Best cost sampled at regular intervals. Non-increasing.
    pub cost_history: Vec<f64>,
}

/// Probability of accepting a move with energy change `delta` at `temperature`.
///
/// `delta` is `current - candidate`, so a positive value is an improvement
/// and is always accepted. Otherwise this is the Metropolis criterion
/// `exp(delta / temperature)`, which lies in `[0, 1]` and tends to 0 as the
/// temperature approaches 0.
///
/// ```
/// use sa_tour::acceptance_probability;
///
/// assert_eq!(acceptance_probability(3.0, 1.0), 1.0);
/// assert!((acceptance_probability(-1.0, 1.0) - (-1.0f64).exp()).abs() < 1e-12);
/// assert_eq!(acceptance_probability(-1.0, 0.0), 0.0);
/// ```
pub fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    if delta > 0.0 {
        1.0
    } else if temperature > 0.0 {
        (delta / temperature).exp().clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Executes the Simulated Annealing algorithm.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA from a random initial solution.
    ///
    /// # Errors
    ///
    /// [`TourError::InvalidSchedule`] for a bad config, or whatever
    /// [`SaProblem::initial_solution`] fails with.
    pub fn run<P: SaProblem>(problem: &P, config: &SaConfig) -> Result<SaResult<P::Solution>> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs SA from a random initial solution with an optional cancellation token.
    pub fn run_with_cancel<P: SaProblem>(
        problem: &P,
        config: &SaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SaResult<P::Solution>> {
        config.validate()?;
        let mut rng = rng_from_seed(config.seed);
        let initial = problem.initial_solution(&mut rng)?;
        Ok(anneal(problem, initial, config, &mut rng, cancel.as_deref()))
    }

    /// Runs SA starting from a caller-supplied seed solution.
    ///
    /// The seed is checked with [`SaProblem::check_solution`] first.
    pub fn run_from<P: SaProblem>(
        problem: &P,
        seed: P::Solution,
        config: &SaConfig,
    ) -> Result<SaResult<P::Solution>> {
        Self::run_from_with_cancel(problem, seed, config, None)
    }

    /// [`SaRunner::run_from`] with an optional cancellation token.
    pub fn run_from_with_cancel<P: SaProblem>(
        problem: &P,
        seed: P::Solution,
        config: &SaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SaResult<P::Solution>> {
        config.validate()?;
        problem.check_solution(&seed)?;
        let mut rng = rng_from_seed(config.seed);
        Ok(anneal(problem, seed, config, &mut rng, cancel.as_deref()))
    }

    /// Runs `restarts` independent runs and returns the one with the lowest best cost.
    ///
    /// Run `i` is seeded with `seed + i` (wrapping); without a configured
    /// seed a random base is drawn. With the `parallel` feature the runs are
    /// spread over the rayon thread pool. Each run owns its generator and
    /// state, so results do not depend on scheduling.
    pub fn run_restarts<P: SaProblem>(
        problem: &P,
        config: &SaConfig,
        restarts: usize,
    ) -> Result<SaResult<P::Solution>> {
        if restarts == 0 {
            return Err(TourError::InvalidSchedule(
                "restarts must be at least 1".into(),
            ));
        }
        config.validate()?;

        let base = config.seed.unwrap_or_else(rand::random);
        let first = Self::run(problem, &config.clone().with_seed(base))?;
        let configs: Vec<SaConfig> = (1..restarts)
            .map(|i| config.clone().with_seed(base.wrapping_add(i as u64)))
            .collect();

        #[cfg(feature = "parallel")]
        let rest: Vec<SaResult<P::Solution>> = configs
            .par_iter()
            .map(|cfg| Self::run(problem, cfg))
            .collect::<Result<Vec<_>>>()?;

        #[cfg(not(feature = "parallel"))]
        let rest: Vec<SaResult<P::Solution>> = configs
            .iter()
            .map(|cfg| Self::run(problem, cfg))
            .collect::<Result<Vec<_>>>()?;

        debug!("completed {restarts} restarts from base seed {base}");

        // Ties keep the earlier restart.
        Ok(rest.into_iter().fold(first, |best, result| {
            if result.best_cost < best.best_cost {
                result
            } else {
                best
            }
        }))
    }
}

/// The annealing loop proper. Assumes `config` is valid.
fn anneal<P: SaProblem, R: Rng>(
    problem: &P,
    initial: P::Solution,
    config: &SaConfig,
    rng: &mut R,
    cancel: Option<&AtomicBool>,
) -> SaResult<P::Solution> {
    let mut current = initial;
    let mut current_cost = problem.cost(&current);
    let mut best = current.clone();
    let mut best_cost = current_cost;

    let mut temperature = config.initial_temperature;
    let mut total_iterations = 0usize;
    let mut temperature_levels = 0usize;
    let mut accepted_moves = 0usize;
    let mut improving_moves = 0usize;
    let mut stalled_moves = 0usize;
    let mut stop_reason = StopReason::Cooled;

    let started = Instant::now();
    let time_limit = config.time_limit_ms.map(Duration::from_millis);

    // Cost history: sample every N iterations
    let history_interval = 100.max(config.iterations_per_temperature);
    let mut cost_history = vec![best_cost];

    debug!(
        "annealing from cost {current_cost} at T={} (decay {}, {} trials/level, stop {})",
        config.initial_temperature,
        config.decay_factor,
        config.iterations_per_temperature,
        config.stop_temperature
    );

    if !problem.has_neighbor(&current) {
        debug!("starting solution has no valid neighbor; returning it unchanged");
        stop_reason = StopReason::Frozen;
    } else {
        'cooling: while temperature > config.stop_temperature {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                stop_reason = StopReason::Cancelled;
                break;
            }
            if time_limit.is_some_and(|limit| started.elapsed() >= limit) {
                stop_reason = StopReason::TimeLimit;
                break;
            }

            for _ in 0..config.iterations_per_temperature {
                if total_iterations.is_multiple_of(TIME_CHECK_INTERVAL)
                    && time_limit.is_some_and(|limit| started.elapsed() >= limit)
                {
                    stop_reason = StopReason::TimeLimit;
                    break 'cooling;
                }
                if config.max_iterations > 0 && total_iterations >= config.max_iterations {
                    stop_reason = StopReason::IterationLimit;
                    break 'cooling;
                }
                total_iterations += 1;

                match problem.neighbor(&current, rng) {
                    Ok(candidate) => {
                        let candidate_cost = problem.cost(&candidate);
                        let delta = energy_delta(current_cost, candidate_cost);

                        let accept = if delta > 0.0 {
                            improving_moves += 1;
                            true
                        } else {
                            acceptance_probability(delta, temperature) > rng.random_range(0.0..1.0)
                        };

                        if accept {
                            current = candidate;
                            current_cost = candidate_cost;
                            accepted_moves += 1;

                            if current_cost < best_cost {
                                best = current.clone();
                                best_cost = current_cost;
                            }
                        }
                    }
                    Err(err) => {
                        stalled_moves += 1;
                        trace!("neighbor proposal stalled at T={temperature}: {err}");
                    }
                }

                if total_iterations.is_multiple_of(history_interval) {
                    cost_history.push(best_cost);
                }
            }

            temperature *= config.decay_factor;
            temperature_levels += 1;
            trace!("level {temperature_levels}: T={temperature} current={current_cost} best={best_cost}");
        }
    }

    if cost_history
        .last()
        .is_none_or(|&last| (last - best_cost).abs() > 1e-15)
    {
        cost_history.push(best_cost);
    }

    debug!(
        "annealing stopped ({stop_reason:?}) after {total_iterations} trials over \
         {temperature_levels} levels: best {best_cost}, current {current_cost}"
    );

    SaResult {
        best,
        best_cost,
        current,
        current_cost,
        iterations: total_iterations,
        temperature_levels,
        final_temperature: temperature,
        accepted_moves,
        improving_moves,
        stalled_moves,
        stop_reason,
        cost_history,
    }
}
