//! SA configuration and the geometric cooling schedule.

use crate::error::{Result, TourError};

/// Configuration for the Simulated Annealing run.
///
/// Temperature starts at `initial_temperature`, runs
/// `iterations_per_temperature` trials per level, and is multiplied by
/// `decay_factor` after each level until it is no longer above
/// `stop_temperature`.
///
/// # Examples
///
/// ```
/// use sa_tour::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initial_temperature(1.0)
///     .with_decay_factor(0.999)
///     .with_iterations_per_temperature(10)
///     .with_stop_temperature(0.0001)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Initial temperature. Higher values allow more exploration.
    pub initial_temperature: f64,

    /// The run stops once the temperature is at or below this value. Must be positive.
    pub stop_temperature: f64,

    /// Geometric cooling factor in (0, 1): `T_{k+1} = decay_factor * T_k`.
    ///
    /// Closer to 1 cools more slowly.
    pub decay_factor: f64,

    /// Number of trials at each temperature level.
    pub iterations_per_temperature: usize,

    /// Maximum total trials (hard budget). 0 = no limit.
    pub max_iterations: usize,

    /// Optional wall-clock limit in milliseconds.
    ///
    /// Checked at the start of each temperature level and every 64 trials
    /// within a level, so a run overshoots by at most 64 trials.
    pub time_limit_ms: Option<u64>,

    /// Random seed for reproducibility. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            stop_temperature: 1e-6,
            decay_factor: 0.95,
            iterations_per_temperature: 100,
            max_iterations: 0,
            time_limit_ms: None,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_stop_temperature(mut self, t: f64) -> Self {
        self.stop_temperature = t;
        self
    }

    pub fn with_decay_factor(mut self, factor: f64) -> Self {
        self.decay_factor = factor;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of temperature levels the schedule runs before cooling below
    /// `stop_temperature`, ignoring iteration and time limits.
    ///
    /// Fails with [`TourError::InvalidSchedule`] for a schedule that would
    /// never cool below `stop_temperature`.
    pub fn temperature_levels(&self) -> Result<usize> {
        self.validate()?;
        let mut t = self.initial_temperature;
        let mut levels = 0;
        while t > self.stop_temperature {
            t *= self.decay_factor;
            levels += 1;
        }
        Ok(levels)
    }

    /// Validates the configuration.
    ///
    /// Rejects schedules that would never terminate (`decay_factor` outside
    /// (0, 1), non-positive `stop_temperature`) and nonsensical ones.
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_temperature.is_finite() && self.initial_temperature > 0.0) {
            return Err(invalid("initial_temperature must be positive and finite"));
        }
        if !(self.stop_temperature.is_finite() && self.stop_temperature > 0.0) {
            return Err(invalid("stop_temperature must be positive and finite"));
        }
        if self.stop_temperature >= self.initial_temperature {
            return Err(invalid(
                "stop_temperature must be less than initial_temperature",
            ));
        }
        if !(self.decay_factor > 0.0 && self.decay_factor < 1.0) {
            return Err(TourError::InvalidSchedule(format!(
                "decay_factor must be in (0, 1), got {}",
                self.decay_factor
            )));
        }
        if self.iterations_per_temperature == 0 {
            return Err(invalid("iterations_per_temperature must be at least 1"));
        }
        if self.time_limit_ms == Some(0) {
            return Err(invalid("time_limit_ms must be positive or None"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> TourError {
    TourError::InvalidSchedule(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SaConfig::default();
        assert!((config.initial_temperature - 100.0).abs() < 1e-10);
        assert!((config.stop_temperature - 1e-6).abs() < 1e-15);
        assert_eq!(config.iterations_per_temperature, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_temperature() {
        let config = SaConfig::default().with_initial_temperature(-1.0);
        assert!(config.validate().is_err());
        let config = SaConfig::default().with_initial_temperature(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_stop_temperature() {
        let config = SaConfig::default().with_stop_temperature(0.0);
        assert!(matches!(
            config.validate(),
            Err(TourError::InvalidSchedule(_))
        ));
    }

    #[test]
    fn test_validate_stop_ge_initial() {
        let config = SaConfig::default()
            .with_initial_temperature(10.0)
            .with_stop_temperature(20.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_non_terminating_decay() {
        for factor in [1.0, 1.5, 0.0, -0.5, f64::NAN] {
            let config = SaConfig::default().with_decay_factor(factor);
            assert!(config.validate().is_err(), "decay {factor} accepted");
        }
    }

    #[test]
    fn test_validate_zero_iterations() {
        let config = SaConfig::default().with_iterations_per_temperature(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_time_limit() {
        let config = SaConfig::default().with_time_limit_ms(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_temperature_levels() {
        let config = SaConfig::default()
            .with_initial_temperature(1.0)
            .with_stop_temperature(0.1)
            .with_decay_factor(0.5);
        // 1.0, 0.5, 0.25, 0.125 are above 0.1
        assert_eq!(config.temperature_levels(), Ok(4));
    }

    #[test]
    fn test_temperature_levels_rejects_non_terminating() {
        let config = SaConfig::default().with_decay_factor(1.0);
        assert!(matches!(
            config.temperature_levels(),
            Err(TourError::InvalidSchedule(_))
        ));
        let config = SaConfig::default().with_stop_temperature(0.0);
        assert!(config.temperature_levels().is_err());
    }
}
