//! GA configuration.
//!
//! [`GaConfig`] holds every parameter of the evolutionary loop, so the
//! defaults live in one place instead of inside the loop.

use super::selection::Selection;
use crate::error::{QapError, Result};

/// Configuration for the genetic algorithm.
///
/// # Defaults
///
/// ```
/// use qap_ga::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 100);
/// assert_eq!(config.elite_count, 20);
/// assert_eq!(config.selection, Selection::Tournament(3));
/// ```
///
/// # Builder Pattern
///
/// ```
/// use qap_ga::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_elite_count(10)
///     .with_mutation_rate(0.2)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in every generation (`P`).
    pub population_size: usize,

    /// Number of generations to run (`G`).
    pub max_generations: usize,

    /// Number of best individuals copied unchanged into the next
    /// generation (`E`). Must not exceed `population_size`.
    pub elite_count: usize,

    /// Probability that a newly produced child is mutated (0.0–1.0).
    pub mutation_rate: f64,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Evaluate offspring on the rayon pool.
    ///
    /// Only has an effect with the `parallel` feature. Results are
    /// identical either way since evaluation is pure.
    pub parallel: bool,

    /// Random seed. `None` draws one from the OS.
    pub seed: Option<u64>,

    /// Optional wall-clock limit in milliseconds.
    ///
    /// Checked at generation boundaries only, so a run may overshoot by
    /// one generation's worth of work.
    pub time_limit_ms: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 100,
            elite_count: 20,
            mutation_rate: 0.1,
            selection: Selection::default(),
            parallel: false,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the elite count.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Sets the mutation rate, clamped to `[0, 1]`.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Shorthand for `.with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the wall-clock limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Checks that the evolutionary loop can run with these parameters.
    pub fn validate(&self) -> Result<()> {
        let Selection::Tournament(k) = self.selection;
        if k == 0 {
            return Err(QapError::InvalidConfig("tournament size must be at least 1".into()));
        }
        if self.population_size < 3 {
            return Err(QapError::InvalidConfig(format!(
                "population_size must be at least 3, got {}",
                self.population_size
            )));
        }
        if self.population_size < k {
            return Err(QapError::InvalidConfig(format!(
                "population_size {} is smaller than tournament size {k}",
                self.population_size
            )));
        }
        if self.elite_count > self.population_size {
            return Err(QapError::InvalidConfig(format!(
                "elite_count {} exceeds population_size {}",
                self.elite_count, self.population_size
            )));
        }
        if self.max_generations == 0 {
            return Err(QapError::InvalidConfig("max_generations must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(QapError::InvalidConfig(format!(
                "mutation_rate must lie in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if self.time_limit_ms == Some(0) {
            return Err(QapError::InvalidConfig("time_limit_ms must be positive or None".into()));
        }
        Ok(())
    }
}
