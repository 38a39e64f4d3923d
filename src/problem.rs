//! The QAP as a [`GaProblem`].
//!
//! [`QapProblem`] wires an [`Instance`] to the generic GA engine: random
//! permutations for the initial population, [`Instance::cost`] as fitness,
//! PMX crossover and swap mutation. [`solve`] is the entry point most
//! callers want.

use crate::error::Result;
use crate::ga::operators::{pmx_crossover, random_permutation, swap_mutation};
use crate::ga::{Fitness, GaConfig, GaProblem, GaRunner, Individual};
use crate::instance::Instance;
use rand::Rng;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// A facility → location assignment together with its cost.
///
/// `permutation()[i]` is the location of facility `i`. Cost is
/// `i64::MAX` until evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    permutation: Vec<usize>,
    cost: i64,
}

impl Assignment {
    /// Wraps a permutation; the caller guarantees it is one.
    pub fn new(permutation: Vec<usize>) -> Self {
        Self {
            permutation,
            cost: i64::worst(),
        }
    }

    /// Returns the permutation.
    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    /// Consumes the assignment, returning the permutation.
    pub fn into_permutation(self) -> Vec<usize> {
        self.permutation
    }
}

impl Individual for Assignment {
    type Fitness = i64;

    fn fitness(&self) -> i64 {
        self.cost
    }

    fn set_fitness(&mut self, fitness: i64) {
        self.cost = fitness;
    }
}

/// QAP bound to one instance.
#[derive(Debug, Clone, Copy)]
pub struct QapProblem<'a> {
    instance: &'a Instance,
}

impl<'a> QapProblem<'a> {
    /// Binds the GA operators to `instance`.
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance }
    }
}

impl GaProblem for QapProblem<'_> {
    type Individual = Assignment;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Assignment {
        Assignment::new(random_permutation(self.instance.size(), rng))
    }

    fn evaluate(&self, individual: &Assignment) -> i64 {
        self.instance.cost(&individual.permutation)
    }

    fn crossover<R: Rng>(&self, parent1: &Assignment, parent2: &Assignment, rng: &mut R) -> Assignment {
        Assignment::new(pmx_crossover(&parent1.permutation, &parent2.permutation, rng))
    }

    fn mutate<R: Rng>(&self, individual: &mut Assignment, rng: &mut R) {
        swap_mutation(&mut individual.permutation, rng);
    }
}

/// Outcome of a QAP solve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QapSolution {
    /// Best permutation of the final population.
    pub permutation: Vec<usize>,

    /// Its cost.
    pub cost: i64,

    /// Generations actually run.
    pub generations: usize,

    /// Whether cancellation or the time limit stopped the run early.
    pub stopped_early: bool,

    /// Best cost of the initial population, then of each generation.
    pub cost_history: Vec<i64>,

    /// Seed that reproduces this run.
    pub seed: u64,
}

/// Runs the GA on `instance` with default parameters except for the
/// generation count, population size and seed.
///
/// ```
/// use qap_ga::{solve, Instance};
///
/// let instance = Instance::new(
///     vec![vec![0, 1, 2], vec![1, 0, 3], vec![2, 3, 0]],
///     vec![vec![0, 2, 1], vec![2, 0, 3], vec![1, 3, 0]],
/// ).unwrap();
/// let solution = solve(&instance, 50, 20, 42).unwrap();
/// assert_eq!(solution.cost, 20);
/// assert_eq!(instance.cost(&solution.permutation), solution.cost);
/// ```
///
/// The elite count keeps the default share of the population (20 of 100),
/// with at least one elite.
///
/// # Errors
/// Fails if the parameters do not validate, e.g. a population below 3.
pub fn solve(
    instance: &Instance,
    generations: usize,
    population_size: usize,
    seed: u64,
) -> Result<QapSolution> {
    let defaults = GaConfig::default();
    let elite_count = (population_size * defaults.elite_count / defaults.population_size).max(1);
    let config = defaults
        .with_max_generations(generations)
        .with_population_size(population_size)
        .with_elite_count(elite_count)
        .with_seed(seed);
    solve_with_config(instance, &config)
}

/// Runs the GA on `instance` with an explicit configuration.
pub fn solve_with_config(instance: &Instance, config: &GaConfig) -> Result<QapSolution> {
    solve_with_cancel(instance, config, None)
}

/// Like [`solve_with_config`], stopping at the next generation boundary
/// once `cancel` is set.
pub fn solve_with_cancel(
    instance: &Instance,
    config: &GaConfig,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<QapSolution> {
    let problem = QapProblem::new(instance);
    let result = GaRunner::run_with_cancel(&problem, config, cancel)?;
    Ok(QapSolution {
        cost: result.best_fitness,
        permutation: result.best.into_permutation(),
        generations: result.generations,
        stopped_early: result.cancelled || result.timed_out,
        cost_history: result.fitness_history,
        seed: result.seed,
    })
}
