//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the generational process:
//! initialization → evaluation → sort → elitism → tournament selection →
//! crossover → mutation → wholesale replacement → repeat.
//!
//! One generation is fully built (sorted, elites kept, offspring produced
//! and evaluated) before the next starts; selection always draws from the
//! current generation.

use super::config::GaConfig;
use super::types::{Fitness, GaProblem, Individual};
use crate::error::Result;
use crate::random::create_rng;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// Best individual of the final population.
    pub best: I,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: I::Fitness,

    /// Number of generations executed.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Whether the run hit `time_limit_ms`.
    pub timed_out: bool,

    /// Best fitness of the initial population followed by the best of
    /// each generation.
    pub fitness_history: Vec<I::Fitness>,

    /// Seed the run used (drawn from the OS when the config had none).
    pub seed: u64,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let problem = MyProblem::new();
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config)?;
/// println!("Best fitness: {:?}", result.best_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    ///
    /// # Errors
    /// Returns [`QapError::InvalidConfig`](crate::QapError::InvalidConfig)
    /// if `config` does not validate.
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> Result<GaResult<P::Individual>> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// The flag is checked at generation boundaries only: once set, the run
    /// stops before starting the next generation and returns the best of the
    /// current population.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(
            population = config.population_size,
            generations = config.max_generations,
            elites = config.elite_count
        )
    )]
    pub fn run_with_cancel<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult<P::Individual>> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = create_rng(seed);
        let started = Instant::now();
        let time_limit = config.time_limit_ms.map(Duration::from_millis);

        // 1. Initialize and evaluate population
        let mut population: Vec<P::Individual> = (0..config.population_size)
            .map(|_| problem.create_individual(&mut rng))
            .collect();
        evaluate_population(problem, &mut population, config.parallel);

        let mut fitness_history = Vec::with_capacity(config.max_generations.min(4096) + 1);
        fitness_history.push(find_best(&population).fitness());

        tracing::info!(
            seed,
            initial_best = fitness_history[0].to_f64(),
            "GA started"
        );

        let mut generations = 0usize;
        let mut cancelled = false;
        let mut timed_out = false;

        // 2. Evolutionary loop
        for gen in 0..config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    tracing::warn!(generation = gen, "GA cancelled");
                    break;
                }
            }
            if let Some(limit) = time_limit {
                if started.elapsed() >= limit {
                    timed_out = true;
                    tracing::warn!(generation = gen, "GA time limit reached");
                    break;
                }
            }

            population = next_generation(problem, config, &mut population, &mut rng);
            generations = gen + 1;

            let gen_best = find_best(&population).fitness();
            fitness_history.push(gen_best);
            tracing::debug!(generation = generations, best = gen_best.to_f64());

            problem.on_generation(generations, gen_best);
        }

        let best = find_best(&population).clone();
        tracing::info!(
            generations,
            best = best.fitness().to_f64(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "GA finished"
        );

        Ok(GaResult {
            best_fitness: best.fitness(),
            best,
            generations,
            cancelled,
            timed_out,
            fitness_history,
            seed,
        })
    }
}

/// Builds generation g+1 from generation g.
///
/// Sorts `population` best-first, copies the first `elite_count`, then
/// fills up to `population_size` with mutated PMX offspring of tournament
/// winners. Only the offspring are evaluated.
fn next_generation<P: GaProblem, R: Rng>(
    problem: &P,
    config: &GaConfig,
    population: &mut [P::Individual],
    rng: &mut R,
) -> Vec<P::Individual> {
    // Stable sort: equal-fitness individuals keep their relative order
    population.sort_by(|a, b| {
        a.fitness()
            .partial_cmp(&b.fitness())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let elite_count = config.elite_count;
    let mut next_gen: Vec<P::Individual> = Vec::with_capacity(config.population_size);
    next_gen.extend_from_slice(&population[..elite_count]);

    while next_gen.len() < config.population_size {
        let p1_idx = config.selection.select(population, rng);
        let p2_idx = config.selection.select(population, rng);

        let mut child = problem.crossover(&population[p1_idx], &population[p2_idx], rng);
        if rng.random_bool(config.mutation_rate) {
            problem.mutate(&mut child, rng);
        }

        next_gen.push(child);
    }

    evaluate_population(problem, &mut next_gen[elite_count..], config.parallel);
    debug_assert_eq!(next_gen.len(), config.population_size);
    next_gen
}

#[cfg(feature = "parallel")]
fn evaluate_population<P: GaProblem>(
    problem: &P,
    population: &mut [P::Individual],
    parallel: bool,
) {
    if parallel {
        population.par_iter_mut().for_each(|ind| {
            let f = problem.evaluate(ind);
            ind.set_fitness(f);
        });
    } else {
        evaluate_sequential(problem, population);
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate_population<P: GaProblem>(
    problem: &P,
    population: &mut [P::Individual],
    _parallel: bool,
) {
    evaluate_sequential(problem, population);
}

fn evaluate_sequential<P: GaProblem>(problem: &P, population: &mut [P::Individual]) {
    for ind in population.iter_mut() {
        let f = problem.evaluate(ind);
        ind.set_fitness(f);
    }
}

/// Find the individual with the best (lowest) fitness.
///
/// Ties go to the earliest individual.
fn find_best<I: Individual>(population: &[I]) -> &I {
    population
        .iter()
        .reduce(|best, ind| if ind.fitness() < best.fitness() { ind } else { best })
        .expect("population must not be empty")
}

// ============================================================================
// Tests
// ============================================================================
