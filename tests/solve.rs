//! End-to-end runs of the QAP solver.

use qap_ga::ga::{GaConfig, Selection};
use qap_ga::{solve, solve_with_cancel, solve_with_config, Instance, QapError, ReferenceSolution};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

const SAMPLE_DAT: &str = "3\n\n0 1 2\n1 0 3\n2 3 0\n\n0 2 1\n2 0 3\n1 3 0\n";

/// Nugent-style instance: Manhattan distances on a 3x4 grid.
fn grid_instance() -> Instance {
    let coords: Vec<(i64, i64)> = (0..12).map(|k| (k / 4, k % 4)).collect();
    let distance = coords
        .iter()
        .map(|&(r1, c1)| {
            coords
                .iter()
                .map(|&(r2, c2)| (r1 - r2).abs() + (c1 - c2).abs())
                .collect()
        })
        .collect();
    let flow = (0..12)
        .map(|i: i64| {
            (0..12)
                .map(|j: i64| if i == j { 0 } else { (i * j + i + j) % 6 })
                .collect()
        })
        .collect();
    Instance::new(flow, distance).unwrap()
}

#[test]
fn sample_instance_reaches_known_optimum() {
    let instance = Instance::parse("sample.dat", SAMPLE_DAT).unwrap();
    let reference = ReferenceSolution::parse("sample.sln", "3 20\n2 3 1\n").unwrap();

    for seed in 0..10 {
        let solution = solve(&instance, 50, 20, seed).unwrap();
        assert_eq!(solution.cost, reference.optimal_cost, "seed {seed}");
    }
    assert_eq!(instance.checked_cost(&reference.permutation).unwrap(), 20);
}

#[test]
fn same_seed_same_answer() {
    let instance = grid_instance();
    let config = GaConfig::default().with_max_generations(60).with_seed(2024);
    let a = solve_with_config(&instance, &config).unwrap();
    let b = solve_with_config(&instance, &config).unwrap();
    assert_eq!(a.permutation, b.permutation);
    assert_eq!(a.cost, b.cost);
    assert_eq!(a.cost_history, b.cost_history);
}

#[test]
fn best_cost_never_worsens_with_elitism() {
    let instance = grid_instance();
    let config = GaConfig::default()
        .with_max_generations(80)
        .with_elite_count(1)
        .with_seed(3);
    let solution = solve_with_config(&instance, &config).unwrap();
    assert!(solution.cost_history.windows(2).all(|w| w[1] <= w[0]));
    assert!(solution.cost < solution.cost_history[0]);
}

#[test]
fn larger_tournament_still_valid() {
    let instance = grid_instance();
    let config = GaConfig::default()
        .with_population_size(30)
        .with_elite_count(3)
        .with_selection(Selection::Tournament(30))
        .with_max_generations(20)
        .with_seed(8);
    let solution = solve_with_config(&instance, &config).unwrap();
    assert_eq!(instance.checked_cost(&solution.permutation).unwrap(), solution.cost);
}

#[test]
fn cancelled_before_start_returns_initial_best() {
    let instance = grid_instance();
    let config = GaConfig::default().with_seed(1);
    let solution = solve_with_cancel(&instance, &config, Some(Arc::new(AtomicBool::new(true)))).unwrap();
    assert!(solution.stopped_early);
    assert_eq!(solution.generations, 0);
    assert_eq!(solution.cost_history, vec![solution.cost]);
}

#[test]
fn invalid_parameters_are_reported() {
    let instance = grid_instance();
    let err = solve_with_config(&instance, &GaConfig::default().with_elite_count(101)).unwrap_err();
    assert!(matches!(err, QapError::InvalidConfig(_)));
    assert!(solve(&instance, 0, 100, 1).is_err());
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_evaluation_matches_sequential() {
    let instance = grid_instance();
    let config = GaConfig::default().with_max_generations(30).with_seed(77);
    let sequential = solve_with_config(&instance, &config).unwrap();
    let parallel = solve_with_config(&instance, &config.clone().with_parallel(true)).unwrap();
    assert_eq!(sequential, parallel);
}
