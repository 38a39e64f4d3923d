//! Genetic algorithm for the Quadratic Assignment Problem.
//!
//! Given `n` facilities, `n` locations, a flow matrix `A` and a distance
//! matrix `B`, the QAP asks for a permutation `π` minimizing
//! `Σᵢⱼ A[i][j]·B[π(i)][π(j)]`. This crate approximates it with a
//! generational GA:
//!
//! - **Initialization**: uniformly random permutations (Fisher–Yates)
//! - **Selection**: tournament of 3 distinct individuals
//! - **Crossover**: Partially Mapped Crossover (PMX)
//! - **Mutation**: swap of two positions, rate 0.1
//! - **Replacement**: the 20 best survive unchanged, the rest is offspring
//!
//! Every random decision goes through an explicitly seeded generator, so a
//! seed reproduces a run exactly.
//!
//! # Architecture
//!
//! - [`ga`]: the generic engine ([`GaProblem`](ga::GaProblem),
//!   [`GaRunner`](ga::GaRunner), operators)
//! - [`problem`]: the QAP plugged into the engine, and [`solve`]
//! - [`instance`], [`solution`]: QAPLIB `.dat` / `.sln` loaders
//! - [`report`], [`batch`]: gap reporting and directory runs
//! - `archive` (feature `archive`): unpacking QAPLIB `.tar.gz` tarballs
//!
//! # Example
//!
//! ```
//! use qap_ga::{solve, Instance};
//!
//! let instance = Instance::parse("tiny", "3  0 1 2 1 0 3 2 3 0  0 2 1 2 0 3 1 3 0").unwrap();
//! let solution = solve(&instance, 100, 20, 42).unwrap();
//! assert_eq!(solution.cost, 20);
//! ```

#[cfg(feature = "archive")]
pub mod archive;
pub mod batch;
pub mod error;
pub mod ga;
pub mod instance;
pub mod problem;
pub mod random;
pub mod report;
pub mod solution;

pub use error::{QapError, Result};
pub use instance::Instance;
pub use problem::{solve, solve_with_cancel, solve_with_config, Assignment, QapProblem, QapSolution};
pub use report::GapReport;
pub use solution::ReferenceSolution;
