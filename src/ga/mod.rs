//! Genetic Algorithm engine.
//!
//! A generic GA built on trait-based abstractions. A problem plugs in by
//! implementing [`GaProblem`], which specifies how to create, evaluate,
//! recombine and mutate individuals; the QAP does so in
//! [`crate::problem`].
//!
//! # Core Traits
//!
//! - [`Individual`]: A candidate solution with its cached fitness
//! - [`GaProblem`]: Problem definition: initialization, evaluation and operators
//!
//! # Key Types
//!
//! - [`GaConfig`]: Loop parameters (population, generations, elitism, rates)
//! - [`GaRunner`]: Executes the generational loop
//! - [`GaResult`]: Final result with best-fitness history
//!
//! # Submodules
//!
//! - [`operators`]: Permutation initialization, PMX crossover, swap mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Tate & Smith (1995), "A Genetic Approach to the Quadratic Assignment Problem"

mod config;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner};
pub use selection::Selection;
pub use types::{Fitness, GaProblem, Individual};
