//! Parent selection.
//!
//! # References
//!
//! - Miller & Goldberg (1995), "Genetic Algorithms, Tournament Selection,
//!   and the Effects of Noise"
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::types::Individual;
use rand::seq::index;
use rand::Rng;

/// Selection strategy for choosing parents.
///
/// Assumes **minimization** (lower fitness = better).
///
/// ```
/// use qap_ga::ga::Selection;
///
/// let sel = Selection::Tournament(3);
/// assert_eq!(sel, Selection::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Tournament selection: sample `k` *distinct* individuals, keep the
    /// best. Ties go to the one drawn first.
    ///
    /// Higher `k` = stronger selection pressure. With `k` equal to the
    /// population size the best individual always wins.
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Selects a parent and returns its index in `population`.
    ///
    /// Every call draws independently, so two calls may return the same
    /// index.
    ///
    /// # Panics
    /// Panics if `population` is empty or smaller than the tournament.
    pub fn select<I: Individual, R: Rng>(&self, population: &[I], rng: &mut R) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        match self {
            Selection::Tournament(k) => tournament(population, *k, rng),
        }
    }
}

/// Tournament without replacement: k distinct contestants, lowest fitness wins.
fn tournament<I: Individual, R: Rng>(population: &[I], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = population.len();
    assert!(
        n >= k,
        "tournament size {k} exceeds population size {n}"
    );

    let mut contestants = index::sample(rng, n, k).into_iter();
    // k >= 1, so there is always a first contestant
    let mut best_idx = contestants.next().unwrap_or(0);
    for idx in contestants {
        if population[idx].fitness() < population[best_idx].fitness() {
            best_idx = idx;
        }
    }
    best_idx
}
