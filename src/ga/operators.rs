//! Permutation operators.
//!
//! These work on plain `&[usize]` index vectors, so any
//! permutation-encoded problem can use them.
//!
//! - [`random_permutation`]: uniform initial individual (Fisher–Yates)
//! - [`pmx_crossover`] (PMX): Goldberg & Lingle (1985), preserves absolute
//!   positions
//! - [`swap_mutation`]: exchange two distinct positions
//!
//! # References
//!
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use rand::seq::{index, SliceRandom};
use rand::Rng;

const EMPTY: usize = usize::MAX;

/// Uniformly random permutation of `0..n`.
///
/// # Complexity
/// O(n)
pub fn random_permutation<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(rng);
    perm
}

/// Partially Mapped Crossover (PMX). Produces one child.
///
/// Two distinct cut points `i < j` are drawn uniformly from `0..n`; the
/// child takes `parent1[i..j]` verbatim and everything else from `parent2`,
/// with displaced values relocated through the PMX mapping. See
/// [`pmx_child`] for the deterministic part.
///
/// Parents shorter than 2 have no segment to choose; the child is a copy
/// of `parent1`.
///
/// # Panics
/// Panics if the parents differ in length or are not permutations of
/// `0..n`.
pub fn pmx_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    if n < 2 {
        return parent1.to_vec();
    }

    let cuts = index::sample(rng, n, 2);
    let (a, b) = (cuts.index(0), cuts.index(1));
    let (start, end) = if a < b { (a, b) } else { (b, a) };

    pmx_child(parent1, parent2, start, end)
}

/// Builds the PMX child for the segment `start..end` (half-open).
///
/// 1. `child[start..end] = parent1[start..end]`
/// 2. For each `k` in the segment whose `parent2[k]` is not yet in the
///    child, follow `k → pos_in_parent2(parent1[k])` until a free slot
///    is reached and put `parent2[k]` there.
/// 3. Remaining free slots take `parent2` at the same position.
///
/// `start == end` is legal and returns a copy of `parent2`.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if `start > end`, `end > n`, or a parent is not a permutation
/// of `0..n`.
pub fn pmx_child(parent1: &[usize], parent2: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(start <= end && end <= n, "invalid segment {start}..{end} for length {n}");

    let pos_in_parent2 = positions(parent2);

    let mut child = vec![EMPTY; n];
    let mut placed = vec![false; n];

    for k in start..end {
        let v = parent1[k];
        assert!(
            v < n && !placed[v],
            "parent1 is not a permutation of 0..{n}: value {v} at {k}"
        );
        child[k] = v;
        placed[v] = true;
    }

    for k in start..end {
        let elem = parent2[k];
        if placed[elem] {
            continue;
        }

        let mut slot = k;
        let mut steps = 0;
        while child[slot] != EMPTY {
            // Hops visit distinct segment slots for valid parents.
            steps += 1;
            assert!(steps <= n, "PMX mapping chain did not terminate");
            slot = pos_in_parent2[parent1[slot]];
        }
        child[slot] = elem;
        placed[elem] = true;
    }

    for (slot, &v) in child.iter_mut().zip(parent2) {
        if *slot == EMPTY {
            *slot = v;
        }
    }

    child
}

/// Swap mutation: exchange two distinct, uniformly chosen positions.
///
/// No-op for permutations shorter than 2.
///
/// # Complexity
/// O(1)
pub fn swap_mutation<R: Rng>(perm: &mut [usize], rng: &mut R) {
    let n = perm.len();
    if n < 2 {
        return;
    }
    let picks = index::sample(rng, n, 2);
    perm.swap(picks.index(0), picks.index(1));
}

/// Inverse of a permutation: `pos[value] = index`.
fn positions(perm: &[usize]) -> Vec<usize> {
    let n = perm.len();
    let mut pos = vec![EMPTY; n];
    for (i, &v) in perm.iter().enumerate() {
        assert!(
            v < n && pos[v] == EMPTY,
            "parent2 is not a permutation of 0..{n}: value {v} at {i}"
        );
        pos[v] = i;
    }
    pos
}
