//! Property tests for the permutation operators, the cost function and
//! the instance loader.

use proptest::prelude::*;
use qap_ga::ga::operators::{pmx_child, pmx_crossover, random_permutation, swap_mutation};
use qap_ga::instance::check_permutation;
use qap_ga::random::create_rng;
use qap_ga::{Instance, QapError};

/// A permutation of `0..n` for `n` in `1..=max`.
fn permutation(max: usize) -> impl Strategy<Value = Vec<usize>> {
    (1..=max).prop_flat_map(|n| Just((0..n).collect::<Vec<usize>>()).prop_shuffle())
}

/// Two permutations of the same length.
fn parents(max: usize) -> impl Strategy<Value = (Vec<usize>, Vec<usize>)> {
    (1..=max).prop_flat_map(|n| {
        let base: Vec<usize> = (0..n).collect();
        (Just(base.clone()).prop_shuffle(), Just(base).prop_shuffle())
    })
}

fn instance(max: usize) -> impl Strategy<Value = Instance> {
    (1..=max).prop_flat_map(|n| {
        (
            prop::collection::vec(prop::collection::vec(0i64..100, n), n),
            prop::collection::vec(prop::collection::vec(0i64..100, n), n),
        )
            .prop_map(|(flow, distance)| Instance::new(flow, distance).unwrap())
    })
}

proptest! {
    #[test]
    fn pmx_child_is_permutation_for_all_cuts((p1, p2) in parents(24), a in 0usize..=24, b in 0usize..=24) {
        let n = p1.len();
        let (start, end) = (a.min(b).min(n), a.max(b).min(n));
        let child = pmx_child(&p1, &p2, start, end);
        prop_assert!(check_permutation(&child, n).is_ok(), "{:?}", child);
        prop_assert_eq!(&child[start..end], &p1[start..end]);
    }

    #[test]
    fn pmx_crossover_is_permutation((p1, p2) in parents(40), seed in any::<u64>()) {
        let mut rng = create_rng(seed);
        let child = pmx_crossover(&p1, &p2, &mut rng);
        prop_assert!(check_permutation(&child, p1.len()).is_ok());
    }

    #[test]
    fn pmx_outside_segment_positions_come_from_a_parent((p1, p2) in parents(16), a in 0usize..=16, b in 0usize..=16) {
        let n = p1.len();
        let (start, end) = (a.min(b).min(n), a.max(b).min(n));
        let child = pmx_child(&p1, &p2, start, end);
        // A value outside the segment is either parent2's own value or a
        // displaced value from parent2's segment.
        for k in (0..start).chain(end..n) {
            let v = child[k];
            prop_assert!(v == p2[k] || p2[start..end].contains(&v));
        }
    }

    #[test]
    fn swap_mutation_is_permutation(mut p in permutation(40), seed in any::<u64>()) {
        let n = p.len();
        let mut rng = create_rng(seed);
        swap_mutation(&mut p, &mut rng);
        prop_assert!(check_permutation(&p, n).is_ok());
    }

    #[test]
    fn random_permutation_is_permutation(n in 0usize..64, seed in any::<u64>()) {
        let mut rng = create_rng(seed);
        prop_assert!(check_permutation(&random_permutation(n, &mut rng), n).is_ok());
    }

    #[test]
    fn cost_is_pure(inst in instance(8), seed in any::<u64>()) {
        let p = random_permutation(inst.size(), &mut create_rng(seed));
        prop_assert_eq!(inst.cost(&p), inst.cost(&p));
        prop_assert_eq!(inst.checked_cost(&p).unwrap(), inst.cost(&p));
    }

    #[test]
    fn cost_matches_naive_double_sum(inst in instance(7), seed in any::<u64>()) {
        let n = inst.size();
        let p = random_permutation(n, &mut create_rng(seed));
        let mut expected = 0i64;
        for i in 0..n {
            for j in 0..n {
                expected += inst.flow(i, j) * inst.distance(p[i], p[j]);
            }
        }
        prop_assert_eq!(inst.cost(&p), expected);
    }

    #[test]
    fn parse_rejects_any_header_token_mismatch(n in 1i64..i64::MAX, body in prop::collection::vec(0i64..10, 0..40)) {
        prop_assume!(n.checked_mul(n).and_then(|cells| cells.checked_mul(2)) != Some(body.len() as i64));
        let text = std::iter::once(n)
            .chain(body)
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let err = Instance::parse("any.dat", &text).unwrap_err();
        prop_assert!(matches!(err, QapError::MalformedInstance { .. }), "{}", err);
    }

    #[test]
    fn parse_accepts_consistent_header(inst in instance(6)) {
        let n = inst.size();
        let mut tokens = vec![n.to_string()];
        for i in 0..n {
            for j in 0..n {
                tokens.push(inst.flow(i, j).to_string());
            }
        }
        for a in 0..n {
            for b in 0..n {
                tokens.push(inst.distance(a, b).to_string());
            }
        }
        prop_assert_eq!(Instance::parse("ok.dat", &tokens.join(" ")).unwrap(), inst);
    }
}
