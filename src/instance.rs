//! QAP instance data and the cost function.
//!
//! An [`Instance`] holds the flow and distance matrices of a Quadratic
//! Assignment Problem. It is immutable once built and shared read-only by
//! every fitness evaluation of a run.
//!
//! # QAPLIB format
//!
//! A `.dat` file is a stream of whitespace-separated integers: the size `n`,
//! then `n²` flow entries (row-major), then `n²` distance entries. Line
//! breaks carry no meaning.
//!
//! # References
//!
//! - Koopmans & Beckmann (1957), "Assignment Problems and the Location of
//!   Economic Activities"
//! - Burkard, Karisch & Rendl (1997), "QAPLIB – A Quadratic Assignment
//!   Problem Library"

use crate::error::{QapError, Result};
use std::path::Path;

/// Upper bound on the token buffer reserved before the count is known.
const MAX_RESERVE: usize = 1 << 20;

/// Flow and distance matrices of a QAP instance.
///
/// Entries are stored row-major in flat vectors. Matrices need not be
/// symmetric.
///
/// # Examples
///
/// ```
/// use qap_ga::Instance;
///
/// let instance = Instance::parse("tiny", "2  0 3 3 0  0 5 5 0").unwrap();
/// assert_eq!(instance.size(), 2);
/// assert_eq!(instance.cost(&[0, 1]), 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    n: usize,
    flow: Vec<i64>,
    distance: Vec<i64>,
}

impl Instance {
    /// Builds an instance from square row matrices.
    ///
    /// Rejects an empty problem, ragged rows, matrices of different sizes,
    /// and entries that break the [cost bound](Self::cost).
    pub fn new(flow: Vec<Vec<i64>>, distance: Vec<Vec<i64>>) -> Result<Self> {
        let n = flow.len();
        if n == 0 {
            return Err(QapError::instance("matrices", "instance size must be positive"));
        }
        if distance.len() != n {
            return Err(QapError::instance(
                "matrices",
                format!("flow has {n} rows but distance has {}", distance.len()),
            ));
        }
        let flow = flatten("flow", flow, n)?;
        let distance = flatten("distance", distance, n)?;
        check_entries("matrices", n, &flow, &distance)?;
        Ok(Self { n, flow, distance })
    }

    /// Builds an instance from QAPLIB tokens.
    ///
    /// `source_name` only labels errors (usually the file name).
    pub fn from_tokens<'a, I>(source_name: &str, tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut tokens = tokens.into_iter();

        let first = tokens
            .next()
            .ok_or_else(|| QapError::instance(source_name, "empty input"))?;
        let n: i64 = first.parse().map_err(|_| {
            QapError::instance(source_name, format!("size token {first:?} is not an integer"))
        })?;
        if n <= 0 {
            return Err(QapError::instance(
                source_name,
                format!("instance size must be positive, got {n}"),
            ));
        }
        let n = n as usize;
        let too_large = || QapError::instance(source_name, format!("instance size {n} too large"));
        let cells = n.checked_mul(n).ok_or_else(too_large)?;
        let expected = cells.checked_mul(2).ok_or_else(too_large)?;

        // The header is untrusted; never reserve more than a bounded chunk up front.
        let mut values = Vec::with_capacity(expected.min(MAX_RESERVE));
        for (offset, token) in tokens.enumerate() {
            let value: i64 = token.parse().map_err(|_| {
                QapError::instance(
                    source_name,
                    format!("token {} ({token:?}) is not an integer", offset + 1),
                )
            })?;
            values.push(value);
        }
        if values.len() != expected {
            return Err(QapError::instance(
                source_name,
                format!(
                    "expected {expected} matrix entries for n = {n}, found {}",
                    values.len()
                ),
            ));
        }

        let distance = values.split_off(cells);
        check_entries(source_name, n, &values, &distance)?;
        Ok(Self {
            n,
            flow: values,
            distance,
        })
    }

    /// Parses QAPLIB `.dat` text.
    pub fn parse(source_name: &str, text: &str) -> Result<Self> {
        Self::from_tokens(source_name, text.split_whitespace())
    }

    /// Reads and parses a QAPLIB `.dat` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| QapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&path.display().to_string(), &text)
    }

    /// Number of facilities (and locations).
    pub fn size(&self) -> usize {
        self.n
    }

    /// Flow between facilities `i` and `j`.
    #[inline]
    pub fn flow(&self, i: usize, j: usize) -> i64 {
        self.flow[i * self.n + j]
    }

    /// Distance between locations `a` and `b`.
    #[inline]
    pub fn distance(&self, a: usize, b: usize) -> i64 {
        self.distance[a * self.n + b]
    }

    /// Total assignment cost `Σᵢ Σⱼ flow[i][j] · distance[p[i]][p[j]]`.
    ///
    /// `permutation[i]` is the location assigned to facility `i`. The caller
    /// guarantees it is a permutation of `0..n`; use
    /// [`checked_cost`](Self::checked_cost) for untrusted input.
    ///
    /// Construction guarantees non-negative entries with
    /// `n² · max(flow) · max(distance) <= i64::MAX`, so the sum cannot
    /// overflow.
    ///
    /// # Complexity
    /// O(n²)
    pub fn cost(&self, permutation: &[usize]) -> i64 {
        debug_assert_eq!(permutation.len(), self.n, "permutation length must equal n");
        let n = self.n;
        let mut total = 0i64;
        for (i, &pi) in permutation.iter().enumerate() {
            let flow_row = &self.flow[i * n..(i + 1) * n];
            let dist_row = &self.distance[pi * n..(pi + 1) * n];
            for (&f, &pj) in flow_row.iter().zip(permutation) {
                total += f * dist_row[pj];
            }
        }
        total
    }

    /// Like [`cost`](Self::cost) but validates the permutation first.
    pub fn checked_cost(&self, permutation: &[usize]) -> Result<i64> {
        check_permutation(permutation, self.n)?;
        Ok(self.cost(permutation))
    }
}

/// Checks that `perm` contains every value of `0..n` exactly once.
pub fn check_permutation(perm: &[usize], n: usize) -> Result<()> {
    if perm.len() != n {
        return Err(QapError::InvalidPermutation {
            reason: format!("expected length {n}, got {}", perm.len()),
        });
    }
    let mut seen = vec![false; n];
    for &v in perm {
        if v >= n {
            return Err(QapError::InvalidPermutation {
                reason: format!("value {v} out of range 0..{n}"),
            });
        }
        if std::mem::replace(&mut seen[v], true) {
            return Err(QapError::InvalidPermutation {
                reason: format!("value {v} appears more than once"),
            });
        }
    }
    Ok(())
}

/// Rejects negative entries and matrices whose worst-case cost
/// `n² · max(flow) · max(distance)` does not fit in an `i64`.
fn check_entries(source_name: &str, n: usize, flow: &[i64], distance: &[i64]) -> Result<()> {
    for (name, matrix) in [("flow", flow), ("distance", distance)] {
        if let Some(pos) = matrix.iter().position(|&v| v < 0) {
            return Err(QapError::instance(
                source_name,
                format!(
                    "{name}[{}][{}] = {} is negative",
                    pos / n,
                    pos % n,
                    matrix[pos]
                ),
            ));
        }
    }
    let max_flow = flow.iter().copied().max().unwrap_or(0) as i128;
    let max_distance = distance.iter().copied().max().unwrap_or(0) as i128;
    let cells = (n as i128) * (n as i128);
    let bound = cells
        .checked_mul(max_flow)
        .and_then(|v| v.checked_mul(max_distance));
    match bound {
        Some(bound) if bound <= i64::MAX as i128 => Ok(()),
        _ => Err(QapError::instance(
            source_name,
            format!(
                "entries too large: {n}² x {max_flow} x {max_distance} exceeds the cost range"
            ),
        )),
    }
}

fn flatten(name: &str, rows: Vec<Vec<i64>>, n: usize) -> Result<Vec<i64>> {
    let mut flat = Vec::with_capacity(n * n);
    for (r, row) in rows.into_iter().enumerate() {
        if row.len() != n {
            return Err(QapError::instance(
                "matrices",
                format!("{name} row {r} has {} entries, expected {n}", row.len()),
            ));
        }
        flat.extend(row);
    }
    Ok(flat)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Instance {
        Instance::new(
            vec![vec![0, 1, 2], vec![1, 0, 3], vec![2, 3, 0]],
            vec![vec![0, 2, 1], vec![2, 0, 3], vec![1, 3, 0]],
        )
        .unwrap()
    }

    #[test]
    fn test_identity_cost() {
        // Both (i, j) and (j, i) contribute: 2 * (1*2 + 2*1 + 3*3)
        assert_eq!(sample().cost(&[0, 1, 2]), 26);
    }

    #[test]
    fn test_cost_is_deterministic() {
        let inst = sample();
        let p = [2, 0, 1];
        assert_eq!(inst.cost(&p), inst.cost(&p));
    }

    #[test]
    fn test_cost_asymmetric() {
        let inst = Instance::new(
            vec![vec![0, 5], vec![0, 0]],
            vec![vec![0, 1], vec![7, 0]],
        )
        .unwrap();
        assert_eq!(inst.cost(&[0, 1]), 5);
        assert_eq!(inst.cost(&[1, 0]), 35);
    }

    #[test]
    fn test_checked_cost_rejects_bad_permutations() {
        let inst = sample();
        assert!(inst.checked_cost(&[0, 1]).is_err());
        assert!(inst.checked_cost(&[0, 0, 1]).is_err());
        assert!(inst.checked_cost(&[0, 1, 3]).is_err());
        assert_eq!(inst.checked_cost(&[0, 1, 2]).unwrap(), 26);
    }

    #[test]
    fn test_new_rejects_empty_and_ragged() {
        assert!(Instance::new(vec![], vec![]).is_err());
        assert!(Instance::new(vec![vec![0, 1], vec![1]], vec![vec![0, 1], vec![1, 0]]).is_err());
        assert!(Instance::new(vec![vec![0]], vec![vec![0], vec![0]]).is_err());
    }

    #[test]
    fn test_parse_matches_new() {
        let text = "3\n\n 0 1 2\n 1 0 3\n 2 3 0\n\n 0 2 1\n 2 0 3\n 1 3 0\n";
        assert_eq!(Instance::parse("sample.dat", text).unwrap(), sample());
    }

    #[test]
    fn test_parse_ignores_line_layout() {
        let a = Instance::parse("a", "2 0 1 1 0 0 4 4 0").unwrap();
        let b = Instance::parse("b", "2\n0 1\n1 0\n0 4\n4 0").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.flow(0, 1), 1);
        assert_eq!(a.distance(1, 0), 4);
    }

    #[test]
    fn test_parse_errors() {
        let cases = [
            ("", "empty input"),
            ("x 0 0", "not an integer"),
            ("0", "must be positive"),
            ("-2 1 1", "must be positive"),
            ("2 0 1 1 0 0 4 4", "expected 8 matrix entries"),
            ("2 0 1 1 0 0 4 4 0 9", "expected 8 matrix entries"),
            ("2 0 1 1 0 0 4 four 0", "\"four\""),
        ];
        for (text, needle) in cases {
            let err = Instance::parse("t.dat", text).unwrap_err();
            let msg = err.to_string();
            assert!(matches!(err, QapError::MalformedInstance { .. }), "{text:?}");
            assert!(msg.contains(needle), "{text:?}: {msg}");
            assert!(msg.contains("t.dat"));
        }
    }

    #[test]
    fn test_header_larger_than_data() {
        let err = Instance::parse("huge.dat", "100000 1 2 3").unwrap_err();
        assert!(matches!(err, QapError::MalformedInstance { .. }));
        assert!(err.to_string().contains("expected 20000000000 matrix entries"), "{err}");
    }

    #[test]
    fn test_header_overflowing_entry_count() {
        for header in ["4294967295 1 2 3", "9223372036854775807 1"] {
            let err = Instance::parse("huge.dat", header).unwrap_err();
            assert!(matches!(err, QapError::MalformedInstance { .. }), "{header}");
            assert!(err.to_string().contains("too large"), "{header}: {err}");
        }
    }

    #[test]
    fn test_rejects_negative_entries() {
        let err = Instance::parse("neg.dat", "2 0 1 1 0 0 -4 4 0").unwrap_err();
        assert!(err.to_string().contains("distance[0][1] = -4 is negative"), "{err}");
        assert!(Instance::new(vec![vec![-1]], vec![vec![0]]).is_err());
    }

    #[test]
    fn test_rejects_entries_that_overflow_cost() {
        let err = Instance::parse("big.dat", "2 0 4611686018427387904 1 0 0 4 4 0").unwrap_err();
        assert!(matches!(err, QapError::MalformedInstance { .. }));
        assert!(err.to_string().contains("too large"), "{err}");

        let err = Instance::new(vec![vec![0, i64::MAX], vec![0, 0]], vec![vec![0, 2], vec![2, 0]]);
        assert!(err.is_err());
    }

    #[test]
    fn test_largest_accepted_entries_do_not_overflow() {
        // 4 cells x (i64::MAX / 4) x 1 fits; the cost stays in range.
        let big = i64::MAX / 4;
        let inst = Instance::new(vec![vec![big, big], vec![big, big]], vec![vec![1, 1], vec![1, 1]])
            .unwrap();
        assert_eq!(inst.cost(&[0, 1]), 4 * big);
    }

    #[test]
    fn test_from_file_missing() {
        let err = Instance::from_file("/nonexistent/nope.dat").unwrap_err();
        assert!(matches!(err, QapError::Io { .. }));
    }

    #[test]
    fn test_check_permutation() {
        assert!(check_permutation(&[2, 0, 1], 3).is_ok());
        assert!(check_permutation(&[], 0).is_ok());
        assert!(check_permutation(&[1, 1, 0], 3).is_err());
    }
}
