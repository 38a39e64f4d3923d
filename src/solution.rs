//! QAPLIB reference solutions (`.sln`).
//!
//! A `.sln` file holds the instance size, the best known cost and the
//! best known permutation with one-based locations. Only the cost feeds
//! gap reporting; the GA never reads any of it.

use crate::error::{QapError, Result};
use std::path::Path;

/// Best known solution of a QAPLIB instance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferenceSolution {
    /// Best known (usually optimal) cost.
    pub optimal_cost: i64,

    /// Best known permutation, zero-based. May be empty when the file
    /// only lists the cost.
    pub permutation: Vec<usize>,
}

impl ReferenceSolution {
    /// Parses `.sln` text: `n`, cost, then one-based permutation entries.
    ///
    /// ```
    /// use qap_ga::ReferenceSolution;
    ///
    /// let sln = ReferenceSolution::parse("tiny.sln", "3 20\n2 3 1\n").unwrap();
    /// assert_eq!(sln.optimal_cost, 20);
    /// assert_eq!(sln.permutation, vec![1, 2, 0]);
    /// ```
    pub fn parse(source_name: &str, text: &str) -> Result<Self> {
        let values = text
            .split_whitespace()
            .enumerate()
            .map(|(i, token)| {
                token.parse::<i64>().map_err(|_| {
                    QapError::solution(source_name, format!("token {i} ({token:?}) is not an integer"))
                })
            })
            .collect::<Result<Vec<i64>>>()?;

        if values.len() < 2 {
            return Err(QapError::solution(
                source_name,
                format!("expected at least 2 tokens, found {}", values.len()),
            ));
        }

        let permutation = values[2..]
            .iter()
            .map(|&v| {
                if v < 1 {
                    Err(QapError::solution(
                        source_name,
                        format!("permutation entry {v} is not one-based"),
                    ))
                } else {
                    Ok((v - 1) as usize)
                }
            })
            .collect::<Result<Vec<usize>>>()?;

        Ok(Self {
            optimal_cost: values[1],
            permutation,
        })
    }

    /// Reads and parses a `.sln` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| QapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&path.display().to_string(), &text)
    }

    /// Like [`from_file`](Self::from_file), but a missing file means the
    /// reference is unavailable and yields `Ok(None)`.
    pub fn load_optional(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        Self::from_file(path).map(Some)
    }
}
