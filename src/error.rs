//! Error type shared by the loaders, the configuration and the solver.

use std::path::PathBuf;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QapError>;

/// Errors reported to the caller. Nothing in this crate retries.
#[derive(Debug, thiserror::Error)]
pub enum QapError {
    /// Instance data could not be turned into a flow/distance pair.
    #[error("malformed instance {source_name}: {reason}")]
    MalformedInstance { source_name: String, reason: String },

    /// A reference solution file is unusable.
    #[error("malformed solution {source_name}: {reason}")]
    MalformedSolution { source_name: String, reason: String },

    /// A sequence that should be a permutation of `0..n` is not.
    #[error("invalid permutation: {reason}")]
    InvalidPermutation { reason: String },

    /// GA parameters that the evolutionary loop cannot run with.
    #[error("invalid GA configuration: {0}")]
    InvalidConfig(String),

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl QapError {
    pub(crate) fn instance(source_name: &str, reason: impl Into<String>) -> Self {
        QapError::MalformedInstance {
            source_name: source_name.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn solution(source_name: &str, reason: impl Into<String>) -> Self {
        QapError::MalformedSolution {
            source_name: source_name.to_string(),
            reason: reason.into(),
        }
    }
}
