//! Error types shared by every search driver.
//!
//! Expected domain conditions (a neighborhood with no feasible move, an
//! empty front handed to an indicator) are not errors; they are reported as
//! `None`. [`SearchError`] is reserved for genuine failures, which always
//! surface to the caller of the search entry point.

use thiserror::Error;

/// Failures raised while setting up or running a search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Problem data is missing or malformed. Nothing is partially built.
    #[error("unable to import problem {problem:?}: {reason}")]
    Import {
        /// Identifier of the offending problem instance.
        problem: String,
        /// What was wrong with the data.
        reason: String,
    },

    /// A search configuration was rejected before the first iteration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A move was requested against a solution the neighborhood cannot
    /// handle.
    #[error("neighborhood error: {0}")]
    Neighborhood(String),

    /// A worker failed while evaluating its shard. The round is aborted.
    #[error("worker for shard {shard} failed: {message}")]
    Worker {
        /// Index of the shard whose evaluation failed.
        shard: usize,
        /// Panic payload or error description.
        message: String,
    },

    /// The worker pool could not be created.
    #[error("unable to build worker pool: {0}")]
    Pool(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_error_names_problem() {
        let err = SearchError::Import {
            problem: "6.5.1".into(),
            reason: "matrix is not square".into(),
        };
        let text = err.to_string();
        assert!(text.contains("\"6.5.1\""), "got {text}");
        assert!(text.contains("not square"), "got {text}");
    }

    #[test]
    fn test_worker_error_names_shard() {
        let err = SearchError::Worker {
            shard: 3,
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "worker for shard 3 failed: boom");
    }
}
