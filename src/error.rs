//! Error types reported by the optimizer.
//!
//! All fallible operations in this crate return [`GaError`]. Configuration
//! problems are caught before the evolutionary loop starts; evaluation
//! problems (timeouts, non-numeric fitness) abort the run when they occur.

use std::time::Duration;

/// Errors produced while validating inputs or evaluating the objective.
#[derive(Debug, thiserror::Error)]
pub enum GaError {
    /// A run parameter is out of its legal range.
    #[error("invalid {field}: {message}")]
    Configuration {
        /// Name of the offending parameter.
        field: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// A seeded start row does not match the search-space dimension.
    #[error("start population row {row} has {actual} variables, expected {expected}")]
    DimensionMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A seeded start population carries a score vector of the wrong length.
    #[error("start population has {rows} rows but {scores} fitness scores")]
    ScoreCountMismatch { rows: usize, scores: usize },

    /// A single objective call ran longer than the configured limit.
    #[error("objective call exceeded its {limit:?} timeout")]
    Timeout { limit: Duration },

    /// The objective produced something the engine cannot rank.
    #[error("invalid objective result: {message}")]
    InvalidResult { message: String },
}

impl GaError {
    /// Shorthand for a [`GaError::Configuration`] with an owned message.
    pub fn configuration(field: &'static str, message: impl Into<String>) -> Self {
        GaError::Configuration {
            field,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_display_names_field() {
        let err = GaError::configuration("elite_ratio", "must lie in [0, 1]");
        assert_eq!(err.to_string(), "invalid elite_ratio: must lie in [0, 1]");
    }

    #[test]
    fn test_dimension_mismatch_display() {
        let err = GaError::DimensionMismatch {
            row: 3,
            expected: 5,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "start population row 3 has 2 variables, expected 5"
        );
    }

    #[test]
    fn test_timeout_display_mentions_limit() {
        let err = GaError::Timeout {
            limit: Duration::from_secs(10),
        };
        assert!(err.to_string().contains("10s"));
    }
}
