//! Error types shared by the simulation and inference pipelines
//!
//! All errors are deterministic input-validation failures raised at the
//! point of detection. Nothing here is transient, so callers either report
//! them or re-run with corrected inputs.

use thiserror::Error;

/// Errors for sampling, summary and hypothesis-testing operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    /// Non-positive count, rate or size (or an out-of-range config value)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A group too small for a two-sample test
    #[error("Insufficient data in group {group}: need at least 2 observations, got {observations}")]
    InsufficientData { group: String, observations: usize },

    /// A permutation stratum in which only one label is present
    #[error("Degenerate stratum {stratum}: permutation requires both labels to be present")]
    DegenerateStratum { stratum: String },

    /// A statistic requested over too few observations (e.g. variance of one value)
    #[error("Undefined statistic: {0}")]
    UndefinedStatistic(String),

    /// The t-test backend rejected otherwise valid input (e.g. two constant groups)
    #[error("Statistical test failed: {0}")]
    TestFailed(String),
}

pub type Result<T> = std::result::Result<T, InferenceError>;

/// Fail with `InvalidArgument` unless `value` is a finite, strictly positive number
pub(crate) fn ensure_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(InferenceError::InvalidArgument(format!(
            "{} must be a finite positive number, got {}",
            name, value
        )))
    }
}

/// Fail with `InvalidArgument` when a count is zero
pub(crate) fn ensure_nonzero(name: &str, count: usize) -> Result<()> {
    if count == 0 {
        Err(InferenceError::InvalidArgument(format!(
            "{} must be > 0, got 0",
            name
        )))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive_accepts_positive() {
        assert!(ensure_positive("rate", 0.2).is_ok());
    }

    #[test]
    fn test_ensure_positive_rejects_zero_negative_and_nan() {
        assert!(ensure_positive("rate", 0.0).is_err());
        assert!(ensure_positive("rate", -1.0).is_err());
        assert!(ensure_positive("rate", f64::NAN).is_err());
        assert!(ensure_positive("rate", f64::INFINITY).is_err());
    }

    #[test]
    fn test_ensure_nonzero() {
        assert!(ensure_nonzero("trials", 1).is_ok());
        assert_eq!(
            ensure_nonzero("trials", 0),
            Err(InferenceError::InvalidArgument(
                "trials must be > 0, got 0".to_string()
            ))
        );
    }

    #[test]
    fn test_error_messages_name_the_group() {
        let err = InferenceError::InsufficientData {
            group: "VC@0.5".to_string(),
            observations: 1,
        };
        assert!(err.to_string().contains("VC@0.5"));
        assert!(err.to_string().contains("got 1"));
    }
}
