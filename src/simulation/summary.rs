// Summary statistics over trial means

use crate::error::{InferenceError, Result};
use serde::Serialize;

/// Mean and unbiased variance of a sequence of statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSummary {
    /// Number of values summarized
    pub count: usize,

    /// Arithmetic mean
    pub mean: f64,

    /// Sample variance (divide by count - 1); `None` when count == 1
    pub variance: Option<f64>,
}

impl SampleSummary {
    /// Variance, or `UndefinedStatistic` when fewer than 2 values were summarized
    pub fn require_variance(&self) -> Result<f64> {
        self.variance.ok_or_else(|| {
            InferenceError::UndefinedStatistic(format!(
                "variance requires at least 2 observations, got {}",
                self.count
            ))
        })
    }

    /// Sample standard deviation, when the variance is defined
    pub fn std_dev(&self) -> Option<f64> {
        self.variance.map(f64::sqrt)
    }
}

/// Summarize `values` with their mean and unbiased variance
///
/// Uses a two-pass computation (mean first, then squared deviations), which is
/// stable enough for millions of trial means.
///
/// # Errors
/// `InvalidArgument` for an empty slice.
pub fn summarize(values: &[f64]) -> Result<SampleSummary> {
    if values.is_empty() {
        return Err(InferenceError::InvalidArgument(
            "cannot summarize an empty sequence".to_string(),
        ));
    }

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;

    let variance = if count < 2 {
        None
    } else {
        let ss: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
        Some(ss / (count - 1) as f64)
    };

    Ok(SampleSummary {
        count,
        mean,
        variance,
    })
}
