// Per-group descriptive statistics for the exploratory table
//
// - Uses trueno::Vector for SIMD-optimized statistics (mean, stddev, min, max)
// - Uses aprender::stats::DescriptiveStats for the median (R-7 quantile)

use crate::dataset::{Dataset, GroupKey};
use crate::error::{InferenceError, Result};
use aprender::stats::DescriptiveStats;
use serde::Serialize;
use trueno::Vector;

/// Descriptive statistics of one (method, dose) group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub key: GroupKey,
    pub count: usize,
    pub mean: f32,
    /// Population standard deviation (trueno divides by n)
    pub stddev: f32,
    pub min: f32,
    pub max: f32,
    pub median: f32,
}

/// Summarize every group of the dataset, in key order
pub fn describe_groups(dataset: &Dataset) -> Result<Vec<GroupSummary>> {
    dataset
        .groups()
        .into_iter()
        .map(|(key, values)| describe_group(key, &values))
        .collect()
}

fn describe_group(key: GroupKey, values: &[f64]) -> Result<GroupSummary> {
    let data: Vec<f32> = values.iter().map(|&v| v as f32).collect();
    let v = Vector::from_slice(&data);

    let stat_error = |what: &str, e: &dyn std::fmt::Display| {
        InferenceError::UndefinedStatistic(format!("{} of group {}: {}", what, key, e))
    };

    let mean = v.mean().map_err(|e| stat_error("mean", &e))?;
    let stddev = v.stddev().map_err(|e| stat_error("stddev", &e))?;
    let min = v.min().map_err(|e| stat_error("min", &e))?;
    let max = v.max().map_err(|e| stat_error("max", &e))?;
    let median = median(&v).map_err(|e| match e {
        InferenceError::UndefinedStatistic(msg) => stat_error("median", &msg),
        other => other,
    })?;

    Ok(GroupSummary {
        count: values.len(),
        key,
        mean,
        stddev,
        min,
        max,
        median,
    })
}

/// Median via aprender's quantile(0.5)
///
/// # Errors
/// `UndefinedStatistic` when aprender rejects the input (e.g. an empty vector)
pub fn median(vector: &Vector<f32>) -> Result<f32> {
    DescriptiveStats::new(vector)
        .quantile(0.5)
        .map_err(|e| InferenceError::UndefinedStatistic(e.to_string()))
}
