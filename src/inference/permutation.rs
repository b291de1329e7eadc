// Label-permutation testing of a difference in means
//
// The observed statistic is mean(A) - mean(B). Under the null hypothesis the
// labels are exchangeable, so the label multiset is shuffled over the pooled
// observations (group sizes fixed) and the statistic recomputed. The one-sided
// tail fraction is the share of permuted statistics strictly greater than the
// observed one.

use crate::dataset::{Dataset, Dose};
use crate::error::{ensure_nonzero, InferenceError, Result};
use crate::random::RandomSource;
use crate::simulation::summarize;
use serde::Serialize;

/// Permutation count used when none is configured
pub const DEFAULT_PERMUTATIONS: usize = 10_000;

/// Null distribution of mean(A) - mean(B) and its summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PermutationNullDistribution {
    /// mean(A) - mean(B) under the original labels
    pub observed: f64,

    /// One statistic per permutation; length equals the configured count
    #[serde(skip)]
    pub permutations: Vec<f64>,

    /// Mean of the permuted statistics
    pub null_mean: f64,

    /// Sample standard deviation of the permuted statistics (`None` for a single permutation)
    pub null_std_dev: Option<f64>,

    /// #{permuted > observed} / count
    pub tail_fraction: f64,
}

impl PermutationNullDistribution {
    /// Number of permutations drawn
    pub fn count(&self) -> usize {
        self.permutations.len()
    }
}

/// Permutation test inside one dose level
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StratumPermutation {
    pub dose: Dose,
    pub label_a: String,
    pub label_b: String,
    pub size_a: usize,
    pub size_b: usize,
    pub null: PermutationNullDistribution,
}

/// Run a permutation test of mean(`a`) - mean(`b`)
///
/// # Errors
/// - `InvalidArgument` when `permutations` is zero
/// - `DegenerateStratum` when either side is empty (only one label present)
///
/// # Example
/// ```
/// use statreport::inference::permutation_test;
/// use statreport::random::RandomSource;
///
/// let mut rng = RandomSource::seeded(1);
/// let a = [25.5, 26.4, 22.4, 24.5];
/// let b = [4.2, 11.5, 7.3, 5.8];
/// let null = permutation_test(&mut rng, "demo", &a, &b, 500).unwrap();
/// assert_eq!(null.count(), 500);
/// assert!(null.tail_fraction < 0.05);
/// ```
pub fn permutation_test(
    rng: &mut RandomSource,
    stratum: &str,
    a: &[f64],
    b: &[f64],
    permutations: usize,
) -> Result<PermutationNullDistribution> {
    ensure_nonzero("permutations", permutations)?;
    if a.is_empty() || b.is_empty() {
        return Err(InferenceError::DegenerateStratum {
            stratum: stratum.to_string(),
        });
    }

    let pooled: Vec<f64> = a.iter().chain(b.iter()).copied().collect();
    let total: f64 = pooled.iter().sum();
    let (size_a, size_b) = (a.len(), b.len());

    // true = label A
    let mut labels: Vec<bool> = (0..pooled.len()).map(|i| i < size_a).collect();
    let observed = difference_in_means(&pooled, &labels, total, size_a, size_b);

    if pooled.iter().all(|&v| v == pooled[0]) {
        tracing::warn!(stratum, "all pooled values are equal; null distribution is degenerate");
    }

    let mut null = Vec::with_capacity(permutations);
    for _ in 0..permutations {
        rng.permute_labels(&mut labels);
        null.push(difference_in_means(&pooled, &labels, total, size_a, size_b));
    }

    let summary = summarize(&null)?;
    let exceed = null.iter().filter(|&&s| s > observed).count();

    tracing::debug!(
        stratum,
        observed,
        null_mean = summary.mean,
        exceed,
        permutations,
        "permutation test"
    );

    Ok(PermutationNullDistribution {
        observed,
        null_mean: summary.mean,
        null_std_dev: summary.std_dev(),
        tail_fraction: exceed as f64 / permutations as f64,
        permutations: null,
    })
}

/// Run one permutation test per dose level comparing `label_a` to `label_b`
///
/// Strata are never pooled. Each stratum draws from its own stream split off
/// `rng`, in ascending dose order.
///
/// # Errors
/// `InvalidArgument` when the labels are equal; otherwise as
/// [`permutation_test`], with the stratum named by its dose.
pub fn stratified_permutation_tests(
    rng: &mut RandomSource,
    dataset: &Dataset,
    label_a: &str,
    label_b: &str,
    permutations: usize,
) -> Result<Vec<StratumPermutation>> {
    if label_a == label_b {
        return Err(InferenceError::InvalidArgument(format!(
            "permutation labels must differ, got {} twice",
            label_a
        )));
    }

    let mut results = Vec::new();
    for dose in dataset.dose_levels() {
        let a = dataset.values_for(label_a, dose);
        let b = dataset.values_for(label_b, dose);
        let mut stream = rng.split();
        let null = permutation_test(
            &mut stream,
            &format!("dose {}", dose),
            &a,
            &b,
            permutations,
        )?;

        results.push(StratumPermutation {
            dose,
            label_a: label_a.to_string(),
            label_b: label_b.to_string(),
            size_a: a.len(),
            size_b: b.len(),
            null,
        });
    }

    tracing::info!(strata = results.len(), permutations, "permutation testing complete");
    Ok(results)
}

/// mean of values labeled A minus mean of values labeled B
fn difference_in_means(
    pooled: &[f64],
    labels: &[bool],
    total: f64,
    size_a: usize,
    size_b: usize,
) -> f64 {
    let sum_a: f64 = pooled
        .iter()
        .zip(labels)
        .filter(|&(_, &is_a)| is_a)
        .map(|(v, _)| v)
        .sum();
    sum_a / size_a as f64 - (total - sum_a) / size_b as f64
}
