// Pairwise group comparisons with false discovery rate control
//
// Groups are keyed by (method, dose). Only pairs that share exactly one
// dimension are comparable: same method at two doses, or two methods at the
// same dose. Pairs differing in both dimensions are never tested and never
// appear in the results.
//
// Sign convention: groups are ordered method-major (method levels in
// first-appearance order, then ascending dose). For a pair the later group is
// the "row" and the earlier one the "column", and
// mean_difference = mean(row) - mean(column).

use crate::dataset::{Dataset, Dose, GroupKey};
use crate::error::{InferenceError, Result};
use crate::inference::correction::benjamini_hochberg;
use crate::inference::welch::welch_t_test;
use serde::Serialize;
use std::collections::BTreeMap;

/// The dimension two comparable groups have in common
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SharedDimension {
    /// Same method, different dose
    Method,
    /// Same dose, different method
    Dose,
}

/// Test outcome for one comparable pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupPairResult {
    /// Later group in canonical order
    pub row: GroupKey,

    /// Earlier group in canonical order
    pub column: GroupKey,

    pub shared: SharedDimension,

    /// mean(row) - mean(column)
    pub mean_difference: f64,

    /// Welch t-statistic of row vs column
    pub statistic: f64,

    pub df: f64,

    /// Two-sided Welch p-value before correction
    pub p_value: f64,

    /// Benjamini–Hochberg adjusted p-value over this batch
    pub adjusted_p_value: f64,

    /// adjusted_p_value < significance_level
    pub significant: bool,
}

/// All comparable pairs of one dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairwiseResults {
    pub significance_level: f64,
    pub pairs: Vec<GroupPairResult>,
}

impl PairwiseResults {
    /// Pairs whose adjusted p-value is below the significance level
    pub fn significant_pairs(&self) -> impl Iterator<Item = &GroupPairResult> {
        self.pairs.iter().filter(|p| p.significant)
    }

    /// Result for a pair, in either orientation
    pub fn find(&self, a: &GroupKey, b: &GroupKey) -> Option<&GroupPairResult> {
        self.pairs
            .iter()
            .find(|p| (&p.row == a && &p.column == b) || (&p.row == b && &p.column == a))
    }
}

/// Enumerate comparable pairs as `(column, row)` by nested iteration over the
/// Cartesian product of method and dose levels
///
/// Each unordered pair appears exactly once, with the earlier group first.
pub fn comparable_pairs(
    methods: &[String],
    doses: &[Dose],
) -> Vec<(GroupKey, GroupKey, SharedDimension)> {
    let mut pairs = Vec::new();

    for (mi, method) in methods.iter().enumerate() {
        for (di, dose) in doses.iter().enumerate() {
            let column = GroupKey::new(method.clone(), *dose);

            for later_dose in &doses[di + 1..] {
                pairs.push((
                    column.clone(),
                    GroupKey::new(method.clone(), *later_dose),
                    SharedDimension::Method,
                ));
            }

            for later_method in &methods[mi + 1..] {
                pairs.push((
                    column.clone(),
                    GroupKey::new(later_method.clone(), *dose),
                    SharedDimension::Dose,
                ));
            }
        }
    }

    pairs
}

/// Welch-test every comparable pair and apply Benjamini–Hochberg across them
///
/// # Errors
/// - `InvalidArgument` when `significance_level` is not in (0, 1]
/// - `InsufficientData` naming the first group with fewer than 2 observations
/// - `TestFailed` when a t-test cannot be computed
pub fn pairwise_tests(dataset: &Dataset, significance_level: f64) -> Result<PairwiseResults> {
    if !(significance_level > 0.0 && significance_level <= 1.0) {
        return Err(InferenceError::InvalidArgument(format!(
            "significance_level must be in (0, 1], got {}",
            significance_level
        )));
    }

    let groups: BTreeMap<GroupKey, Vec<f64>> = dataset.groups();
    let pairs = comparable_pairs(&dataset.method_levels(), &dataset.dose_levels());

    let empty: Vec<f64> = Vec::new();
    let mut tested = Vec::with_capacity(pairs.len());
    for (column, row, shared) in pairs {
        let row_values = groups.get(&row).unwrap_or(&empty);
        let column_values = groups.get(&column).unwrap_or(&empty);

        let test = welch_t_test(
            row_values,
            &row.to_string(),
            column_values,
            &column.to_string(),
        )?;
        let mean_difference = mean(row_values) - mean(column_values);

        tracing::debug!(
            row = %row,
            column = %column,
            mean_difference,
            p_value = test.p_value,
            "pairwise t-test"
        );

        tested.push((row, column, shared, mean_difference, test));
    }

    let raw: Vec<f64> = tested.iter().map(|(.., test)| test.p_value).collect();
    let adjusted = benjamini_hochberg(&raw)?;

    let pairs = tested
        .into_iter()
        .zip(adjusted)
        .map(
            |((row, column, shared, mean_difference, test), adjusted_p_value)| GroupPairResult {
                row,
                column,
                shared,
                mean_difference,
                statistic: test.statistic,
                df: test.df,
                p_value: test.p_value,
                adjusted_p_value,
                significant: adjusted_p_value < significance_level,
            },
        )
        .collect::<Vec<_>>();

    tracing::info!(
        pairs = pairs.len(),
        significant = pairs.iter().filter(|p| p.significant).count(),
        "pairwise testing complete"
    );

    Ok(PairwiseResults {
        significance_level,
        pairs,
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dose(v: f64) -> Dose {
        Dose::new(v).unwrap()
    }

    #[test]
    fn test_comparable_pairs_count() {
        let methods = vec!["A".to_string(), "B".to_string()];
        let doses = vec![dose(1.0), dose(2.0), dose(3.0)];
        let pairs = comparable_pairs(&methods, &doses);
        // 2 methods x C(3,2) dose pairs + 3 doses x C(2,2) method pairs
        assert_eq!(pairs.len(), 9);
    }

    #[test]
    fn test_comparable_pairs_exclude_cross_pairs() {
        let methods = vec!["A".to_string(), "B".to_string()];
        let doses = vec![dose(1.0), dose(2.0)];
        let pairs = comparable_pairs(&methods, &doses);
        for (column, row, _) in &pairs {
            let same_method = column.method == row.method;
            let same_dose = column.dose == row.dose;
            assert!(same_method ^ same_dose);
        }
    }

    #[test]
    fn test_shared_dimension_labels() {
        let methods = vec!["A".to_string(), "B".to_string()];
        let doses = vec![dose(1.0), dose(2.0)];
        for (column, row, shared) in comparable_pairs(&methods, &doses) {
            match shared {
                SharedDimension::Method => assert_eq!(column.method, row.method),
                SharedDimension::Dose => assert_eq!(column.dose, row.dose),
            }
        }
    }

    #[test]
    fn test_invalid_significance_level() {
        let data = Dataset::tooth_growth();
        assert!(pairwise_tests(&data, 0.0).is_err());
        assert!(pairwise_tests(&data, 1.5).is_err());
        assert!(pairwise_tests(&data, f64::NAN).is_err());
    }

    #[test]
    fn test_small_group_fails_with_name() {
        let data = Dataset::from_records(vec![
            (1.0, "A", 1.0),
            (2.0, "A", 1.0),
            (3.0, "A", 2.0),
            (4.5, "A", 2.0),
            (5.0, "B", 1.0),
        ])
        .unwrap();
        let err = pairwise_tests(&data, 0.05).unwrap_err();
        match err {
            InferenceError::InsufficientData { group, observations } => {
                assert_eq!(observations, 1);
                assert_eq!(group, "B/1");
            }
            other => panic!("Expected InsufficientData, got {:?}", other),
        }
    }
}
