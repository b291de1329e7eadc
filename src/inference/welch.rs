// Two-sample Welch t-test using aprender
//
// This module wraps aprender's hypothesis testing to compare two groups of
// measurements under an unequal-variance assumption.
//
// - Welch's variant: no pooled variance, Welch–Satterthwaite degrees of freedom
// - aprender works in f32; the statistic and df are widened to f64
// - Two-sided p-value computed in f64 from the regularized incomplete beta
//   function (statrs), since an f32 tail probability bottoms out near 6e-8

use crate::error::{InferenceError, Result};

/// Outcome of a Welch two-sample t-test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WelchTest {
    /// t-statistic of (first - second)
    pub statistic: f64,

    /// Welch–Satterthwaite degrees of freedom
    pub df: f64,

    /// Two-sided p-value
    pub p_value: f64,
}

/// Compare two groups using Welch's independent t-test
///
/// `first` and `second` are labeled only for error reporting; the caller
/// fixes which group plays which role.
///
/// # Errors
/// - `InsufficientData` naming the group when either side has fewer than 2 values
/// - `TestFailed` when aprender rejects the input (e.g. both groups constant)
pub fn welch_t_test(
    first: &[f64],
    first_label: &str,
    second: &[f64],
    second_label: &str,
) -> Result<WelchTest> {
    for (values, label) in [(first, first_label), (second, second_label)] {
        if values.len() < 2 {
            return Err(InferenceError::InsufficientData {
                group: label.to_string(),
                observations: values.len(),
            });
        }
    }

    let first_f32: Vec<f32> = first.iter().map(|&v| v as f32).collect();
    let second_f32: Vec<f32> = second.iter().map(|&v| v as f32).collect();

    // Welch's variant: equal_var = false
    let result = aprender::stats::hypothesis::ttest_ind(&first_f32, &second_f32, false)
        .map_err(|e| {
            InferenceError::TestFailed(format!(
                "t-test {} vs {}: {}",
                first_label, second_label, e
            ))
        })?;

    let statistic = f64::from(result.statistic);
    let df = f64::from(result.df);

    let p_value = two_sided_p_value(statistic, df).ok_or_else(|| {
        InferenceError::TestFailed(format!(
            "t-test {} vs {} produced a non-finite p-value (t = {}, df = {})",
            first_label, second_label, statistic, df
        ))
    })?;

    Ok(WelchTest {
        statistic,
        df,
        p_value,
    })
}

/// P(|T| >= |t|) for Student's t with `df` degrees of freedom
///
/// Uses P(|T| >= |t|) = I_x(df/2, 1/2) with x = df / (df + t²), which keeps
/// full relative precision for tiny tail probabilities.
fn two_sided_p_value(statistic: f64, df: f64) -> Option<f64> {
    if statistic.is_nan() || !(df.is_finite() && df > 0.0) {
        return None;
    }
    let x = df / (df + statistic * statistic);
    statrs::function::beta::checked_beta_reg(df / 2.0, 0.5, x)
        .ok()
        .filter(|p| p.is_finite())
        .map(|p| p.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_significant_difference() {
        let low = [10.0, 12.0, 11.0, 13.0, 10.0];
        let high = [25.0, 27.0, 26.0, 28.0, 25.0];

        let result = welch_t_test(&low, "low", &high, "high").unwrap();

        assert!(result.p_value < 0.05, "p-value {} should be < 0.05", result.p_value);
        assert!(result.statistic < 0.0);
    }

    #[test]
    fn test_no_difference() {
        let a = [10.0, 12.0, 11.0, 13.0, 10.0];
        let b = [11.0, 13.0, 10.0, 12.0, 11.0];

        let result = welch_t_test(&a, "a", &b, "b").unwrap();

        assert!(result.p_value >= 0.05, "p-value {} should be >= 0.05", result.p_value);
    }

    #[test]
    fn test_statistic_sign_follows_argument_order() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [5.0, 6.0, 7.0, 9.0];
        let ab = welch_t_test(&a, "a", &b, "b").unwrap();
        let ba = welch_t_test(&b, "b", &a, "a").unwrap();
        assert!(ab.statistic < 0.0);
        assert!(ba.statistic > 0.0);
        assert!((ab.p_value - ba.p_value).abs() < 1e-6);
    }

    #[test]
    fn test_two_sided_p_value_known_points() {
        // t = 0 is the centre of the distribution
        assert!((two_sided_p_value(0.0, 10.0).unwrap() - 1.0).abs() < 1e-12);
        // Cauchy (df = 1): P(|T| >= 1) = 0.5
        assert!((two_sided_p_value(1.0, 1.0).unwrap() - 0.5).abs() < 1e-12);
        // Symmetric in t
        assert_eq!(two_sided_p_value(-2.5, 7.0), two_sided_p_value(2.5, 7.0));
        assert_eq!(two_sided_p_value(f64::INFINITY, 7.0), Some(0.0));
        assert!(two_sided_p_value(f64::NAN, 7.0).is_none());
        assert!(two_sided_p_value(2.0, 0.0).is_none());
    }

    #[test]
    fn test_tail_probability_below_f32_resolution() {
        // t = 10.3878, df = 14.3271 has a two-sided p of 4.6816e-8
        let p = two_sided_p_value(10.387_795_220_200_884, 14.327_120_273_138_808).unwrap();
        assert!(p > 0.0);
        assert!((p / 4.681_577e-8 - 1.0).abs() < 1e-4, "p = {:e}", p);
    }

    #[test]
    fn test_insufficient_samples_names_group() {
        let err = welch_t_test(&[10.0], "VC/0.5", &[12.0, 13.0], "OJ/0.5").unwrap_err();
        assert_eq!(
            err,
            InferenceError::InsufficientData {
                group: "VC/0.5".to_string(),
                observations: 1,
            }
        );
    }

    #[test]
    fn test_empty_group() {
        let err = welch_t_test(&[1.0, 2.0], "a", &[], "b").unwrap_err();
        assert!(matches!(err, InferenceError::InsufficientData { observations: 0, .. }));
    }
}
