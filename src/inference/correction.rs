// Benjamini–Hochberg false discovery rate correction

use crate::error::{InferenceError, Result};

/// Adjust raw p-values with the Benjamini–Hochberg step-up procedure
///
/// With the m raw p-values sorted ascending, p(1) <= ... <= p(m), the adjusted
/// value at rank k is min over j >= k of p(j) * m / j, capped at 1. Adjusted
/// values are returned in the input order.
///
/// # Errors
/// `InvalidArgument` when any p-value is NaN or outside [0, 1].
///
/// # Example
/// ```
/// use statreport::inference::benjamini_hochberg;
///
/// let adjusted = benjamini_hochberg(&[0.01, 0.04, 0.03]).unwrap();
/// assert!((adjusted[0] - 0.03).abs() < 1e-12);
/// assert!((adjusted[1] - 0.04).abs() < 1e-12);
/// assert!((adjusted[2] - 0.04).abs() < 1e-12);
/// ```
pub fn benjamini_hochberg(p_values: &[f64]) -> Result<Vec<f64>> {
    if let Some(bad) = p_values.iter().find(|p| !(0.0..=1.0).contains(*p)) {
        return Err(InferenceError::InvalidArgument(format!(
            "p-values must be in [0, 1], got {}",
            bad
        )));
    }

    let m = p_values.len();
    let mut order: Vec<usize> = (0..m).collect();
    // Stable sort keeps tied p-values in input order
    order.sort_by(|&a, &b| p_values[a].total_cmp(&p_values[b]));

    let mut adjusted = vec![0.0; m];
    let mut running_min = 1.0_f64;
    for (rank0, &idx) in order.iter().enumerate().rev() {
        let rank = (rank0 + 1) as f64;
        let candidate = p_values[idx] * m as f64 / rank;
        running_min = running_min.min(candidate);
        adjusted[idx] = running_min;
    }

    Ok(adjusted)
}
