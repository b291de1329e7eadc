// Limiting (CLT) distribution of the sample mean
//
// For n i.i.d. draws with mean μ and variance σ², the sample mean is
// approximately N(μ, σ²/n). Closed form, no randomness.

use crate::error::{ensure_nonzero, Result};
use crate::simulation::Exponential;
use serde::Serialize;
use std::f64::consts::PI;

/// Theoretical mean and variance of the sample-mean statistic
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AsymptoticModel {
    /// Limiting mean μ
    pub mean: f64,

    /// Limiting variance σ²/n
    pub variance: f64,

    /// Sample size n the model was built for
    pub sample_size: usize,
}

impl AsymptoticModel {
    /// Build the limiting model for the mean of `sample_size` exponential draws
    ///
    /// # Example
    /// ```
    /// use statreport::simulation::{AsymptoticModel, Exponential};
    ///
    /// let dist = Exponential::new(0.2).unwrap();
    /// let model = AsymptoticModel::for_sample_mean(&dist, 40).unwrap();
    /// assert!((model.mean - 5.0).abs() < 1e-12);
    /// assert!((model.variance - 0.625).abs() < 1e-12);
    /// ```
    pub fn for_sample_mean(distribution: &Exponential, sample_size: usize) -> Result<Self> {
        ensure_nonzero("sample_size", sample_size)?;
        Ok(Self {
            mean: distribution.mean(),
            variance: distribution.variance() / sample_size as f64,
            sample_size,
        })
    }

    /// Standard error σ/√n
    pub fn std_error(&self) -> f64 {
        self.variance.sqrt()
    }

    /// z-score of `x` under the limiting normal
    pub fn standardize(&self, x: f64) -> f64 {
        (x - self.mean) / self.std_error()
    }

    /// Normal density of the limiting distribution at `x`
    pub fn density(&self, x: f64) -> f64 {
        let z = self.standardize(x);
        (-0.5 * z * z).exp() / (self.std_error() * (2.0 * PI).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_limits() {
        let dist = Exponential::new(0.5).unwrap();
        let model = AsymptoticModel::for_sample_mean(&dist, 10).unwrap();
        assert!((model.mean - 2.0).abs() < 1e-12);
        assert!((model.variance - 0.4).abs() < 1e-12);
        assert_eq!(model.sample_size, 10);
    }

    #[test]
    fn test_zero_sample_size_rejected() {
        let dist = Exponential::new(0.5).unwrap();
        assert!(AsymptoticModel::for_sample_mean(&dist, 0).is_err());
    }

    #[test]
    fn test_density_peak_and_symmetry() {
        let dist = Exponential::new(0.2).unwrap();
        let model = AsymptoticModel::for_sample_mean(&dist, 40).unwrap();
        let peak = model.density(5.0);
        let expected = 1.0 / (model.std_error() * (2.0 * PI).sqrt());
        assert!((peak - expected).abs() < 1e-12);
        assert!((model.density(4.0) - model.density(6.0)).abs() < 1e-12);
        assert!(model.density(4.0) < peak);
    }

    #[test]
    fn test_standardize() {
        let dist = Exponential::new(1.0).unwrap();
        let model = AsymptoticModel::for_sample_mean(&dist, 4).unwrap();
        // se = 0.5
        assert!((model.standardize(2.0) - 2.0).abs() < 1e-12);
    }
}
