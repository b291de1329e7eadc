// Exponential distribution parameters
//
// Only the exponential family is simulated. The struct validates its rate on
// construction so downstream code can rely on λ > 0.

use crate::error::{ensure_positive, Result};
use serde::{Deserialize, Serialize};

/// Exponential distribution parameterized by rate λ
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Exponential {
    rate: f64,
}

impl Exponential {
    /// Create an exponential distribution; `rate` must be finite and > 0
    pub fn new(rate: f64) -> Result<Self> {
        ensure_positive("rate", rate)?;
        Ok(Self { rate })
    }

    /// Rate parameter λ
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Distribution mean μ = 1/λ
    pub fn mean(&self) -> f64 {
        1.0 / self.rate
    }

    /// Distribution variance σ² = 1/λ²
    pub fn variance(&self) -> f64 {
        1.0 / (self.rate * self.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moments() {
        let dist = Exponential::new(0.2).unwrap();
        assert!((dist.mean() - 5.0).abs() < 1e-12);
        assert!((dist.variance() - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_rate() {
        assert!(Exponential::new(0.0).is_err());
        assert!(Exponential::new(-0.2).is_err());
        assert!(Exponential::new(f64::NAN).is_err());
    }
}
