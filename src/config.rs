//! Configuration for one analysis run
//!
//! Every tunable of the simulation and inference pipelines lives here so a
//! run is fully described by a seed plus this struct. Values can come from a
//! TOML file; command-line flags override them.

use crate::error::{InferenceError, Result};
use crate::inference::DEFAULT_PERMUTATIONS;
use crate::simulation::DEFAULT_SWEEP_TRIALS;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the CLT simulation and the tooth growth inference
///
/// # Example
/// ```
/// use statreport::config::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.significance_level, 0.05); // 95% confidence
/// assert_eq!(config.permutations, 10_000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Seed of the run's random source
    pub seed: u64,

    /// Exponential rate λ of the simulated draws
    pub rate: f64,

    /// Draws averaged per trial (n)
    pub sample_size: usize,

    /// Number of simulated trials (T)
    pub trials: usize,

    /// Trial counts of the convergence sweep
    pub sweep_trials: Vec<usize>,

    /// Bins of the trial-mean histogram
    pub histogram_bins: usize,

    /// Significance level (alpha) applied to Benjamini–Hochberg adjusted p-values
    ///
    /// - 0.05 (default): 95% confidence level
    /// - 0.01: stricter (fewer false discoveries, more misses)
    pub significance_level: f64,

    /// Label permutations per dose stratum (P)
    pub permutations: usize,

    /// Label whose mean is the minuend of the permutation statistic
    pub label_a: String,

    /// Label whose mean is subtracted
    pub label_b: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            seed: 20_000,
            rate: 0.2,
            sample_size: 40,
            trials: 1000,
            sweep_trials: DEFAULT_SWEEP_TRIALS.to_vec(),
            histogram_bins: 30,
            significance_level: 0.05,
            permutations: DEFAULT_PERMUTATIONS,
            label_a: "OJ".to_string(),
            label_b: "VC".to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Create a strict configuration (99% confidence, finer null distributions)
    pub fn strict() -> Self {
        Self {
            significance_level: 0.01,
            permutations: 50_000,
            trials: 10_000,
            ..Self::default()
        }
    }

    /// Create a quick configuration for smoke runs
    pub fn quick() -> Self {
        Self {
            trials: 200,
            sweep_trials: vec![100, 1_000, 10_000],
            permutations: 1_000,
            ..Self::default()
        }
    }

    /// Parse a configuration from TOML; missing keys take their defaults
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(InferenceError::InvalidArgument(msg));

        if !(self.rate.is_finite() && self.rate > 0.0) {
            return invalid(format!("rate must be a finite positive number, got {}", self.rate));
        }

        if self.sample_size == 0 {
            return invalid("sample_size must be > 0, got 0".to_string());
        }

        if self.trials == 0 {
            return invalid("trials must be > 0, got 0".to_string());
        }

        if self.sweep_trials.iter().any(|&t| t < 2) {
            return invalid(format!(
                "sweep_trials must all be >= 2, got {:?}",
                self.sweep_trials
            ));
        }

        if self.histogram_bins == 0 {
            return invalid("histogram_bins must be > 0, got 0".to_string());
        }

        if !(self.significance_level > 0.0 && self.significance_level <= 1.0) {
            return invalid(format!(
                "significance_level must be in (0, 1], got {}",
                self.significance_level
            ));
        }

        if self.permutations == 0 {
            return invalid("permutations must be > 0, got 0".to_string());
        }

        if self.label_a == self.label_b {
            return invalid(format!(
                "label_a and label_b must differ, got {} twice",
                self.label_a
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.rate, 0.2);
        assert_eq!(config.sample_size, 40);
        assert_eq!(config.trials, 1000);
        assert_eq!(config.significance_level, 0.05);
        assert_eq!(config.permutations, 10_000);
        assert_eq!(config.label_a, "OJ");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_strict_config() {
        let config = AnalysisConfig::strict();
        assert_eq!(config.significance_level, 0.01);
        assert_eq!(config.permutations, 50_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_quick_config() {
        let config = AnalysisConfig::quick();
        assert_eq!(config.trials, 200);
        assert_eq!(config.permutations, 1_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_rate() {
        let mut config = AnalysisConfig::default();
        config.rate = -0.2;
        assert!(config.validate().is_err());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_significance_level() {
        let mut config = AnalysisConfig::default();
        config.significance_level = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_permutations() {
        let mut config = AnalysisConfig::default();
        config.permutations = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_identical_labels() {
        let mut config = AnalysisConfig::default();
        config.label_b = "OJ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_partial_override() {
        let config = AnalysisConfig::from_toml_str("seed = 7\ntrials = 500\n").unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.trials, 500);
        assert_eq!(config.sample_size, 40);
    }

    #[test]
    fn test_toml_rejects_unknown_and_invalid() {
        assert!(AnalysisConfig::from_toml_str("sed = 7\n").is_err());
        assert!(AnalysisConfig::from_toml_str("rate = 0.0\n").is_err());
    }

    #[test]
    fn test_toml_roundtrip_of_parsed_config() {
        let text = concat!(
            "seed = 9\n",
            "rate = 0.1234567890123\n",
            "sweep_trials = [2, 30]\n",
            "significance_level = 1e-3\n",
            "label_a = \"VC\"\n",
            "label_b = \"OJ\"\n",
        );
        let config = AnalysisConfig::from_toml_str(text).unwrap();
        let text = toml::to_string(&config).unwrap();
        assert_eq!(AnalysisConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_toml_roundtrip_of_default() {
        let text = toml::to_string(&AnalysisConfig::default()).unwrap();
        assert_eq!(
            AnalysisConfig::from_toml_str(&text).unwrap(),
            AnalysisConfig::default()
        );
    }
}
