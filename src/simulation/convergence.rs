// CLT convergence sweep and histogram overlay data
//
// The sweep reruns the simulation at increasing trial counts and records how
// far the empirical mean and variance of the trial means sit from their
// asymptotic values. Each step uses its own split stream, so adding or
// removing a step does not change the others.

use crate::error::{ensure_nonzero, InferenceError, Result};
use crate::random::RandomSource;
use crate::simulation::{simulate_trial_means, summarize, AsymptoticModel, Exponential};
use serde::Serialize;

/// Trial counts used when the caller does not supply any
pub const DEFAULT_SWEEP_TRIALS: [usize; 4] = [1_000, 10_000, 100_000, 1_000_000];

/// Empirical vs theoretical moments at one trial count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvergenceStep {
    pub trials: usize,
    pub empirical_mean: f64,
    pub empirical_variance: f64,
    /// |empirical mean - μ|
    pub mean_error: f64,
    /// |empirical variance - σ²/n|
    pub variance_error: f64,
}

/// Results of a convergence sweep, ordered as the trial counts were given
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvergenceSweep {
    pub sample_size: usize,
    pub asymptotic: AsymptoticModel,
    pub steps: Vec<ConvergenceStep>,
}

/// Run the simulation at each trial count in `trial_counts`
///
/// # Errors
/// `InvalidArgument` for an empty list or a zero count; `UndefinedStatistic`
/// for a count of 1 (variance undefined).
pub fn convergence_sweep(
    rng: &mut RandomSource,
    distribution: &Exponential,
    sample_size: usize,
    trial_counts: &[usize],
) -> Result<ConvergenceSweep> {
    if trial_counts.is_empty() {
        return Err(InferenceError::InvalidArgument(
            "convergence sweep needs at least one trial count".to_string(),
        ));
    }

    let asymptotic = AsymptoticModel::for_sample_mean(distribution, sample_size)?;
    let mut steps = Vec::with_capacity(trial_counts.len());

    for &trials in trial_counts {
        let mut stream = rng.split();
        let means = simulate_trial_means(&mut stream, distribution, trials, sample_size)?;
        let summary = summarize(&means)?;
        let variance = summary.require_variance()?;

        tracing::debug!(trials, mean = summary.mean, variance, "convergence step");

        steps.push(ConvergenceStep {
            trials,
            empirical_mean: summary.mean,
            empirical_variance: variance,
            mean_error: (summary.mean - asymptotic.mean).abs(),
            variance_error: (variance - asymptotic.variance).abs(),
        });
    }

    Ok(ConvergenceSweep {
        sample_size,
        asymptotic,
        steps,
    })
}

/// One histogram bin with the asymptotic density at its centre
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
    /// count / (total × width), comparable to a probability density
    pub density: f64,
    /// Limiting normal density at the bin centre
    pub normal_density: f64,
}

/// Equal-width histogram of trial means
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width bins spanning their range
    pub fn build(values: &[f64], bins: usize, model: &AsymptoticModel) -> Result<Self> {
        ensure_nonzero("bins", bins)?;
        if values.is_empty() {
            return Err(InferenceError::InvalidArgument(
                "cannot build a histogram of an empty sequence".to_string(),
            ));
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let (lo, hi) = if max > min {
            (min, max)
        } else {
            (min - 0.5, max + 0.5)
        };
        let width = (hi - lo) / bins as f64;

        let mut counts = vec![0usize; bins];
        for &v in values {
            // Top edge belongs to the last bin
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        let total = values.len() as f64;
        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| {
                let lower = lo + i as f64 * width;
                let upper = lower + width;
                HistogramBin {
                    lower,
                    upper,
                    count,
                    density: count as f64 / (total * width),
                    normal_density: model.density((lower + upper) / 2.0),
                }
            })
            .collect();

        Ok(Self { bins })
    }

    /// Total number of values binned
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> AsymptoticModel {
        AsymptoticModel::for_sample_mean(&Exponential::new(0.2).unwrap(), 40).unwrap()
    }

    #[test]
    fn test_sweep_has_one_step_per_count() {
        let dist = Exponential::new(0.2).unwrap();
        let mut rng = RandomSource::seeded(1);
        let sweep = convergence_sweep(&mut rng, &dist, 40, &[100, 200, 400]).unwrap();
        assert_eq!(sweep.steps.len(), 3);
        assert_eq!(sweep.steps[1].trials, 200);
        assert!((sweep.asymptotic.variance - 0.625).abs() < 1e-12);
    }

    #[test]
    fn test_sweep_rejects_empty_and_single_trial() {
        let dist = Exponential::new(0.2).unwrap();
        let mut rng = RandomSource::seeded(1);
        assert!(matches!(
            convergence_sweep(&mut rng, &dist, 40, &[]),
            Err(InferenceError::InvalidArgument(_))
        ));
        assert!(matches!(
            convergence_sweep(&mut rng, &dist, 40, &[1]),
            Err(InferenceError::UndefinedStatistic(_))
        ));
    }

    #[test]
    fn test_histogram_counts_every_value() {
        let values = [1.0, 2.0, 2.5, 3.0, 4.0, 5.0];
        let hist = Histogram::build(&values, 4, &model()).unwrap();
        assert_eq!(hist.bins.len(), 4);
        assert_eq!(hist.total(), values.len());
        // max value lands in the last bin
        assert!(hist.bins[3].count >= 1);
    }

    #[test]
    fn test_histogram_density_integrates_to_one() {
        let values: Vec<f64> = (0..100).map(|i| i as f64 / 10.0).collect();
        let hist = Histogram::build(&values, 10, &model()).unwrap();
        let area: f64 = hist.bins.iter().map(|b| b.density * (b.upper - b.lower)).sum();
        assert!((area - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_histogram_constant_values() {
        let hist = Histogram::build(&[2.0, 2.0, 2.0], 3, &model()).unwrap();
        assert_eq!(hist.total(), 3);
    }

    #[test]
    fn test_histogram_rejects_zero_bins() {
        assert!(Histogram::build(&[1.0], 0, &model()).is_err());
    }
}
