// Monte Carlo sampling of exponential trials
//
// A trial draws n independent values and averages them. draw_batch keeps
// every draw (for inspection and small runs); simulate_trial_means streams the
// same draws in the same order and keeps only the means, so both produce
// identical trial means for the same seed.

use crate::error::{ensure_nonzero, InferenceError, Result};
use crate::random::RandomSource;
use crate::simulation::Exponential;
use rand_distr::Exp;

/// One trial's draws, immutable once created
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    values: Vec<f64>,
    distribution: Exponential,
}

impl Sample {
    /// Draws in the order they were generated
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of draws
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Generating distribution
    pub fn distribution(&self) -> &Exponential {
        &self.distribution
    }

    /// Arithmetic mean of the draws
    pub fn mean(&self) -> f64 {
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }
}

/// `trials` independent samples of a fixed size
#[derive(Debug, Clone, PartialEq)]
pub struct TrialBatch {
    samples: Vec<Sample>,
    sample_size: usize,
}

impl TrialBatch {
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn trials(&self) -> usize {
        self.samples.len()
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Per-trial arithmetic means; always exactly `trials()` values
    pub fn trial_means(&self) -> Vec<f64> {
        self.samples.iter().map(Sample::mean).collect()
    }
}

/// Draw `trials` independent samples of `sample_size` exponential draws each
///
/// # Errors
/// `InvalidArgument` when `trials` or `sample_size` is zero.
///
/// # Example
/// ```
/// use statreport::random::RandomSource;
/// use statreport::simulation::{draw_batch, Exponential};
///
/// let mut rng = RandomSource::seeded(1);
/// let dist = Exponential::new(0.2).unwrap();
/// let batch = draw_batch(&mut rng, &dist, 10, 40).unwrap();
/// assert_eq!(batch.trial_means().len(), 10);
/// ```
pub fn draw_batch(
    rng: &mut RandomSource,
    distribution: &Exponential,
    trials: usize,
    sample_size: usize,
) -> Result<TrialBatch> {
    ensure_nonzero("trials", trials)?;
    ensure_nonzero("sample_size", sample_size)?;

    let mut samples = Vec::with_capacity(trials);
    for _ in 0..trials {
        let values = rng.exponential(distribution, sample_size)?;
        samples.push(Sample {
            values,
            distribution: *distribution,
        });
    }

    tracing::debug!(
        trials,
        sample_size,
        rate = distribution.rate(),
        "drew trial batch"
    );

    Ok(TrialBatch {
        samples,
        sample_size,
    })
}

/// Stream `trials` trials and keep only their means
///
/// Memory is O(trials) instead of O(trials × sample_size), which matters for
/// million-trial convergence runs.
pub fn simulate_trial_means(
    rng: &mut RandomSource,
    distribution: &Exponential,
    trials: usize,
    sample_size: usize,
) -> Result<Vec<f64>> {
    ensure_nonzero("trials", trials)?;
    ensure_nonzero("sample_size", sample_size)?;

    let exp = Exp::new(distribution.rate())
        .map_err(|e| InferenceError::InvalidArgument(format!("exponential rate: {}", e)))?;

    let n = sample_size as f64;
    let means: Vec<f64> = (0..trials)
        .map(|_| rng.exponential_sum(&exp, sample_size) / n)
        .collect();

    tracing::debug!(trials, sample_size, "simulated trial means");
    Ok(means)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dist() -> Exponential {
        Exponential::new(0.2).unwrap()
    }

    #[test]
    fn test_batch_shape() {
        let mut rng = RandomSource::seeded(11);
        let batch = draw_batch(&mut rng, &dist(), 25, 40).unwrap();
        assert_eq!(batch.trials(), 25);
        assert_eq!(batch.sample_size(), 40);
        assert!(batch.samples().iter().all(|s| s.size() == 40));
        assert_eq!(batch.trial_means().len(), 25);
    }

    #[test]
    fn test_trials_are_distinct() {
        let mut rng = RandomSource::seeded(11);
        let batch = draw_batch(&mut rng, &dist(), 2, 40).unwrap();
        assert_ne!(batch.samples()[0].values(), batch.samples()[1].values());
    }

    #[test]
    fn test_zero_trials_rejected() {
        let mut rng = RandomSource::seeded(11);
        assert!(matches!(
            draw_batch(&mut rng, &dist(), 0, 40),
            Err(InferenceError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_zero_sample_size_rejected() {
        let mut rng = RandomSource::seeded(11);
        assert!(matches!(
            simulate_trial_means(&mut rng, &dist(), 10, 0),
            Err(InferenceError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_streaming_matches_batch() {
        let batch_means = draw_batch(&mut RandomSource::seeded(5), &dist(), 30, 40)
            .unwrap()
            .trial_means();
        let streamed = simulate_trial_means(&mut RandomSource::seeded(5), &dist(), 30, 40).unwrap();
        assert_eq!(batch_means, streamed);
    }

    #[test]
    fn test_sample_keeps_distribution() {
        let mut rng = RandomSource::seeded(2);
        let batch = draw_batch(&mut rng, &dist(), 1, 3).unwrap();
        assert_eq!(batch.samples()[0].distribution().rate(), 0.2);
    }
}
