// Central limit theorem simulation for the mean of exponential draws
//
// Pipeline: RandomSource -> draw trials -> trial means -> summary, compared
// against the closed-form asymptotic model (mean μ, variance σ²/n).

mod asymptotic;
mod convergence;
mod distribution;
mod sampler;
mod summary;

pub use asymptotic::AsymptoticModel;
pub use convergence::{
    convergence_sweep, ConvergenceStep, ConvergenceSweep, Histogram, HistogramBin,
    DEFAULT_SWEEP_TRIALS,
};
pub use distribution::Exponential;
pub use sampler::{draw_batch, simulate_trial_means, Sample, TrialBatch};
pub use summary::{summarize, SampleSummary};

use crate::error::Result;
use crate::random::RandomSource;

/// Trial means of one simulation run with their empirical and asymptotic moments
#[derive(Debug, Clone, PartialEq)]
pub struct CltSimulation {
    pub distribution: Exponential,
    pub trial_means: Vec<f64>,
    pub summary: SampleSummary,
    pub asymptotic: AsymptoticModel,
}

/// Simulate `trials` sample means of `sample_size` exponential draws
///
/// # Example
/// ```
/// use statreport::random::RandomSource;
/// use statreport::simulation::{simulate_clt, Exponential};
///
/// let mut rng = RandomSource::seeded(2024);
/// let dist = Exponential::new(0.2).unwrap();
/// let run = simulate_clt(&mut rng, &dist, 1000, 40).unwrap();
/// assert_eq!(run.trial_means.len(), 1000);
/// assert!((run.summary.mean - run.asymptotic.mean).abs() < 0.2);
/// ```
pub fn simulate_clt(
    rng: &mut RandomSource,
    distribution: &Exponential,
    trials: usize,
    sample_size: usize,
) -> Result<CltSimulation> {
    let asymptotic = AsymptoticModel::for_sample_mean(distribution, sample_size)?;
    let trial_means = simulate_trial_means(rng, distribution, trials, sample_size)?;
    let summary = summarize(&trial_means)?;

    tracing::info!(
        trials,
        sample_size,
        empirical_mean = summary.mean,
        theoretical_mean = asymptotic.mean,
        "CLT simulation complete"
    );

    Ok(CltSimulation {
        distribution: *distribution,
        trial_means,
        summary,
        asymptotic,
    })
}
