//! Structured report assembly and plain-text output
//!
//! Each report bundles the numeric results a renderer needs. Reports are
//! `Serialize` for `--format json`; `to_report_string()` gives the plain-text
//! tables of `--format text`.

use crate::config::AnalysisConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::inference::{
    describe_groups, pairwise_tests, stratified_permutation_tests, GroupSummary, PairwiseResults,
    StratumPermutation,
};
use crate::random::RandomSource;
use crate::simulation::{
    convergence_sweep, simulate_clt, AsymptoticModel, ConvergenceSweep, Exponential, Histogram,
    SampleSummary,
};
use serde::Serialize;

/// Independent random streams for the two randomized sections of a run
///
/// Both are split from one seed in a fixed order, so running a single
/// section reproduces exactly what the full report shows for it.
#[derive(Debug, Clone)]
pub struct RunStreams {
    pub clt: RandomSource,
    pub permutation: RandomSource,
}

impl RunStreams {
    pub fn from_seed(seed: u64) -> Self {
        let mut root = RandomSource::seeded(seed);
        let clt = root.split();
        let permutation = root.split();
        Self { clt, permutation }
    }
}

/// CLT simulation results
#[derive(Debug, Clone, Serialize)]
pub struct CltReport {
    pub rate: f64,
    pub sample_size: usize,
    pub trials: usize,
    pub summary: SampleSummary,
    pub asymptotic: AsymptoticModel,
    /// Raw trial means, in draw order, for plotting
    pub trial_means: Vec<f64>,
    pub histogram: Histogram,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sweep: Option<ConvergenceSweep>,
}

/// Exploratory table and pairwise t-test results
#[derive(Debug, Clone, Serialize)]
pub struct PairwiseReport {
    pub groups: Vec<GroupSummary>,
    pub results: PairwiseResults,
}

/// Per-dose permutation test results
#[derive(Debug, Clone, Serialize)]
pub struct PermutationReport {
    pub permutations: usize,
    pub strata: Vec<StratumPermutation>,
}

/// All three sections of one run
#[derive(Debug, Clone, Serialize)]
pub struct FullReport {
    pub seed: u64,
    pub clt: CltReport,
    pub pairwise: PairwiseReport,
    pub permutation: PermutationReport,
}

/// Run the CLT simulation (and optionally the convergence sweep)
pub fn build_clt_report(
    config: &AnalysisConfig,
    rng: &mut RandomSource,
    with_sweep: bool,
) -> Result<CltReport> {
    let distribution = Exponential::new(config.rate)?;
    let run = simulate_clt(rng, &distribution, config.trials, config.sample_size)?;
    let histogram = Histogram::build(&run.trial_means, config.histogram_bins, &run.asymptotic)?;

    let sweep = if with_sweep {
        Some(convergence_sweep(
            rng,
            &distribution,
            config.sample_size,
            &config.sweep_trials,
        )?)
    } else {
        None
    };

    Ok(CltReport {
        rate: config.rate,
        sample_size: config.sample_size,
        trials: config.trials,
        summary: run.summary,
        asymptotic: run.asymptotic,
        trial_means: run.trial_means,
        histogram,
        sweep,
    })
}

/// Describe the groups and run the pairwise tests
pub fn build_pairwise_report(config: &AnalysisConfig, dataset: &Dataset) -> Result<PairwiseReport> {
    Ok(PairwiseReport {
        groups: describe_groups(dataset)?,
        results: pairwise_tests(dataset, config.significance_level)?,
    })
}

/// Run the per-dose permutation tests
pub fn build_permutation_report(
    config: &AnalysisConfig,
    rng: &mut RandomSource,
    dataset: &Dataset,
) -> Result<PermutationReport> {
    let strata = stratified_permutation_tests(
        rng,
        dataset,
        &config.label_a,
        &config.label_b,
        config.permutations,
    )?;
    Ok(PermutationReport {
        permutations: config.permutations,
        strata,
    })
}

/// Run every section from `config.seed`
pub fn build_full_report(
    config: &AnalysisConfig,
    dataset: &Dataset,
    with_sweep: bool,
) -> Result<FullReport> {
    config.validate()?;
    let mut streams = RunStreams::from_seed(config.seed);

    Ok(FullReport {
        seed: config.seed,
        clt: build_clt_report(config, &mut streams.clt, with_sweep)?,
        pairwise: build_pairwise_report(config, dataset)?,
        permutation: build_permutation_report(config, &mut streams.permutation, dataset)?,
    })
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.4}", v),
        None => "undefined".to_string(),
    }
}

impl CltReport {
    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        report.push_str("=== Central Limit Theorem: mean of exponential draws ===\n\n");
        report.push_str(&format!(
            "lambda = {}, n = {}, trials = {}\n",
            self.rate, self.sample_size, self.trials
        ));
        report.push_str(&format!("{:<12} {:>12} {:>12}\n", "", "empirical", "theoretical"));
        report.push_str(&format!(
            "{:<12} {:>12.4} {:>12.4}\n",
            "mean", self.summary.mean, self.asymptotic.mean
        ));
        report.push_str(&format!(
            "{:<12} {:>12} {:>12.4}\n",
            "variance",
            fmt_opt(self.summary.variance),
            self.asymptotic.variance
        ));

        if let Some(sweep) = &self.sweep {
            report.push_str("\nConvergence:\n");
            report.push_str(&format!(
                "  {:>10} {:>12} {:>12} {:>12} {:>12}\n",
                "trials", "mean", "|err|", "variance", "|err|"
            ));
            for step in &sweep.steps {
                report.push_str(&format!(
                    "  {:>10} {:>12.5} {:>12.5} {:>12.5} {:>12.5}\n",
                    step.trials,
                    step.empirical_mean,
                    step.mean_error,
                    step.empirical_variance,
                    step.variance_error
                ));
            }
        }

        report
    }
}

impl PairwiseReport {
    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        report.push_str("=== Tooth growth: group summary ===\n\n");
        report.push_str(&format!(
            "{:<10} {:>4} {:>8} {:>8} {:>8} {:>8} {:>8}\n",
            "group", "n", "mean", "sd", "median", "min", "max"
        ));
        for g in &self.groups {
            report.push_str(&format!(
                "{:<10} {:>4} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>8.2}\n",
                g.key.to_string(),
                g.count,
                g.mean,
                g.stddev,
                g.median,
                g.min,
                g.max
            ));
        }

        report.push_str(&format!(
            "\n=== Pairwise Welch t-tests (BH adjusted, alpha = {}) ===\n\n",
            self.results.significance_level
        ));
        report.push_str(&format!(
            "{:<10} {:<10} {:>10} {:>10} {:>10}  {}\n",
            "row", "column", "row-col", "p", "p.adj", "significant"
        ));
        for p in &self.results.pairs {
            report.push_str(&format!(
                "{:<10} {:<10} {:>10.3} {:>10.2e} {:>10.2e}  {}\n",
                p.row.to_string(),
                p.column.to_string(),
                p.mean_difference,
                p.p_value,
                p.adjusted_p_value,
                if p.significant { "yes" } else { "no" }
            ));
        }

        report
    }
}

impl PermutationReport {
    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        report.push_str(&format!(
            "=== Permutation tests by dose ({} permutations) ===\n\n",
            self.permutations
        ));
        report.push_str(&format!(
            "{:>6} {:<10} {:>10} {:>10} {:>10} {:>10}\n",
            "dose", "A - B", "observed", "null mean", "null sd", "tail"
        ));
        for s in &self.strata {
            report.push_str(&format!(
                "{:>6} {:<10} {:>10.3} {:>10.4} {:>10} {:>10.4}\n",
                s.dose.to_string(),
                format!("{} - {}", s.label_a, s.label_b),
                s.null.observed,
                s.null.null_mean,
                fmt_opt(s.null.null_std_dev),
                s.null.tail_fraction
            ));
        }

        report
    }
}

impl FullReport {
    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        format!(
            "seed = {}\n\n{}\n{}\n{}",
            self.seed,
            self.clt.to_report_string(),
            self.pairwise.to_report_string(),
            self.permutation.to_report_string()
        )
    }
}
