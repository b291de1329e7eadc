//! CLI argument parsing for statreport

use crate::config::AnalysisConfig;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text tables (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "statreport")]
#[command(version)]
#[command(about = "CLT simulation and resampling-based inference reports", long_about = None)]
pub struct Cli {
    /// Seed of the random source (overrides the config file)
    #[arg(long, global = true, value_name = "SEED")]
    pub seed: Option<u64>,

    /// TOML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long = "format", global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simulate the distribution of the mean of exponential draws
    Clt(CltArgs),
    /// Welch t-tests on comparable tooth growth groups with BH correction
    Pairwise(PairwiseArgs),
    /// Per-dose label permutation tests
    Permutation(PermutationArgs),
    /// Run every section
    All(AllArgs),
}

#[derive(Args, Debug, Default)]
pub struct CltArgs {
    /// Exponential rate lambda
    #[arg(long, value_name = "LAMBDA")]
    pub rate: Option<f64>,

    /// Draws averaged per trial
    #[arg(short = 'n', long = "sample-size", value_name = "N")]
    pub sample_size: Option<usize>,

    /// Number of simulated trials
    #[arg(short = 't', long, value_name = "T")]
    pub trials: Option<usize>,

    /// Also run the convergence sweep over increasing trial counts
    #[arg(long)]
    pub sweep: bool,
}

#[derive(Args, Debug, Default)]
pub struct PairwiseArgs {
    /// Significance level for adjusted p-values
    #[arg(long, value_name = "ALPHA")]
    pub alpha: Option<f64>,
}

#[derive(Args, Debug, Default)]
pub struct PermutationArgs {
    /// Permutations per dose stratum
    #[arg(short = 'p', long, value_name = "P")]
    pub permutations: Option<usize>,

    /// Label whose mean is the minuend
    #[arg(long = "label-a", value_name = "LABEL")]
    pub label_a: Option<String>,

    /// Label whose mean is subtracted
    #[arg(long = "label-b", value_name = "LABEL")]
    pub label_b: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct AllArgs {
    #[command(flatten)]
    pub clt: CltArgs,

    #[command(flatten)]
    pub pairwise: PairwiseArgs,

    #[command(flatten)]
    pub permutation: PermutationArgs,
}

impl CltArgs {
    fn apply(&self, config: &mut AnalysisConfig) {
        if let Some(rate) = self.rate {
            config.rate = rate;
        }
        if let Some(n) = self.sample_size {
            config.sample_size = n;
        }
        if let Some(t) = self.trials {
            config.trials = t;
        }
    }
}

impl PairwiseArgs {
    fn apply(&self, config: &mut AnalysisConfig) {
        if let Some(alpha) = self.alpha {
            config.significance_level = alpha;
        }
    }
}

impl PermutationArgs {
    fn apply(&self, config: &mut AnalysisConfig) {
        if let Some(p) = self.permutations {
            config.permutations = p;
        }
        if let Some(a) = &self.label_a {
            config.label_a = a.clone();
        }
        if let Some(b) = &self.label_b {
            config.label_b = b.clone();
        }
    }
}

impl Cli {
    /// Apply command-line overrides on top of `base`
    pub fn resolve_config(&self, mut base: AnalysisConfig) -> AnalysisConfig {
        if let Some(seed) = self.seed {
            base.seed = seed;
        }
        match &self.command {
            Command::Clt(args) => args.apply(&mut base),
            Command::Pairwise(args) => args.apply(&mut base),
            Command::Permutation(args) => args.apply(&mut base),
            Command::All(args) => {
                args.clt.apply(&mut base);
                args.pairwise.apply(&mut base);
                args.permutation.apply(&mut base);
            }
        }
        base
    }
}
