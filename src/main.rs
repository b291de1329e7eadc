use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use statreport::cli::{Cli, Command, OutputFormat};
use statreport::config::AnalysisConfig;
use statreport::dataset::Dataset;
use statreport::report::{self, RunStreams};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Print a report in the requested format
fn emit<R: Serialize>(
    report: &R,
    text: impl FnOnce(&R) -> String,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", text(report)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let base = match &cli.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };
    let config = cli.resolve_config(base);
    config.validate().context("Invalid configuration")?;

    tracing::debug!(?config, "resolved configuration");

    let dataset = Dataset::tooth_growth();
    let mut streams = RunStreams::from_seed(config.seed);

    match &cli.command {
        Command::Clt(args) => {
            let r = report::build_clt_report(&config, &mut streams.clt, args.sweep)
                .context("CLT simulation failed")?;
            emit(&r, report::CltReport::to_report_string, cli.format)
        }
        Command::Pairwise(_) => {
            let r = report::build_pairwise_report(&config, &dataset)
                .context("Pairwise testing failed")?;
            emit(&r, report::PairwiseReport::to_report_string, cli.format)
        }
        Command::Permutation(_) => {
            let r = report::build_permutation_report(&config, &mut streams.permutation, &dataset)
                .context("Permutation testing failed")?;
            emit(&r, report::PermutationReport::to_report_string, cli.format)
        }
        Command::All(args) => {
            let r = report::build_full_report(&config, &dataset, args.clt.sweep)
                .context("Report generation failed")?;
            emit(&r, report::FullReport::to_report_string, cli.format)
        }
    }
}
