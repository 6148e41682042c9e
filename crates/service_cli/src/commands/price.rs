//! Price command implementation
//!
//! Draws a shock matrix, prices the configured option with the
//! pricer_pricing engine and prints the estimate.

use clap::ValueEnum;
use pricer_models::analytical::gbm_european_reference;
use pricer_models::instruments::{OptionKind, OptionStyle};
use pricer_pricing::mc::{PricingEngine, PricingStatistics};
use pricer_pricing::rng::RandomNormalSource;
use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;
use crate::Result;

/// Output format of the price command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Toml,
}

#[derive(Debug, Serialize)]
struct PriceReport {
    kind: OptionKind,
    style: OptionStyle,
    strike: f64,
    rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference: Option<f64>,
    statistics: PricingStatistics,
}

/// Run the price command
pub fn run(config: &CliConfig, with_reference: bool, format: OutputFormat) -> Result<()> {
    let params = config.gbm_parameters()?;
    let spec = config.option_spec()?;
    let engine = PricingEngine::with_config(params, spec.strike(), spec.risk_free_rate(), config.engine_config()?)?;

    info!("Starting pricing...");
    info!("  Option: {} {}", spec.style(), spec.kind());
    info!("  Monte Carlo paths: {} x {} steps", config.paths, params.steps());

    let mut source = RandomNormalSource::new(config.seed);
    let shocks = source.generate_shock_matrix(config.paths, params.steps());
    let statistics = engine.price_with_statistics(&spec, &shocks, config.paths)?;

    let reference = if with_reference {
        gbm_european_reference(&params, &spec)
    } else {
        None
    };

    info!(price = statistics.price, std_error = statistics.std_error, "Pricing complete");

    let report = PriceReport {
        kind: spec.kind(),
        style: spec.style(),
        strike: spec.strike(),
        rate: spec.risk_free_rate(),
        seed: source.seed(),
        reference,
        statistics,
    };

    match format {
        OutputFormat::Text => print_text(&report, with_reference),
        OutputFormat::Toml => println!("{}", toml::to_string_pretty(&report)?),
    }
    Ok(())
}

fn print_text(report: &PriceReport, with_reference: bool) {
    let stats = &report.statistics;
    let (lo, hi) = stats.confidence_95();

    println!("{} {} K={} r={}", report.style, report.kind, report.strike, report.rate);
    println!("  price      {:>12.6}", stats.price);
    println!("  std error  {:>12.6}", stats.std_error);
    println!("  95% CI     [{:.6}, {:.6}]", lo, hi);
    println!("  paths      {:>12}", stats.n_paths);

    if with_reference {
        match report.reference {
            Some(reference) => {
                println!("  reference  {:>12.6}", reference);
                println!("  error      {:>12.6}", stats.price - reference);
            }
            None => println!("  reference  n/a (no closed form for {})", report.style),
        }
    }
}
