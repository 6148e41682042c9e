//! Check command implementation
//!
//! Resolves and validates the configuration without pricing.

use tracing::info;

use crate::config::CliConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &CliConfig) -> Result<()> {
    let params = config.gbm_parameters()?;
    let spec = config.option_spec()?;
    let engine_config = config.engine_config()?;

    info!(
        steps = params.steps(),
        dt = params.dt(),
        kind = %spec.kind(),
        style = %spec.style(),
        chunk_size = engine_config.chunk_size(),
        "configuration valid"
    );

    println!("{}", toml::to_string_pretty(config)?);
    println!("# shock matrix: {} x {} ({:.1} MiB)", config.paths, config.steps, shock_matrix_mib(config));
    Ok(())
}

fn shock_matrix_mib(config: &CliConfig) -> f64 {
    (config.paths * config.steps * std::mem::size_of::<f64>()) as f64 / (1024.0 * 1024.0)
}
