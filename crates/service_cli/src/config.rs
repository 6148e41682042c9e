//! CLI configuration management
//!
//! Resolves pricing inputs from a TOML file, `PRICER_*` environment variables
//! and command-line flags.
//!
//! Priority (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables
//! 3. Config file
//! 4. Default values

use std::path::Path;
use std::str::FromStr;

use clap::{Args, ValueEnum};
use pricer_core::types::ParameterError;
use pricer_models::instruments::{AsianAveraging, OptionKind, OptionSpec, OptionStyle};
use pricer_models::models::GbmParameters;
use pricer_pricing::mc::{EngineConfig, DEFAULT_CHUNK_SIZE, DEFAULT_PARALLEL_THRESHOLD};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable {var}={value}: {reason}")]
    EnvError {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid path count {0}: must be at least 1")]
    InvalidPaths(usize),

    #[error("Invalid seed {0}: must not exceed {max}", max = MAX_SEED)]
    InvalidSeed(u64),
}

/// Largest accepted seed. TOML integers are signed 64-bit, so larger seeds
/// could not be written back out by the `check` command.
pub const MAX_SEED: u64 = i64::MAX as u64;

/// Option direction flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Call,
    Put,
}

impl From<KindArg> for OptionKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Call => OptionKind::Call,
            KindArg::Put => OptionKind::Put,
        }
    }
}

/// Option style flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StyleArg {
    European,
    Asian,
}

impl From<StyleArg> for OptionStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::European => OptionStyle::European,
            StyleArg::Asian => OptionStyle::AsianArithmetic,
        }
    }
}

/// Asian averaging flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AveragingArg {
    ExcludeInitial,
    IncludeInitial,
}

impl From<AveragingArg> for AsianAveraging {
    fn from(arg: AveragingArg) -> Self {
        match arg {
            AveragingArg::ExcludeInitial => AsianAveraging::ExcludeInitial,
            AveragingArg::IncludeInitial => AsianAveraging::IncludeInitial,
        }
    }
}

/// Resolved pricing configuration.
///
/// The TOML file uses the same flat field names, e.g.
///
/// ```toml
/// spot = 100.0
/// volatility = 0.25
/// steps = 52
/// kind = "put"
/// style = "asian"
/// seed = 42
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Spot price at time 0
    pub spot: f64,
    /// Annualised drift of the simulated paths
    pub drift: f64,
    /// Annualised volatility
    pub volatility: f64,
    /// Horizon in years
    pub maturity: f64,
    /// Time steps per path
    pub steps: usize,
    /// Strike price
    pub strike: f64,
    /// Continuously compounded discount rate
    pub rate: f64,
    /// Number of simulated paths
    pub paths: usize,
    /// Seed for reproducible runs; entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Call or put
    pub kind: OptionKind,
    /// European or arithmetic Asian
    pub style: OptionStyle,
    /// Asian averaging convention
    pub averaging: AsianAveraging,
    /// Paths per reduction chunk
    pub chunk_size: usize,
    /// Path count at which pricing runs in parallel
    pub parallel_threshold: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            spot: 100.0,
            drift: 0.05,
            volatility: 0.2,
            maturity: 1.0,
            steps: 252,
            strike: 100.0,
            rate: 0.03,
            paths: 50_000,
            seed: None,
            kind: OptionKind::Call,
            style: OptionStyle::European,
            averaging: AsianAveraging::ExcludeInitial,
            chunk_size: DEFAULT_CHUNK_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Command-line overrides shared by all subcommands.
#[derive(Debug, Clone, Default, Args)]
pub struct Overrides {
    /// Spot price at time 0
    #[arg(long)]
    pub spot: Option<f64>,
    /// Annualised drift
    #[arg(long, allow_negative_numbers = true)]
    pub drift: Option<f64>,
    /// Annualised volatility
    #[arg(long)]
    pub volatility: Option<f64>,
    /// Horizon in years
    #[arg(long)]
    pub maturity: Option<f64>,
    /// Time steps per path
    #[arg(long)]
    pub steps: Option<usize>,
    /// Strike price
    #[arg(long)]
    pub strike: Option<f64>,
    /// Discount rate
    #[arg(long, allow_negative_numbers = true)]
    pub rate: Option<f64>,
    /// Number of simulated paths
    #[arg(long)]
    pub paths: Option<usize>,
    /// Seed for reproducible runs
    #[arg(long, value_parser = clap::value_parser!(u64).range(..=MAX_SEED))]
    pub seed: Option<u64>,
    /// Option direction
    #[arg(long, value_enum)]
    pub kind: Option<KindArg>,
    /// Option style
    #[arg(long, value_enum)]
    pub style: Option<StyleArg>,
    /// Asian averaging convention
    #[arg(long, value_enum)]
    pub averaging: Option<AveragingArg>,
    /// Paths per reduction chunk
    #[arg(long)]
    pub chunk_size: Option<usize>,
    /// Path count at which pricing runs in parallel
    #[arg(long)]
    pub parallel_threshold: Option<usize>,
}

fn parse_env<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::EnvError {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_env_enum<T: ValueEnum>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    T::from_str(value.trim(), true).map_err(|reason| ConfigError::EnvError {
        var,
        value: value.to_string(),
        reason,
    })
}

impl CliConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Override fields from `PRICER_*` variables returned by `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("PRICER_SPOT") {
            self.spot = parse_env("PRICER_SPOT", &v)?;
        }
        if let Some(v) = lookup("PRICER_DRIFT") {
            self.drift = parse_env("PRICER_DRIFT", &v)?;
        }
        if let Some(v) = lookup("PRICER_VOLATILITY") {
            self.volatility = parse_env("PRICER_VOLATILITY", &v)?;
        }
        if let Some(v) = lookup("PRICER_MATURITY") {
            self.maturity = parse_env("PRICER_MATURITY", &v)?;
        }
        if let Some(v) = lookup("PRICER_STEPS") {
            self.steps = parse_env("PRICER_STEPS", &v)?;
        }
        if let Some(v) = lookup("PRICER_STRIKE") {
            self.strike = parse_env("PRICER_STRIKE", &v)?;
        }
        if let Some(v) = lookup("PRICER_RATE") {
            self.rate = parse_env("PRICER_RATE", &v)?;
        }
        if let Some(v) = lookup("PRICER_PATHS") {
            self.paths = parse_env("PRICER_PATHS", &v)?;
        }
        if let Some(v) = lookup("PRICER_SEED") {
            let seed: u64 = parse_env("PRICER_SEED", &v)?;
            if seed > MAX_SEED {
                return Err(ConfigError::EnvError {
                    var: "PRICER_SEED",
                    value: v,
                    reason: format!("must not exceed {}", MAX_SEED),
                });
            }
            self.seed = Some(seed);
        }
        if let Some(v) = lookup("PRICER_KIND") {
            self.kind = parse_env_enum::<KindArg>("PRICER_KIND", &v)?.into();
        }
        if let Some(v) = lookup("PRICER_STYLE") {
            self.style = parse_env_enum::<StyleArg>("PRICER_STYLE", &v)?.into();
        }
        if let Some(v) = lookup("PRICER_AVERAGING") {
            self.averaging = parse_env_enum::<AveragingArg>("PRICER_AVERAGING", &v)?.into();
        }
        if let Some(v) = lookup("PRICER_CHUNK_SIZE") {
            self.chunk_size = parse_env("PRICER_CHUNK_SIZE", &v)?;
        }
        if let Some(v) = lookup("PRICER_PARALLEL_THRESHOLD") {
            self.parallel_threshold = parse_env("PRICER_PARALLEL_THRESHOLD", &v)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &Overrides) {
        if let Some(spot) = cli.spot {
            self.spot = spot;
        }
        if let Some(drift) = cli.drift {
            self.drift = drift;
        }
        if let Some(volatility) = cli.volatility {
            self.volatility = volatility;
        }
        if let Some(maturity) = cli.maturity {
            self.maturity = maturity;
        }
        if let Some(steps) = cli.steps {
            self.steps = steps;
        }
        if let Some(strike) = cli.strike {
            self.strike = strike;
        }
        if let Some(rate) = cli.rate {
            self.rate = rate;
        }
        if let Some(paths) = cli.paths {
            self.paths = paths;
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        if let Some(kind) = cli.kind {
            self.kind = kind.into();
        }
        if let Some(style) = cli.style {
            self.style = style.into();
        }
        if let Some(averaging) = cli.averaging {
            self.averaging = averaging.into();
        }
        if let Some(chunk_size) = cli.chunk_size {
            self.chunk_size = chunk_size;
        }
        if let Some(threshold) = cli.parallel_threshold {
            self.parallel_threshold = threshold;
        }
    }

    /// Validate settings not covered by model or engine validation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.paths == 0 {
            return Err(ConfigError::InvalidPaths(self.paths));
        }
        if let Some(seed) = self.seed.filter(|&s| s > MAX_SEED) {
            return Err(ConfigError::InvalidSeed(seed));
        }
        Ok(())
    }

    /// Validated GBM parameters
    pub fn gbm_parameters(&self) -> Result<GbmParameters, ParameterError> {
        GbmParameters::new(
            self.spot,
            self.drift,
            self.volatility,
            self.maturity,
            self.steps,
        )
    }

    /// Validated option specification
    pub fn option_spec(&self) -> Result<OptionSpec, ParameterError> {
        OptionSpec::new(self.strike, self.rate, self.kind, self.style)
    }

    /// Engine configuration
    pub fn engine_config(&self) -> Result<EngineConfig, pricer_pricing::mc::ConfigError> {
        EngineConfig::builder()
            .chunk_size(self.chunk_size)
            .parallel_threshold(self.parallel_threshold)
            .averaging(self.averaging)
            .build()
    }
}

/// Build configuration from all sources, reading variables with `lookup`
pub fn build_config_with<F>(
    config_file: Option<&Path>,
    cli: &Overrides,
    lookup: F,
) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match config_file {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };

    config.apply_env(lookup)?;
    config.merge_with_cli(cli);
    config.validate()?;

    Ok(config)
}

/// Build configuration from all sources using the process environment
pub fn build_config(config_file: Option<&Path>, cli: &Overrides) -> Result<CliConfig, ConfigError> {
    build_config_with(config_file, cli, |var| std::env::var(var).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use clap::Parser;
    use std::collections::HashMap;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        overrides: Overrides,
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_relative_eq!(config.spot, 100.0);
        assert_eq!(config.steps, 252);
        assert_eq!(config.kind, OptionKind::Call);
        assert_eq!(config.style, OptionStyle::European);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
        assert!(config.gbm_parameters().is_ok());
        assert!(config.option_spec().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CliConfig::from_toml_str(
            r#"
            volatility = 0.35
            steps = 12
            kind = "put"
            style = "asian"
            averaging = "include-initial"
            seed = 7
            "#,
        )
        .unwrap();

        assert_relative_eq!(config.volatility, 0.35);
        assert_eq!(config.steps, 12);
        assert_eq!(config.kind, OptionKind::Put);
        assert_eq!(config.style, OptionStyle::AsianArithmetic);
        assert_eq!(config.averaging, AsianAveraging::IncludeInitial);
        assert_eq!(config.seed, Some(7));
        assert_relative_eq!(config.spot, 100.0);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = CliConfig::from_toml_str("vol = 0.2").unwrap_err();
        assert!(matches!(err, ConfigError::FileError(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = CliConfig::from_file(Path::new("/nonexistent/gbm-pricer.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = CliConfig::default();
        config
            .apply_env(env(&[
                ("PRICER_SPOT", "120"),
                ("PRICER_RATE", "-0.01"),
                ("PRICER_SEED", "99"),
                ("PRICER_KIND", "PUT"),
                ("PRICER_STYLE", "asian"),
            ]))
            .unwrap();

        assert_relative_eq!(config.spot, 120.0);
        assert_relative_eq!(config.rate, -0.01);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.kind, OptionKind::Put);
        assert_eq!(config.style, OptionStyle::AsianArithmetic);
    }

    #[test]
    fn test_invalid_env_value() {
        let mut config = CliConfig::default();
        let err = config.apply_env(env(&[("PRICER_STEPS", "many")])).unwrap_err();
        assert!(matches!(err, ConfigError::EnvError { var: "PRICER_STEPS", .. }));

        let err = config.apply_env(env(&[("PRICER_STYLE", "bermudan")])).unwrap_err();
        assert!(matches!(err, ConfigError::EnvError { var: "PRICER_STYLE", .. }));
    }

    #[test]
    fn test_precedence_file_env_cli() {
        let path = std::env::temp_dir().join(format!("gbm-pricer-test-{}.toml", std::process::id()));
        std::fs::write(&path, "spot = 90.0\nstrike = 95.0\npaths = 10\n").unwrap();

        let cli = Overrides {
            strike: Some(110.0),
            ..Default::default()
        };
        let config = build_config_with(
            Some(&path),
            &cli,
            env(&[("PRICER_SPOT", "80"), ("PRICER_STRIKE", "105")]),
        )
        .unwrap();
        std::fs::remove_file(&path).unwrap();

        // file < env < cli
        assert_eq!(config.paths, 10);
        assert_relative_eq!(config.spot, 80.0);
        assert_relative_eq!(config.strike, 110.0);
    }

    #[test]
    fn test_parallel_threshold_env_and_flag() {
        let mut config = CliConfig::default();
        config
            .apply_env(env(&[("PRICER_PARALLEL_THRESHOLD", "5000")]))
            .unwrap();
        assert_eq!(config.parallel_threshold, 5000);
        assert_eq!(config.engine_config().unwrap().parallel_threshold(), 5000);

        let cli = TestCli::try_parse_from(["gbm-pricer", "--parallel-threshold", "250"]).unwrap();
        let config = build_config_with(
            None,
            &cli.overrides,
            env(&[("PRICER_PARALLEL_THRESHOLD", "5000")]),
        )
        .unwrap();
        assert_eq!(config.parallel_threshold, 250);

        let err = CliConfig::default()
            .apply_env(env(&[("PRICER_PARALLEL_THRESHOLD", "-1")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EnvError {
                var: "PRICER_PARALLEL_THRESHOLD",
                ..
            }
        ));
    }

    #[test]
    fn test_seed_limited_to_toml_integer_range() {
        let err = CliConfig::default()
            .apply_env(env(&[("PRICER_SEED", "18446744073709551615")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::EnvError { var: "PRICER_SEED", .. }));

        let too_large = (MAX_SEED + 1).to_string();
        assert!(TestCli::try_parse_from(["gbm-pricer", "--seed", too_large.as_str()]).is_err());

        let max = MAX_SEED.to_string();
        let cli = TestCli::try_parse_from(["gbm-pricer", "--seed", max.as_str()]).unwrap();
        assert_eq!(cli.overrides.seed, Some(MAX_SEED));

        let config = CliConfig {
            seed: Some(u64::MAX),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidSeed(u64::MAX))));
    }

    #[test]
    fn test_zero_paths_rejected() {
        let cli = Overrides {
            paths: Some(0),
            ..Default::default()
        };
        let err = build_config_with(None, &cli, env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPaths(0)));
    }

    #[test]
    fn test_invalid_model_parameters_surface_field() {
        let config = CliConfig {
            volatility: -0.1,
            ..Default::default()
        };
        assert_eq!(config.gbm_parameters().unwrap_err().field(), "volatility");

        let config = CliConfig {
            chunk_size: 0,
            ..Default::default()
        };
        assert!(config.engine_config().is_err());
    }

    #[test]
    fn test_config_serialises_to_toml() {
        for seed in [1, MAX_SEED] {
            let config = CliConfig {
                seed: Some(seed),
                ..Default::default()
            };
            let text = toml::to_string_pretty(&config).unwrap();
            assert_eq!(CliConfig::from_toml_str(&text).unwrap(), config);
        }
    }
}
