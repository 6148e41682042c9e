//! CLI error types.

use pricer_core::types::{ParameterError, PricingError};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be resolved.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Model or option parameters are invalid.
    #[error("{0}")]
    Parameter(#[from] ParameterError),

    /// Engine configuration is invalid.
    #[error("Engine configuration error: {0}")]
    Engine(#[from] pricer_pricing::mc::ConfigError),

    /// Pricing failed.
    #[error("Pricing failed: {0}")]
    Pricing(#[from] PricingError),

    /// Output could not be rendered.
    #[error("Failed to render output: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
