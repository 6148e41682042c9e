//! Error types for the Monte Carlo engine configuration.
//!
//! Shape and parameter violations raised while pricing live in
//! `pricer_core::types` as `PricingError`; this module only covers
//! `EngineConfig` validation.

use thiserror::Error;

/// Configuration error for the pricing engine.
///
/// Raised by [`EngineConfigBuilder::build`](super::EngineConfigBuilder::build).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Chunk size must hold at least one path.
    #[error("Invalid chunk size {0}: must be at least 1")]
    InvalidChunkSize(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidChunkSize(0);
        assert_eq!(err.to_string(), "Invalid chunk size 0: must be at least 1");
    }
}
