//! Monte Carlo pricing on GBM paths.
//!
//! # Architecture
//!
//! ```text
//! PricingEngine
//! ├── GbmPathSimulator   (shock vector -> price path)
//! ├── EngineConfig       (chunk size, parallel threshold, Asian averaging)
//! ├── PathPayoff         (European / arithmetic Asian)
//! └── Reduction
//!     ├── PayoffAccumulator per chunk
//!     └── ordered merge, discount once
//! ```
//!
//! Shocks are supplied by the caller as a [`ShockMatrix`], usually drawn from
//! a [`RandomNormalSource`](crate::rng::RandomNormalSource). Pricing a
//! matrix is a pure function of the matrix and the engine, so the same
//! matrix always yields the same price.
//!
//! # Examples
//!
//! ```rust
//! use pricer_models::instruments::OptionSpec;
//! use pricer_models::models::GbmParameters;
//! use pricer_pricing::mc::PricingEngine;
//! use pricer_pricing::rng::RandomNormalSource;
//!
//! let params = GbmParameters::new(100.0, 0.05, 0.2, 1.0, 52).unwrap();
//! let engine = PricingEngine::new(params, 100.0, 0.05).unwrap();
//! let shocks = RandomNormalSource::from_seed(42).generate_shock_matrix(10_000, 52);
//!
//! let spec = OptionSpec::european_call(100.0, 0.05).unwrap();
//! let stats = engine.price_with_statistics(&spec, &shocks, 10_000).unwrap();
//! let (lo, hi) = stats.confidence_95();
//! assert!(lo < stats.price && stats.price < hi);
//! ```

pub mod accumulator;
pub mod config;
pub mod engine;
pub mod error;
pub mod shocks;

pub use accumulator::PayoffAccumulator;
pub use config::{EngineConfig, EngineConfigBuilder, DEFAULT_CHUNK_SIZE, DEFAULT_PARALLEL_THRESHOLD};
pub use engine::{PricingEngine, PricingStatistics};
pub use error::ConfigError;
pub use shocks::ShockMatrix;
