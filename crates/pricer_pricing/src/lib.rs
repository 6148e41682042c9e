//! # Pricer Pricing (Layer 3: Monte Carlo Engine)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing turns shock matrices into option prices:
//! - Seeded standard-normal sampling ([`rng::RandomNormalSource`])
//! - Row-major shock storage ([`mc::ShockMatrix`])
//! - Parallel path simulation, payoff evaluation and discounting
//!   ([`mc::PricingEngine`])
//!
//! ## Determinism
//!
//! Paths are summed in fixed-size chunks whose partial sums are merged in
//! chunk order. A given shock matrix therefore prices to the same bits on
//! one thread or on many.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_models::models::GbmParameters;
//! use pricer_pricing::mc::PricingEngine;
//! use pricer_pricing::rng::RandomNormalSource;
//!
//! let params = GbmParameters::new(100.0, 0.05, 0.2, 1.0, 12).unwrap();
//! let engine = PricingEngine::new(params, 100.0, 0.05).unwrap();
//!
//! let mut source = RandomNormalSource::from_seed(42);
//! let shocks = source.generate_shock_matrix(2_000, 12);
//!
//! let call = engine.price_european_call(&shocks, 2_000).unwrap();
//! let asian = engine.price_asian_call(&shocks, 2_000).unwrap();
//! assert!(call > asian);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod mc;
pub mod rng;

// Re-export commonly used items for convenience
pub use mc::{EngineConfig, PricingEngine, PricingStatistics, ShockMatrix};
pub use rng::RandomNormalSource;
