//! # pricer_core: Foundation for the GBM Monte Carlo Pricer
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the pricer workspace, providing:
//! - Error types: `ParameterError`, `ShapeError`, `PricingError` (`types::error`)
//! - Field validation helpers used at construction time (`types::validation`)
//! - Standard normal CDF/PDF for closed-form references (`math::distributions`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Derived error types
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::distributions::norm_cdf;
//! use pricer_core::types::{require_positive, ParameterError};
//!
//! assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
//!
//! let err = require_positive("initial_price", -1.0).unwrap_err();
//! assert!(matches!(err, ParameterError::Invalid { name: "initial_price", .. }));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
