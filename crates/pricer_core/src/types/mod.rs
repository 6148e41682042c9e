//! Error and validation types shared by every pricer layer.
//!
//! This module provides:
//! - `error`: Structured error types for parameter validation and shape checks
//! - `validation`: Helpers that turn a raw field value into a `ParameterError`
//!
//! # Re-exports
//!
//! - [`ParameterError`], [`ShapeError`], [`PricingError`] from `error`
//! - [`require_finite`], [`require_positive`], [`require_non_negative`] from `validation`

pub mod error;
pub mod validation;

pub use error::{ParameterError, PricingError, ShapeError};
pub use validation::{require_finite, require_non_negative, require_positive};
