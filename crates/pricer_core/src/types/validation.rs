//! Field validation helpers.
//!
//! Each helper returns the value unchanged when it satisfies the constraint,
//! so constructors can validate and assign in one expression:
//!
//! ```
//! use pricer_core::types::{require_positive, ParameterError};
//!
//! fn build(strike: f64) -> Result<f64, ParameterError> {
//!     let strike = require_positive("strike", strike)?;
//!     Ok(strike)
//! }
//!
//! assert_eq!(build(100.0), Ok(100.0));
//! assert!(build(0.0).is_err());
//! ```

use super::error::ParameterError;

/// Requires `value` to be finite (neither NaN nor infinite).
#[inline]
pub fn require_finite(name: &'static str, value: f64) -> Result<f64, ParameterError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParameterError::Invalid {
            name,
            value,
            constraint: "finite",
        })
    }
}

/// Requires `value` to be strictly positive and finite.
#[inline]
pub fn require_positive(name: &'static str, value: f64) -> Result<f64, ParameterError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ParameterError::Invalid {
            name,
            value,
            constraint: "positive and finite",
        })
    }
}

/// Requires `value` to be non-negative and finite.
#[inline]
pub fn require_non_negative(name: &'static str, value: f64) -> Result<f64, ParameterError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ParameterError::Invalid {
            name,
            value,
            constraint: "non-negative and finite",
        })
    }
}
