//! Error types for structured error handling.
//!
//! This module provides:
//! - `ParameterError`: Invalid model or option parameters, raised at construction
//! - `ShapeError`: Shock matrix shape violations, raised at the pricing call boundary
//! - `PricingError`: Union of the two, returned by the pricing engine

use thiserror::Error;

/// Invalid model or option parameter.
///
/// Raised when `GbmParameters`, `OptionSpec` or the pricing engine are
/// constructed with a value outside its domain. The message names the field,
/// the offending value and the constraint it violates.
///
/// # Examples
/// ```
/// use pricer_core::types::ParameterError;
///
/// let err = ParameterError::Invalid {
///     name: "volatility",
///     value: -0.2,
///     constraint: "non-negative and finite",
/// };
/// assert_eq!(
///     format!("{}", err),
///     "Invalid parameter 'volatility' = -0.2: must be non-negative and finite"
/// );
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParameterError {
    /// A floating-point field violates its constraint.
    #[error("Invalid parameter '{name}' = {value}: must be {constraint}")]
    Invalid {
        /// Field name
        name: &'static str,
        /// The rejected value
        value: f64,
        /// Human-readable constraint
        constraint: &'static str,
    },

    /// The discretisation step count is zero.
    #[error("Invalid parameter 'steps' = 0: must be at least 1")]
    ZeroSteps,
}

impl ParameterError {
    /// Returns the name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ParameterError::Invalid { name, .. } => name,
            ParameterError::ZeroSteps => "steps",
        }
    }
}

/// Shock matrix shape violation.
///
/// These indicate caller misuse (the matrix does not match the pricing
/// request), not a transient condition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShapeError {
    /// Requested path count differs from the number of shock rows.
    #[error("Path count mismatch: requested {requested} paths but shock matrix has {rows} rows")]
    PathCountMismatch {
        /// Path count passed by the caller
        requested: usize,
        /// Rows held by the shock matrix
        rows: usize,
    },

    /// Shock row length differs from the model's step count.
    #[error("Step count mismatch: model has {expected} steps but shock rows have length {actual}")]
    StepCountMismatch {
        /// Steps of the GBM configuration
        expected: usize,
        /// Length of each shock row
        actual: usize,
    },

    /// Rows of unequal length were supplied.
    #[error("Ragged shock matrix: row {row} has length {actual}, expected {expected}")]
    RaggedRows {
        /// Index of the first offending row
        row: usize,
        /// Length of row 0
        expected: usize,
        /// Length of the offending row
        actual: usize,
    },

    /// A flat row-major buffer does not hold `n_paths * n_steps` shocks.
    #[error("Shock buffer length mismatch: expected {expected} values, got {actual}")]
    LengthMismatch {
        /// `n_paths * n_steps`
        expected: usize,
        /// Length of the supplied buffer
        actual: usize,
    },

    /// The matrix holds no paths.
    #[error("Shock matrix has no paths")]
    EmptyMatrix,
}

/// Errors returned by pricing operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PricingError {
    /// Invalid parameters.
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// Shock matrix shape mismatch.
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let err = ParameterError::Invalid {
            name: "initial_price",
            value: 0.0,
            constraint: "positive and finite",
        };
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'initial_price' = 0: must be positive and finite"
        );
        assert_eq!(err.field(), "initial_price");
    }

    #[test]
    fn test_zero_steps_display() {
        let err = ParameterError::ZeroSteps;
        assert!(err.to_string().contains("steps"));
        assert_eq!(err.field(), "steps");
    }

    #[test]
    fn test_shape_error_display() {
        let err = ShapeError::PathCountMismatch {
            requested: 10,
            rows: 9,
        };
        assert!(err.to_string().contains("requested 10 paths"));

        let err = ShapeError::StepCountMismatch {
            expected: 252,
            actual: 12,
        };
        assert!(err.to_string().contains("252"));
        assert!(err.to_string().contains("12"));

        let err = ShapeError::RaggedRows {
            row: 3,
            expected: 5,
            actual: 4,
        };
        assert!(err.to_string().contains("row 3"));

        let err = ShapeError::LengthMismatch {
            expected: 6,
            actual: 7,
        };
        assert_eq!(
            err.to_string(),
            "Shock buffer length mismatch: expected 6 values, got 7"
        );
    }

    #[test]
    fn test_pricing_error_is_transparent() {
        let inner = ShapeError::EmptyMatrix;
        let err: PricingError = inner.clone().into();
        assert_eq!(err.to_string(), inner.to_string());
        assert_eq!(err, PricingError::Shape(ShapeError::EmptyMatrix));

        let err: PricingError = ParameterError::ZeroSteps.into();
        assert!(matches!(err, PricingError::Parameter(_)));
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = PricingError::from(ParameterError::ZeroSteps);
        let _: &dyn std::error::Error = &err;
    }
}
