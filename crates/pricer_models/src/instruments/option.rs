//! Option specifications.
//!
//! An [`OptionSpec`] bundles everything the pricing engine needs to know
//! about the contract itself: strike, the rate used for discounting, the
//! call/put direction and the exercise/averaging style.

use num_traits::Float;
use pricer_core::types::{require_finite, require_positive, ParameterError};

/// Direction of the option.
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionKind;
///
/// assert_eq!(OptionKind::Call.intrinsic(110.0_f64, 100.0), 10.0);
/// assert_eq!(OptionKind::Put.intrinsic(110.0_f64, 100.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionKind {
    /// Call: max(S - K, 0)
    Call,
    /// Put: max(K - S, 0)
    Put,
}

impl OptionKind {
    /// Intrinsic value of the option on `underlying` struck at `strike`.
    #[inline]
    pub fn intrinsic<T: Float>(&self, underlying: T, strike: T) -> T {
        let value = match self {
            OptionKind::Call => underlying - strike,
            OptionKind::Put => strike - underlying,
        };
        value.max(T::zero())
    }
}

impl std::fmt::Display for OptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionKind::Call => write!(f, "call"),
            OptionKind::Put => write!(f, "put"),
        }
    }
}

/// Which price of the path settles the option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionStyle {
    /// Settles on the terminal price.
    #[default]
    European,
    /// Settles on the arithmetic average of the simulated prices.
    #[cfg_attr(feature = "serde", serde(alias = "asian"))]
    AsianArithmetic,
}

impl std::fmt::Display for OptionStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionStyle::European => write!(f, "european"),
            OptionStyle::AsianArithmetic => write!(f, "asian-arithmetic"),
        }
    }
}

/// Validated option specification.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionKind, OptionSpec, OptionStyle};
///
/// let spec = OptionSpec::new(100.0, 0.03, OptionKind::Put, OptionStyle::AsianArithmetic).unwrap();
/// assert_eq!(spec.strike(), 100.0);
/// assert!((spec.discount_factor(1.0) - (-0.03_f64).exp()).abs() < 1e-15);
///
/// assert!(OptionSpec::european_call(0.0, 0.03).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OptionSpec {
    strike: f64,
    risk_free_rate: f64,
    kind: OptionKind,
    style: OptionStyle,
}

impl OptionSpec {
    /// Creates a new option specification.
    ///
    /// # Errors
    /// `ParameterError` if `strike` is not positive and finite or
    /// `risk_free_rate` is not finite.
    pub fn new(
        strike: f64,
        risk_free_rate: f64,
        kind: OptionKind,
        style: OptionStyle,
    ) -> Result<Self, ParameterError> {
        Ok(Self {
            strike: require_positive("strike", strike)?,
            risk_free_rate: require_finite("risk_free_rate", risk_free_rate)?,
            kind,
            style,
        })
    }

    /// European call.
    pub fn european_call(strike: f64, risk_free_rate: f64) -> Result<Self, ParameterError> {
        Self::new(strike, risk_free_rate, OptionKind::Call, OptionStyle::European)
    }

    /// European put.
    pub fn european_put(strike: f64, risk_free_rate: f64) -> Result<Self, ParameterError> {
        Self::new(strike, risk_free_rate, OptionKind::Put, OptionStyle::European)
    }

    /// Arithmetic-average Asian call.
    pub fn asian_call(strike: f64, risk_free_rate: f64) -> Result<Self, ParameterError> {
        Self::new(
            strike,
            risk_free_rate,
            OptionKind::Call,
            OptionStyle::AsianArithmetic,
        )
    }

    /// Arithmetic-average Asian put.
    pub fn asian_put(strike: f64, risk_free_rate: f64) -> Result<Self, ParameterError> {
        Self::new(
            strike,
            risk_free_rate,
            OptionKind::Put,
            OptionStyle::AsianArithmetic,
        )
    }

    /// Strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Continuously compounded rate used for discounting.
    #[inline]
    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    /// Call or put.
    #[inline]
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// European or arithmetic Asian.
    #[inline]
    pub fn style(&self) -> OptionStyle {
        self.style
    }

    /// `exp(-r * time_horizon)`.
    #[inline]
    pub fn discount_factor(&self, time_horizon: f64) -> f64 {
        (-self.risk_free_rate * time_horizon).exp()
    }
}
