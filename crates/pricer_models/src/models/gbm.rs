//! Geometric Brownian Motion (GBM) model implementation.
//!
//! GBM is the fundamental model for asset price dynamics, described by:
//! ```text
//! dS = mu * S * dt + sigma * S * dW
//! ```
//! where:
//! - S = asset price
//! - mu = drift
//! - sigma = volatility
//! - dW = Wiener process increment
//!
//! ## Exact transition
//!
//! Paths are stepped with the exact log-normal solution rather than an Euler
//! scheme, so there is no discretisation bias at any step size:
//! ```text
//! S(t+dt) = S(t) * exp((mu - 0.5*sigma^2)*dt + sigma*sqrt(dt)*Z)
//! ```

use pricer_core::types::{require_finite, require_non_negative, require_positive, ParameterError};

/// GBM model parameters.
///
/// Immutable once constructed. `dt = time_horizon / steps` is derived on
/// demand and is always strictly positive.
///
/// # Examples
/// ```
/// use pricer_models::models::GbmParameters;
///
/// let params = GbmParameters::new(100.0, 0.05, 0.2, 1.0, 252).unwrap();
/// assert_eq!(params.steps(), 252);
/// assert!((params.dt() - 1.0 / 252.0).abs() < 1e-15);
///
/// // Negative volatility is rejected with the field name
/// let err = GbmParameters::new(100.0, 0.05, -0.2, 1.0, 252).unwrap_err();
/// assert_eq!(err.field(), "volatility");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GbmParameters {
    initial_price: f64,
    drift: f64,
    volatility: f64,
    time_horizon: f64,
    steps: usize,
}

impl GbmParameters {
    /// Creates new GBM parameters with validation.
    ///
    /// # Arguments
    /// * `initial_price` - Spot price at time 0 (positive, finite)
    /// * `drift` - Annualised drift (any finite value)
    /// * `volatility` - Annualised volatility (non-negative, finite)
    /// * `time_horizon` - Horizon in years (positive, finite)
    /// * `steps` - Number of discretisation steps (at least 1)
    ///
    /// # Errors
    /// `ParameterError` naming the first field that violates its constraint.
    pub fn new(
        initial_price: f64,
        drift: f64,
        volatility: f64,
        time_horizon: f64,
        steps: usize,
    ) -> Result<Self, ParameterError> {
        let initial_price = require_positive("initial_price", initial_price)?;
        let drift = require_finite("drift", drift)?;
        let volatility = require_non_negative("volatility", volatility)?;
        let time_horizon = require_positive("time_horizon", time_horizon)?;
        if steps == 0 {
            return Err(ParameterError::ZeroSteps);
        }

        Ok(Self {
            initial_price,
            drift,
            volatility,
            time_horizon,
            steps,
        })
    }

    /// Returns a copy with a different step count.
    ///
    /// # Errors
    /// `ParameterError::ZeroSteps` if `steps == 0`.
    pub fn with_steps(self, steps: usize) -> Result<Self, ParameterError> {
        Self::new(
            self.initial_price,
            self.drift,
            self.volatility,
            self.time_horizon,
            steps,
        )
    }

    /// Spot price at time 0.
    #[inline]
    pub fn initial_price(&self) -> f64 {
        self.initial_price
    }

    /// Annualised drift.
    #[inline]
    pub fn drift(&self) -> f64 {
        self.drift
    }

    /// Annualised volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Horizon in years.
    #[inline]
    pub fn time_horizon(&self) -> f64 {
        self.time_horizon
    }

    /// Number of discretisation steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Time step `time_horizon / steps`.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.time_horizon / self.steps as f64
    }
}

impl Default for GbmParameters {
    fn default() -> Self {
        Self {
            initial_price: 100.0,
            drift: 0.05,
            volatility: 0.2,
            time_horizon: 1.0,
            steps: 252,
        }
    }
}

/// Deterministic map from a shock vector to a GBM price path.
///
/// The per-step constants are computed once at construction, so the inner
/// loop is one fused multiply-add and one `exp` per step. The simulator holds
/// no mutable state and can be shared freely across threads.
///
/// # Examples
/// ```
/// use pricer_models::models::{GbmParameters, GbmPathSimulator};
///
/// // Zero volatility: pure drift growth
/// let params = GbmParameters::new(100.0, 0.1, 0.0, 1.0, 10).unwrap();
/// let simulator = GbmPathSimulator::new(params);
/// let path = simulator.simulate_path(&[0.7; 10]);
///
/// let expected = 100.0 * 0.1_f64.exp();
/// assert!((path[10] - expected).abs() < 1e-10);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmPathSimulator {
    params: GbmParameters,
    dt: f64,
    /// (mu - 0.5 sigma^2) dt
    drift_dt: f64,
    /// sigma sqrt(dt)
    vol_sqrt_dt: f64,
}

impl GbmPathSimulator {
    /// Creates a simulator for the given parameters.
    pub fn new(params: GbmParameters) -> Self {
        let dt = params.dt();
        let sigma = params.volatility();
        Self {
            params,
            dt,
            drift_dt: (params.drift() - 0.5 * sigma * sigma) * dt,
            vol_sqrt_dt: sigma * dt.sqrt(),
        }
    }

    /// Model parameters.
    #[inline]
    pub fn params(&self) -> &GbmParameters {
        &self.params
    }

    /// Time step used for every transition.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Number of steps per path.
    #[inline]
    pub fn steps(&self) -> usize {
        self.params.steps()
    }

    /// Simulates one path, returning `steps + 1` prices starting at the
    /// initial price.
    ///
    /// # Panics
    /// Panics if `shocks.len() != steps`.
    pub fn simulate_path(&self, shocks: &[f64]) -> Vec<f64> {
        let mut path = vec![0.0; self.steps() + 1];
        self.simulate_path_into(shocks, &mut path);
        path
    }

    /// Simulates one path into a caller-owned buffer of length `steps + 1`.
    ///
    /// Lets a worker reuse one buffer for every path it prices.
    ///
    /// # Panics
    /// Panics if `shocks.len() != steps` or `out.len() != steps + 1`.
    pub fn simulate_path_into(&self, shocks: &[f64], out: &mut [f64]) {
        let steps = self.steps();
        assert_eq!(
            shocks.len(),
            steps,
            "shock vector length must equal the number of steps"
        );
        assert_eq!(out.len(), steps + 1, "path buffer must hold steps + 1 prices");

        out[0] = self.params.initial_price();
        for (i, &z) in shocks.iter().enumerate() {
            out[i + 1] = out[i] * (self.drift_dt + self.vol_sqrt_dt * z).exp();
        }
    }
}

impl From<GbmParameters> for GbmPathSimulator {
    fn from(params: GbmParameters) -> Self {
        Self::new(params)
    }
}
