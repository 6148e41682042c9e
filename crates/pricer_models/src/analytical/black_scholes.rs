//! Closed-form European prices under GBM.
//!
//! ## Mathematical Formulas
//!
//! With forward `F = S·e^(μT)` and total deviation `v = σ√T`:
//!
//! **Call**: e^(-rT)·[F·N(d₁) - K·N(d₂)]
//! **Put**: e^(-rT)·[K·N(-d₂) - F·N(-d₁)]
//!
//! where d₁ = (ln(F/K) + v²/2) / v and d₂ = d₁ - v.
//!
//! Black-Scholes is the special case μ = r. Keeping μ separate gives the
//! exact expectation the Monte Carlo engine estimates when paths are
//! simulated under a drift different from the discount rate.

use pricer_core::math::distributions::norm_cdf;

use crate::instruments::{OptionKind, OptionSpec, OptionStyle};
use crate::models::GbmParameters;

/// Undiscounted expected payoff of a European option on a log-normal
/// terminal price with mean `forward` and log-deviation `total_vol`.
fn undiscounted_price(kind: OptionKind, forward: f64, strike: f64, total_vol: f64) -> f64 {
    if total_vol <= 0.0 {
        return kind.intrinsic(forward, strike);
    }

    let d1 = ((forward / strike).ln() + 0.5 * total_vol * total_vol) / total_vol;
    let d2 = d1 - total_vol;

    match kind {
        OptionKind::Call => forward * norm_cdf(d1) - strike * norm_cdf(d2),
        OptionKind::Put => strike * norm_cdf(-d2) - forward * norm_cdf(-d1),
    }
}

/// Black-Scholes European call price.
///
/// Zero volatility degenerates to the discounted intrinsic value of the forward.
///
/// # Examples
/// ```
/// use pricer_models::analytical::black_scholes_call;
///
/// let price = black_scholes_call(100.0, 100.0, 0.05, 0.2, 1.0);
/// assert!((price - 10.4506).abs() < 1e-3);
/// ```
pub fn black_scholes_call(spot: f64, strike: f64, rate: f64, volatility: f64, maturity: f64) -> f64 {
    let forward = spot * (rate * maturity).exp();
    let total_vol = volatility * maturity.sqrt();
    (-rate * maturity).exp() * undiscounted_price(OptionKind::Call, forward, strike, total_vol)
}

/// Black-Scholes European put price.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{black_scholes_call, black_scholes_put};
///
/// let call = black_scholes_call(100.0, 100.0, 0.05, 0.2, 1.0);
/// let put = black_scholes_put(100.0, 100.0, 0.05, 0.2, 1.0);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-6);
/// ```
pub fn black_scholes_put(spot: f64, strike: f64, rate: f64, volatility: f64, maturity: f64) -> f64 {
    let forward = spot * (rate * maturity).exp();
    let total_vol = volatility * maturity.sqrt();
    (-rate * maturity).exp() * undiscounted_price(OptionKind::Put, forward, strike, total_vol)
}

/// Closed-form value of the quantity the Monte Carlo engine estimates for a
/// European option: `exp(-rT) * E[payoff(S_T)]` with `S_T` simulated under
/// the model drift.
///
/// Returns `None` for Asian styles, which have no closed form here.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{black_scholes_call, gbm_european_reference};
/// use pricer_models::instruments::OptionSpec;
/// use pricer_models::models::GbmParameters;
///
/// // drift == rate reduces to Black-Scholes
/// let params = GbmParameters::new(100.0, 0.05, 0.2, 1.0, 252).unwrap();
/// let spec = OptionSpec::european_call(100.0, 0.05).unwrap();
/// let reference = gbm_european_reference(&params, &spec).unwrap();
/// assert!((reference - black_scholes_call(100.0, 100.0, 0.05, 0.2, 1.0)).abs() < 1e-12);
/// ```
pub fn gbm_european_reference(params: &GbmParameters, spec: &OptionSpec) -> Option<f64> {
    if spec.style() != OptionStyle::European {
        return None;
    }

    let maturity = params.time_horizon();
    let forward = params.initial_price() * (params.drift() * maturity).exp();
    let total_vol = params.volatility() * maturity.sqrt();
    let undiscounted = undiscounted_price(spec.kind(), forward, spec.strike(), total_vol);

    Some(spec.discount_factor(maturity) * undiscounted)
}
