//! Closed-form prices used to validate Monte Carlo estimates.
//!
//! - [`black_scholes`]: Black-Scholes European prices and the drift-aware GBM reference

pub mod black_scholes;

pub use black_scholes::{black_scholes_call, black_scholes_put, gbm_european_reference};
