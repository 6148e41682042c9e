//! Stochastic models for asset price simulation.
//!
//! - [`gbm`]: Geometric Brownian Motion with exact log-normal stepping

pub mod gbm;

pub use gbm::{GbmParameters, GbmPathSimulator};
