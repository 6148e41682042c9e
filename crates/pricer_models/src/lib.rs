//! # Pricer Models (L2: Business Logic)
//!
//! Stochastic model, option definitions and payoff functions.
//!
//! This crate provides:
//! - Geometric Brownian Motion parameters and the exact log-normal path simulator
//! - Option specifications (call/put, European/arithmetic Asian)
//! - Path payoff functions
//! - Closed-form references for validating Monte Carlo estimates
//!
//! ## Design Principles
//!
//! - **Validated construction**: parameters are checked once, when built
//! - **Enum-based options** for static dispatch in the pricing hot loop
//! - **Stateless simulation**: the simulator never mutates itself
//!
//! ## Example
//!
//! ```rust
//! use pricer_models::models::{GbmParameters, GbmPathSimulator};
//!
//! let params = GbmParameters::new(100.0, 0.05, 0.2, 1.0, 4).unwrap();
//! let simulator = GbmPathSimulator::new(params);
//!
//! let path = simulator.simulate_path(&[0.1, -0.3, 0.0, 1.2]);
//! assert_eq!(path.len(), 5);
//! assert_eq!(path[0], 100.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod models;
