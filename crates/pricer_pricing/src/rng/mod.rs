//! # Random Number Generation
//!
//! Standard-normal sampling for Monte Carlo simulation.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: a seed fixes the whole draw sequence
//! - **Ownership**: every [`RandomNormalSource`] owns its generator; there is
//!   no process-wide RNG
//! - **Efficiency**: zero-allocation batch fills via `&mut [f64]` slices
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::RandomNormalSource;
//!
//! let mut source = RandomNormalSource::from_seed(12345);
//!
//! let shocks = source.generate_normal(252);
//! assert_eq!(shocks.len(), 252);
//!
//! let matrix = source.generate_shock_matrix(1_000, 252);
//! assert_eq!(matrix.n_paths(), 1_000);
//! ```
//!
//! ## Algorithm
//!
//! Uniform bits come from `rand::rngs::StdRng`; the normal transform is the
//! Ziggurat method of `rand_distr::StandardNormal`.

mod prng;

pub use prng::RandomNormalSource;
