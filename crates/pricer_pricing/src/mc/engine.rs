//! Monte Carlo pricing engine.
//!
//! # Reduction
//!
//! Shock rows are partitioned into contiguous chunks of
//! [`EngineConfig::chunk_size`] paths. Each chunk is priced sequentially into
//! its own [`PayoffAccumulator`] with one reusable path buffer, the chunk
//! accumulators are collected in chunk order, and the final merge runs
//! sequentially. The chunk layout depends only on the configuration, so the
//! price is bit-identical whether the chunks run on one thread, many threads
//! or the sequential fallback.
//!
//! ```text
//! ShockMatrix rows ─┬─ chunk 0 ─> acc 0 ─┐
//!                   ├─ chunk 1 ─> acc 1 ─┼─ ordered merge ─> mean ─> × exp(-rT)
//!                   └─ chunk k ─> acc k ─┘
//! ```

use pricer_core::types::{require_finite, require_positive, ParameterError, PricingError, ShapeError};
use pricer_models::instruments::{OptionKind, OptionSpec, OptionStyle, PathPayoff};
use pricer_models::models::{GbmParameters, GbmPathSimulator};
use rayon::prelude::*;
use tracing::{debug, trace};

use super::accumulator::PayoffAccumulator;
use super::config::EngineConfig;
use super::shocks::ShockMatrix;
use crate::rng::RandomNormalSource;

/// Discounted Monte Carlo estimate with its sampling error.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PricingStatistics {
    /// Discounted mean payoff.
    pub price: f64,
    /// Discounted standard error of the mean (0 for a single path).
    pub std_error: f64,
    /// Number of paths averaged.
    pub n_paths: usize,
}

impl PricingStatistics {
    /// Normal-approximation 95% confidence interval `(lower, upper)`.
    #[inline]
    pub fn confidence_95(&self) -> (f64, f64) {
        let half_width = 1.96 * self.std_error;
        (self.price - half_width, self.price + half_width)
    }
}

/// Prices European and arithmetic Asian options on simulated GBM paths.
///
/// The engine is immutable and `Sync`; pricing calls take `&self` and never
/// share mutable state between paths.
///
/// # Examples
///
/// ```rust
/// use pricer_models::models::GbmParameters;
/// use pricer_pricing::mc::PricingEngine;
/// use pricer_pricing::rng::RandomNormalSource;
///
/// let params = GbmParameters::new(100.0, 0.05, 0.2, 1.0, 50).unwrap();
/// let engine = PricingEngine::new(params, 100.0, 0.05).unwrap();
///
/// let shocks = RandomNormalSource::from_seed(42).generate_shock_matrix(5_000, 50);
/// let call = engine.price_european_call(&shocks, 5_000).unwrap();
/// let put = engine.price_european_put(&shocks, 5_000).unwrap();
///
/// // Put-call parity with drift == rate: C - P = S - K exp(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1.5);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct PricingEngine {
    simulator: GbmPathSimulator,
    strike: f64,
    risk_free_rate: f64,
    config: EngineConfig,
}

impl PricingEngine {
    /// Creates an engine with the default [`EngineConfig`].
    ///
    /// # Errors
    /// `ParameterError` if `strike` is not positive and finite or
    /// `risk_free_rate` is not finite.
    pub fn new(params: GbmParameters, strike: f64, risk_free_rate: f64) -> Result<Self, ParameterError> {
        Self::with_config(params, strike, risk_free_rate, EngineConfig::default())
    }

    /// Creates an engine with an explicit configuration.
    ///
    /// # Errors
    /// Same as [`PricingEngine::new`].
    pub fn with_config(
        params: GbmParameters,
        strike: f64,
        risk_free_rate: f64,
        config: EngineConfig,
    ) -> Result<Self, ParameterError> {
        let strike = require_positive("strike", strike)?;
        let risk_free_rate = require_finite("risk_free_rate", risk_free_rate)?;

        debug!(
            initial_price = params.initial_price(),
            drift = params.drift(),
            volatility = params.volatility(),
            time_horizon = params.time_horizon(),
            steps = params.steps(),
            strike,
            risk_free_rate,
            chunk_size = config.chunk_size(),
            "created pricing engine"
        );

        Ok(Self {
            simulator: GbmPathSimulator::new(params),
            strike,
            risk_free_rate,
            config,
        })
    }

    /// Model parameters.
    #[inline]
    pub fn params(&self) -> &GbmParameters {
        self.simulator.params()
    }

    /// Engine strike.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Engine discount rate.
    #[inline]
    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    /// Engine configuration.
    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Discounted European call price.
    ///
    /// # Errors
    /// `PricingError::Shape` if the matrix does not hold `n_paths` rows of
    /// `steps` shocks, or `n_paths == 0`.
    pub fn price_european_call(&self, shocks: &ShockMatrix, n_paths: usize) -> Result<f64, PricingError> {
        self.price_engine_option(OptionKind::Call, OptionStyle::European, shocks, n_paths)
    }

    /// Discounted European put price.
    ///
    /// # Errors
    /// See [`PricingEngine::price_european_call`].
    pub fn price_european_put(&self, shocks: &ShockMatrix, n_paths: usize) -> Result<f64, PricingError> {
        self.price_engine_option(OptionKind::Put, OptionStyle::European, shocks, n_paths)
    }

    /// Discounted arithmetic Asian call price.
    ///
    /// # Errors
    /// See [`PricingEngine::price_european_call`].
    pub fn price_asian_call(&self, shocks: &ShockMatrix, n_paths: usize) -> Result<f64, PricingError> {
        self.price_engine_option(OptionKind::Call, OptionStyle::AsianArithmetic, shocks, n_paths)
    }

    /// Discounted arithmetic Asian put price.
    ///
    /// # Errors
    /// See [`PricingEngine::price_european_call`].
    pub fn price_asian_put(&self, shocks: &ShockMatrix, n_paths: usize) -> Result<f64, PricingError> {
        self.price_engine_option(OptionKind::Put, OptionStyle::AsianArithmetic, shocks, n_paths)
    }

    /// Discounted price of an arbitrary option on the engine's model.
    ///
    /// Strike and rate come from `spec`, not from the engine.
    ///
    /// # Errors
    /// See [`PricingEngine::price_european_call`].
    pub fn price(&self, spec: &OptionSpec, shocks: &ShockMatrix, n_paths: usize) -> Result<f64, PricingError> {
        Ok(self.price_with_statistics(spec, shocks, n_paths)?.price)
    }

    /// Discounted price together with its standard error.
    ///
    /// # Errors
    /// See [`PricingEngine::price_european_call`].
    pub fn price_with_statistics(
        &self,
        spec: &OptionSpec,
        shocks: &ShockMatrix,
        n_paths: usize,
    ) -> Result<PricingStatistics, PricingError> {
        self.validate_shape(shocks, n_paths)?;

        debug!(
            kind = %spec.kind(),
            style = %spec.style(),
            strike = spec.strike(),
            n_paths,
            parallel = self.config.should_parallelise(n_paths),
            "pricing option"
        );

        let payoff = PathPayoff::new(spec, self.config.averaging());
        let total = self.accumulate(&payoff, shocks, n_paths);
        let discount = spec.discount_factor(self.params().time_horizon());

        let stats = PricingStatistics {
            price: discount * total.mean(),
            std_error: discount * total.std_error(),
            n_paths: total.count(),
        };
        debug!(price = stats.price, std_error = stats.std_error, "priced option");
        Ok(stats)
    }

    /// Draws an `n_paths x steps` shock matrix from `seed` and prices `spec`.
    ///
    /// # Errors
    /// `ShapeError::EmptyMatrix` if `n_paths == 0`.
    pub fn price_seeded(&self, spec: &OptionSpec, n_paths: usize, seed: u64) -> Result<f64, PricingError> {
        let shocks = RandomNormalSource::from_seed(seed).generate_shock_matrix(n_paths, self.simulator.steps());
        self.price(spec, &shocks, n_paths)
    }

    fn price_engine_option(
        &self,
        kind: OptionKind,
        style: OptionStyle,
        shocks: &ShockMatrix,
        n_paths: usize,
    ) -> Result<f64, PricingError> {
        let spec = OptionSpec::new(self.strike, self.risk_free_rate, kind, style)?;
        self.price(&spec, shocks, n_paths)
    }

    fn validate_shape(&self, shocks: &ShockMatrix, n_paths: usize) -> Result<(), ShapeError> {
        if n_paths == 0 {
            return Err(ShapeError::EmptyMatrix);
        }
        if n_paths != shocks.n_paths() {
            return Err(ShapeError::PathCountMismatch {
                requested: n_paths,
                rows: shocks.n_paths(),
            });
        }
        if shocks.n_steps() != self.simulator.steps() {
            return Err(ShapeError::StepCountMismatch {
                expected: self.simulator.steps(),
                actual: shocks.n_steps(),
            });
        }
        Ok(())
    }

    /// Sums undiscounted payoffs over all rows with the chunked reduction.
    fn accumulate(&self, payoff: &PathPayoff, shocks: &ShockMatrix, n_paths: usize) -> PayoffAccumulator {
        let chunk_len = self.config.chunk_size().saturating_mul(self.simulator.steps());
        let data = shocks.as_slice();

        let partials: Vec<PayoffAccumulator> = if self.config.should_parallelise(n_paths) {
            data.par_chunks(chunk_len)
                .map(|chunk| self.accumulate_chunk(payoff, chunk))
                .collect()
        } else {
            data.chunks(chunk_len)
                .map(|chunk| self.accumulate_chunk(payoff, chunk))
                .collect()
        };

        partials.iter().fold(PayoffAccumulator::new(), |mut total, partial| {
            total.merge(partial);
            total
        })
    }

    fn accumulate_chunk(&self, payoff: &PathPayoff, chunk: &[f64]) -> PayoffAccumulator {
        let steps = self.simulator.steps();
        let mut path = vec![0.0; steps + 1];
        let mut acc = PayoffAccumulator::new();

        for row in chunk.chunks_exact(steps) {
            self.simulator.simulate_path_into(row, &mut path);
            acc.add(payoff.evaluate(&path));
        }

        trace!(paths = acc.count(), sum = acc.sum(), "chunk evaluated");
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_models::instruments::AsianAveraging;

    fn engine_with(params: GbmParameters, config: EngineConfig) -> PricingEngine {
        PricingEngine::with_config(params, 100.0, 0.03, config).unwrap()
    }

    fn default_engine(steps: usize) -> PricingEngine {
        let params = GbmParameters::new(100.0, 0.05, 0.2, 1.0, steps).unwrap();
        PricingEngine::new(params, 100.0, 0.03).unwrap()
    }

    #[test]
    fn test_rejects_invalid_strike_and_rate() {
        let params = GbmParameters::default();
        let err = PricingEngine::new(params, 0.0, 0.03).unwrap_err();
        assert_eq!(err.field(), "strike");

        let err = PricingEngine::new(params, 100.0, f64::NAN).unwrap_err();
        assert_eq!(err.field(), "risk_free_rate");
    }

    #[test]
    fn test_zero_volatility_is_deterministic() {
        let params = GbmParameters::new(100.0, 0.05, 0.0, 1.0, 12).unwrap();
        let engine = PricingEngine::new(params, 100.0, 0.03).unwrap();
        let shocks = RandomNormalSource::from_seed(5).generate_shock_matrix(100, 12);

        let expected = (-0.03_f64).exp() * (100.0 * 0.05_f64.exp() - 100.0);
        let call = engine.price_european_call(&shocks, 100).unwrap();
        assert_relative_eq!(call, expected, epsilon = 1e-9);
        assert_eq!(engine.price_european_put(&shocks, 100).unwrap(), 0.0);

        let stats = engine
            .price_with_statistics(&OptionSpec::european_call(100.0, 0.03).unwrap(), &shocks, 100)
            .unwrap();
        assert!(stats.std_error < 1e-9);
    }

    #[test]
    fn test_single_path_is_discounted_payoff() {
        let engine = default_engine(3);
        let shocks = ShockMatrix::from_rows(vec![vec![0.3, -0.1, 0.5]]).unwrap();

        let path = GbmPathSimulator::new(*engine.params()).simulate_path(shocks.row(0));
        let expected = (-0.03_f64).exp() * (path[3] - 100.0).max(0.0);

        let stats = engine
            .price_with_statistics(&OptionSpec::european_call(100.0, 0.03).unwrap(), &shocks, 1)
            .unwrap();
        assert_relative_eq!(stats.price, expected, epsilon = 1e-12);
        assert_eq!(stats.std_error, 0.0);
        assert_eq!(stats.n_paths, 1);
    }

    #[test]
    fn test_single_step_asian_equals_european() {
        let engine = default_engine(1);
        let shocks = RandomNormalSource::from_seed(11).generate_shock_matrix(2_000, 1);

        assert_eq!(
            engine.price_asian_call(&shocks, 2_000).unwrap(),
            engine.price_european_call(&shocks, 2_000).unwrap()
        );
        assert_eq!(
            engine.price_asian_put(&shocks, 2_000).unwrap(),
            engine.price_european_put(&shocks, 2_000).unwrap()
        );
    }

    #[test]
    fn test_shape_errors() {
        let engine = default_engine(10);
        let shocks = ShockMatrix::zeros(5, 10);

        assert_eq!(
            engine.price_european_call(&shocks, 6).unwrap_err(),
            PricingError::Shape(ShapeError::PathCountMismatch { requested: 6, rows: 5 })
        );
        assert_eq!(
            engine.price_european_call(&shocks, 0).unwrap_err(),
            PricingError::Shape(ShapeError::EmptyMatrix)
        );

        let wrong_steps = ShockMatrix::zeros(5, 9);
        assert_eq!(
            engine.price_asian_put(&wrong_steps, 5).unwrap_err(),
            PricingError::Shape(ShapeError::StepCountMismatch { expected: 10, actual: 9 })
        );
    }

    #[test]
    fn test_price_uses_spec_strike_and_rate() {
        let engine = default_engine(4);
        let shocks = RandomNormalSource::from_seed(3).generate_shock_matrix(500, 4);

        let own = engine.price_european_call(&shocks, 500).unwrap();
        let same = engine
            .price(&OptionSpec::european_call(100.0, 0.03).unwrap(), &shocks, 500)
            .unwrap();
        assert_eq!(own, same);

        let deeper = engine
            .price(&OptionSpec::european_call(80.0, 0.03).unwrap(), &shocks, 500)
            .unwrap();
        assert!(deeper > own);
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let params = GbmParameters::new(100.0, 0.05, 0.2, 1.0, 16).unwrap();
        let sequential = engine_with(
            params,
            EngineConfig::builder()
                .chunk_size(100)
                .parallel_threshold(usize::MAX)
                .build()
                .unwrap(),
        );
        let parallel = engine_with(
            params,
            EngineConfig::builder()
                .chunk_size(100)
                .parallel_threshold(0)
                .build()
                .unwrap(),
        );
        let shocks = RandomNormalSource::from_seed(99).generate_shock_matrix(1_050, 16);

        assert_eq!(
            sequential.price_asian_call(&shocks, 1_050).unwrap(),
            parallel.price_asian_call(&shocks, 1_050).unwrap()
        );
        assert_eq!(
            sequential.price_european_put(&shocks, 1_050).unwrap(),
            parallel.price_european_put(&shocks, 1_050).unwrap()
        );
    }

    #[test]
    fn test_thread_count_invariance() {
        let params = GbmParameters::new(100.0, 0.05, 0.2, 1.0, 8).unwrap();
        let engine = engine_with(
            params,
            EngineConfig::builder()
                .chunk_size(64)
                .parallel_threshold(0)
                .build()
                .unwrap(),
        );
        let shocks = RandomNormalSource::from_seed(7).generate_shock_matrix(3_000, 8);

        let price_on = |threads: usize| {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .unwrap()
                .install(|| engine.price_european_call(&shocks, 3_000).unwrap())
        };

        let single = price_on(1);
        assert_eq!(single, price_on(2));
        assert_eq!(single, price_on(4));
    }

    #[test]
    fn test_averaging_convention_changes_asian_price() {
        let params = GbmParameters::new(100.0, 0.05, 0.2, 1.0, 12).unwrap();
        let exclude = engine_with(params, EngineConfig::default());
        let include = engine_with(
            params,
            EngineConfig::builder()
                .averaging(AsianAveraging::IncludeInitial)
                .build()
                .unwrap(),
        );
        let shocks = RandomNormalSource::from_seed(21).generate_shock_matrix(1_000, 12);

        let a = exclude.price_asian_call(&shocks, 1_000).unwrap();
        let b = include.price_asian_call(&shocks, 1_000).unwrap();
        assert_ne!(a, b);
        // Averaging in S0 = K pulls the mean towards the strike
        assert!(b < a);
    }

    #[test]
    fn test_price_seeded_reproducible() {
        let engine = default_engine(20);
        let spec = OptionSpec::asian_put(100.0, 0.03).unwrap();

        let a = engine.price_seeded(&spec, 1_000, 42).unwrap();
        let b = engine.price_seeded(&spec, 1_000, 42).unwrap();
        let c = engine.price_seeded(&spec, 1_000, 43).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);

        assert!(engine.price_seeded(&spec, 0, 42).is_err());
    }

    #[test]
    fn test_confidence_interval() {
        let stats = PricingStatistics {
            price: 10.0,
            std_error: 0.5,
            n_paths: 100,
        };
        let (lo, hi) = stats.confidence_95();
        assert_relative_eq!(lo, 9.02, epsilon = 1e-12);
        assert_relative_eq!(hi, 10.98, epsilon = 1e-12);
    }
}
