//! Monte Carlo engine configuration.
//!
//! The configuration controls how paths are partitioned for the parallel
//! reduction and which Asian averaging convention is used. None of these
//! settings depend on the size of the thread pool, so a given configuration
//! always produces the same bits.

use pricer_models::instruments::AsianAveraging;

use super::error::ConfigError;

/// Default number of paths per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Default path count at or above which chunks are evaluated in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Pricing engine configuration.
///
/// Use [`EngineConfigBuilder`] to construct non-default instances.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::EngineConfig;
/// use pricer_models::instruments::AsianAveraging;
///
/// let config = EngineConfig::builder()
///     .chunk_size(512)
///     .parallel_threshold(10_000)
///     .averaging(AsianAveraging::IncludeInitial)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.chunk_size(), 512);
/// assert!(!config.should_parallelise(9_999));
/// assert!(config.should_parallelise(10_000));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Paths summed sequentially by one worker.
    chunk_size: usize,
    /// Minimum path count for the rayon fan-out.
    parallel_threshold: usize,
    /// Asian averaging convention.
    averaging: AsianAveraging,
}

impl EngineConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Returns the number of paths per chunk.
    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the path count at which parallel evaluation starts.
    #[inline]
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Returns the Asian averaging convention.
    #[inline]
    pub fn averaging(&self) -> AsianAveraging {
        self.averaging
    }

    /// Whether `n_paths` paths should be evaluated on the rayon pool.
    #[inline]
    pub fn should_parallelise(&self, n_paths: usize) -> bool {
        n_paths >= self.parallel_threshold
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidChunkSize` if `chunk_size` is 0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize(self.chunk_size));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            averaging: AsianAveraging::default(),
        }
    }
}

/// Builder for [`EngineConfig`].
///
/// Unset fields fall back to the defaults.
#[derive(Clone, Debug, Default)]
pub struct EngineConfigBuilder {
    chunk_size: Option<usize>,
    parallel_threshold: Option<usize>,
    averaging: AsianAveraging,
}

impl EngineConfigBuilder {
    /// Sets the number of paths per chunk.
    ///
    /// # Arguments
    ///
    /// * `chunk_size` - Paths per chunk, at least 1
    #[inline]
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    /// Sets the path count at which parallel evaluation starts.
    ///
    /// `0` always parallelises; `usize::MAX` never does.
    #[inline]
    pub fn parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = Some(parallel_threshold);
        self
    }

    /// Sets the Asian averaging convention.
    #[inline]
    pub fn averaging(mut self, averaging: AsianAveraging) -> Self {
        self.averaging = averaging;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the chunk size is 0.
    pub fn build(self) -> Result<EngineConfig, ConfigError> {
        let config = EngineConfig {
            chunk_size: self.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE),
            parallel_threshold: self.parallel_threshold.unwrap_or(DEFAULT_PARALLEL_THRESHOLD),
            averaging: self.averaging,
        };

        config.validate()?;
        Ok(config)
    }
}
