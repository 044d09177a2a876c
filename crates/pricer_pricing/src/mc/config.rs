//! Monte Carlo simulation configuration.

use super::error::ConfigError;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum number of paths per batch.
pub const MAX_BATCH_SIZE: usize = 1_000_000;

/// Default number of paths.
pub const DEFAULT_PATHS: usize = 20_000;

/// Default seed.
pub const DEFAULT_SEED: u64 = 42;

/// Default number of paths per batch.
pub const DEFAULT_BATCH_SIZE: usize = 1_000;

/// Monte Carlo simulation configuration.
///
/// Immutable once built. Use [`MonteCarloConfig::builder`] to override the
/// defaults (20 000 paths, seed 42, batches of 1 000, antithetic variates
/// and the geometric control variate both on).
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(50_000)
///     .seed(7)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 50_000);
/// assert_eq!(config.seed(), 7);
/// assert!(config.antithetic());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonteCarloConfig {
    n_paths: usize,
    seed: u64,
    batch_size: usize,
    antithetic: bool,
    control_variate: bool,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            n_paths: DEFAULT_PATHS,
            seed: DEFAULT_SEED,
            batch_size: DEFAULT_BATCH_SIZE,
            antithetic: true,
            control_variate: true,
        }
    }
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Number of simulated samples (an antithetic pair counts once).
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Run seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Paths per batch.
    #[inline]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Whether each draw is paired with its mirror image.
    #[inline]
    pub fn antithetic(&self) -> bool {
        self.antithetic
    }

    /// Whether the geometric-average control variate is applied.
    #[inline]
    pub fn control_variate(&self) -> bool {
        self.control_variate
    }

    /// Number of batches needed to cover `n_paths`.
    #[inline]
    pub fn n_batches(&self) -> usize {
        self.n_paths.div_ceil(self.batch_size)
    }

    /// Same settings with a different seed.
    #[inline]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_paths` is 0 or greater than 10,000,000
    /// - `batch_size` is 0 or greater than 1,000,000
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_paths == 0 || self.n_paths > MAX_PATHS {
            return Err(ConfigError::InvalidPathCount(self.n_paths));
        }
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(ConfigError::InvalidBatchSize(self.batch_size));
        }
        Ok(())
    }
}

/// Builder for [`MonteCarloConfig`].
///
/// Unset fields keep their defaults; validation happens at build time.
#[derive(Clone, Debug, Default)]
pub struct MonteCarloConfigBuilder {
    n_paths: Option<usize>,
    seed: Option<u64>,
    batch_size: Option<usize>,
    antithetic: Option<bool>,
    control_variate: Option<bool>,
}

impl MonteCarloConfigBuilder {
    /// Sets the number of simulation paths.
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the number of paths per batch.
    #[inline]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    /// Enables or disables antithetic variates.
    #[inline]
    pub fn antithetic(mut self, enabled: bool) -> Self {
        self.antithetic = Some(enabled);
        self
    }

    /// Enables or disables the geometric control variate.
    #[inline]
    pub fn control_variate(mut self, enabled: bool) -> Self {
        self.control_variate = Some(enabled);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a count is out of range.
    pub fn build(self) -> Result<MonteCarloConfig, ConfigError> {
        let defaults = MonteCarloConfig::default();
        let config = MonteCarloConfig {
            n_paths: self.n_paths.unwrap_or(defaults.n_paths),
            seed: self.seed.unwrap_or(defaults.seed),
            batch_size: self.batch_size.unwrap_or(defaults.batch_size),
            antithetic: self.antithetic.unwrap_or(defaults.antithetic),
            control_variate: self.control_variate.unwrap_or(defaults.control_variate),
        };

        config.validate()?;
        Ok(config)
    }
}
