//! Monte Carlo pricing for arithmetic-average Asian options.
//!
//! # Architecture
//!
//! ```text
//! ArithmeticAsianMc
//! ├── MonteCarloConfig  (paths, seed, batch size, variance reduction)
//! ├── PricerRng         (one stream per batch)
//! └── Orchestration
//!     ├── rayon batch map     (parallel)
//!     ├── batch-order reduce  (deterministic)
//!     └── control-variate adjustment
//! ```
//!
//! # Examples
//!
//! ```rust
//! use pricer_pricing::mc::MonteCarloConfig;
//!
//! let config = MonteCarloConfig::builder()
//!     .n_paths(10_000)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.n_batches(), 10);
//! ```

mod asian;
mod config;
mod error;

pub use asian::{ArithmeticAsianMc, AsianPathSpec, McEstimate};
pub use config::{
    MonteCarloConfig, MonteCarloConfigBuilder, DEFAULT_BATCH_SIZE, DEFAULT_PATHS, DEFAULT_SEED,
    MAX_BATCH_SIZE, MAX_PATHS,
};
pub use error::ConfigError;
