//! # Random Number Generation
//!
//! Seeded pseudo-random numbers for the Monte Carlo engine.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: every generator is built from an explicit seed
//! - **Batch independence**: [`PricerRng::for_batch`] derives one stream per
//!   path batch, so results do not depend on how batches are scheduled
//! - **Zero allocation**: buffers are filled in place via `&mut [f64]`
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::PricerRng;
//!
//! let mut rng = PricerRng::from_seed(12345);
//! let uniform_value = rng.gen_uniform();
//! assert!((0.0..1.0).contains(&uniform_value));
//!
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//! ```

mod prng;

// Public re-exports
pub use prng::PricerRng;
