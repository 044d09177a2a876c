//! Market inputs for a single pricing call.
//!
//! The snapshot is a plain value supplied by an upstream market-data
//! collaborator; this layer only range-checks it.
//!
//! # Components
//!
//! - [`snapshot`]: `MarketSnapshot` (asset id, spot, rate, volatility)
//! - [`error`]: Market data error types (`MarketDataError`)
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::MarketSnapshot;
//!
//! let md = MarketSnapshot::new("SPX", 100.0, 0.05, 0.2);
//! let bumped = md.with_spot(101.0);
//! assert_eq!(bumped.spot, 101.0);
//! assert_eq!(md.spot, 100.0);
//! ```

pub mod error;
pub mod snapshot;

// Re-export commonly used types
pub use error::MarketDataError;
pub use snapshot::MarketSnapshot;
