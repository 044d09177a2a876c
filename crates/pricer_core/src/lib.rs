//! # pricer_core: Foundation Types for Option Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the pricing workspace, providing:
//! - Error taxonomy shared by every engine: `PricingError` (`types::error`)
//! - Option vocabulary: `OptionType`, `PricingModel` (`types::option`)
//! - Market inputs: `MarketSnapshot` (`market_data`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Derive macros for error types
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::MarketSnapshot;
//! use pricer_core::types::{OptionType, PricingError};
//!
//! let md = MarketSnapshot::new("AAPL", 100.0, 0.05, 0.2);
//! assert!(md.validate().is_ok());
//!
//! let bad = MarketSnapshot::new("AAPL", -1.0, 0.05, 0.2);
//! assert!(matches!(bad.validate(), Err(PricingError::InvalidParameter(_))));
//!
//! assert_eq!(OptionType::Call.intrinsic(110.0, 100.0), 10.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for MarketSnapshot, OptionType, PricingModel

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod types;
