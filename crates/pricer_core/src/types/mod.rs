//! Core option and error types.
//!
//! This module provides:
//! - `error`: Structured error taxonomy for pricing operations
//! - `option`: Option payoff direction and pricing model selection
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`PricingError`], [`PricingResult`] from `error`
//! - [`OptionType`], [`PricingModel`] from `option`

pub mod error;
pub mod option;

// Re-export commonly used types at module level
pub use error::{ensure_non_negative, ensure_positive, PricingError, PricingResult};
pub use option::{OptionType, PricingModel};
