//! # Pricer Validation (Reference Boundary)
//!
//! Cross-checks prices produced by the pricing crates against an independent
//! reference implementation.
//!
//! This crate provides:
//! - [`reference`]: The [`ReferencePricer`] capability and the
//!   [`UnavailableReference`] placeholder
//! - [`statrs_reference`]: [`StatrsReference`], written separately from the
//!   production engines on top of `statrs`
//! - [`validator`]: [`CrossValidator`] and [`ValidationResult`]
//! - [`error`]: [`ReferenceError`]
//!
//! Nothing in the pricing crates depends on this one. Reference failures
//! are reported inside the [`ValidationResult`] and never propagated.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::types::OptionType;
//! use pricer_models::lattice::LatticeSpec;
//! use pricer_validation::{CrossValidator, StatrsReference, BINOMIAL_TOLERANCE};
//!
//! let spec = LatticeSpec {
//!     spot: 100.0,
//!     strike: 100.0,
//!     rate: 0.05,
//!     expiry: 1.0,
//!     volatility: 0.2,
//!     option_type: OptionType::Put,
//! };
//! let validator = CrossValidator::new(StatrsReference::new());
//! let result = validator.validate_lattice_american(&spec, 200, BINOMIAL_TOLERANCE);
//! assert!(result.within_tolerance, "{}", result.message);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod reference;
pub mod statrs_reference;
pub mod validator;

// Re-export commonly used types at crate level
pub use error::ReferenceError;
pub use reference::{ReferencePricer, UnavailableReference};
pub use statrs_reference::StatrsReference;
pub use validator::{
    CrossValidator, ValidationResult, BINOMIAL_TOLERANCE, BLACK_SCHOLES_TOLERANCE,
};
