//! # Pricer Pricing (L3: Instrument Dispatch)
//!
//! Routes option contracts to the right engine and computes their Greeks.
//!
//! This crate provides:
//! - [`instruments`]: European, American, barrier and Asian options behind
//!   one [`Instrument`](instruments::Instrument) trait
//! - [`greeks`]: Greeks result, bump sizes and the finite-difference driver
//! - [`mc`]: Seeded, batch-parallel Monte Carlo for arithmetic Asians
//! - [`rng`]: Reproducible random streams
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::market_data::MarketSnapshot;
//! use pricer_core::types::OptionType;
//! use pricer_pricing::instruments::{AmericanOption, Instrument};
//!
//! let market = MarketSnapshot::new("SPX", 100.0, 0.05, 0.2);
//! let put = AmericanOption::new(OptionType::Put, 100.0, 1.0, "SPX").unwrap();
//! let greeks = put.greeks(&market).unwrap();
//! assert!(greeks.delta < 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod greeks;
pub mod instruments;
pub mod mc;
pub mod rng;
