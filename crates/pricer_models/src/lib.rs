//! # Pricer Models (L2: Pricing Engines)
//!
//! Closed-form formulas and the binomial lattice engine.
//!
//! This crate provides:
//! - Black-Scholes price and analytical Greeks
//! - Merton jump-diffusion series pricing
//! - Reiner-Rubinstein single-barrier formulas
//! - Discrete geometric-average Asian formula
//! - Cox-Ross-Rubinstein lattice for European and American exercise
//!
//! ## Design Principles
//!
//! - **Pure functions**: every engine call is independent and allocation-local
//! - **Validate before computing**: bad inputs never reach the numerics
//! - **Layer errors** convert into [`pricer_core::types::PricingError`]
//!
//! ## Example
//!
//! ```
//! use pricer_core::types::OptionType;
//! use pricer_models::analytical::BlackScholes;
//! use pricer_models::lattice::european_price;
//!
//! let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
//! let analytic = bs.price(OptionType::Call, 100.0, 1.0);
//! let lattice = european_price(100.0, 100.0, 0.05, 1.0, 0.2, OptionType::Call, 2000).unwrap();
//! assert!((analytic - lattice).abs() < 2e-3);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod lattice;
