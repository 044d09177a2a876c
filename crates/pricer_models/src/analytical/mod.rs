//! Closed-form pricing formulas.
//!
//! This module provides:
//! - `black_scholes`: European price and analytical Greeks
//! - `merton`: Merton jump-diffusion as a truncated Poisson series
//! - `barrier`: Reiner-Rubinstein single-barrier formulas with rebate
//! - `asian`: Discrete geometric-average Asian formula with seasoned fixings
//! - `distributions`: Standard normal CDF/PDF
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`** where the formula is a pure expression
//! - **Validation up front**: inputs are checked before any numeric work and
//!   reported as [`AnalyticalError`]

pub mod asian;
pub mod barrier;
pub mod black_scholes;
pub mod distributions;
pub mod error;
pub mod merton;

// Re-export main types at module level
pub use asian::{
    expected_future_average, geometric_asian_price, AverageKind, GeometricAsianParams,
    GeometricAsianResult,
};
pub use barrier::{barrier_price, BarrierKind, BarrierParams};
pub use black_scholes::{BlackScholes, Greeks};
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
pub use merton::{JumpParams, MertonJumpDiffusion, MertonResult};
