//! Error types for closed-form pricing.
//!
//! This module provides:
//! - `AnalyticalError`: Input and numerical failures of the analytical formulas

use pricer_core::types::PricingError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// # Variants
/// - `InvalidSpot`: Non-positive spot price
/// - `InvalidVolatility`: Non-positive volatility
/// - `InvalidStrike`: Non-positive strike
/// - `InvalidExpiry`: Non-positive time to expiry
/// - `InvalidBarrier`: Non-positive barrier level
/// - `InvalidRebate`: Negative rebate
/// - `InvalidJump`: Jump intensity or jump volatility out of range
/// - `InvalidFixings`: Inconsistent Asian fixing schedule
/// - `NumericalInstability`: Formula produced a non-finite value
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid spot price (non-positive).
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Invalid volatility (non-positive).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid strike (non-positive).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid expiry (non-positive).
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// Invalid barrier level (non-positive).
    #[error("Invalid barrier: H = {barrier}")]
    InvalidBarrier {
        /// The invalid barrier value
        barrier: f64,
    },

    /// Invalid rebate (negative).
    #[error("Invalid rebate: {rebate}")]
    InvalidRebate {
        /// The invalid rebate value
        rebate: f64,
    },

    /// Invalid jump parameter.
    #[error("Invalid jump {field}: {value}")]
    InvalidJump {
        /// Name of the offending parameter
        field: &'static str,
        /// The invalid value
        value: f64,
    },

    /// Inconsistent Asian fixing schedule.
    #[error("Invalid fixings: {message}")]
    InvalidFixings {
        /// Description of the inconsistency
        message: String,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {message}")]
    NumericalInstability {
        /// Description of the numerical issue
        message: String,
    },
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::NumericalInstability { .. } => {
                PricingError::NumericalDomain(err.to_string())
            }
            _ => PricingError::InvalidParameter(err.to_string()),
        }
    }
}
