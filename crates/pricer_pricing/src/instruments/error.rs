//! Instrument error types.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Instrument construction and parameter errors.
///
/// # Variants
/// - `InvalidStrike`: Strike price is non-positive
/// - `InvalidExpiry`: Expiry time is non-positive
/// - `InvalidBarrier`: Barrier level is non-positive
/// - `InvalidRebate`: Rebate is negative
/// - `InvalidSteps`: Lattice step count below one
/// - `InvalidFixings`: Inconsistent Asian fixing history
///
/// # Examples
/// ```
/// use pricer_pricing::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: -100.0 };
/// assert!(format!("{}", err).contains("-100"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Invalid strike price (non-positive).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid expiry time (non-positive).
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

    /// Lattice step count below one.
    #[error("Invalid binomial steps: N = {steps}")]
    InvalidSteps {
        /// The invalid step count
        steps: usize,
    },

    /// Inconsistent Asian fixing history.
    #[error("Invalid fixings: {message}")]
    InvalidFixings {
        /// Description of the inconsistency
        message: String,
    },
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        PricingError::InvalidParameter(err.to_string())
    }
}

/// Checks `strike > 0` and `expiry > 0`, both finite.
pub(crate) fn check_contract(strike: f64, expiry: f64) -> Result<(), InstrumentError> {
    if !strike.is_finite() || strike <= 0.0 {
        return Err(InstrumentError::InvalidStrike { strike });
    }
    if !expiry.is_finite() || expiry <= 0.0 {
        return Err(InstrumentError::InvalidExpiry { expiry });
    }
    Ok(())
}
