//! Error types for lattice pricing.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Binomial lattice errors.
///
/// # Variants
/// - `InvalidSteps`: Fewer than one time step
/// - `NonPositive`: Spot, strike, volatility or expiry is not strictly positive
/// - `NonFinite`: Rate is NaN or infinite
/// - `ProbabilityOutOfRange`: The CRR risk-neutral probability left [0, 1]
///
/// # Examples
/// ```
/// use pricer_models::lattice::LatticeError;
///
/// let err = LatticeError::InvalidSteps { steps: 0 };
/// assert!(format!("{}", err).contains("N = 0"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LatticeError {
    /// Step count below one.
    #[error("Invalid step count: N = {steps} (must be at least 1)")]
    InvalidSteps {
        /// The invalid step count
        steps: usize,
    },

    /// Input that must be strictly positive.
    #[error("Invalid {field}: {value} (must be positive)")]
    NonPositive {
        /// Name of the offending input
        field: &'static str,
        /// The invalid value
        value: f64,
    },

    /// Input that must be finite.
    #[error("Invalid {field}: {value} (must be finite)")]
    NonFinite {
        /// Name of the offending input
        field: &'static str,
        /// The invalid value
        value: f64,
    },

    /// Discretisation admits arbitrage.
    #[error(
        "Risk-neutral probability p = {probability} outside [0, 1] (u = {up}, d = {down}, growth = {growth})"
    )]
    ProbabilityOutOfRange {
        /// Computed probability
        probability: f64,
        /// Up factor
        up: f64,
        /// Down factor
        down: f64,
        /// One-step growth factor exp(r·dt)
        growth: f64,
    },
}

impl From<LatticeError> for PricingError {
    fn from(err: LatticeError) -> Self {
        match err {
            LatticeError::ProbabilityOutOfRange { .. } => {
                PricingError::NumericalDomain(err.to_string())
            }
            _ => PricingError::InvalidParameter(err.to_string()),
        }
    }
}
