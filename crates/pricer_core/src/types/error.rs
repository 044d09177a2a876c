//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: The error taxonomy returned by every pricing entry point
//! - `PricingResult`: Convenience alias for `Result<T, PricingError>`

use thiserror::Error;

/// Categorised pricing errors.
///
/// Every failure surfaced by the engines falls into one of three buckets.
/// None of them is retried: pricing is deterministic and a retry would
/// reproduce the same outcome.
///
/// # Variants
/// - `InvalidParameter`: Non-positive strike, expiry, spot, volatility or step
///   count, inconsistent fixings, unknown barrier/average kind. Raised before
///   any numeric work starts.
/// - `NumericalDomain`: A discretisation is internally inconsistent, e.g. a
///   lattice whose risk-neutral probability falls outside [0, 1].
/// - `ExternalReference`: The optional reference pricer failed. Only produced
///   at the cross-validation boundary.
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidParameter("strike must be positive".to_string());
/// assert_eq!(format!("{}", err), "Invalid parameter: strike must be positive");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Invalid input data or parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Discretisation violates its own consistency conditions
    #[error("Numerical domain error: {0}")]
    NumericalDomain(String),

    /// Reference pricer raised an error
    #[error("External reference error: {0}")]
    ExternalReference(String),
}

impl PricingError {
    /// Returns true for [`PricingError::InvalidParameter`].
    #[inline]
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, PricingError::InvalidParameter(_))
    }

    /// Returns true for [`PricingError::NumericalDomain`].
    #[inline]
    pub fn is_numerical_domain(&self) -> bool {
        matches!(self, PricingError::NumericalDomain(_))
    }

    /// Returns true for [`PricingError::ExternalReference`].
    #[inline]
    pub fn is_external_reference(&self) -> bool {
        matches!(self, PricingError::ExternalReference(_))
    }
}

/// Result alias used across the pricing crates.
pub type PricingResult<T> = Result<T, PricingError>;

/// Fails with [`PricingError::InvalidParameter`] unless `value` is finite and > 0.
///
/// # Examples
/// ```
/// use pricer_core::types::error::ensure_positive;
///
/// assert!(ensure_positive("strike", 100.0).is_ok());
/// assert!(ensure_positive("strike", 0.0).is_err());
/// assert!(ensure_positive("strike", f64::NAN).is_err());
/// ```
pub fn ensure_positive(name: &str, value: f64) -> PricingResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PricingError::InvalidParameter(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

/// Fails with [`PricingError::InvalidParameter`] unless `value` is finite and >= 0.
pub fn ensure_non_negative(name: &str, value: f64) -> PricingResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PricingError::InvalidParameter(format!(
            "{} must be non-negative, got {}",
            name, value
        )))
    }
}
