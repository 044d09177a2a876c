//! Error types for reference pricers.
//!
//! This module provides:
//! - `ReferenceError`: Failures reported by a [`ReferencePricer`](crate::ReferencePricer)

use pricer_core::types::PricingError;
use thiserror::Error;

/// Reference pricer errors.
///
/// # Variants
/// - `Unavailable`: No reference implementation is configured
/// - `InvalidInput`: The reference rejected its inputs
/// - `Numerical`: The reference produced an inconsistent or non-finite value
///
/// All variants convert into [`PricingError::ExternalReference`].
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
/// use pricer_validation::ReferenceError;
///
/// let err: PricingError = ReferenceError::Unavailable { backend: "none" }.into();
/// assert!(err.is_external_reference());
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReferenceError {
    /// No reference implementation available.
    #[error("reference pricer '{backend}' is not available")]
    Unavailable {
        /// Name of the missing backend
        backend: &'static str,
    },

    /// Inputs rejected by the reference.
    #[error("reference rejected {field} = {value}")]
    InvalidInput {
        /// Name of the offending input
        field: &'static str,
        /// The rejected value
        value: f64,
    },

    /// Reference computation failed.
    #[error("reference computation failed: {message}")]
    Numerical {
        /// Description of the failure
        message: String,
    },
}

impl From<ReferenceError> for PricingError {
    fn from(err: ReferenceError) -> Self {
        PricingError::ExternalReference(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_display() {
        let err = ReferenceError::Unavailable { backend: "quantlib" };
        assert_eq!(
            format!("{}", err),
            "reference pricer 'quantlib' is not available"
        );
    }

    #[test]
    fn test_invalid_input_display() {
        let err = ReferenceError::InvalidInput {
            field: "volatility",
            value: -0.2,
        };
        assert_eq!(format!("{}", err), "reference rejected volatility = -0.2");
    }

    #[test]
    fn test_all_variants_map_to_external_reference() {
        let errors = [
            ReferenceError::Unavailable { backend: "none" },
            ReferenceError::InvalidInput {
                field: "spot",
                value: 0.0,
            },
            ReferenceError::Numerical {
                message: "probability 1.2".to_string(),
            },
        ];
        for err in errors {
            let msg = err.to_string();
            match PricingError::from(err) {
                PricingError::ExternalReference(inner) => assert_eq!(inner, msg),
                other => panic!("Expected ExternalReference, got {:?}", other),
            }
        }
    }
}
