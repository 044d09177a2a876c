//! Comparison of internal prices with a reference.
//!
//! - `ValidationResult`: Outcome of one comparison, including a one-line report
//! - `CrossValidator`: Runs comparisons against a [`ReferencePricer`]
//!
//! Relative difference is `|internal − reference| / |reference|`. A zero
//! reference gives `0` when both prices agree exactly and `1` otherwise.

use std::fmt;

use pricer_core::types::PricingError;
use pricer_models::analytical::BlackScholes;
use pricer_models::lattice::{BinomialLattice, LatticeSpec};
use tracing::{debug, warn};

use crate::error::ReferenceError;
use crate::reference::ReferencePricer;

/// Default relative tolerance for closed-form comparisons.
pub const BLACK_SCHOLES_TOLERANCE: f64 = 1e-6;

/// Default relative tolerance for lattice comparisons.
pub const BINOMIAL_TOLERANCE: f64 = 1e-4;

/// Outcome of a single cross-validation.
///
/// Failures of either side never escape as errors: they produce a result
/// with `within_tolerance == false` and a `"Validation error: …"` message.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationResult {
    /// Price produced by the pricing crates
    pub internal_price: f64,
    /// Price produced by the reference (zero when it failed)
    pub reference_price: f64,
    /// `|internal − reference|`
    pub absolute_diff: f64,
    /// `absolute_diff / |reference|`, with the zero-reference fallback
    pub relative_diff: f64,
    /// `relative_diff <= tolerance`
    pub within_tolerance: bool,
    /// Human-readable report
    pub message: String,
}

impl ValidationResult {
    /// Compares two prices.
    ///
    /// # Examples
    /// ```
    /// use pricer_validation::ValidationResult;
    ///
    /// let result = ValidationResult::compare(10.0, 10.0005, 1e-4);
    /// assert!(result.within_tolerance);
    /// assert!(result.message.ends_with("[PASS]"));
    /// ```
    pub fn compare(internal_price: f64, reference_price: f64, tolerance: f64) -> Self {
        let absolute_diff = (internal_price - reference_price).abs();
        let relative_diff = if reference_price != 0.0 {
            absolute_diff / reference_price.abs()
        } else if absolute_diff == 0.0 {
            0.0
        } else {
            1.0
        };
        let within_tolerance = relative_diff <= tolerance;

        let mut message = format!(
            "Internal: {:.8}, Reference: {:.8}, Relative Diff: {:.8}%",
            internal_price,
            reference_price,
            relative_diff * 100.0
        );
        if within_tolerance {
            message.push_str(" [PASS]");
        } else {
            message.push_str(&format!(
                " [FAIL - exceeds tolerance {:.8}%]",
                tolerance * 100.0
            ));
        }

        Self {
            internal_price,
            reference_price,
            absolute_diff,
            relative_diff,
            within_tolerance,
            message,
        }
    }

    /// Result for a comparison that could not be carried out.
    pub fn error(internal_price: f64, reason: impl fmt::Display) -> Self {
        Self {
            internal_price,
            reference_price: 0.0,
            absolute_diff: 0.0,
            relative_diff: 0.0,
            within_tolerance: false,
            message: format!("Validation error: {}", reason),
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Cross-validates internal prices against a reference pricer.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
/// use pricer_models::lattice::LatticeSpec;
/// use pricer_validation::{CrossValidator, UnavailableReference};
///
/// let spec = LatticeSpec {
///     spot: 100.0, strike: 100.0, rate: 0.05, expiry: 1.0, volatility: 0.2,
///     option_type: OptionType::Call,
/// };
/// let result = CrossValidator::new(UnavailableReference).validate_black_scholes(10.45, &spec, 1e-6);
/// assert!(!result.within_tolerance);
/// assert!(result.message.starts_with("Validation error:"));
/// ```
#[derive(Debug, Clone)]
pub struct CrossValidator<R> {
    reference: R,
}

impl<R: ReferencePricer> CrossValidator<R> {
    /// Creates a validator around `reference`.
    pub fn new(reference: R) -> Self {
        Self { reference }
    }

    /// Returns the reference pricer.
    #[inline]
    pub fn reference(&self) -> &R {
        &self.reference
    }

    /// Compares `internal_price` with the reference Black-Scholes value.
    pub fn validate_black_scholes(
        &self,
        internal_price: f64,
        spec: &LatticeSpec,
        tolerance: f64,
    ) -> ValidationResult {
        self.finish(
            "black_scholes",
            internal_price,
            self.reference.black_scholes(spec),
            tolerance,
        )
    }

    /// Compares `internal_price` with the reference European lattice.
    pub fn validate_binomial_european(
        &self,
        internal_price: f64,
        spec: &LatticeSpec,
        steps: usize,
        tolerance: f64,
    ) -> ValidationResult {
        self.finish(
            "binomial_european",
            internal_price,
            self.reference.binomial_european(spec, steps),
            tolerance,
        )
    }

    /// Compares `internal_price` with the reference American lattice.
    pub fn validate_binomial_american(
        &self,
        internal_price: f64,
        spec: &LatticeSpec,
        steps: usize,
        tolerance: f64,
    ) -> ValidationResult {
        self.finish(
            "binomial_american",
            internal_price,
            self.reference.binomial_american(spec, steps),
            tolerance,
        )
    }

    /// Prices `spec` in closed form, then validates it.
    pub fn validate_closed_form(&self, spec: &LatticeSpec, tolerance: f64) -> ValidationResult {
        let internal = BlackScholes::new(spec.spot, spec.rate, spec.volatility)
            .map_err(PricingError::from)
            .and_then(|bs| {
                if spec.strike > 0.0 && spec.expiry > 0.0 {
                    Ok(bs.price(spec.option_type, spec.strike, spec.expiry))
                } else {
                    Err(PricingError::InvalidParameter(format!(
                        "strike {} and expiry {} must be positive",
                        spec.strike, spec.expiry
                    )))
                }
            });
        match internal {
            Ok(price) => self.validate_black_scholes(price, spec, tolerance),
            Err(err) => self.internal_failure("black_scholes", err),
        }
    }

    /// Prices `spec` on the European lattice, then validates it.
    pub fn validate_lattice_european(
        &self,
        spec: &LatticeSpec,
        steps: usize,
        tolerance: f64,
    ) -> ValidationResult {
        match BinomialLattice::european(steps).price(spec) {
            Ok(price) => self.validate_binomial_european(price, spec, steps, tolerance),
            Err(err) => self.internal_failure("binomial_european", err.into()),
        }
    }

    /// Prices `spec` on the American lattice, then validates it.
    pub fn validate_lattice_american(
        &self,
        spec: &LatticeSpec,
        steps: usize,
        tolerance: f64,
    ) -> ValidationResult {
        match BinomialLattice::american(steps).price(spec) {
            Ok(price) => self.validate_binomial_american(price, spec, steps, tolerance),
            Err(err) => self.internal_failure("binomial_american", err.into()),
        }
    }

    fn finish(
        &self,
        method: &'static str,
        internal_price: f64,
        reference: Result<f64, ReferenceError>,
        tolerance: f64,
    ) -> ValidationResult {
        debug!(backend = self.reference.name(), method, internal_price, "cross-validating");
        let result = match reference {
            Ok(reference_price) => {
                ValidationResult::compare(internal_price, reference_price, tolerance)
            }
            Err(err) => ValidationResult::error(internal_price, PricingError::from(err)),
        };
        if !result.within_tolerance {
            warn!(backend = self.reference.name(), method, "{}", result.message);
        }
        result
    }

    fn internal_failure(&self, method: &'static str, err: PricingError) -> ValidationResult {
        let result = ValidationResult::error(f64::NAN, err);
        warn!(backend = self.reference.name(), method, "{}", result.message);
        result
    }
}
