//! Greeks calculation result type.
//!
//! Provides [`GreeksResult<T>`], the five first- and second-order
//! sensitivities reported by every instrument.

use num_traits::Float;

/// Option sensitivities.
///
/// # Greeks
///
/// - `delta`: ∂V/∂S
/// - `gamma`: ∂²V/∂S²
/// - `vega`: ∂V/∂σ
/// - `theta`: value change per year of elapsed time (decay is negative)
/// - `rho`: ∂V/∂r
///
/// The five values are computed independently; the only shared invariant is
/// that each is finite.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::greeks::GreeksResult;
///
/// let greeks = GreeksResult::new(0.64, 0.019, 37.5, -6.4, 53.2);
/// assert!(greeks.is_finite());
/// assert!(!GreeksResult::new(f64::NAN, 0.0, 0.0, 0.0, 0.0).is_finite());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GreeksResult<T: Float> {
    /// Delta: ∂V/∂S (sensitivity to spot price).
    pub delta: T,
    /// Gamma: ∂²V/∂S² (convexity with respect to spot).
    pub gamma: T,
    /// Vega: ∂V/∂σ (sensitivity to volatility).
    pub vega: T,
    /// Theta: time decay per year.
    pub theta: T,
    /// Rho: ∂V/∂r (sensitivity to interest rate).
    pub rho: T,
}

impl<T: Float> Default for GreeksResult<T> {
    fn default() -> Self {
        Self::new(T::zero(), T::zero(), T::zero(), T::zero(), T::zero())
    }
}

impl<T: Float> GreeksResult<T> {
    /// Creates a result from the five sensitivities.
    #[inline]
    pub fn new(delta: T, gamma: T, vega: T, theta: T, rho: T) -> Self {
        Self {
            delta,
            gamma,
            vega,
            theta,
            rho,
        }
    }

    /// Returns true if every sensitivity is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.delta.is_finite()
            && self.gamma.is_finite()
            && self.vega.is_finite()
            && self.theta.is_finite()
            && self.rho.is_finite()
    }

    /// Sensitivities as `(name, value)` pairs in reporting order.
    pub fn entries(&self) -> [(&'static str, T); 5] {
        [
            ("delta", self.delta),
            ("gamma", self.gamma),
            ("vega", self.vega),
            ("theta", self.theta),
            ("rho", self.rho),
        ]
    }
}

impl<T: Float> From<pricer_models::analytical::Greeks<T>> for GreeksResult<T> {
    fn from(greeks: pricer_models::analytical::Greeks<T>) -> Self {
        Self::new(greeks.delta, greeks.gamma, greeks.vega, greeks.theta, greeks.rho)
    }
}
