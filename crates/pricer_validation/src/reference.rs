//! Reference pricer capability.
//!
//! A [`ReferencePricer`] reprices a vanilla contract from raw parameters,
//! independently of the production engines. Deployments without a reference
//! use [`UnavailableReference`], which fails every request.

use pricer_models::lattice::LatticeSpec;

use crate::error::ReferenceError;

/// Independent repricing of vanilla contracts.
///
/// Implementations receive the same contract description as the lattice
/// engine ([`LatticeSpec`]) and must not call into `pricer_models` to value
/// it.
pub trait ReferencePricer {
    /// Short backend name used in reports.
    fn name(&self) -> &'static str;

    /// Black-Scholes value of a European option.
    fn black_scholes(&self, spec: &LatticeSpec) -> Result<f64, ReferenceError>;

    /// Cox-Ross-Rubinstein value of a European option.
    fn binomial_european(&self, spec: &LatticeSpec, steps: usize) -> Result<f64, ReferenceError>;

    /// Cox-Ross-Rubinstein value of an American option.
    fn binomial_american(&self, spec: &LatticeSpec, steps: usize) -> Result<f64, ReferenceError>;
}

impl<R: ReferencePricer + ?Sized> ReferencePricer for Box<R> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn black_scholes(&self, spec: &LatticeSpec) -> Result<f64, ReferenceError> {
        (**self).black_scholes(spec)
    }

    fn binomial_european(&self, spec: &LatticeSpec, steps: usize) -> Result<f64, ReferenceError> {
        (**self).binomial_european(spec, steps)
    }

    fn binomial_american(&self, spec: &LatticeSpec, steps: usize) -> Result<f64, ReferenceError> {
        (**self).binomial_american(spec, steps)
    }
}

/// Reference that is never available.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
/// use pricer_models::lattice::LatticeSpec;
/// use pricer_validation::{ReferencePricer, UnavailableReference};
///
/// let spec = LatticeSpec {
///     spot: 100.0, strike: 100.0, rate: 0.05, expiry: 1.0, volatility: 0.2,
///     option_type: OptionType::Call,
/// };
/// assert!(UnavailableReference.black_scholes(&spec).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnavailableReference;

impl UnavailableReference {
    const BACKEND: &'static str = "unavailable";

    fn unavailable() -> ReferenceError {
        ReferenceError::Unavailable {
            backend: Self::BACKEND,
        }
    }
}

impl ReferencePricer for UnavailableReference {
    fn name(&self) -> &'static str {
        Self::BACKEND
    }

    fn black_scholes(&self, _spec: &LatticeSpec) -> Result<f64, ReferenceError> {
        Err(Self::unavailable())
    }

    fn binomial_european(&self, _spec: &LatticeSpec, _steps: usize) -> Result<f64, ReferenceError> {
        Err(Self::unavailable())
    }

    fn binomial_american(&self, _spec: &LatticeSpec, _steps: usize) -> Result<f64, ReferenceError> {
        Err(Self::unavailable())
    }
}
