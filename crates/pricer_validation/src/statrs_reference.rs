//! Reference pricer built on `statrs`.
//!
//! Shares no code with `pricer_models`: the normal CDF comes from `statrs`
//! and the lattice keeps the full `(steps + 1) × (steps + 1)` stock and value
//! arrays rather than a rolling buffer.

use pricer_core::types::OptionType;
use pricer_models::lattice::LatticeSpec;
use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::ReferenceError;
use crate::reference::ReferencePricer;

/// Independent Black-Scholes and CRR reference.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
/// use pricer_models::lattice::LatticeSpec;
/// use pricer_validation::{ReferencePricer, StatrsReference};
///
/// let spec = LatticeSpec {
///     spot: 100.0, strike: 100.0, rate: 0.05, expiry: 1.0, volatility: 0.2,
///     option_type: OptionType::Call,
/// };
/// let price = StatrsReference::new().black_scholes(&spec).unwrap();
/// assert!((price - 10.450_583_572).abs() < 1e-8);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StatrsReference {
    normal: Normal,
}

impl Default for StatrsReference {
    fn default() -> Self {
        Self::new()
    }
}

impl StatrsReference {
    const BACKEND: &'static str = "statrs";

    /// Creates the reference with a standard normal distribution.
    pub fn new() -> Self {
        Self {
            normal: Normal::standard(),
        }
    }

    fn check_inputs(spec: &LatticeSpec) -> Result<(), ReferenceError> {
        let positive = [
            ("spot", spec.spot),
            ("strike", spec.strike),
            ("expiry", spec.expiry),
            ("volatility", spec.volatility),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ReferenceError::InvalidInput { field, value });
            }
        }
        if !spec.rate.is_finite() {
            return Err(ReferenceError::InvalidInput {
                field: "rate",
                value: spec.rate,
            });
        }
        Ok(())
    }

    fn crr(&self, spec: &LatticeSpec, steps: usize, american: bool) -> Result<f64, ReferenceError> {
        Self::check_inputs(spec)?;
        if steps == 0 {
            return Err(ReferenceError::InvalidInput {
                field: "steps",
                value: 0.0,
            });
        }

        let dt = spec.expiry / steps as f64;
        let u = (spec.volatility * dt.sqrt()).exp();
        let d = 1.0 / u;
        let p = ((spec.rate * dt).exp() - d) / (u - d);
        if !(0.0..=1.0).contains(&p) {
            return Err(ReferenceError::Numerical {
                message: format!("risk-neutral probability {} outside [0, 1]", p),
            });
        }
        let df = (-spec.rate * dt).exp();

        let mut stock = vec![vec![0.0; steps + 1]; steps + 1];
        for (i, row) in stock.iter_mut().enumerate() {
            for (j, s) in row.iter_mut().take(i + 1).enumerate() {
                *s = spec.spot * u.powi(j as i32) * d.powi((i - j) as i32);
            }
        }

        let payoff = |s: f64| match spec.option_type {
            OptionType::Call => (s - spec.strike).max(0.0),
            OptionType::Put => (spec.strike - s).max(0.0),
        };

        let mut value = vec![vec![0.0; steps + 1]; steps + 1];
        for (v, &s) in value[steps].iter_mut().zip(&stock[steps]) {
            *v = payoff(s);
        }
        for i in (0..steps).rev() {
            for j in 0..=i {
                let hold = df * (p * value[i + 1][j + 1] + (1.0 - p) * value[i + 1][j]);
                value[i][j] = if american {
                    hold.max(payoff(stock[i][j]))
                } else {
                    hold
                };
            }
        }

        Ok(value[0][0])
    }
}

impl ReferencePricer for StatrsReference {
    fn name(&self) -> &'static str {
        Self::BACKEND
    }

    fn black_scholes(&self, spec: &LatticeSpec) -> Result<f64, ReferenceError> {
        Self::check_inputs(spec)?;
        let sd = spec.volatility * spec.expiry.sqrt();
        let d1 = ((spec.spot / spec.strike).ln()
            + (spec.rate + 0.5 * spec.volatility * spec.volatility) * spec.expiry)
            / sd;
        let d2 = d1 - sd;
        let df = (-spec.rate * spec.expiry).exp();

        let price = match spec.option_type {
            OptionType::Call => {
                spec.spot * self.normal.cdf(d1) - spec.strike * df * self.normal.cdf(d2)
            }
            OptionType::Put => {
                spec.strike * df * self.normal.cdf(-d2) - spec.spot * self.normal.cdf(-d1)
            }
        };

        if !price.is_finite() {
            return Err(ReferenceError::Numerical {
                message: "non-finite Black-Scholes value".to_string(),
            });
        }
        Ok(price)
    }

    fn binomial_european(&self, spec: &LatticeSpec, steps: usize) -> Result<f64, ReferenceError> {
        self.crr(spec, steps, false)
    }

    fn binomial_american(&self, spec: &LatticeSpec, steps: usize) -> Result<f64, ReferenceError> {
        self.crr(spec, steps, true)
    }
}
