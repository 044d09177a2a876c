//! Discrete geometric-average Asian option pricing.
//!
//! The geometric mean of log-normal fixings is log-normal, so the option has
//! a Black-Scholes-type closed form once the mean and variance of the log
//! average are known.
//!
//! # Fixing schedule
//!
//! Of `n` fixings, `p` are already observed; their product is known. The
//! remaining `m = n - p` fixings fall at `t_i = i·Δ`, `Δ = T/m`, `i = 1..m`.
//!
//! ```text
//! ln G ~ N(μ_G, v_G)
//! μ_G = ln(P)/n + (m/n)·ln S + (r - σ²/2)·Δ·m(m+1)/(2n)
//! v_G = σ²·Δ·m(m+1)(2m+1)/(6n²)
//! ```
//!
//! With `n = 1` this is Black-Scholes; as `n → ∞` it tends to the
//! continuous Kemna-Vorst (1990) formula (σ/√3 effective volatility).

use std::fmt;
use std::str::FromStr;

use num_traits::Float;
use pricer_core::types::{OptionType, PricingError};

use super::black_scholes::BlackScholes;
use super::distributions::norm_cdf;
use super::error::AnalyticalError;

/// How fixings are averaged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AverageKind {
    /// Arithmetic mean (no closed form)
    #[default]
    Arithmetic,
    /// Geometric mean
    Geometric,
}

impl FromStr for AverageKind {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "arithmetic" | "arith" => Ok(AverageKind::Arithmetic),
            "geometric" | "geo" => Ok(AverageKind::Geometric),
            _ => Err(PricingError::InvalidParameter(format!(
                "unknown average kind '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for AverageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AverageKind::Arithmetic => f.write_str("arithmetic"),
            AverageKind::Geometric => f.write_str("geometric"),
        }
    }
}

/// Parameters for discrete geometric Asian pricing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometricAsianParams<T: Float> {
    /// Spot price (S_0)
    pub spot: T,
    /// Strike price (K)
    pub strike: T,
    /// Risk-free interest rate (r)
    pub rate: T,
    /// Volatility (σ)
    pub volatility: T,
    /// Time to expiry in years (T)
    pub expiry: T,
    /// Total number of fixings (n ≥ 1)
    pub num_fixings: usize,
    /// Fixings already observed (p ≤ n)
    pub past_fixings: usize,
    /// Product of the observed fixings; ignored when `past_fixings == 0`
    pub running_product: T,
}

impl<T: Float> GeometricAsianParams<T> {
    /// Parameters for an unseasoned contract.
    pub fn new(spot: T, strike: T, rate: T, volatility: T, expiry: T, num_fixings: usize) -> Self {
        Self {
            spot,
            strike,
            rate,
            volatility,
            expiry,
            num_fixings,
            past_fixings: 0,
            running_product: T::one(),
        }
    }

    /// Adds already-observed fixings.
    pub fn with_history(mut self, past_fixings: usize, running_product: T) -> Self {
        self.past_fixings = past_fixings;
        self.running_product = running_product;
        self
    }

    /// Fixings still to come.
    #[inline]
    pub fn remaining_fixings(&self) -> usize {
        self.num_fixings.saturating_sub(self.past_fixings)
    }

    fn validate(&self) -> Result<(), AnalyticalError> {
        let zero = T::zero();
        let f = |x: T| x.to_f64().unwrap_or(f64::NAN);

        BlackScholes::new(self.spot, self.rate, self.volatility)?;
        if !self.strike.is_finite() || self.strike <= zero {
            return Err(AnalyticalError::InvalidStrike {
                strike: f(self.strike),
            });
        }
        if !self.expiry.is_finite() || self.expiry <= zero {
            return Err(AnalyticalError::InvalidExpiry {
                expiry: f(self.expiry),
            });
        }
        if self.num_fixings == 0 {
            return Err(AnalyticalError::InvalidFixings {
                message: "num_fixings must be at least 1".to_string(),
            });
        }
        if self.past_fixings > self.num_fixings {
            return Err(AnalyticalError::InvalidFixings {
                message: format!(
                    "past_fixings {} exceeds num_fixings {}",
                    self.past_fixings, self.num_fixings
                ),
            });
        }
        if self.past_fixings > 0
            && (!self.running_product.is_finite() || self.running_product <= zero)
        {
            return Err(AnalyticalError::InvalidFixings {
                message: format!(
                    "running product of past fixings must be positive, got {}",
                    f(self.running_product)
                ),
            });
        }
        Ok(())
    }
}

/// Result from geometric Asian option pricing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometricAsianResult<T: Float> {
    /// Option price
    pub price: T,
    /// Mean of the log geometric average (μ_G)
    pub log_mean: T,
    /// Variance of the log geometric average (v_G); zero once fully fixed
    pub log_variance: T,
}

impl<T: Float> GeometricAsianResult<T> {
    /// Effective Black-Scholes volatility implied by `v_G` over the expiry.
    pub fn effective_volatility(&self, expiry: T) -> T {
        (self.log_variance / expiry).sqrt()
    }
}

/// Prices a discrete geometric-average Asian option.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
/// use pricer_models::analytical::{geometric_asian_price, GeometricAsianParams};
///
/// let params = GeometricAsianParams::new(100.0_f64, 100.0, 0.05, 0.2, 1.0, 12);
/// let result = geometric_asian_price(OptionType::Call, &params).unwrap();
/// assert!((result.price - 5.940_200_2).abs() < 1e-6);
/// ```
pub fn geometric_asian_price<T: Float>(
    option_type: OptionType,
    params: &GeometricAsianParams<T>,
) -> Result<GeometricAsianResult<T>, AnalyticalError> {
    params.validate()?;

    let zero = T::zero();
    let one = T::one();
    let two = T::from(2.0).unwrap();
    let half = T::from(0.5).unwrap();
    let six = T::from(6.0).unwrap();
    let cast = |x: usize| T::from(x).unwrap();

    let n = cast(params.num_fixings);
    let m_count = params.remaining_fixings();
    let m = cast(m_count);
    let df = (-params.rate * params.expiry).exp();

    let known = if params.past_fixings > 0 {
        params.running_product.ln() / n
    } else {
        zero
    };

    if m_count == 0 {
        let average = known.exp();
        return Ok(GeometricAsianResult {
            price: df * option_type.intrinsic(average, params.strike),
            log_mean: known,
            log_variance: zero,
        });
    }

    let sigma = params.volatility;
    let dt = params.expiry / m;
    let drift = (params.rate - half * sigma * sigma) * dt * m * (m + one) / (two * n);
    let log_mean = known + m / n * params.spot.ln() + drift;
    let log_variance = sigma * sigma * dt * m * (m + one) * (two * m + one) / (six * n * n);

    let sd = log_variance.sqrt();
    let d1 = (log_mean - params.strike.ln() + log_variance) / sd;
    let d2 = d1 - sd;
    let forward = (log_mean + half * log_variance).exp();

    let price = match option_type {
        OptionType::Call => df * (forward * norm_cdf(d1) - params.strike * norm_cdf(d2)),
        OptionType::Put => df * (params.strike * norm_cdf(-d2) - forward * norm_cdf(-d1)),
    };

    if !price.is_finite() {
        return Err(AnalyticalError::NumericalInstability {
            message: "non-finite geometric Asian value".to_string(),
        });
    }

    Ok(GeometricAsianResult {
        price,
        log_mean,
        log_variance,
    })
}

/// Risk-neutral expectation of the arithmetic mean of `m` future fixings
/// at `t_i = i·T/m`: `(1/m)·Σ S·e^{r·t_i}`.
pub fn expected_future_average<T: Float>(spot: T, rate: T, expiry: T, remaining: usize) -> T {
    if remaining == 0 {
        return T::zero();
    }
    let m = T::from(remaining).unwrap();
    let dt = expiry / m;
    let sum = (1..=remaining).fold(T::zero(), |acc, i| {
        acc + (rate * dt * T::from(i).unwrap()).exp()
    });
    spot * sum / m
}
