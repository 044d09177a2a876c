//! Merton (1976) jump-diffusion pricing for European options.
//!
//! Log-normal jumps arrive as a Poisson process with intensity λ; each jump
//! multiplies the spot by `exp(J)`, `J ~ N(μ_J, δ²)`. Conditioning on the
//! number of jumps gives a Poisson-weighted series of Black-Scholes prices:
//!
//! ```text
//! V = Σ_n  e^{-λ'T} (λ'T)^n / n!  ·  BS(S, K, r_n, σ_n, T)
//!
//! k   = exp(μ_J + δ²/2) - 1
//! λ'  = λ(1 + k)
//! σ_n = sqrt(σ² + n·δ²/T)
//! r_n = r - λk + n·ln(1 + k)/T
//! ```

use pricer_core::types::OptionType;

use super::black_scholes::BlackScholes;
use super::error::AnalyticalError;

/// Hard cap on series terms.
pub const MAX_TERMS: usize = 200;

/// Terms past the Poisson mode with weight below this are dropped.
pub const WEIGHT_CUTOFF: f64 = 1e-12;

/// Compound-Poisson jump parameters.
///
/// # Examples
/// ```
/// use pricer_models::analytical::JumpParams;
///
/// let jumps = JumpParams::new(0.5, -0.1, 0.15);
/// assert!(jumps.validate().is_ok());
/// assert!(JumpParams::none().is_trivial());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JumpParams {
    /// Expected jumps per year (λ ≥ 0)
    pub intensity: f64,
    /// Mean of the log jump size (μ_J)
    pub mean: f64,
    /// Standard deviation of the log jump size (δ ≥ 0)
    pub volatility: f64,
}

impl Default for JumpParams {
    fn default() -> Self {
        Self::none()
    }
}

impl JumpParams {
    /// Creates jump parameters.
    pub fn new(intensity: f64, mean: f64, volatility: f64) -> Self {
        Self {
            intensity,
            mean,
            volatility,
        }
    }

    /// No jumps: the model collapses to Black-Scholes.
    pub fn none() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// True when no jumps can occur.
    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.intensity == 0.0
    }

    /// Expected relative jump size `k = E[e^J] - 1`.
    #[inline]
    pub fn mean_jump(&self) -> f64 {
        (self.mean + 0.5 * self.volatility * self.volatility).exp() - 1.0
    }

    /// Checks intensity ≥ 0, volatility ≥ 0 and a finite mean.
    pub fn validate(&self) -> Result<(), AnalyticalError> {
        if !self.intensity.is_finite() || self.intensity < 0.0 {
            return Err(AnalyticalError::InvalidJump {
                field: "intensity",
                value: self.intensity,
            });
        }
        if !self.mean.is_finite() {
            return Err(AnalyticalError::InvalidJump {
                field: "mean",
                value: self.mean,
            });
        }
        if !self.volatility.is_finite() || self.volatility < 0.0 {
            return Err(AnalyticalError::InvalidJump {
                field: "volatility",
                value: self.volatility,
            });
        }
        Ok(())
    }
}

/// Series value together with how many terms were summed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MertonResult {
    /// Option value
    pub price: f64,
    /// Number of Poisson terms included
    pub terms: usize,
}

/// Merton jump-diffusion model.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
/// use pricer_models::analytical::{JumpParams, MertonJumpDiffusion};
///
/// let model = MertonJumpDiffusion::new(100.0, 0.05, 0.2, JumpParams::new(1.0, -0.1, 0.15)).unwrap();
/// let price = model.price(OptionType::Call, 100.0, 1.0).unwrap();
/// assert!((price - 12.761_288_6).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MertonJumpDiffusion {
    spot: f64,
    rate: f64,
    volatility: f64,
    jump: JumpParams,
}

impl MertonJumpDiffusion {
    /// Creates the model after validating diffusion and jump parameters.
    pub fn new(
        spot: f64,
        rate: f64,
        volatility: f64,
        jump: JumpParams,
    ) -> Result<Self, AnalyticalError> {
        BlackScholes::new(spot, rate, volatility)?;
        jump.validate()?;
        Ok(Self {
            spot,
            rate,
            volatility,
            jump,
        })
    }

    /// Returns the jump parameters.
    #[inline]
    pub fn jump(&self) -> &JumpParams {
        &self.jump
    }

    /// European option value.
    pub fn price(
        &self,
        option_type: OptionType,
        strike: f64,
        expiry: f64,
    ) -> Result<f64, AnalyticalError> {
        Ok(self.price_with_details(option_type, strike, expiry)?.price)
    }

    /// European option value and the number of series terms used.
    ///
    /// Summation stops once past the Poisson mode with a term weight below
    /// [`WEIGHT_CUTOFF`], or after [`MAX_TERMS`] terms.
    ///
    /// # Errors
    /// - `InvalidStrike` / `InvalidExpiry` for non-positive inputs
    /// - `NumericalInstability` if the series sums to a non-finite value
    pub fn price_with_details(
        &self,
        option_type: OptionType,
        strike: f64,
        expiry: f64,
    ) -> Result<MertonResult, AnalyticalError> {
        if !strike.is_finite() || strike <= 0.0 {
            return Err(AnalyticalError::InvalidStrike { strike });
        }
        if !expiry.is_finite() || expiry <= 0.0 {
            return Err(AnalyticalError::InvalidExpiry { expiry });
        }

        if self.jump.is_trivial() {
            let bs = BlackScholes::new(self.spot, self.rate, self.volatility)?;
            return Ok(MertonResult {
                price: bs.price(option_type, strike, expiry),
                terms: 1,
            });
        }

        let k = self.jump.mean_jump();
        let lambda_t = self.jump.intensity * (1.0 + k) * expiry;
        let log_lambda_t = lambda_t.ln();
        let mode = lambda_t.floor() as usize;
        let log_growth = (1.0 + k).ln();
        let jump_var = self.jump.volatility * self.jump.volatility;
        let base_var = self.volatility * self.volatility;

        let mut price = 0.0;
        let mut log_factorial = 0.0;
        let mut terms = 0;

        for n in 0..MAX_TERMS {
            if n > 0 {
                log_factorial += (n as f64).ln();
            }
            let weight = (-lambda_t + n as f64 * log_lambda_t - log_factorial).exp();

            let n_f = n as f64;
            let sigma_n = (base_var + n_f * jump_var / expiry).sqrt();
            let rate_n = self.rate - self.jump.intensity * k + n_f * log_growth / expiry;
            let bs = BlackScholes::new(self.spot, rate_n, sigma_n)?;

            price += weight * bs.price(option_type, strike, expiry);
            terms = n + 1;

            if n >= mode && weight < WEIGHT_CUTOFF {
                break;
            }
        }

        if !price.is_finite() {
            return Err(AnalyticalError::NumericalInstability {
                message: format!("Merton series diverged after {} terms", terms),
            });
        }

        Ok(MertonResult { price, terms })
    }
}
