//! Monte Carlo pricing of discrete arithmetic-average Asian options.
//!
//! The `m` outstanding fixings fall at `t_i = i·T/m`. Observed fixings fold
//! into an effective strike on the future average:
//!
//! ```text
//! (A_k + Σ S_ti)/n - K = (m/n)·(Ā_future - K*),   K* = (n·K - A_k)/m
//! ```
//!
//! Variance reduction:
//! - antithetic pairs `(Z, -Z)` averaged into one sample
//! - the discrete geometric average on the same path as a control variate,
//!   with its closed-form value as the known mean and β estimated from the
//!   run
//!
//! Paths are simulated in fixed-size batches, each with its own
//! [`PricerRng::for_batch`] stream. Batch moments are collected in batch
//! order, so the estimate is identical for any rayon thread count.

use pricer_core::types::{ensure_non_negative, ensure_positive, OptionType, PricingError, PricingResult};
use pricer_models::analytical::{expected_future_average, geometric_asian_price, GeometricAsianParams};
use rayon::prelude::*;
use tracing::debug;

use super::config::MonteCarloConfig;
use crate::rng::PricerRng;

/// Contract and market inputs for one arithmetic Asian simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AsianPathSpec {
    /// Spot price
    pub spot: f64,
    /// Strike on the full average
    pub strike: f64,
    /// Risk-free rate
    pub rate: f64,
    /// Volatility
    pub volatility: f64,
    /// Time to expiry in years
    pub expiry: f64,
    /// Payoff direction
    pub option_type: OptionType,
    /// Total number of fixings (n ≥ 1)
    pub num_fixings: usize,
    /// Fixings already observed (k ≤ n)
    pub past_fixings: usize,
    /// Sum of the observed fixings (A_k ≥ 0)
    pub running_sum: f64,
}

impl AsianPathSpec {
    fn validate(&self) -> PricingResult<()> {
        ensure_positive("spot", self.spot)?;
        ensure_positive("strike", self.strike)?;
        ensure_positive("volatility", self.volatility)?;
        ensure_positive("expiry", self.expiry)?;
        ensure_non_negative("running_sum", self.running_sum)?;
        if !self.rate.is_finite() {
            return Err(PricingError::InvalidParameter(format!(
                "rate must be finite, got {}",
                self.rate
            )));
        }
        if self.num_fixings == 0 {
            return Err(PricingError::InvalidParameter(
                "num_fixings must be at least 1".to_string(),
            ));
        }
        if self.past_fixings > self.num_fixings {
            return Err(PricingError::InvalidParameter(format!(
                "past_fixings {} exceeds num_fixings {}",
                self.past_fixings, self.num_fixings
            )));
        }
        Ok(())
    }
}

/// Monte Carlo price estimate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct McEstimate {
    /// Present value
    pub price: f64,
    /// Standard error of the price (zero when the value is deterministic)
    pub std_error: f64,
    /// Raw simulated value of the geometric-average control
    pub control_estimate: f64,
    /// Number of samples drawn
    pub n_samples: usize,
}

impl McEstimate {
    fn exact(price: f64) -> Self {
        Self {
            price,
            std_error: 0.0,
            control_estimate: price,
            n_samples: 0,
        }
    }

    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }
}

/// Arithmetic-average Asian Monte Carlo engine.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::OptionType;
/// use pricer_pricing::mc::{ArithmeticAsianMc, AsianPathSpec, MonteCarloConfig};
///
/// let engine = ArithmeticAsianMc::new(MonteCarloConfig::default());
/// let spec = AsianPathSpec {
///     spot: 100.0, strike: 100.0, rate: 0.05, volatility: 0.2, expiry: 1.0,
///     option_type: OptionType::Call, num_fixings: 12, past_fixings: 0, running_sum: 0.0,
/// };
/// let estimate = engine.price(&spec).unwrap();
/// assert!((estimate.price - 6.157).abs() < 0.03);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ArithmeticAsianMc {
    config: MonteCarloConfig,
}

impl ArithmeticAsianMc {
    /// Creates an engine with the given configuration.
    pub fn new(config: MonteCarloConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Prices the option.
    ///
    /// Fully fixed contracts return the discounted known payoff. When the
    /// effective strike is not positive the call is a forward on the average
    /// and the put is worthless; neither case draws any paths.
    pub fn price(&self, spec: &AsianPathSpec) -> PricingResult<McEstimate> {
        spec.validate()?;
        self.config.validate()?;

        let n = spec.num_fixings as f64;
        let remaining = spec.num_fixings - spec.past_fixings;
        let discount = (-spec.rate * spec.expiry).exp();

        if remaining == 0 {
            let average = spec.running_sum / n;
            return Ok(McEstimate::exact(
                discount * spec.option_type.intrinsic(average, spec.strike),
            ));
        }

        let m = remaining as f64;
        let weight = m / n;
        let effective_strike = (n * spec.strike - spec.running_sum) / m;

        if effective_strike <= 0.0 {
            let price = match spec.option_type {
                OptionType::Call => {
                    let forward =
                        expected_future_average(spec.spot, spec.rate, spec.expiry, remaining);
                    discount * weight * (forward - effective_strike)
                }
                OptionType::Put => 0.0,
            };
            return Ok(McEstimate::exact(price));
        }

        let control_target = if self.config.control_variate() {
            let params = GeometricAsianParams::new(
                spec.spot,
                effective_strike,
                spec.rate,
                spec.volatility,
                spec.expiry,
                remaining,
            );
            Some(geometric_asian_price(spec.option_type, &params)?.price)
        } else {
            None
        };

        let dt = spec.expiry / m;
        let setup = PathSetup {
            log_spot: spec.spot.ln(),
            drift: (spec.rate - 0.5 * spec.volatility * spec.volatility) * dt,
            diffusion: spec.volatility * dt.sqrt(),
            strike: effective_strike,
            option_type: spec.option_type,
            discount,
            fixings: remaining,
        };

        let n_paths = self.config.n_paths();
        let batch_size = self.config.batch_size();
        debug!(
            n_paths,
            seed = self.config.seed(),
            batches = self.config.n_batches(),
            fixings = remaining,
            "arithmetic Asian Monte Carlo"
        );

        let batches: Vec<BatchMoments> = (0..self.config.n_batches())
            .into_par_iter()
            .map(|batch| {
                let len = batch_size.min(n_paths - batch * batch_size);
                self.simulate_batch(&setup, batch, len)
            })
            .collect();
        let total = batches
            .iter()
            .fold(BatchMoments::default(), |acc, moments| acc.merge(moments));

        let (estimate, variance) = total.estimate(control_target);
        let count = total.count as f64;
        let std_error = (variance / (count - 1.0).max(1.0)).sqrt();

        Ok(McEstimate {
            price: weight * estimate,
            std_error: weight * std_error,
            control_estimate: weight * total.sum_y / count,
            n_samples: total.count,
        })
    }

    fn simulate_batch(&self, setup: &PathSetup, batch: usize, len: usize) -> BatchMoments {
        let mut rng = PricerRng::for_batch(self.config.seed(), batch);
        let mut normals = vec![0.0; setup.fixings];
        let mut moments = BatchMoments::default();

        for _ in 0..len {
            rng.fill_normal(&mut normals);
            let (mut arithmetic, mut geometric) = setup.payoffs(&normals, 1.0);
            if self.config.antithetic() {
                let (a, g) = setup.payoffs(&normals, -1.0);
                arithmetic = 0.5 * (arithmetic + a);
                geometric = 0.5 * (geometric + g);
            }
            moments.push(arithmetic, geometric);
        }
        moments
    }
}

struct PathSetup {
    log_spot: f64,
    drift: f64,
    diffusion: f64,
    strike: f64,
    option_type: OptionType,
    discount: f64,
    fixings: usize,
}

impl PathSetup {
    /// Discounted (arithmetic, geometric) payoffs for one path.
    fn payoffs(&self, normals: &[f64], sign: f64) -> (f64, f64) {
        let mut log_s = self.log_spot;
        let mut sum = 0.0;
        let mut sum_log = 0.0;
        for &z in normals {
            log_s += self.drift + sign * self.diffusion * z;
            sum += log_s.exp();
            sum_log += log_s;
        }
        let m = self.fixings as f64;
        let arithmetic = self.option_type.intrinsic(sum / m, self.strike);
        let geometric = self.option_type.intrinsic((sum_log / m).exp(), self.strike);
        (self.discount * arithmetic, self.discount * geometric)
    }
}

/// Running first and second moments of (arithmetic, geometric) samples.
#[derive(Clone, Copy, Debug, Default)]
struct BatchMoments {
    count: usize,
    sum_x: f64,
    sum_y: f64,
    sum_xx: f64,
    sum_yy: f64,
    sum_xy: f64,
}

impl BatchMoments {
    #[inline]
    fn push(&mut self, x: f64, y: f64) {
        self.count += 1;
        self.sum_x += x;
        self.sum_y += y;
        self.sum_xx += x * x;
        self.sum_yy += y * y;
        self.sum_xy += x * y;
    }

    fn merge(self, other: &Self) -> Self {
        Self {
            count: self.count + other.count,
            sum_x: self.sum_x + other.sum_x,
            sum_y: self.sum_y + other.sum_y,
            sum_xx: self.sum_xx + other.sum_xx,
            sum_yy: self.sum_yy + other.sum_yy,
            sum_xy: self.sum_xy + other.sum_xy,
        }
    }

    /// Point estimate and per-sample variance, control-adjusted when a
    /// target is given.
    fn estimate(&self, control_target: Option<f64>) -> (f64, f64) {
        let n = self.count as f64;
        let mean_x = self.sum_x / n;
        let var_x = (self.sum_xx / n - mean_x * mean_x).max(0.0);

        let Some(target) = control_target else {
            return (mean_x, var_x);
        };

        let mean_y = self.sum_y / n;
        let var_y = self.sum_yy / n - mean_y * mean_y;
        if var_y <= 0.0 {
            return (mean_x, var_x);
        }
        let cov = self.sum_xy / n - mean_x * mean_y;
        let beta = cov / var_y;
        (
            mean_x - beta * (mean_y - target),
            (var_x - beta * cov).max(0.0),
        )
    }
}
