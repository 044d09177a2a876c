//! Barrier option analytical pricing.
//!
//! Reiner-Rubinstein (1991) closed forms for continuously monitored
//! single-barrier European options, with a cash rebate:
//! - knock-out rebate paid when the barrier is hit
//! - knock-in rebate paid at expiry if the barrier was never hit
//!
//! # Key Relationship
//!
//! **In-Out Parity**: Knock-In + Knock-Out = Vanilla (zero rebate)

use std::fmt;
use std::str::FromStr;

use num_traits::Float;
use pricer_core::types::{OptionType, PricingError};

use super::black_scholes::BlackScholes;
use super::distributions::norm_cdf;
use super::error::AnalyticalError;

/// Barrier direction and knock type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BarrierKind {
    /// Activated when spot falls to the barrier
    DownIn,
    /// Extinguished when spot falls to the barrier
    DownOut,
    /// Activated when spot rises to the barrier
    UpIn,
    /// Extinguished when spot rises to the barrier
    UpOut,
}

impl BarrierKind {
    /// All four kinds.
    pub const ALL: [BarrierKind; 4] = [
        BarrierKind::DownIn,
        BarrierKind::DownOut,
        BarrierKind::UpIn,
        BarrierKind::UpOut,
    ];

    /// Barrier sits above spot.
    #[inline]
    pub fn is_up(&self) -> bool {
        matches!(self, BarrierKind::UpIn | BarrierKind::UpOut)
    }

    /// Hitting the barrier activates the option.
    #[inline]
    pub fn is_knock_in(&self) -> bool {
        matches!(self, BarrierKind::DownIn | BarrierKind::UpIn)
    }

    /// The kind with the same direction and opposite knock type.
    pub fn complement(&self) -> Self {
        match self {
            BarrierKind::DownIn => BarrierKind::DownOut,
            BarrierKind::DownOut => BarrierKind::DownIn,
            BarrierKind::UpIn => BarrierKind::UpOut,
            BarrierKind::UpOut => BarrierKind::UpIn,
        }
    }

    /// True if `spot` is already on the far side of `barrier`.
    #[inline]
    pub fn is_breached<T: Float>(&self, spot: T, barrier: T) -> bool {
        if self.is_up() {
            spot >= barrier
        } else {
            spot <= barrier
        }
    }

    /// Canonical snake_case name.
    pub fn name(&self) -> &'static str {
        match self {
            BarrierKind::DownIn => "down_in",
            BarrierKind::DownOut => "down_out",
            BarrierKind::UpIn => "up_in",
            BarrierKind::UpOut => "up_out",
        }
    }
}

impl FromStr for BarrierKind {
    type Err = PricingError;

    /// Accepts `down_in`, `down-and-in`, `DownIn`, `di` and the like.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase()
            .replace("and", "");
        match key.as_str() {
            "downin" | "di" => Ok(BarrierKind::DownIn),
            "downout" | "do" => Ok(BarrierKind::DownOut),
            "upin" | "ui" => Ok(BarrierKind::UpIn),
            "upout" | "uo" => Ok(BarrierKind::UpOut),
            _ => Err(PricingError::InvalidParameter(format!(
                "unknown barrier kind '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for BarrierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Market and contract inputs for barrier pricing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarrierParams<T: Float> {
    /// Spot price
    pub spot: T,
    /// Strike price
    pub strike: T,
    /// Barrier level
    pub barrier: T,
    /// Risk-free rate
    pub rate: T,
    /// Volatility
    pub volatility: T,
    /// Time to expiry in years
    pub expiry: T,
    /// Cash rebate
    pub rebate: T,
}

impl<T: Float> BarrierParams<T> {
    fn validate(&self) -> Result<(), AnalyticalError> {
        let zero = T::zero();
        let f = |x: T| x.to_f64().unwrap_or(f64::NAN);

        BlackScholes::new(self.spot, self.rate, self.volatility)?;
        if !self.strike.is_finite() || self.strike <= zero {
            return Err(AnalyticalError::InvalidStrike {
                strike: f(self.strike),
            });
        }
        if !self.barrier.is_finite() || self.barrier <= zero {
            return Err(AnalyticalError::InvalidBarrier {
                barrier: f(self.barrier),
            });
        }
        if !self.expiry.is_finite() || self.expiry <= zero {
            return Err(AnalyticalError::InvalidExpiry {
                expiry: f(self.expiry),
            });
        }
        if !self.rebate.is_finite() || self.rebate < zero {
            return Err(AnalyticalError::InvalidRebate {
                rebate: f(self.rebate),
            });
        }
        Ok(())
    }
}

/// Prices a single-barrier option.
///
/// If the barrier is already breached at inception, a knock-in is worth the
/// vanilla option and a knock-out is worth its rebate.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
/// use pricer_models::analytical::{barrier_price, BarrierKind, BarrierParams, BlackScholes};
///
/// let params = BarrierParams {
///     spot: 100.0_f64, strike: 100.0, barrier: 90.0,
///     rate: 0.05, volatility: 0.2, expiry: 1.0, rebate: 0.0,
/// };
/// let di = barrier_price(OptionType::Call, BarrierKind::DownIn, &params).unwrap();
/// let dout = barrier_price(OptionType::Call, BarrierKind::DownOut, &params).unwrap();
/// let vanilla = BlackScholes::new(100.0, 0.05, 0.2).unwrap().price_call(100.0, 1.0);
/// assert!((di + dout - vanilla).abs() < 1e-10);
/// ```
pub fn barrier_price<T: Float>(
    option_type: OptionType,
    kind: BarrierKind,
    params: &BarrierParams<T>,
) -> Result<T, AnalyticalError> {
    params.validate()?;

    let BarrierParams {
        spot: s,
        strike: k,
        barrier: h,
        rate: r,
        volatility: vol,
        expiry: t,
        rebate,
    } = *params;

    let bs = BlackScholes::new(s, r, vol)?;
    let vanilla = bs.price(option_type, k, t);

    if kind.is_breached(s, h) {
        return Ok(if kind.is_knock_in() { vanilla } else { rebate });
    }

    let zero = T::zero();
    let one = T::one();
    let two = T::from(2.0).unwrap();
    let half = T::from(0.5).unwrap();

    let eta = if kind.is_up() { -one } else { one };
    let phi: T = option_type.sign();

    let var = vol * vol;
    let st = vol * t.sqrt();
    let mu = (r - half * var) / var;
    let lambda = (mu * mu + two * r / var).sqrt();
    let df = (-r * t).exp();

    let shift = (one + mu) * st;
    let x1 = (s / k).ln() / st + shift;
    let x2 = (s / h).ln() / st + shift;
    let y1 = (h * h / (s * k)).ln() / st + shift;
    let y2 = (h / s).ln() / st + shift;
    let z = (h / s).ln() / st + lambda * st;

    let ln_hs = (h / s).ln();
    let hs_2mu = (two * mu * ln_hs).exp();
    let hs_2mu1 = (two * (mu + one) * ln_hs).exp();

    let term = |x: T, pw_s: T, pw_k: T, sign: T| {
        phi * s * pw_s * norm_cdf(sign * x) - phi * k * df * pw_k * norm_cdf(sign * (x - st))
    };

    let a = term(x1, one, one, phi);
    let b = term(x2, one, one, phi);
    let c = term(y1, hs_2mu1, hs_2mu, eta);
    let d = term(y2, hs_2mu1, hs_2mu, eta);
    let e = rebate * df * (norm_cdf(eta * (x2 - st)) - hs_2mu * norm_cdf(eta * (y2 - st)));
    let f = rebate
        * (((mu + lambda) * ln_hs).exp() * norm_cdf(eta * z)
            + ((mu - lambda) * ln_hs).exp() * norm_cdf(eta * (z - two * lambda * st)));

    let above = k >= h;
    let value = match (kind, option_type, above) {
        (BarrierKind::DownOut, OptionType::Call, true) => a - c + f,
        (BarrierKind::DownOut, OptionType::Call, false) => b - d + f,
        (BarrierKind::UpOut, OptionType::Call, true) => f,
        (BarrierKind::UpOut, OptionType::Call, false) => a - b + c - d + f,
        (BarrierKind::DownOut, OptionType::Put, true) => a - b + c - d + f,
        (BarrierKind::DownOut, OptionType::Put, false) => f,
        (BarrierKind::UpOut, OptionType::Put, true) => b - d + f,
        (BarrierKind::UpOut, OptionType::Put, false) => a - c + f,
        (BarrierKind::DownIn, OptionType::Call, true) => c + e,
        (BarrierKind::DownIn, OptionType::Call, false) => a - b + d + e,
        (BarrierKind::UpIn, OptionType::Call, true) => a + e,
        (BarrierKind::UpIn, OptionType::Call, false) => b - c + d + e,
        (BarrierKind::DownIn, OptionType::Put, true) => b - c + d + e,
        (BarrierKind::DownIn, OptionType::Put, false) => a + e,
        (BarrierKind::UpIn, OptionType::Put, true) => a - b + d + e,
        (BarrierKind::UpIn, OptionType::Put, false) => c + e,
    };

    if !value.is_finite() {
        return Err(AnalyticalError::NumericalInstability {
            message: format!("non-finite {} barrier value", kind),
        });
    }
    Ok(value.max(zero))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params(strike: f64, barrier: f64, rebate: f64) -> BarrierParams<f64> {
        BarrierParams {
            spot: 100.0,
            strike,
            barrier,
            rate: 0.05,
            volatility: 0.2,
            expiry: 1.0,
            rebate,
        }
    }

    fn vanilla(option_type: OptionType, strike: f64) -> f64 {
        BlackScholes::new(100.0, 0.05, 0.2)
            .unwrap()
            .price(option_type, strike, 1.0)
    }

    // ==========================================================
    // Kind parsing
    // ==========================================================

    #[test]
    fn test_kind_from_str() {
        assert_eq!("down_in".parse::<BarrierKind>().unwrap(), BarrierKind::DownIn);
        assert_eq!("Down-and-Out".parse::<BarrierKind>().unwrap(), BarrierKind::DownOut);
        assert_eq!("UpIn".parse::<BarrierKind>().unwrap(), BarrierKind::UpIn);
        assert_eq!("uo".parse::<BarrierKind>().unwrap(), BarrierKind::UpOut);
        assert!("sideways".parse::<BarrierKind>().unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_kind_helpers() {
        assert!(BarrierKind::UpOut.is_up());
        assert!(!BarrierKind::DownOut.is_knock_in());
        assert_eq!(BarrierKind::UpIn.complement(), BarrierKind::UpOut);
        assert!(BarrierKind::DownIn.is_breached(89.0, 90.0));
        assert!(!BarrierKind::UpIn.is_breached(89.0, 90.0));
    }

    // ==========================================================
    // Reference values
    // ==========================================================

    #[test]
    fn test_reference_values() {
        let cases = [
            (OptionType::Call, BarrierKind::DownIn, 100.0, 90.0, 1.785_111_913_939_896_8),
            (OptionType::Call, BarrierKind::DownOut, 100.0, 90.0, 8.665_471_658_245_654),
            (OptionType::Call, BarrierKind::UpIn, 100.0, 120.0, 9.274_518_172_535_211),
            (OptionType::Call, BarrierKind::UpOut, 100.0, 120.0, 1.176_065_399_650_339_4),
            (OptionType::Put, BarrierKind::DownIn, 100.0, 90.0, 5.422_305_645_817_09),
            (OptionType::Put, BarrierKind::DownOut, 100.0, 90.0, 0.151_220_376_439_873_4),
            (OptionType::Put, BarrierKind::UpIn, 100.0, 120.0, 0.213_398_150_609_149_35),
            (OptionType::Put, BarrierKind::UpOut, 100.0, 120.0, 5.360_127_871_647_814),
            (OptionType::Call, BarrierKind::DownIn, 80.0, 90.0, 7.528_720_820_502_716),
            (OptionType::Call, BarrierKind::DownOut, 80.0, 90.0, 17.060_114_623_425_033),
            (OptionType::Put, BarrierKind::UpOut, 110.0, 105.0, 4.184_531_532_146_75),
        ];
        for (option_type, kind, strike, barrier, expected) in cases {
            let value = barrier_price(option_type, kind, &params(strike, barrier, 0.0)).unwrap();
            assert_relative_eq!(value, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_rebate_values() {
        let out = barrier_price(OptionType::Call, BarrierKind::DownOut, &params(100.0, 90.0, 2.0));
        assert_relative_eq!(out.unwrap(), 9.748_947_925_136_719, epsilon = 1e-9);
        let inn = barrier_price(OptionType::Call, BarrierKind::DownIn, &params(100.0, 90.0, 2.0));
        assert_relative_eq!(inn.unwrap(), 2.639_698_248_101_822_3, epsilon = 1e-9);
    }

    // ==========================================================
    // In-out parity
    // ==========================================================

    #[test]
    fn test_in_out_parity_all_regions() {
        for option_type in [OptionType::Call, OptionType::Put] {
            for strike in [70.0, 95.0, 100.0, 115.0, 140.0] {
                let v = vanilla(option_type, strike);
                for (kind, barrier) in [(BarrierKind::DownIn, 85.0), (BarrierKind::UpIn, 118.0)] {
                    let p = params(strike, barrier, 0.0);
                    let knock_in = barrier_price(option_type, kind, &p).unwrap();
                    let knock_out = barrier_price(option_type, kind.complement(), &p).unwrap();
                    assert_relative_eq!(knock_in + knock_out, v, epsilon = 1e-9);
                }
            }
        }
    }

    // ==========================================================
    // Edge cases
    // ==========================================================

    #[test]
    fn test_breached_at_start() {
        let p = params(100.0, 105.0, 1.5);
        let v = vanilla(OptionType::Call, 100.0);
        // Spot 100 is already below a down barrier at 105.
        assert_eq!(barrier_price(OptionType::Call, BarrierKind::DownIn, &p).unwrap(), v);
        assert_eq!(barrier_price(OptionType::Call, BarrierKind::DownOut, &p).unwrap(), 1.5);
    }

    #[test]
    fn test_far_barrier_recovers_vanilla() {
        let v = vanilla(OptionType::Put, 100.0);
        let out = barrier_price(OptionType::Put, BarrierKind::DownOut, &params(100.0, 1.0, 0.0));
        assert_relative_eq!(out.unwrap(), v, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            barrier_price(OptionType::Call, BarrierKind::UpOut, &params(100.0, 0.0, 0.0)),
            Err(AnalyticalError::InvalidBarrier { .. })
        ));
        assert!(matches!(
            barrier_price(OptionType::Call, BarrierKind::UpOut, &params(-1.0, 120.0, 0.0)),
            Err(AnalyticalError::InvalidStrike { .. })
        ));
        assert!(matches!(
            barrier_price(OptionType::Call, BarrierKind::UpOut, &params(100.0, 120.0, -1.0)),
            Err(AnalyticalError::InvalidRebate { .. })
        ));
        let mut p = params(100.0, 120.0, 0.0);
        p.volatility = 0.0;
        assert!(matches!(
            barrier_price(OptionType::Call, BarrierKind::UpOut, &p),
            Err(AnalyticalError::InvalidVolatility { .. })
        ));
    }
}
