//! Finite-difference sensitivities by full revaluation.
//!
//! Every helper takes a repricing closure and calls it at bumped inputs;
//! nothing is cached between bumps.
//!
//! | Greek | Scheme |
//! |-------|--------|
//! | delta | `(V(S+h) - V(S-h)) / 2h` |
//! | gamma | `(V(S+h) - 2V(S) + V(S-h)) / h²` |
//! | vega  | `(V(σ+h) - V(σ-h)) / 2h`, forward when `σ ≤ h` |
//! | rho   | `(V(r+h) - V(r-h)) / 2h` |
//!
//! Vega and rho fall back to a one-sided difference on the valid side when
//! one bumped revaluation leaves the model's numerical domain (a lattice
//! probability outside `[0, 1]`) while the unbumped price is fine.
//! | theta | `(V(T-h) - V(T)) / h`, `h ≤ T/2` |

use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::PricingResult;

use super::bump::BumpSizes;

/// Finite-difference Greeks driver.
///
/// # Examples
///
/// ```rust
/// use pricer_core::market_data::MarketSnapshot;
/// use pricer_pricing::greeks::FiniteDifference;
///
/// let fd = FiniteDifference::default();
/// let market = MarketSnapshot::new("X", 100.0, 0.05, 0.2);
///
/// // V = S² has delta 2S and gamma 2
/// let price = |m: &MarketSnapshot| Ok(m.spot * m.spot);
/// let delta = fd.delta(&market, 0.01, price).unwrap();
/// let gamma = fd.gamma(&market, 0.01, price).unwrap();
/// assert!((delta - 200.0).abs() < 1e-8);
/// assert!((gamma - 2.0).abs() < 1e-6);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FiniteDifference {
    bumps: BumpSizes,
}

impl FiniteDifference {
    /// Creates a driver with the given bump sizes.
    pub fn new(bumps: BumpSizes) -> Self {
        Self { bumps }
    }

    /// Bump sizes in use.
    #[inline]
    pub fn bumps(&self) -> &BumpSizes {
        &self.bumps
    }

    /// Central first difference in spot with absolute bump `h`.
    pub fn delta<F>(&self, market: &MarketSnapshot, h: f64, price: F) -> PricingResult<f64>
    where
        F: Fn(&MarketSnapshot) -> PricingResult<f64>,
    {
        let up = price(&market.with_spot(market.spot + h))?;
        let down = price(&market.with_spot(market.spot - h))?;
        Ok((up - down) / (2.0 * h))
    }

    /// Central second difference in spot with absolute bump `h`.
    pub fn gamma<F>(&self, market: &MarketSnapshot, h: f64, price: F) -> PricingResult<f64>
    where
        F: Fn(&MarketSnapshot) -> PricingResult<f64>,
    {
        let up = price(&market.with_spot(market.spot + h))?;
        let mid = price(market)?;
        let down = price(&market.with_spot(market.spot - h))?;
        Ok((up - 2.0 * mid + down) / (h * h))
    }

    /// Difference in volatility.
    pub fn vega<F>(&self, market: &MarketSnapshot, price: F) -> PricingResult<f64>
    where
        F: Fn(&MarketSnapshot) -> PricingResult<f64>,
    {
        let h = self.bumps.volatility;
        if market.volatility <= h {
            let up = price(&market.with_volatility(market.volatility + h))?;
            let mid = price(market)?;
            return Ok((up - mid) / h);
        }
        let up = price(&market.with_volatility(market.volatility + h));
        let down = price(&market.with_volatility(market.volatility - h));
        central_or_one_sided(h, up, down, || price(market))
    }

    /// Central difference in the risk-free rate.
    pub fn rho<F>(&self, market: &MarketSnapshot, price: F) -> PricingResult<f64>
    where
        F: Fn(&MarketSnapshot) -> PricingResult<f64>,
    {
        let h = self.bumps.rate;
        let up = price(&market.with_rate(market.rate + h));
        let down = price(&market.with_rate(market.rate - h));
        central_or_one_sided(h, up, down, || price(market))
    }

    /// One-sided time decay: value lost per year as expiry approaches.
    ///
    /// `price` is called with a time to expiry; the bump never crosses
    /// expiry.
    pub fn theta<F>(&self, expiry: f64, price: F) -> PricingResult<f64>
    where
        F: Fn(f64) -> PricingResult<f64>,
    {
        let h = self.bumps.time_bump(expiry);
        let now = price(expiry)?;
        let later = price(expiry - h)?;
        Ok((later - now) / h)
    }
}

/// Central difference, or a one-sided one when exactly one bumped side is
/// outside the numerical domain.
fn central_or_one_sided<M>(
    h: f64,
    up: PricingResult<f64>,
    down: PricingResult<f64>,
    mid: M,
) -> PricingResult<f64>
where
    M: FnOnce() -> PricingResult<f64>,
{
    match (up, down) {
        (Ok(up), Ok(down)) => Ok((up - down) / (2.0 * h)),
        (Ok(up), Err(e)) if e.is_numerical_domain() => Ok((up - mid()?) / h),
        (Err(e), Ok(down)) if e.is_numerical_domain() => Ok((mid()? - down) / h),
        (Err(e), _) | (_, Err(e)) => Err(e),
    }
}
