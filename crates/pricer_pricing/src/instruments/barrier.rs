//! Single-barrier option priced in closed form.

use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::{OptionType, PricingResult};
use pricer_models::analytical::{barrier_price, BarrierKind, BarrierParams};
use tracing::debug;

use super::error::{check_contract, InstrumentError};
use super::traits::Instrument;
use crate::greeks::FiniteDifference;

/// Continuously monitored single-barrier option with a cash rebate.
///
/// Priced with the Reiner-Rubinstein formulas; Greeks are finite
/// differences of the closed form.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketSnapshot;
/// use pricer_core::types::OptionType;
/// use pricer_models::analytical::BarrierKind;
/// use pricer_pricing::instruments::{BarrierOption, EuropeanOption, Instrument};
///
/// let market = MarketSnapshot::new("SPX", 100.0, 0.05, 0.2);
/// let down_in = BarrierOption::new(OptionType::Call, 100.0, 90.0, BarrierKind::DownIn, 1.0, "SPX").unwrap();
/// let down_out = BarrierOption::new(OptionType::Call, 100.0, 90.0, BarrierKind::DownOut, 1.0, "SPX").unwrap();
/// let vanilla = EuropeanOption::new(OptionType::Call, 100.0, 1.0, "SPX").unwrap();
///
/// let sum = down_in.price(&market).unwrap() + down_out.price(&market).unwrap();
/// assert!((sum - vanilla.price(&market).unwrap()).abs() < 1e-10);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BarrierOption {
    option_type: OptionType,
    strike: f64,
    barrier: f64,
    barrier_kind: BarrierKind,
    expiry: f64,
    asset_id: String,
    rebate: f64,
}

impl BarrierOption {
    /// Creates a barrier option without rebate.
    pub fn new(
        option_type: OptionType,
        strike: f64,
        barrier: f64,
        barrier_kind: BarrierKind,
        expiry: f64,
        asset_id: impl Into<String>,
    ) -> PricingResult<Self> {
        check_contract(strike, expiry)?;
        check_barrier(barrier)?;
        Ok(Self {
            option_type,
            strike,
            barrier,
            barrier_kind,
            expiry,
            asset_id: asset_id.into(),
            rebate: 0.0,
        })
    }

    /// Sets the cash rebate.
    pub fn with_rebate(mut self, rebate: f64) -> PricingResult<Self> {
        check_rebate(rebate)?;
        self.rebate = rebate;
        Ok(self)
    }

    /// Payoff direction.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Barrier level.
    #[inline]
    pub fn barrier(&self) -> f64 {
        self.barrier
    }

    /// Barrier kind.
    #[inline]
    pub fn barrier_kind(&self) -> BarrierKind {
        self.barrier_kind
    }

    /// Time to expiry in years.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Cash rebate.
    #[inline]
    pub fn rebate(&self) -> f64 {
        self.rebate
    }

    fn value(&self, market: &MarketSnapshot, expiry: f64) -> PricingResult<f64> {
        let params = BarrierParams {
            spot: market.spot,
            strike: self.strike,
            barrier: self.barrier,
            rate: market.rate,
            volatility: market.volatility,
            expiry,
            rebate: self.rebate,
        };
        Ok(barrier_price(self.option_type, self.barrier_kind, &params)?)
    }
}

fn check_barrier(barrier: f64) -> Result<(), InstrumentError> {
    if !barrier.is_finite() || barrier <= 0.0 {
        return Err(InstrumentError::InvalidBarrier { barrier });
    }
    Ok(())
}

fn check_rebate(rebate: f64) -> Result<(), InstrumentError> {
    if !rebate.is_finite() || rebate < 0.0 {
        return Err(InstrumentError::InvalidRebate { rebate });
    }
    Ok(())
}

impl Instrument for BarrierOption {
    fn price(&self, market: &MarketSnapshot) -> PricingResult<f64> {
        self.validate(market)?;
        debug!(
            asset_id = %self.asset_id,
            kind = %self.barrier_kind,
            barrier = self.barrier,
            "pricing barrier option"
        );
        self.value(market, self.expiry)
    }

    fn delta(&self, market: &MarketSnapshot) -> PricingResult<f64> {
        self.validate(market)?;
        let fd = FiniteDifference::default();
        let h = fd.bumps().spot_bump(market.spot);
        fd.delta(market, h, |m| self.value(m, self.expiry))
    }

    fn gamma(&self, market: &MarketSnapshot) -> PricingResult<f64> {
        self.validate(market)?;
        let fd = FiniteDifference::default();
        let h = fd.bumps().spot_bump(market.spot);
        fd.gamma(market, h, |m| self.value(m, self.expiry))
    }

    fn vega(&self, market: &MarketSnapshot) -> PricingResult<f64> {
        self.validate(market)?;
        FiniteDifference::default().vega(market, |m| self.value(m, self.expiry))
    }

    fn theta(&self, market: &MarketSnapshot) -> PricingResult<f64> {
        self.validate(market)?;
        FiniteDifference::default().theta(self.expiry, |t| self.value(market, t))
    }

    fn rho(&self, market: &MarketSnapshot) -> PricingResult<f64> {
        self.validate(market)?;
        FiniteDifference::default().rho(market, |m| self.value(m, self.expiry))
    }

    fn asset_id(&self) -> &str {
        &self.asset_id
    }

    fn instrument_type(&self) -> &'static str {
        "Barrier Option"
    }

    fn validate_parameters(&self) -> PricingResult<()> {
        check_contract(self.strike, self.expiry)?;
        check_barrier(self.barrier)?;
        check_rebate(self.rebate)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::EuropeanOption;
    use approx::assert_relative_eq;

    fn market() -> MarketSnapshot {
        MarketSnapshot::new("TEST", 100.0, 0.05, 0.2)
    }

    fn option(option_type: OptionType, kind: BarrierKind, barrier: f64) -> BarrierOption {
        BarrierOption::new(option_type, 100.0, barrier, kind, 1.0, "TEST").unwrap()
    }

    #[test]
    fn test_reference_prices() {
        let down_out = option(OptionType::Call, BarrierKind::DownOut, 90.0);
        assert_relative_eq!(down_out.price(&market()).unwrap(), 8.665_471_658_245_654, epsilon = 1e-9);

        let up_out = option(OptionType::Put, BarrierKind::UpOut, 120.0);
        assert_relative_eq!(up_out.price(&market()).unwrap(), 5.360_127_871_647_814, epsilon = 1e-9);

        let with_rebate = down_out.with_rebate(2.0).unwrap();
        assert_relative_eq!(with_rebate.price(&market()).unwrap(), 9.748_947_925_136_719, epsilon = 1e-9);
    }

    #[test]
    fn test_in_out_parity_for_price_and_greeks() {
        for option_type in [OptionType::Call, OptionType::Put] {
            let vanilla = EuropeanOption::new(option_type, 100.0, 1.0, "TEST").unwrap();
            let v = vanilla.greeks(&market()).unwrap();
            for (kind, barrier) in [(BarrierKind::DownIn, 90.0), (BarrierKind::UpIn, 115.0)] {
                let knock_in = option(option_type, kind, barrier);
                let knock_out = option(option_type, kind.complement(), barrier);
                let price = knock_in.price(&market()).unwrap() + knock_out.price(&market()).unwrap();
                assert_relative_eq!(price, vanilla.price(&market()).unwrap(), epsilon = 1e-9);

                let gi = knock_in.greeks(&market()).unwrap();
                let go = knock_out.greeks(&market()).unwrap();
                assert_relative_eq!(gi.delta + go.delta, v.delta, epsilon = 1e-5);
                assert_relative_eq!(gi.vega + go.vega, v.vega, epsilon = 1e-4);
                assert_relative_eq!(gi.rho + go.rho, v.rho, epsilon = 1e-4);
                assert_relative_eq!(gi.theta + go.theta, v.theta, epsilon = 0.05);
            }
        }
    }

    #[test]
    fn test_down_out_call_greek_signs() {
        let greeks = option(OptionType::Call, BarrierKind::DownOut, 90.0)
            .greeks(&market())
            .unwrap();
        assert!(greeks.is_finite());
        assert!(greeks.delta > 0.0);
    }

    #[test]
    fn test_breached_knock_out_pays_rebate() {
        let breached = option(OptionType::Call, BarrierKind::DownOut, 105.0)
            .with_rebate(3.0)
            .unwrap();
        assert_relative_eq!(breached.price(&market()).unwrap(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_validation() {
        let err = BarrierOption::new(OptionType::Call, 100.0, 0.0, BarrierKind::UpOut, 1.0, "X")
            .unwrap_err();
        assert!(err.is_invalid_parameter());
        assert!(BarrierOption::new(OptionType::Call, 0.0, 90.0, BarrierKind::UpOut, 1.0, "X").is_err());
        assert!(BarrierOption::new(OptionType::Call, 100.0, 90.0, BarrierKind::UpOut, 0.0, "X").is_err());
        assert!(option(OptionType::Call, BarrierKind::DownIn, 90.0)
            .with_rebate(-1.0)
            .is_err());
        let err = option(OptionType::Call, BarrierKind::DownIn, 90.0)
            .vega(&market().with_volatility(-0.1))
            .unwrap_err();
        assert!(err.is_invalid_parameter());
    }
}
