//! The capability set shared by every option instrument.

use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::PricingResult;

use crate::greeks::GreeksResult;

/// Pricing and risk operations of an option contract.
///
/// Every pricing and Greek entry point validates both the contract
/// ([`validate_parameters`](Instrument::validate_parameters)) and the market
/// ([`validate_market_data`](Instrument::validate_market_data)) before any
/// numeric work; callers never need to validate up front.
///
/// Theta is the change in value per year of elapsed time, so time decay is
/// reported as a negative number.
pub trait Instrument {
    /// Present value.
    fn price(&self, market: &MarketSnapshot) -> PricingResult<f64>;

    /// ∂V/∂S.
    fn delta(&self, market: &MarketSnapshot) -> PricingResult<f64>;

    /// ∂²V/∂S².
    fn gamma(&self, market: &MarketSnapshot) -> PricingResult<f64>;

    /// ∂V/∂σ.
    fn vega(&self, market: &MarketSnapshot) -> PricingResult<f64>;

    /// Time decay per year.
    fn theta(&self, market: &MarketSnapshot) -> PricingResult<f64>;

    /// ∂V/∂r.
    fn rho(&self, market: &MarketSnapshot) -> PricingResult<f64>;

    /// All five sensitivities.
    fn greeks(&self, market: &MarketSnapshot) -> PricingResult<GreeksResult<f64>> {
        Ok(GreeksResult::new(
            self.delta(market)?,
            self.gamma(market)?,
            self.vega(market)?,
            self.theta(market)?,
            self.rho(market)?,
        ))
    }

    /// Underlying identifier.
    fn asset_id(&self) -> &str;

    /// Human-readable instrument name.
    fn instrument_type(&self) -> &'static str;

    /// Checks the contract terms.
    fn validate_parameters(&self) -> PricingResult<()>;

    /// Checks the market snapshot ranges.
    ///
    /// The snapshot's asset id is not compared with the instrument's.
    fn validate_market_data(&self, market: &MarketSnapshot) -> PricingResult<()> {
        market.validate()
    }

    /// Whether the contract terms are valid.
    fn is_valid(&self) -> bool {
        self.validate_parameters().is_ok()
    }

    /// Runs both validations.
    fn validate(&self, market: &MarketSnapshot) -> PricingResult<()> {
        self.validate_parameters()?;
        self.validate_market_data(market)
    }
}
