//! Option instruments and model dispatch.
//!
//! # Architecture
//!
//! Each contract type implements [`Instrument`]; [`OptionInstrument`] closes
//! the set for static dispatch:
//! - [`EuropeanOption`]: Black-Scholes, lattice or Merton by [`PricingModel`](pricer_core::types::PricingModel)
//! - [`AmericanOption`]: lattice with early exercise
//! - [`BarrierOption`]: Reiner-Rubinstein closed form
//! - [`AsianOption`]: geometric closed form or arithmetic Monte Carlo
//!
//! # Examples
//!
//! ```
//! use pricer_core::market_data::MarketSnapshot;
//! use pricer_core::types::OptionType;
//! use pricer_pricing::instruments::{AmericanOption, EuropeanOption, Instrument, OptionInstrument};
//!
//! let market = MarketSnapshot::new("SPX", 100.0, 0.05, 0.2);
//! let book: Vec<OptionInstrument> = vec![
//!     EuropeanOption::new(OptionType::Put, 100.0, 1.0, "SPX").unwrap().into(),
//!     AmericanOption::new(OptionType::Put, 100.0, 1.0, "SPX").unwrap().into(),
//! ];
//! let prices: Vec<f64> = book.iter().map(|i| i.price(&market).unwrap()).collect();
//! assert!(prices[1] > prices[0]);
//! ```

mod american;
mod asian;
mod barrier;
mod error;
mod european;
mod traits;

pub use american::AmericanOption;
pub use asian::AsianOption;
pub use barrier::BarrierOption;
pub use error::InstrumentError;
pub use european::EuropeanOption;
pub use traits::Instrument;

use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::PricingResult;

use crate::greeks::GreeksResult;

/// Lattice resolution used when none is given.
pub const DEFAULT_BINOMIAL_STEPS: usize = 100;

/// Closed set of option instruments.
///
/// # Variants
/// - `European`: [`EuropeanOption`]
/// - `American`: [`AmericanOption`]
/// - `Barrier`: [`BarrierOption`]
/// - `Asian`: [`AsianOption`]
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum OptionInstrument {
    /// European exercise
    European(EuropeanOption),
    /// American exercise
    American(AmericanOption),
    /// Single barrier
    Barrier(BarrierOption),
    /// Discrete average
    Asian(AsianOption),
}

macro_rules! dispatch {
    ($self:ident, $inner:ident => $body:expr) => {
        match $self {
            OptionInstrument::European($inner) => $body,
            OptionInstrument::American($inner) => $body,
            OptionInstrument::Barrier($inner) => $body,
            OptionInstrument::Asian($inner) => $body,
        }
    };
}

impl Instrument for OptionInstrument {
    fn price(&self, market: &MarketSnapshot) -> PricingResult<f64> {
        dispatch!(self, inner => inner.price(market))
    }

    fn delta(&self, market: &MarketSnapshot) -> PricingResult<f64> {
        dispatch!(self, inner => inner.delta(market))
    }

    fn gamma(&self, market: &MarketSnapshot) -> PricingResult<f64> {
        dispatch!(self, inner => inner.gamma(market))
    }

    fn vega(&self, market: &MarketSnapshot) -> PricingResult<f64> {
        dispatch!(self, inner => inner.vega(market))
    }

    fn theta(&self, market: &MarketSnapshot) -> PricingResult<f64> {
        dispatch!(self, inner => inner.theta(market))
    }

    fn rho(&self, market: &MarketSnapshot) -> PricingResult<f64> {
        dispatch!(self, inner => inner.rho(market))
    }

    fn greeks(&self, market: &MarketSnapshot) -> PricingResult<GreeksResult<f64>> {
        dispatch!(self, inner => inner.greeks(market))
    }

    fn asset_id(&self) -> &str {
        dispatch!(self, inner => inner.asset_id())
    }

    fn instrument_type(&self) -> &'static str {
        dispatch!(self, inner => inner.instrument_type())
    }

    fn validate_parameters(&self) -> PricingResult<()> {
        dispatch!(self, inner => inner.validate_parameters())
    }

    fn validate_market_data(&self, market: &MarketSnapshot) -> PricingResult<()> {
        dispatch!(self, inner => inner.validate_market_data(market))
    }
}

impl From<EuropeanOption> for OptionInstrument {
    fn from(option: EuropeanOption) -> Self {
        OptionInstrument::European(option)
    }
}

impl From<AmericanOption> for OptionInstrument {
    fn from(option: AmericanOption) -> Self {
        OptionInstrument::American(option)
    }
}

impl From<BarrierOption> for OptionInstrument {
    fn from(option: BarrierOption) -> Self {
        OptionInstrument::Barrier(option)
    }
}

impl From<AsianOption> for OptionInstrument {
    fn from(option: AsianOption) -> Self {
        OptionInstrument::Asian(option)
    }
}
