//! Price command implementation

use anyhow::Context;
use pricer_pricing::instruments::{Instrument, OptionInstrument};
use serde::Serialize;
use tracing::info;

use super::{build_instrument, snapshot};
use crate::args::{ContractArgs, MarketArgs};
use crate::config::CliConfig;
use crate::error::Result;
use crate::output::{render, table, Field};

#[derive(Debug, Serialize)]
struct PriceReport<'a> {
    instrument: &'a OptionInstrument,
    spot: f64,
    rate: f64,
    volatility: f64,
    price: f64,
}

/// Run the price command
pub fn run(contract: &ContractArgs, market: &MarketArgs, config: &CliConfig) -> Result<String> {
    let instrument = build_instrument(contract, config)?;
    let md = snapshot(instrument.asset_id(), market);
    let price = instrument
        .price(&md)
        .with_context(|| format!("failed to price {}", instrument.instrument_type()))?;
    info!(kind = instrument.instrument_type(), price, "priced");

    let report = PriceReport {
        instrument: &instrument,
        spot: md.spot,
        rate: md.rate,
        volatility: md.volatility,
        price,
    };
    let rendered = render(config.format, &report, || {
        table(&[
            Field::new("instrument", instrument.instrument_type()),
            Field::new("asset", instrument.asset_id()),
            Field::number("price", price),
        ])
    })?;
    Ok(rendered)
}
