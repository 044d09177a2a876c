//! Greeks command implementation

use anyhow::Context;
use pricer_pricing::greeks::GreeksResult;
use pricer_pricing::instruments::{Instrument, OptionInstrument};
use serde::Serialize;
use tracing::info;

use super::{build_instrument, snapshot};
use crate::args::{ContractArgs, MarketArgs};
use crate::config::CliConfig;
use crate::error::Result;
use crate::output::{render, table, Field};

#[derive(Debug, Serialize)]
struct GreeksReport<'a> {
    instrument: &'a OptionInstrument,
    price: f64,
    greeks: GreeksResult<f64>,
}

/// Run the greeks command
pub fn run(contract: &ContractArgs, market: &MarketArgs, config: &CliConfig) -> Result<String> {
    let instrument = build_instrument(contract, config)?;
    let md = snapshot(instrument.asset_id(), market);
    let price = instrument
        .price(&md)
        .with_context(|| format!("failed to price {}", instrument.instrument_type()))?;
    let greeks = instrument
        .greeks(&md)
        .with_context(|| format!("failed to compute Greeks for {}", instrument.instrument_type()))?;
    info!(kind = instrument.instrument_type(), price, "Greeks computed");

    let report = GreeksReport {
        instrument: &instrument,
        price,
        greeks,
    };
    let rendered = render(config.format, &report, || {
        let rows: Vec<Field> = [
            Field::new("instrument", instrument.instrument_type()),
            Field::number("price", price),
        ]
        .into_iter()
        .chain(greeks.entries().into_iter().map(|(name, value)| Field::number(name, value)))
        .collect();
        table(&rows)
    })?;
    Ok(rendered)
}
