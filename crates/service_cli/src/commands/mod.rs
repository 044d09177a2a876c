//! CLI command implementations
//!
//! Each submodule implements a specific CLI command and returns the rendered
//! output; printing is left to `main`.

pub mod greeks;
pub mod price;
pub mod tree;
pub mod validate;

use anyhow::Context;
use pricer_core::market_data::MarketSnapshot;
use pricer_models::analytical::JumpParams;
use pricer_pricing::instruments::{
    AmericanOption, AsianOption, BarrierOption, EuropeanOption, OptionInstrument,
};
use pricer_pricing::mc::MonteCarloConfig;

use crate::args::{Commands, ContractArgs, InstrumentKind, MarketArgs};
use crate::config::CliConfig;
use crate::error::{CliError, Result};

/// Rendered command output.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutput {
    /// Text to print on stdout
    pub rendered: String,
    /// Number of failed checks (only `validate` reports failures)
    pub failures: usize,
}

impl CommandOutput {
    fn ok(rendered: String) -> Self {
        Self {
            rendered,
            failures: 0,
        }
    }
}

/// Run a parsed command against the resolved configuration
pub fn execute(command: &Commands, config: &CliConfig) -> Result<CommandOutput> {
    match command {
        Commands::Price { contract, market } => {
            price::run(contract, market, config).map(CommandOutput::ok)
        }
        Commands::Greeks { contract, market } => {
            greeks::run(contract, market, config).map(CommandOutput::ok)
        }
        Commands::Tree(args) => tree::run(args, config).map(CommandOutput::ok),
        Commands::Validate(args) => validate::run(args, config),
    }
}

/// Build the market snapshot for `asset_id`
pub fn snapshot(asset_id: &str, market: &MarketArgs) -> MarketSnapshot {
    MarketSnapshot::new(asset_id, market.spot, market.rate, market.vol)
}

/// Build the instrument described by the contract flags
pub fn build_instrument(contract: &ContractArgs, config: &CliConfig) -> Result<OptionInstrument> {
    let steps = contract.steps.unwrap_or(config.binomial_steps);
    let ot = contract.option_type;
    let asset = contract.asset.as_str();

    let instrument: OptionInstrument = match contract.kind {
        InstrumentKind::European => {
            let jump = JumpParams::new(
                contract.jump_intensity,
                contract.jump_mean,
                contract.jump_vol,
            );
            EuropeanOption::new(ot, contract.strike, contract.expiry, asset)?
                .with_pricing_model(contract.model)
                .with_binomial_steps(steps)?
                .with_jump(jump)?
                .into()
        }
        InstrumentKind::American => {
            AmericanOption::new(ot, contract.strike, contract.expiry, asset)?
                .with_binomial_steps(steps)?
                .into()
        }
        InstrumentKind::Barrier => {
            let kind = contract.kind.name();
            let barrier = contract.barrier.ok_or(CliError::MissingArgument {
                flag: "barrier",
                kind,
            })?;
            let barrier_kind = contract.barrier_kind.ok_or(CliError::MissingArgument {
                flag: "barrier-kind",
                kind,
            })?;
            BarrierOption::new(
                ot,
                contract.strike,
                barrier,
                barrier_kind,
                contract.expiry,
                asset,
            )?
            .with_rebate(contract.rebate)?
            .into()
        }
        InstrumentKind::Asian => {
            let mc = MonteCarloConfig::builder()
                .n_paths(contract.paths.unwrap_or(config.mc_paths))
                .seed(contract.seed.unwrap_or(config.mc_seed))
                .build()
                .context("invalid Monte Carlo settings")?;
            AsianOption::new(
                ot,
                contract.strike,
                contract.expiry,
                asset,
                contract.average,
                contract.fixings,
            )?
            .with_history(contract.past_fixings, contract.running_sum)?
            .with_mc_config(mc)
            .into()
        }
    };
    Ok(instrument)
}
