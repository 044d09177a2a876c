//! Command-line argument definitions.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum};
use pricer_core::types::{OptionType, PricingError, PricingModel};
use pricer_models::analytical::{AverageKind, BarrierKind};

use crate::config::{CliOverrides, LogLevel, OutputFormat};

/// Lattice option pricer
#[derive(Parser, Debug)]
#[command(name = "pricer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, value_parser = parse_log_level)]
    pub log_level: Option<LogLevel>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Global flags relevant to configuration loading.
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            config_file: self.config.clone(),
            log_level: self.log_level,
            format: self.format,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Price a single option
    Price {
        #[command(flatten)]
        contract: ContractArgs,
        #[command(flatten)]
        market: MarketArgs,
    },

    /// Compute delta, gamma, vega, theta and rho
    Greeks {
        #[command(flatten)]
        contract: ContractArgs,
        #[command(flatten)]
        market: MarketArgs,
    },

    /// Print every node of a small binomial lattice
    Tree(TreeArgs),

    /// Cross-check closed-form and lattice prices against a reference pricer
    Validate(ValidateArgs),
}

/// Instrument families accepted by `--kind`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum InstrumentKind {
    #[default]
    European,
    American,
    Barrier,
    Asian,
}

impl InstrumentKind {
    pub fn name(&self) -> &'static str {
        match self {
            InstrumentKind::European => "european",
            InstrumentKind::American => "american",
            InstrumentKind::Barrier => "barrier",
            InstrumentKind::Asian => "asian",
        }
    }
}

/// Contract terms shared by `price` and `greeks`
#[derive(Args, Debug, Clone)]
pub struct ContractArgs {
    /// Instrument family
    #[arg(long, value_enum, default_value_t = InstrumentKind::European)]
    pub kind: InstrumentKind,

    /// call or put
    #[arg(long = "type", value_parser = parse_enum::<OptionType>, default_value = "call")]
    pub option_type: OptionType,

    /// Strike price
    #[arg(long)]
    pub strike: f64,

    /// Time to expiry in years
    #[arg(long)]
    pub expiry: f64,

    /// Underlying identifier
    #[arg(long, default_value = "SPOT")]
    pub asset: String,

    /// Pricing model for European options (black-scholes, binomial, merton)
    #[arg(long, value_parser = parse_enum::<PricingModel>, default_value = "black-scholes")]
    pub model: PricingModel,

    /// Lattice steps (defaults to the configured value)
    #[arg(long)]
    pub steps: Option<usize>,

    /// Barrier level
    #[arg(long)]
    pub barrier: Option<f64>,

    /// down-in, down-out, up-in or up-out
    #[arg(long, value_parser = parse_enum::<BarrierKind>)]
    pub barrier_kind: Option<BarrierKind>,

    /// Cash rebate paid when a barrier option is knocked out
    #[arg(long, default_value_t = 0.0)]
    pub rebate: f64,

    /// arithmetic or geometric
    #[arg(long, value_parser = parse_enum::<AverageKind>, default_value = "arithmetic")]
    pub average: AverageKind,

    /// Total number of averaging dates
    #[arg(long, default_value_t = 12)]
    pub fixings: usize,

    /// Averaging dates already observed
    #[arg(long, default_value_t = 0)]
    pub past_fixings: usize,

    /// Sum (arithmetic) or product (geometric) of the observed fixings
    #[arg(long, default_value_t = 0.0)]
    pub running_sum: f64,

    /// Merton jump intensity per year
    #[arg(long, default_value_t = 0.0)]
    pub jump_intensity: f64,

    /// Merton mean log jump size
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub jump_mean: f64,

    /// Merton log jump volatility
    #[arg(long, default_value_t = 0.0)]
    pub jump_vol: f64,

    /// Monte Carlo paths (defaults to the configured value)
    #[arg(long)]
    pub paths: Option<usize>,

    /// Monte Carlo seed (defaults to the configured value)
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Market state
#[derive(Args, Debug, Clone)]
pub struct MarketArgs {
    /// Spot price
    #[arg(long)]
    pub spot: f64,

    /// Continuously compounded risk-free rate
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub rate: f64,

    /// Annualised volatility
    #[arg(long)]
    pub vol: f64,
}

/// Vanilla terms used by `tree` and `validate`
#[derive(Args, Debug, Clone)]
pub struct VanillaArgs {
    /// call or put
    #[arg(long = "type", value_parser = parse_enum::<OptionType>, default_value = "call")]
    pub option_type: OptionType,

    /// Strike price
    #[arg(long)]
    pub strike: f64,

    /// Time to expiry in years
    #[arg(long)]
    pub expiry: f64,

    #[command(flatten)]
    pub market: MarketArgs,
}

#[derive(Args, Debug, Clone)]
pub struct TreeArgs {
    #[command(flatten)]
    pub vanilla: VanillaArgs,

    /// Lattice steps
    #[arg(long, default_value_t = 4)]
    pub steps: usize,

    /// Allow early exercise
    #[arg(long)]
    pub american: bool,
}

/// Reference implementations selectable for `validate`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReferenceKind {
    #[default]
    Statrs,
    #[value(name = "none")]
    Unavailable,
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub vanilla: VanillaArgs,

    /// Lattice steps (defaults to the configured value)
    #[arg(long)]
    pub steps: Option<usize>,

    /// Relative tolerance for lattice checks (defaults to the configured value)
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Reference pricer
    #[arg(long, value_enum, default_value_t = ReferenceKind::Statrs)]
    pub reference: ReferenceKind,
}

fn parse_enum<T>(s: &str) -> Result<T, String>
where
    T: FromStr<Err = PricingError>,
{
    s.parse::<T>().map_err(|e| e.to_string())
}

fn parse_log_level(s: &str) -> Result<LogLevel, String> {
    s.parse::<LogLevel>().map_err(|e| e.to_string())
}
