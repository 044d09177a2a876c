//! Lattice pricer CLI
//!
//! # Commands
//!
//! - `pricer price` - Price a European, American, barrier or Asian option
//! - `pricer greeks` - Delta, gamma, vega, theta and rho
//! - `pricer tree` - Dump a small binomial lattice
//! - `pricer validate` - Cross-check against a reference pricer

use anyhow::bail;
use clap::Parser;
use service_cli::args::Cli;
use service_cli::commands;
use service_cli::config::build_config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli.overrides())?;

    init_tracing(config.log_level.as_filter_str());
    tracing::debug!(
        version = service_cli::VERSION,
        steps = config.binomial_steps,
        mc_paths = config.mc_paths,
        mc_seed = config.mc_seed,
        tolerance = config.tolerance,
        "configuration loaded"
    );

    let output = commands::execute(&cli.command, &config)?;
    print!("{}", output.rendered);
    if !output.rendered.ends_with('\n') {
        println!();
    }

    if output.failures > 0 {
        bail!("{} validation check(s) failed", output.failures);
    }
    Ok(())
}
