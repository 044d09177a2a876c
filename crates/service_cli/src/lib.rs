//! Command-line service for the lattice option pricer
//!
//! Wires the pricing crates to a `pricer` binary with `price`, `greeks`,
//! `tree` and `validate` commands.
//!
//! # Architecture
//!
//! As part of the **S**ervice layer this crate only parses arguments, loads
//! configuration, initialises tracing and renders results. All numerics live
//! in `pricer_models`, `pricer_pricing` and `pricer_validation`.

pub mod args;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use error::{CliError, Result};

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
