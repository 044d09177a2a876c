//! CLI configuration management
//!
//! Settings come from four layers, highest priority first:
//! 1. Command-line flags
//! 2. `PRICER_*` environment variables
//! 3. A TOML file passed with `--config`
//! 4. Built-in defaults

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use pricer_pricing::instruments::DEFAULT_BINOMIAL_STEPS;
use pricer_pricing::mc::{DEFAULT_PATHS, DEFAULT_SEED};
use pricer_validation::BINOMIAL_TOLERANCE;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: table, json")]
    InvalidFormat(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels accepted by `--log-level` and `PRICER_LOG_LEVEL`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Lattice steps when a command does not pass `--steps`
    pub binomial_steps: usize,
    /// Monte Carlo paths for arithmetic Asians
    pub mc_paths: usize,
    /// Monte Carlo seed
    pub mc_seed: u64,
    /// Relative tolerance for lattice cross-validation
    pub tolerance: f64,
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Output format
    #[serde(deserialize_with = "deserialize_format")]
    pub format: OutputFormat,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_format<'de, D>(deserializer: D) -> Result<OutputFormat, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    OutputFormat::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            binomial_steps: DEFAULT_BINOMIAL_STEPS,
            mc_paths: DEFAULT_PATHS,
            mc_seed: DEFAULT_SEED,
            tolerance: BINOMIAL_TOLERANCE,
            log_level: LogLevel::default(),
            format: OutputFormat::default(),
        }
    }
}

/// Environment variable names
pub mod env {
    pub const BINOMIAL_STEPS: &str = "PRICER_BINOMIAL_STEPS";
    pub const MC_PATHS: &str = "PRICER_MC_PATHS";
    pub const MC_SEED: &str = "PRICER_MC_SEED";
    pub const TOLERANCE: &str = "PRICER_TOLERANCE";
    pub const LOG_LEVEL: &str = "PRICER_LOG_LEVEL";
    pub const FORMAT: &str = "PRICER_FORMAT";
}

fn parse_value<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: CliConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields whose variables are set, reading them through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(env::BINOMIAL_STEPS) {
            self.binomial_steps = parse_value(env::BINOMIAL_STEPS, v)?;
        }
        if let Some(v) = lookup(env::MC_PATHS) {
            self.mc_paths = parse_value(env::MC_PATHS, v)?;
        }
        if let Some(v) = lookup(env::MC_SEED) {
            self.mc_seed = parse_value(env::MC_SEED, v)?;
        }
        if let Some(v) = lookup(env::TOLERANCE) {
            self.tolerance = parse_value(env::TOLERANCE, v)?;
        }
        if let Some(v) = lookup(env::LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&v)?;
        }
        if let Some(v) = lookup(env::FORMAT) {
            self.format = OutputFormat::from_str(&v)?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.binomial_steps == 0 {
            return Err(ConfigError::InvalidValue {
                key: "binomial_steps",
                value: self.binomial_steps.to_string(),
            });
        }
        if self.mc_paths == 0 {
            return Err(ConfigError::InvalidValue {
                key: "mc_paths",
                value: self.mc_paths.to_string(),
            });
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "tolerance",
                value: self.tolerance.to_string(),
            });
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) {
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        if let Some(format) = cli.format {
            self.format = format;
        }
    }
}

/// Global flags that override configuration
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<LogLevel>,
    /// Output format override
    pub format: Option<OutputFormat>,
}

/// Build configuration from all sources, reading the environment through `lookup`
pub fn build_config_with<F>(cli: &CliOverrides, lookup: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };
    config.apply_env(lookup)?;
    config.merge_with_cli(cli);
    config.validate()?;
    Ok(config)
}

/// Build configuration from all sources using the process environment
pub fn build_config(cli: &CliOverrides) -> Result<CliConfig, ConfigError> {
    build_config_with(cli, |key| std::env::var(key).ok())
}
