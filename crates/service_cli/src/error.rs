//! CLI error types.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised by the CLI itself, as opposed to pricing failures.
#[derive(Debug, Error)]
pub enum CliError {
    /// A flag required by the chosen instrument kind is missing
    #[error("--{flag} is required for {kind} options")]
    MissingArgument {
        /// Flag name without the leading dashes
        flag: &'static str,
        /// Instrument kind that needs it
        kind: &'static str,
    },

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Output could not be serialised
    #[error("Failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

/// Result alias for the CLI.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_argument_display() {
        let err = CliError::MissingArgument {
            flag: "barrier",
            kind: "barrier",
        };
        assert_eq!(err.to_string(), "--barrier is required for barrier options");
    }

    #[test]
    fn test_config_error_is_transparent() {
        let err: CliError = ConfigError::InvalidLogLevel("loud".to_string()).into();
        assert!(err.to_string().starts_with("Invalid log level: loud"));
    }
}
