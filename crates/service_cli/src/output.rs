//! Text and JSON rendering of command results.

use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::config::OutputFormat;
use crate::error::CliError;

/// A labelled value for two-column output.
#[derive(Debug, Clone, Tabled)]
pub struct Field {
    #[tabled(rename = "Field")]
    pub label: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl Field {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// A price or Greek formatted to six decimals.
    pub fn number(label: impl Into<String>, value: f64) -> Self {
        Self::new(label, format!("{:.6}", value))
    }
}

/// Renders rows as a rounded table with right-aligned values.
pub fn table<T: Tabled>(rows: &[T]) -> String {
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .with(Modify::new(Columns::last()).with(Alignment::right()))
        .to_string()
}

/// Renders `value` as pretty JSON, or `table` otherwise.
pub fn render<T: Serialize>(
    format: OutputFormat,
    value: &T,
    table: impl FnOnce() -> String,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(table()),
    }
}
