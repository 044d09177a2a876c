//! Validate command implementation
//!
//! Reprices a vanilla contract in closed form and on both lattices, then
//! compares each against the selected reference pricer.

use pricer_models::lattice::LatticeSpec;
use pricer_validation::{
    CrossValidator, ReferencePricer, StatrsReference, UnavailableReference, ValidationResult,
    BLACK_SCHOLES_TOLERANCE,
};
use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use super::CommandOutput;
use crate::args::{ReferenceKind, ValidateArgs};
use crate::config::CliConfig;
use crate::error::Result;
use crate::output::{render, table};

#[derive(Debug, Serialize)]
struct ValidationRow {
    check: &'static str,
    #[serde(flatten)]
    result: ValidationResult,
}

#[derive(Tabled)]
struct CheckLine<'a> {
    #[tabled(rename = "Check")]
    check: &'static str,
    #[tabled(rename = "Result")]
    message: &'a str,
}

#[derive(Debug, Serialize)]
struct ValidationReport {
    reference: &'static str,
    steps: usize,
    checks: Vec<ValidationRow>,
}

fn reference(kind: ReferenceKind) -> Box<dyn ReferencePricer> {
    match kind {
        ReferenceKind::Statrs => Box::new(StatrsReference::new()),
        ReferenceKind::Unavailable => Box::new(UnavailableReference),
    }
}

/// Run the validate command
pub fn run(args: &ValidateArgs, config: &CliConfig) -> Result<CommandOutput> {
    let v = &args.vanilla;
    let spec = LatticeSpec {
        spot: v.market.spot,
        strike: v.strike,
        rate: v.market.rate,
        expiry: v.expiry,
        volatility: v.market.vol,
        option_type: v.option_type,
    };
    let steps = args.steps.unwrap_or(config.binomial_steps);
    let tolerance = args.tolerance.unwrap_or(config.tolerance);

    let validator = CrossValidator::new(reference(args.reference));
    let checks = vec![
        ValidationRow {
            check: "black_scholes",
            result: validator.validate_closed_form(&spec, BLACK_SCHOLES_TOLERANCE),
        },
        ValidationRow {
            check: "binomial_european",
            result: validator.validate_lattice_european(&spec, steps, tolerance),
        },
        ValidationRow {
            check: "binomial_american",
            result: validator.validate_lattice_american(&spec, steps, tolerance),
        },
    ];
    let failures = checks.iter().filter(|c| !c.result.within_tolerance).count();
    info!(
        reference = validator.reference().name(),
        steps,
        failures,
        "validation finished"
    );

    let report = ValidationReport {
        reference: validator.reference().name(),
        steps,
        checks,
    };
    let rendered = render(config.format, &report, || {
        let lines: Vec<CheckLine<'_>> = report
            .checks
            .iter()
            .map(|row| CheckLine {
                check: row.check,
                message: &row.result.message,
            })
            .collect();
        table(&lines)
    })?;
    Ok(CommandOutput { rendered, failures })
}
