//! Tree command implementation
//!
//! Prints the full lattice level by level; nodes where early exercise is
//! optimal are marked with `*`.

use anyhow::Context;
use pricer_models::lattice::{build_tree, ExerciseStyle, LatticeGrid};

use crate::args::TreeArgs;
use crate::config::{CliConfig, OutputFormat};
use crate::error::Result;

/// Run the tree command
pub fn run(args: &TreeArgs, config: &CliConfig) -> Result<String> {
    let v = &args.vanilla;
    let exercise = if args.american {
        ExerciseStyle::American
    } else {
        ExerciseStyle::European
    };
    let grid = build_tree(
        v.market.spot,
        v.strike,
        v.market.rate,
        v.expiry,
        v.market.vol,
        v.option_type,
        args.steps,
        exercise,
    )
    .context("failed to build lattice")?;

    match config.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&grid)?),
        OutputFormat::Table => Ok(render_levels(&grid)),
    }
}

fn render_levels(grid: &LatticeGrid) -> String {
    let mut out = format!("price = {:.6} ({} steps)\n", grid.price(), grid.steps());
    for (i, level) in grid.levels().iter().enumerate() {
        let nodes: Vec<String> = level
            .iter()
            .map(|node| {
                format!(
                    "{:.4}/{:.4}{}",
                    node.stock_price,
                    node.option_value,
                    if node.exercised { "*" } else { "" }
                )
            })
            .collect();
        out.push_str(&format!("t{:<3} {}\n", i, nodes.join("  ")));
    }
    out
}
