//! Hermite spline command implementations

use anyhow::{Context, Result};
use clap::Subcommand;
use mocap_utils::{Spline3, SplinePoint3};
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::{add_table_row, create_table, format_vec3};

#[derive(Subcommand)]
pub enum SplineCommands {
    /// Evaluate a spline at evenly spaced times
    Sample {
        /// JSON file with `[{"t": .., "p": [x, y, z], "dp": [x, y, z]}, ...]`
        file: PathBuf,

        /// Number of intervals between the first and last control point
        #[arg(short, long, default_value_t = 10)]
        steps: usize,
    },
}

pub fn execute(cmd: SplineCommands) -> Result<()> {
    match cmd {
        SplineCommands::Sample { file, steps } => handle_sample(&file, steps),
    }
}

fn load_spline(path: &Path) -> Result<Spline3> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let points: Vec<SplinePoint3> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid control points in {}", path.display()))?;
    Spline3::new(points).with_context(|| format!("Invalid spline in {}", path.display()))
}

fn handle_sample(path: &Path, steps: usize) -> Result<()> {
    let spline = load_spline(path)?;

    let mut table = create_table(&["t", "Value", "Derivative"]);
    for (t, value, derivative) in spline.sample(steps) {
        add_table_row(
            &mut table,
            &format!("{t:.3}"),
            [format_vec3(value), format_vec3(derivative)],
        );
    }
    table.printstd();

    Ok(())
}
