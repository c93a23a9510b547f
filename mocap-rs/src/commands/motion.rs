//! AMC motion command implementations

use anyhow::{Context, Result};
use clap::Subcommand;
use mocap_amc::{AmcOptions, parse_amc_file};
use std::path::{Path, PathBuf};

use crate::commands::skeleton::load_skeleton;
use crate::utils::format_seconds;

#[derive(Subcommand)]
pub enum MotionCommands {
    /// Display information about an AMC motion
    Info {
        /// Path to the AMC file
        file: PathBuf,

        /// Skeleton to decode channels with and validate against
        #[arg(long)]
        asf: Option<PathBuf>,
    },
}

pub fn execute(cmd: MotionCommands) -> Result<()> {
    match cmd {
        MotionCommands::Info { file, asf } => handle_info(&file, asf.as_deref()),
    }
}

fn handle_info(path: &Path, asf: Option<&Path>) -> Result<()> {
    let skeleton = asf.map(load_skeleton).transpose()?;
    let options = skeleton
        .as_ref()
        .map(AmcOptions::for_skeleton)
        .unwrap_or_default();

    let motion = parse_amc_file(path, &options)
        .with_context(|| format!("Failed to load motion from {}", path.display()))?;

    println!("=== Motion Information ===");
    println!("Frames: {}", motion.frame_count());
    println!(
        "Duration: {} at {} Hz",
        format_seconds(motion.duration()),
        motion.sample_rate()
    );
    println!("Angle unit: {}", motion.angle_unit);
    println!("Fully specified: {}", motion.fully_specified);
    println!("Animated bones: {}", motion.bone_names().join(", "));

    if let (Some(skeleton), Some(asf)) = (&skeleton, asf) {
        motion.validate_against(&options.layout).with_context(|| {
            format!(
                "Motion {} does not match skeleton {}",
                path.display(),
                asf.display()
            )
        })?;
        println!("Matches skeleton: {} ({} bones)", asf.display(), skeleton.len());
    }

    Ok(())
}
