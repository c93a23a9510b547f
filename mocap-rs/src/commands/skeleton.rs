//! ASF skeleton command implementations

use anyhow::{Context, Result};
use clap::Subcommand;
use mocap_asf::{Skeleton, parse_asf_file};
use std::path::{Path, PathBuf};

use crate::utils::{
    TreeNode, TreeOptions, add_table_row, create_table, format_vec3, render_tree,
};

#[derive(Subcommand)]
pub enum SkeletonCommands {
    /// Display information about an ASF skeleton
    Info {
        /// Path to the ASF file
        file: PathBuf,

        /// List every bone
        #[arg(short, long)]
        detailed: bool,
    },

    /// Display the bone hierarchy as a tree
    Tree {
        /// Path to the ASF file
        file: PathBuf,

        /// Maximum depth to display
        #[arg(short, long)]
        depth: Option<usize>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Show bone details on one line
        #[arg(short, long)]
        compact: bool,

        /// Hide bone lengths and channels
        #[arg(long)]
        no_metadata: bool,
    },
}

pub fn execute(cmd: SkeletonCommands) -> Result<()> {
    match cmd {
        SkeletonCommands::Info { file, detailed } => handle_info(&file, detailed),
        SkeletonCommands::Tree {
            file,
            depth,
            no_color,
            compact,
            no_metadata,
        } => {
            let options = TreeOptions {
                max_depth: depth,
                no_color,
                show_metadata: !no_metadata,
                compact,
            };
            handle_tree(&file, &options)
        }
    }
}

pub(crate) fn load_skeleton(path: &Path) -> Result<Skeleton> {
    parse_asf_file(path)
        .with_context(|| format!("Failed to load skeleton from {}", path.display()))
}

fn handle_info(path: &Path, detailed: bool) -> Result<()> {
    let skeleton = load_skeleton(path)?;

    println!("=== Skeleton Information ===");
    if !skeleton.name.is_empty() {
        println!("Name: {}", skeleton.name);
    }
    if !skeleton.version.is_empty() {
        println!("Version: {}", skeleton.version);
    }
    println!(
        "Units: mass {}, length {} ({:.4} m per unit), angle {}",
        skeleton.units.mass,
        skeleton.units.length,
        skeleton.units.meters_per_unit(),
        skeleton.units.angle
    );
    println!("Bones: {}", skeleton.len());
    println!("Degrees of freedom: {}", skeleton.dof_count());
    println!(
        "Root order: {}",
        skeleton
            .root
            .order
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    );
    println!(
        "Root bones: {}",
        skeleton
            .root_bones()
            .iter()
            .filter_map(|id| skeleton.bone(*id))
            .map(|bone| bone.name())
            .collect::<Vec<_>>()
            .join(", ")
    );

    if detailed {
        println!("\n=== Bones ===");
        let mut table = create_table(&["Bone", "Id", "Parent", "Length", "Direction", "Dof"]);
        for id in skeleton.depth_first() {
            let Some(bone) = skeleton.bone(id) else {
                continue;
            };
            let parent = bone
                .parent()
                .and_then(|parent| skeleton.bone(parent))
                .map_or("root", |parent| parent.name());
            let dof = bone
                .channels()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            add_table_row(
                &mut table,
                bone.name(),
                [
                    bone.id().to_string(),
                    parent.to_string(),
                    format!("{:.3}", bone.length()),
                    format_vec3(bone.direction()),
                    dof,
                ],
            );
        }
        table.printstd();
    }

    Ok(())
}

fn handle_tree(path: &Path, options: &TreeOptions) -> Result<()> {
    let skeleton = load_skeleton(path)?;
    print!("{}", render_tree(&TreeNode::from_skeleton(&skeleton), options));
    Ok(())
}
