//! Pose sampling: play a motion for a while and report joint positions

use anyhow::{Result, bail};
use clap::Args;
use glam::{Mat4, Vec3};
use log::warn;
use mocap_asf::{Bone, BoneId};
use mocap_character::{Character, CharacterConfig, PoseVisitor};
use std::path::PathBuf;

use crate::commands::skeleton::load_skeleton;
use crate::utils::{add_table_row, create_table, format_seconds, format_vec3, parse_vec3};

#[derive(Args)]
pub struct PoseArgs {
    /// Path to the ASF skeleton
    pub asf: PathBuf,

    /// Path to the AMC motion
    pub amc: PathBuf,

    /// Playback time in seconds
    #[arg(short, long, default_value_t = 0.0)]
    pub time: f64,

    /// World offset added to the root, as x,y,z
    #[arg(long, value_parser = parse_vec3)]
    pub base: Option<Vec3>,

    /// Root drift per second, as x,y,z
    #[arg(long, value_parser = parse_vec3)]
    pub velocity: Option<Vec3>,

    /// Multiplier for root translations and bone lengths
    #[arg(long, conflicts_with = "metric")]
    pub scale: Option<f32>,

    /// Report positions in meters using the skeleton's length unit
    #[arg(long)]
    pub metric: bool,
}

/// Joint rows in traversal order, indented by depth
#[derive(Default)]
struct JointTable {
    depth: usize,
    rows: Vec<(String, Vec3, Vec3)>,
}

impl PoseVisitor for JointTable {
    fn enter_bone(&mut self, _id: BoneId, bone: &Bone, start: &Mat4, end: &Mat4) {
        self.rows.push((
            format!("{}{}", "  ".repeat(self.depth), bone.name()),
            start.transform_point3(Vec3::ZERO),
            end.transform_point3(Vec3::ZERO),
        ));
        self.depth += 1;
    }

    fn leave_bone(&mut self, _id: BoneId, _bone: &Bone) {
        self.depth -= 1;
    }
}

pub fn execute(args: PoseArgs) -> Result<()> {
    let mut config = CharacterConfig::default();
    if let Some(base) = args.base {
        config.base_position = base;
    }
    if let Some(velocity) = args.velocity {
        config.base_velocity = velocity;
    }
    if let Some(scale) = args.scale {
        config.length_scale = scale;
    } else if args.metric {
        config.length_scale = load_skeleton(&args.asf)?.units.meters_per_unit();
    }

    let mut character = Character::load(&args.asf, &args.amc, config);
    if !character.has_skeleton() {
        bail!(
            "Failed to load skeleton: {}",
            character.load_errors().join("; ")
        );
    }
    if !character.has_animation() {
        warn!("No usable motion, showing the rest pose");
    }
    character.advance(args.time);

    println!("=== Pose ===");
    println!(
        "Time: {}  Frame: {} of {}",
        format_seconds(character.time()),
        character.animation_frame(),
        character.frame_count()
    );
    println!("Root position: {}", format_vec3(character.current_position()));
    println!(
        "Root orientation (deg): {}",
        format_vec3(character.current_orientation() * (180.0 / std::f32::consts::PI))
    );

    let mut joints = JointTable::default();
    character.draw(&mut joints);

    let mut table = create_table(&["Bone", "Start", "End"]);
    for (name, start, end) in joints.rows {
        add_table_row(&mut table, &name, [format_vec3(start), format_vec3(end)]);
    }
    table.printstd();

    Ok(())
}
