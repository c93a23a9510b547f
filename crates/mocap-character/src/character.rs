//! Motion playback on an articulated skeleton

use glam::{Mat4, Vec3};
use log::{debug, error, trace, warn};
use mocap_amc::{AmcOptions, Motion, parse_amc_file};
use mocap_asf::{Bone, BoneId, Skeleton, parse_asf_file};
use std::path::Path;

use crate::config::CharacterConfig;
use crate::error::{CharacterError, Result};
use crate::visitor::{JointCollector, PoseVisitor};

/// A skeleton driven by a motion stream
///
/// Frame 0 is applied on construction. [`advance`](Self::advance) then steps
/// through the stream at the configured sample rate, holding the last frame
/// once the stream runs out.
#[derive(Debug, Clone)]
pub struct Character {
    config: CharacterConfig,
    skeleton: Skeleton,
    motion: Option<Motion>,
    position: Vec3,
    /// Root orientation in radians
    orientation: Vec3,
    time: f64,
    animation_frame: usize,
    load_errors: Vec<String>,
}

impl Character {
    /// Build a character from already-parsed parts
    ///
    /// Samples that do not match the skeleton are reported once here and
    /// skipped or truncated during playback. An empty motion counts as no
    /// motion.
    pub fn new(skeleton: Skeleton, motion: Option<Motion>, config: CharacterConfig) -> Self {
        let motion = motion.filter(|motion| !motion.is_empty());
        if let Some(motion) = &motion {
            let options = AmcOptions::for_skeleton(&skeleton);
            if let Err(e) = motion.validate_against(&options.layout) {
                warn!("Motion does not match skeleton '{}': {e}", skeleton.name);
            }
        }

        let mut character = Self {
            config,
            skeleton,
            motion,
            position: Vec3::ZERO,
            orientation: Vec3::ZERO,
            time: 0.0,
            animation_frame: 0,
            load_errors: Vec::new(),
        };
        character.reset();
        character
    }

    /// A character with no skeleton and no motion
    pub fn empty(config: CharacterConfig) -> Self {
        Self::new(Skeleton::default(), None, config)
    }

    /// Load a skeleton and a motion from disk
    ///
    /// Never fails. A skeleton that cannot be loaded leaves the character
    /// empty; a motion that cannot be loaded leaves it in the rest pose.
    /// Check [`has_skeleton`](Self::has_skeleton) and
    /// [`has_animation`](Self::has_animation), or read
    /// [`load_errors`](Self::load_errors).
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(
        asf_path: P,
        amc_path: Q,
        config: CharacterConfig,
    ) -> Self {
        let asf_path = asf_path.as_ref();
        let amc_path = amc_path.as_ref();

        let skeleton = match load_skeleton(asf_path) {
            Ok(skeleton) => skeleton,
            Err(e) => {
                let message = format!("{}: {e}", asf_path.display());
                error!("Failed to load skeleton {message}");
                let mut character = Self::empty(config);
                character.load_errors.push(message);
                return character;
            }
        };

        let options = AmcOptions::for_skeleton(&skeleton);
        let mut load_errors = Vec::new();
        let motion = match parse_amc_file(amc_path, &options) {
            Ok(motion) => Some(motion),
            Err(e) => {
                let message = format!("{}: {e}", amc_path.display());
                error!("Failed to load motion {message}");
                load_errors.push(message);
                None
            }
        };

        let mut character = Self::new(skeleton, motion, config);
        character.load_errors = load_errors;
        character
    }

    /// Load a skeleton and a motion, failing on the first problem
    ///
    /// Unlike [`load`](Self::load) this also rejects motions whose samples
    /// do not match the skeleton's channels.
    pub fn try_load<P: AsRef<Path>, Q: AsRef<Path>>(
        asf_path: P,
        amc_path: Q,
        config: CharacterConfig,
    ) -> Result<Self> {
        let skeleton = load_skeleton(asf_path.as_ref())?;
        let options = AmcOptions::for_skeleton(&skeleton);
        let motion = parse_amc_file(amc_path, &options)?;
        motion.validate_against(&options.layout)?;
        Ok(Self::new(skeleton, Some(motion), config))
    }

    /// Step playback forward by `dt` seconds
    ///
    /// Every frame index in `round(rate * time)..round(rate * (time + dt))`
    /// is applied in order, clamped to the last frame. Splitting a step into
    /// smaller ones applies the same frames up to rounding at the boundaries.
    /// Ticks past the end of the stream apply the last frame at most once
    /// per call.
    pub fn advance(&mut self, dt: f64) {
        if let Some(count) = self.motion.as_ref().map(Motion::frame_count) {
            let rate = self.config.sample_rate;
            let first = frame_index(rate * self.time);
            let last = frame_index(rate * (self.time + dt));
            if last > first {
                for k in first.min(count - 1)..last.min(count) {
                    self.apply_frame(k);
                }
            }
        }
        self.time += dt;
    }

    /// Pose the character from frame `k` of the motion
    ///
    /// Does nothing when there is no motion or `k` is past its end.
    pub fn apply_frame(&mut self, k: usize) {
        let Some(frame) = self.motion.as_ref().and_then(|motion| motion.frame(k)) else {
            return;
        };

        let root = frame.root_sample(&self.skeleton.root.order);
        let elapsed = (k as f64 / self.config.sample_rate) as f32;
        self.position = root.translation * self.config.length_scale
            + self.config.base_position
            + self.config.base_velocity * elapsed;
        self.orientation = root.rotation;

        for sample in &frame.bones {
            match self.skeleton.find_mut(&sample.name) {
                Some(bone) => bone.set_pose(&sample.values),
                None => trace!("frame {k}: no bone named '{}'", sample.name),
            }
        }

        self.animation_frame = k;
        trace!("Applied frame {k} (file frame {})", frame.index);
    }

    /// Rewind to time zero and re-apply frame 0
    pub fn reset(&mut self) {
        self.time = 0.0;
        self.animation_frame = 0;
        self.skeleton.reset_pose();
        self.position = self.skeleton.root.position * self.config.length_scale
            + self.config.base_position;
        self.orientation = self.skeleton.root.orientation;
        self.apply_frame(0);
    }

    /// World frame of the root: `T(position) * Rz * Ry * Rx`
    pub fn current_coordinate_frame(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_z(self.orientation.z)
            * Mat4::from_rotation_y(self.orientation.y)
            * Mat4::from_rotation_x(self.orientation.x)
    }

    pub fn current_position(&self) -> Vec3 {
        self.position
    }

    /// Root orientation in radians
    pub fn current_orientation(&self) -> Vec3 {
        self.orientation
    }

    /// Elapsed playback time in seconds
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Index of the most recently applied frame
    pub fn animation_frame(&self) -> usize {
        self.animation_frame
    }

    pub fn frame_count(&self) -> usize {
        self.motion.as_ref().map_or(0, Motion::frame_count)
    }

    pub fn has_animation(&self) -> bool {
        self.motion.is_some()
    }

    pub fn has_skeleton(&self) -> bool {
        !self.skeleton.is_empty()
    }

    pub fn root_bones(&self) -> &[BoneId] {
        self.skeleton.root_bones()
    }

    pub fn bone(&self, name: &str) -> Option<&Bone> {
        self.skeleton.find(name)
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn motion(&self) -> Option<&Motion> {
        self.motion.as_ref()
    }

    pub fn config(&self) -> &CharacterConfig {
        &self.config
    }

    /// Takes effect from the next applied frame
    pub fn set_base_position(&mut self, position: Vec3) {
        self.config.base_position = position;
    }

    /// Takes effect from the next applied frame
    pub fn set_base_velocity(&mut self, velocity: Vec3) {
        self.config.base_velocity = velocity;
    }

    /// Messages from failed loads, empty after a clean [`load`](Self::load)
    pub fn load_errors(&self) -> &[String] {
        &self.load_errors
    }

    /// Walk the posed skeleton depth-first from the root frame
    pub fn draw<V: PoseVisitor + ?Sized>(&self, visitor: &mut V) {
        let root_frame = self.current_coordinate_frame();
        for &id in self.skeleton.root_bones() {
            self.visit(id, &root_frame, visitor);
        }
    }

    fn visit<V: PoseVisitor + ?Sized>(&self, id: BoneId, parent_end: &Mat4, visitor: &mut V) {
        let Some(bone) = self.skeleton.bone(id) else {
            return;
        };
        let start = *parent_end * bone.current_local_rotation();
        let end = *parent_end * bone.local_transform_scaled(self.config.length_scale);

        visitor.enter_bone(id, bone, &start, &end);
        for &child in bone.children() {
            self.visit(child, &end, visitor);
        }
        visitor.leave_bone(id, bone);
    }

    /// World-space joint and end point of every bone, in traversal order
    pub fn joint_positions(&self) -> Vec<(BoneId, Vec3, Vec3)> {
        let mut collector = JointCollector::default();
        self.draw(&mut collector);
        collector.joints
    }
}

fn load_skeleton(path: &Path) -> Result<Skeleton> {
    let skeleton = parse_asf_file(path)?;
    if skeleton.is_empty() {
        return Err(CharacterError::EmptySkeleton);
    }
    debug!(
        "Loaded skeleton '{}' with {} bones",
        skeleton.name,
        skeleton.len()
    );
    Ok(skeleton)
}

fn frame_index(ticks: f64) -> usize {
    if ticks.is_nan() || ticks <= 0.0 {
        return 0;
    }
    ticks.round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_index_rounds() {
        assert_eq!(frame_index(0.0), 0);
        assert_eq!(frame_index(0.49), 0);
        assert_eq!(frame_index(0.5), 1);
        assert_eq!(frame_index(1.4), 1);
        assert_eq!(frame_index(-3.0), 0);
        assert_eq!(frame_index(f64::NAN), 0);
        assert_eq!(frame_index(f64::INFINITY), usize::MAX);
    }

    #[test]
    fn test_empty_character() {
        let mut character = Character::empty(CharacterConfig::default());
        assert!(!character.has_skeleton());
        assert!(!character.has_animation());
        assert_eq!(character.frame_count(), 0);

        character.advance(0.5);
        assert_eq!(character.time(), 0.5);
        assert_eq!(character.animation_frame(), 0);
        assert!(character.joint_positions().is_empty());
    }
}
