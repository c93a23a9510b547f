//! Decoded motion frames

use glam::Vec3;
use mocap_asf::{AngleUnit, DofChannel};

use crate::error::{AmcError, Result};
use crate::layout::{ChannelLayout, ROOT_SEGMENT};

/// Capture rate of Acclaim motion streams, in frames per second
pub const SAMPLE_RATE: f64 = 120.0;

/// Values for one bone in one frame
#[derive(Debug, Clone, PartialEq)]
pub struct BoneSample {
    pub name: String,
    /// Channel values, rotations already in radians
    pub values: Vec<f32>,
}

/// Root values split by channel kind
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RootSample {
    /// Translation in skeleton length units
    pub translation: Vec3,
    /// Orientation in radians
    pub rotation: Vec3,
}

/// One captured frame
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MotionFrame {
    /// Frame number as written in the file
    pub index: u32,
    /// Root channel values, empty when the frame has no root line
    pub root: Vec<f32>,
    /// Bone samples in file order
    pub bones: Vec<BoneSample>,
}

impl MotionFrame {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    /// Values recorded for a named bone; `root` resolves to the root line
    pub fn sample(&self, name: &str) -> Option<&[f32]> {
        if name.eq_ignore_ascii_case(ROOT_SEGMENT) {
            return (!self.root.is_empty()).then_some(self.root.as_slice());
        }
        self.bones
            .iter()
            .find(|sample| sample.name == name)
            .map(|sample| sample.values.as_slice())
    }

    /// Root translation and rotation decoded through the root channel order
    pub fn root_sample(&self, order: &[DofChannel]) -> RootSample {
        let mut root = RootSample::default();
        for (channel, value) in order.iter().zip(&self.root) {
            if let Some(axis) = channel.translation_axis() {
                root.translation[axis] = *value;
            } else if let Some(axis) = channel.rotation_axis() {
                root.rotation[axis] = *value;
            }
        }
        root
    }
}

/// A decoded AMC stream
#[derive(Debug, Clone, PartialEq)]
pub struct Motion {
    pub frames: Vec<MotionFrame>,
    /// Unit the file declared (or the caller assumed) before conversion
    pub angle_unit: AngleUnit,
    pub fully_specified: bool,
}

impl Motion {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame by position in the stream (not by frame number)
    pub fn frame(&self, k: usize) -> Option<&MotionFrame> {
        self.frames.get(k)
    }

    pub fn sample_rate(&self) -> f64 {
        SAMPLE_RATE
    }

    /// Playback length in seconds
    pub fn duration(&self) -> f64 {
        self.frames.len() as f64 / SAMPLE_RATE
    }

    /// Distinct bone names in order of first appearance
    pub fn bone_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for sample in self.frames.iter().flat_map(|frame| &frame.bones) {
            if !names.contains(&sample.name.as_str()) {
                names.push(&sample.name);
            }
        }
        names
    }

    /// Check every sample against a skeleton's channel layout
    ///
    /// Fails on the first bone the layout does not know and on the first
    /// sample whose value count differs from its channel count.
    pub fn validate_against(&self, layout: &ChannelLayout) -> Result<()> {
        for frame in &self.frames {
            if !frame.root.is_empty() {
                check_count(frame.index, ROOT_SEGMENT, layout.root(), &frame.root)?;
            }
            for sample in &frame.bones {
                let channels =
                    layout
                        .channels(&sample.name)
                        .ok_or_else(|| AmcError::UnknownBone {
                            frame: frame.index,
                            name: sample.name.clone(),
                        })?;
                check_count(frame.index, &sample.name, channels, &sample.values)?;
            }
        }
        Ok(())
    }
}

fn check_count(frame: u32, bone: &str, channels: &[DofChannel], values: &[f32]) -> Result<()> {
    if channels.len() == values.len() {
        return Ok(());
    }
    Err(AmcError::ChannelMismatch {
        frame,
        bone: bone.to_string(),
        expected: channels.len(),
        found: values.len(),
    })
}
