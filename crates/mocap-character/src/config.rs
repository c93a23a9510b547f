//! Playback configuration

use glam::Vec3;
use mocap_amc::SAMPLE_RATE;
use mocap_asf::Skeleton;

/// How a motion is played back and placed in the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterConfig {
    /// Frames per second of the motion stream
    pub sample_rate: f64,
    /// World offset added to every root position
    pub base_position: Vec3,
    /// Drift per second added to the root position
    pub base_velocity: Vec3,
    /// Multiplies root translations and bone vectors
    pub length_scale: f32,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            base_position: Vec3::ZERO,
            base_velocity: Vec3::ZERO,
            length_scale: 1.0,
        }
    }
}

impl CharacterConfig {
    /// Playback in meters, using the skeleton's declared length unit
    pub fn metric(skeleton: &Skeleton) -> Self {
        Self {
            length_scale: skeleton.units.meters_per_unit(),
            ..Self::default()
        }
    }

    pub fn with_base_position(mut self, position: Vec3) -> Self {
        self.base_position = position;
        self
    }

    pub fn with_base_velocity(mut self, velocity: Vec3) -> Self {
        self.base_velocity = velocity;
        self
    }

    pub fn with_length_scale(mut self, scale: f32) -> Self {
        self.length_scale = scale;
        self
    }
}
