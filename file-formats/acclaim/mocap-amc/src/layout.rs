//! Channel layout shared between a skeleton and its motion streams

use mocap_asf::{AngleUnit, DofChannel, RootSpec, Skeleton};
use std::collections::HashMap;

/// Name used for the root segment in motion frames
pub const ROOT_SEGMENT: &str = "root";

/// Which channel each value of a motion line drives
///
/// The default layout is the CMU convention: root values are
/// `TX TY TZ RX RY RZ` and every bone value is a rotation.
#[derive(Debug, Clone)]
pub struct ChannelLayout {
    root: Vec<DofChannel>,
    bones: HashMap<String, Vec<DofChannel>>,
}

impl Default for ChannelLayout {
    fn default() -> Self {
        Self {
            root: RootSpec::default().order,
            bones: HashMap::new(),
        }
    }
}

impl ChannelLayout {
    pub fn new(root: Vec<DofChannel>) -> Self {
        Self {
            root,
            bones: HashMap::new(),
        }
    }

    pub fn from_skeleton(skeleton: &Skeleton) -> Self {
        Self {
            root: skeleton.root.order.clone(),
            bones: skeleton
                .bones()
                .iter()
                .map(|bone| (bone.name().to_string(), bone.channels().to_vec()))
                .collect(),
        }
    }

    pub fn with_bone(mut self, name: impl Into<String>, channels: Vec<DofChannel>) -> Self {
        self.bones.insert(name.into(), channels);
        self
    }

    pub fn root(&self) -> &[DofChannel] {
        &self.root
    }

    /// Channels of a named segment; `root` resolves to the root order
    pub fn channels(&self, name: &str) -> Option<&[DofChannel]> {
        if name.eq_ignore_ascii_case(ROOT_SEGMENT) {
            return Some(&self.root);
        }
        self.bones.get(name).map(Vec::as_slice)
    }

    /// True when only the root order is known
    pub fn knows_bones(&self) -> bool {
        !self.bones.is_empty()
    }

    /// Convert the rotation values of one motion line to radians in place
    ///
    /// Segments missing from the layout have every value treated as an angle.
    pub(crate) fn convert(&self, name: &str, values: &mut [f32], unit: AngleUnit) {
        if unit == AngleUnit::Radians {
            return;
        }
        match self.channels(name) {
            Some(channels) => {
                for (value, channel) in values.iter_mut().zip(channels) {
                    if channel.is_rotation() {
                        *value = unit.to_radians(*value);
                    }
                }
            }
            None => {
                for value in values.iter_mut() {
                    *value = unit.to_radians(*value);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_translation_not_converted() {
        let layout = ChannelLayout::default();
        let mut values = [10.0, 20.0, 30.0, 180.0, 90.0, 0.0];
        layout.convert("root", &mut values, AngleUnit::Degrees);

        assert_eq!(&values[..3], &[10.0, 20.0, 30.0]);
        assert!((values[3] - std::f32::consts::PI).abs() < 1e-6);
        assert!((values[4] - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_bone_channels_respected() {
        let layout =
            ChannelLayout::default().with_bone("slider", vec![DofChannel::Tx, DofChannel::Rz]);
        let mut values = [5.0, 180.0];
        layout.convert("slider", &mut values, AngleUnit::Degrees);
        assert_eq!(values[0], 5.0);
        assert!((values[1] - std::f32::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_bone_treated_as_angles() {
        let layout = ChannelLayout::default();
        let mut values = [180.0];
        layout.convert("elbow", &mut values, AngleUnit::Degrees);
        assert!((values[0] - std::f32::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn test_radians_untouched() {
        let layout = ChannelLayout::default();
        let mut values = [1.0, 2.0];
        layout.convert("elbow", &mut values, AngleUnit::Radians);
        assert_eq!(values, [1.0, 2.0]);
    }
}
