//! Skeleton bones and their local transforms
//!
//! A bone's shape (length, direction, reference axis and limits) is fixed once
//! parsed. Its pose is the single mutable part and changes once per applied
//! motion frame.

use glam::{Mat4, Vec3};
use log::warn;

use crate::dof::{AxisOrder, DofChannel, RotationBounds};

/// Index of a bone inside its [`Skeleton`](crate::Skeleton) arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct BoneId(pub usize);

impl BoneId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A joint plus the segment that extends from it
#[derive(Debug, Clone)]
pub struct Bone {
    id: u32,
    name: String,
    length: f32,
    direction: Vec3,
    axis: Vec3,
    axis_order: AxisOrder,
    channels: Vec<DofChannel>,
    rotation_bounds: RotationBounds,
    // C and C^-1, fixed at construction
    axis_rotation: Mat4,
    axis_rotation_inv: Mat4,
    pub(crate) parent: Option<BoneId>,
    pub(crate) children: Vec<BoneId>,
    current_rotation: Vec3,
}

impl Bone {
    /// Create a bone from already-converted values
    ///
    /// `direction` is normalized here; `axis` and the bounds must be radians.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u32,
        name: impl Into<String>,
        length: f32,
        direction: Vec3,
        axis: Vec3,
        axis_order: AxisOrder,
        channels: Vec<DofChannel>,
        rotation_bounds: RotationBounds,
    ) -> Self {
        let axis_rotation = axis_order.rotation(axis);
        Self {
            id,
            name: name.into(),
            length: length.max(0.0),
            direction: direction.normalize_or_zero(),
            axis,
            axis_order,
            channels,
            rotation_bounds,
            axis_rotation,
            // Pure rotation, so the transpose is the inverse
            axis_rotation_inv: axis_rotation.transpose(),
            parent: None,
            children: Vec::new(),
            current_rotation: Vec3::ZERO,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    /// Unit direction of the bone in its reference frame
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Reference orientation angles in radians
    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    pub fn axis_order(&self) -> AxisOrder {
        self.axis_order
    }

    /// Animated channels in the order motion values are given
    pub fn channels(&self) -> &[DofChannel] {
        &self.channels
    }

    pub fn rotation_bounds(&self) -> &RotationBounds {
        &self.rotation_bounds
    }

    pub fn parent(&self) -> Option<BoneId> {
        self.parent
    }

    pub fn children(&self) -> &[BoneId] {
        &self.children
    }

    /// Vector from the joint to the bone's far end, `length * direction`
    ///
    /// The bone starts at the origin of its local frame. This does not depend
    /// on the pose.
    pub fn bone_vector(&self) -> Vec3 {
        self.length * self.direction
    }

    /// Current per-axis joint angles in radians (X, Y, Z)
    pub fn current_rotation(&self) -> Vec3 {
        self.current_rotation
    }

    /// Reference rotation `C` built from the `axis` entry
    pub fn axis_rotation(&self) -> Mat4 {
        self.axis_rotation
    }

    /// Pose rotation `M = Rz * Ry * Rx` in the bone's own dof axes
    pub fn pose_rotation(&self) -> Mat4 {
        AxisOrder::Xyz.rotation(self.current_rotation)
    }

    /// Joint rotation expressed in the parent frame, `C * M * C^-1`
    pub fn current_local_rotation(&self) -> Mat4 {
        self.axis_rotation * self.pose_rotation() * self.axis_rotation_inv
    }

    /// Frame that children attach to: the joint rotation followed by a
    /// translation to the bone's end point
    pub fn local_transform(&self) -> Mat4 {
        self.local_transform_scaled(1.0)
    }

    /// Same as [`local_transform`](Self::local_transform) with the bone vector
    /// multiplied by `scale`
    pub fn local_transform_scaled(&self, scale: f32) -> Mat4 {
        self.current_local_rotation() * Mat4::from_translation(self.bone_vector() * scale)
    }

    /// Set the pose from one motion sample
    ///
    /// Values are matched to [`channels`](Self::channels) in order. Only the
    /// rotation channels are kept; each is clamped to the joint's bounds.
    /// Missing values count as zero.
    pub fn set_pose(&mut self, values: &[f32]) {
        if values.len() > self.channels.len() {
            warn!(
                "bone '{}': {} values for {} channels, ignoring the extra ones",
                self.name,
                values.len(),
                self.channels.len()
            );
        }

        let mut angles = Vec3::ZERO;
        for (channel, value) in self.channels.iter().zip(values) {
            if let Some(axis) = channel.rotation_axis() {
                angles[axis] = *value;
            }
        }
        self.current_rotation = self.rotation_bounds.clamp_angles(angles);
    }

    /// Return to the rest pose (zero joint rotation)
    pub fn reset_pose(&mut self) {
        self.current_rotation = Vec3::ZERO;
    }
}
