//! Traversal hooks for renderers and other pose consumers

use glam::{Mat4, Vec3};
use mocap_asf::{Bone, BoneId};

/// Receives every bone of a posed skeleton in depth-first order
///
/// `start` is the world frame at the joint, already rotated by the bone's
/// pose. `end` is `start` translated along the bone, and is the frame the
/// children are attached to. Every `enter_bone` is matched by a
/// `leave_bone` once all of the bone's children have been visited.
pub trait PoseVisitor {
    fn enter_bone(&mut self, id: BoneId, bone: &Bone, start: &Mat4, end: &Mat4);

    fn leave_bone(&mut self, _id: BoneId, _bone: &Bone) {}
}

/// Collects world-space joint and end points
#[derive(Debug, Default)]
pub struct JointCollector {
    pub joints: Vec<(BoneId, Vec3, Vec3)>,
}

impl PoseVisitor for JointCollector {
    fn enter_bone(&mut self, id: BoneId, _bone: &Bone, start: &Mat4, end: &Mat4) {
        self.joints.push((
            id,
            start.transform_point3(Vec3::ZERO),
            end.transform_point3(Vec3::ZERO),
        ));
    }
}
