//! Bone arena and hierarchy

use glam::Vec3;
use std::collections::HashMap;

use crate::bone::{Bone, BoneId};
use crate::dof::{AxisOrder, DofChannel};
use crate::error::{AsfError, Result};
use crate::units::Units;

/// The `:root` section: how the root segment is animated and where it rests
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct RootSpec {
    /// Channel order of root values in each motion frame
    pub order: Vec<DofChannel>,
    pub axis: AxisOrder,
    pub position: Vec3,
    /// Rest orientation in radians
    pub orientation: Vec3,
}

impl Default for RootSpec {
    fn default() -> Self {
        Self {
            order: vec![
                DofChannel::Tx,
                DofChannel::Ty,
                DofChannel::Tz,
                DofChannel::Rx,
                DofChannel::Ry,
                DofChannel::Rz,
            ],
            axis: AxisOrder::Xyz,
            position: Vec3::ZERO,
            orientation: Vec3::ZERO,
        }
    }
}

/// A parsed skeleton
///
/// Bones live in a flat arena. Each bone owns the ids of its children; the
/// bones attached directly to the root are listed in [`root_bones`](Self::root_bones).
/// The name index is a secondary lookup and never an ownership path.
#[derive(Debug, Clone, Default)]
pub struct Skeleton {
    pub name: String,
    pub version: String,
    pub units: Units,
    pub root: RootSpec,
    bones: Vec<Bone>,
    root_bones: Vec<BoneId>,
    by_name: HashMap<String, BoneId>,
}

impl Skeleton {
    pub fn new(units: Units, root: RootSpec) -> Self {
        Self {
            units,
            root,
            ..Default::default()
        }
    }

    /// Add a bone to the arena. It is not attached to anything yet.
    pub fn add_bone(&mut self, bone: Bone) -> Result<BoneId> {
        if self.by_name.contains_key(bone.name()) {
            return Err(AsfError::DuplicateBone {
                name: bone.name().to_string(),
            });
        }
        let id = BoneId(self.bones.len());
        self.by_name.insert(bone.name().to_string(), id);
        self.bones.push(bone);
        Ok(id)
    }

    /// Attach `child` under `parent`, or to the root when `parent` is `None`
    ///
    /// `line` is only used for error reporting. Ids that do not belong to
    /// this skeleton are rejected.
    pub fn attach(&mut self, parent: Option<BoneId>, child: BoneId, line: usize) -> Result<()> {
        let Some(bone) = self.bone(child) else {
            return Err(AsfError::syntax(line, format!("no bone with id {}", child.0)));
        };
        if let Some(parent) = parent
            && self.bone(parent).is_none()
        {
            return Err(AsfError::syntax(line, format!("no bone with id {}", parent.0)));
        }
        let name = bone.name().to_string();
        if bone.parent.is_some() || self.root_bones.contains(&child) || Some(child) == parent {
            return Err(AsfError::MultipleParents { line, name });
        }

        let Some(parent) = parent else {
            self.root_bones.push(child);
            return Ok(());
        };

        // Attaching an ancestor below its own descendant would close a loop
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return Err(AsfError::syntax(
                    line,
                    format!("attaching '{name}' creates a cycle"),
                ));
            }
            cursor = self.bone(id).and_then(Bone::parent);
        }

        if let Some(bone) = self.bone_mut(child) {
            bone.parent = Some(parent);
        }
        if let Some(bone) = self.bone_mut(parent) {
            bone.children.push(child);
        }
        Ok(())
    }

    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    pub fn bones_mut(&mut self) -> &mut [Bone] {
        &mut self.bones
    }

    pub fn bone(&self, id: BoneId) -> Option<&Bone> {
        self.bones.get(id.0)
    }

    pub fn bone_mut(&mut self, id: BoneId) -> Option<&mut Bone> {
        self.bones.get_mut(id.0)
    }

    pub fn bone_id(&self, name: &str) -> Option<BoneId> {
        self.by_name.get(name).copied()
    }

    pub fn find(&self, name: &str) -> Option<&Bone> {
        self.bone_id(name).and_then(|id| self.bone(id))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Bone> {
        let id = self.bone_id(name)?;
        self.bone_mut(id)
    }

    /// Bones attached directly to the root, in hierarchy order
    pub fn root_bones(&self) -> &[BoneId] {
        &self.root_bones
    }

    pub fn children(&self, id: BoneId) -> &[BoneId] {
        match self.bone(id) {
            Some(bone) => bone.children(),
            None => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// Total number of animated channels over all bones
    pub fn dof_count(&self) -> usize {
        self.bones.iter().map(|b| b.channels().len()).sum()
    }

    /// Bone names in arena order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bones.iter().map(Bone::name)
    }

    /// Pre-order walk of the tree starting at the root bones
    pub fn depth_first(&self) -> Vec<BoneId> {
        let mut order = Vec::with_capacity(self.bones.len());
        let mut stack: Vec<BoneId> = self.root_bones.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        order
    }

    /// Bones that were declared but never attached to the hierarchy
    pub fn detached(&self) -> Vec<BoneId> {
        (0..self.bones.len())
            .map(BoneId)
            .filter(|id| {
                self.bone(*id).is_some_and(|bone| bone.parent.is_none())
                    && !self.root_bones.contains(id)
            })
            .collect()
    }

    /// Put every bone back in its rest pose
    pub fn reset_pose(&mut self) {
        for bone in &mut self.bones {
            bone.reset_pose();
        }
    }
}
