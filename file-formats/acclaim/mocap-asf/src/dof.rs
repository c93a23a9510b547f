//! Degrees of freedom and per-joint rotation limits

use glam::{Mat4, Vec3};
use std::fmt;
use std::str::FromStr;

/// A single animated channel of a joint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum DofChannel {
    Rx,
    Ry,
    Rz,
    Tx,
    Ty,
    Tz,
    /// Bone length channel
    L,
}

impl DofChannel {
    /// Index of the rotation axis (0 = X, 1 = Y, 2 = Z), if this is a rotation channel
    pub fn rotation_axis(self) -> Option<usize> {
        match self {
            Self::Rx => Some(0),
            Self::Ry => Some(1),
            Self::Rz => Some(2),
            _ => None,
        }
    }

    /// Index of the translation axis, if this is a translation channel
    pub fn translation_axis(self) -> Option<usize> {
        match self {
            Self::Tx => Some(0),
            Self::Ty => Some(1),
            Self::Tz => Some(2),
            _ => None,
        }
    }

    pub fn is_rotation(self) -> bool {
        self.rotation_axis().is_some()
    }
}

impl FromStr for DofChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rx" => Ok(Self::Rx),
            "ry" => Ok(Self::Ry),
            "rz" => Ok(Self::Rz),
            "tx" => Ok(Self::Tx),
            "ty" => Ok(Self::Ty),
            "tz" => Ok(Self::Tz),
            "l" => Ok(Self::L),
            other => Err(format!("unknown dof channel '{other}'")),
        }
    }
}

impl fmt::Display for DofChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Rx => "rx",
            Self::Ry => "ry",
            Self::Rz => "rz",
            Self::Tx => "tx",
            Self::Ty => "ty",
            Self::Tz => "tz",
            Self::L => "l",
        };
        f.write_str(name)
    }
}

/// Order in which the three Euler rotations of an `axis` entry are applied
///
/// `Xyz` rotates about X first, then Y, then Z, giving the matrix `Rz * Ry * Rx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisOrder {
    #[default]
    Xyz,
    Xzy,
    Yxz,
    Yzx,
    Zxy,
    Zyx,
}

impl AxisOrder {
    fn axes(self) -> [usize; 3] {
        match self {
            Self::Xyz => [0, 1, 2],
            Self::Xzy => [0, 2, 1],
            Self::Yxz => [1, 0, 2],
            Self::Yzx => [1, 2, 0],
            Self::Zxy => [2, 0, 1],
            Self::Zyx => [2, 1, 0],
        }
    }

    /// Build the rotation matrix for per-axis angles (radians) in this order
    pub fn rotation(self, angles: Vec3) -> Mat4 {
        self.axes()
            .iter()
            .fold(Mat4::IDENTITY, |m, &axis| axis_rotation(axis, angles[axis]) * m)
    }
}

fn axis_rotation(axis: usize, angle: f32) -> Mat4 {
    match axis {
        0 => Mat4::from_rotation_x(angle),
        1 => Mat4::from_rotation_y(angle),
        _ => Mat4::from_rotation_z(angle),
    }
}

impl FromStr for AxisOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "XYZ" => Ok(Self::Xyz),
            "XZY" => Ok(Self::Xzy),
            "YXZ" => Ok(Self::Yxz),
            "YZX" => Ok(Self::Yzx),
            "ZXY" => Ok(Self::Zxy),
            "ZYX" => Ok(Self::Zyx),
            other => Err(format!("unknown axis order '{other}'")),
        }
    }
}

impl fmt::Display for AxisOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Xyz => "XYZ",
            Self::Xzy => "XZY",
            Self::Yxz => "YXZ",
            Self::Yzx => "YZX",
            Self::Zxy => "ZXY",
            Self::Zyx => "ZYX",
        };
        f.write_str(name)
    }
}

/// Which rotation axes a joint can move about, and how far
///
/// Bounds of a disabled axis are ignored. All angles are radians.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct RotationBounds {
    pub dof_rx: bool,
    pub dof_ry: bool,
    pub dof_rz: bool,
    /// Number of enabled axes, always equal to the count of `dof_*` flags
    pub dofs: usize,
    pub min_rx: f32,
    pub max_rx: f32,
    pub min_ry: f32,
    pub max_ry: f32,
    pub min_rz: f32,
    pub max_rz: f32,
}

impl Default for RotationBounds {
    fn default() -> Self {
        Self::new()
    }
}

impl RotationBounds {
    /// No enabled axes, unlimited ranges
    pub fn new() -> Self {
        Self {
            dof_rx: false,
            dof_ry: false,
            dof_rz: false,
            dofs: 0,
            min_rx: f32::NEG_INFINITY,
            max_rx: f32::INFINITY,
            min_ry: f32::NEG_INFINITY,
            max_ry: f32::INFINITY,
            min_rz: f32::NEG_INFINITY,
            max_rz: f32::INFINITY,
        }
    }

    /// Enable or disable each rotation axis
    pub fn set_dof(&mut self, rx: bool, ry: bool, rz: bool) {
        self.dof_rx = rx;
        self.dof_ry = ry;
        self.dof_rz = rz;
        self.dofs = usize::from(rx) + usize::from(ry) + usize::from(rz);
    }

    /// Set the `[min, max]` range of axis 0 (X), 1 (Y) or 2 (Z)
    ///
    /// Out-of-range axis indices are ignored.
    pub fn set_range(&mut self, axis: usize, min: f32, max: f32) {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        match axis {
            0 => (self.min_rx, self.max_rx) = (min, max),
            1 => (self.min_ry, self.max_ry) = (min, max),
            2 => (self.min_rz, self.max_rz) = (min, max),
            _ => {}
        }
    }

    pub fn is_enabled(&self, axis: usize) -> bool {
        match axis {
            0 => self.dof_rx,
            1 => self.dof_ry,
            2 => self.dof_rz,
            _ => false,
        }
    }

    pub fn range(&self, axis: usize) -> (f32, f32) {
        match axis {
            0 => (self.min_rx, self.max_rx),
            1 => (self.min_ry, self.max_ry),
            _ => (self.min_rz, self.max_rz),
        }
    }

    /// Restrict an angle to this joint: zero on disabled axes, clamped otherwise
    pub fn clamp(&self, axis: usize, angle: f32) -> f32 {
        if !self.is_enabled(axis) {
            return 0.0;
        }
        let (min, max) = self.range(axis);
        angle.clamp(min, max)
    }

    pub fn clamp_angles(&self, angles: Vec3) -> Vec3 {
        Vec3::new(
            self.clamp(0, angles.x),
            self.clamp(1, angles.y),
            self.clamp(2, angles.z),
        )
    }
}
