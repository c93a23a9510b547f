//! Acclaim ASF skeleton support
//!
//! This crate reads ASF skeleton descriptions (as published with the CMU
//! motion-capture database) into a [`Skeleton`]: a flat arena of [`Bone`]s
//! linked into a tree, with a name index on the side.
//!
//! Each bone carries its static shape plus a mutable pose, and exposes the
//! axis-conjugated local transform used for forward kinematics.
//!
//! # Example
//!
//! ```rust,no_run
//! use mocap_asf::parse_asf_file;
//!
//! let skeleton = parse_asf_file("subject.asf")?;
//! for id in skeleton.root_bones() {
//!     let bone = skeleton.bone(*id).unwrap();
//!     println!("{} -> {:?}", bone.name(), bone.bone_vector());
//! }
//! # Ok::<(), mocap_asf::AsfError>(())
//! ```

pub mod bone;
pub mod dof;
pub mod error;
pub mod parser;
mod reader;
pub mod skeleton;
pub mod units;

pub use bone::{Bone, BoneId};
pub use dof::{AxisOrder, DofChannel, RotationBounds};
pub use error::{AsfError, Result};
pub use parser::{AsfOptions, AsfParser, ROOT_NAME, parse_asf, parse_asf_file};
pub use skeleton::{RootSpec, Skeleton};
pub use units::{AngleUnit, Units};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
