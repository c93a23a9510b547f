//! Acclaim AMC motion support
//!
//! An AMC file is a header followed by numbered frames; each frame holds
//! one line per animated segment with that segment's channel values.
//! [`parse_amc`] decodes it into a [`Motion`] whose rotation values are
//! already in radians.
//!
//! The channel kinds come from the skeleton, so the usual entry point is
//! [`AmcOptions::for_skeleton`]:
//!
//! ```rust,no_run
//! use mocap_amc::{AmcOptions, parse_amc_file};
//! use mocap_asf::parse_asf_file;
//!
//! let skeleton = parse_asf_file("subject.asf")?;
//! let options = AmcOptions::for_skeleton(&skeleton);
//! let motion = parse_amc_file("walk.amc", &options)?;
//! motion.validate_against(&options.layout)?;
//! println!("{} frames, {:.2}s", motion.frame_count(), motion.duration());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod layout;
pub mod motion;
pub mod parser;

pub use error::{AmcError, Result};
pub use layout::{ChannelLayout, ROOT_SEGMENT};
pub use motion::{BoneSample, Motion, MotionFrame, RootSample, SAMPLE_RATE};
pub use parser::{AmcOptions, MotionParser, parse_amc, parse_amc_file};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
