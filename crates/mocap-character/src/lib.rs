//! Motion-capture playback
//!
//! A [`Character`] owns a parsed skeleton and, optionally, a motion stream.
//! [`Character::advance`] steps the stream by wall-clock time and poses the
//! bones; [`Character::draw`] walks the posed tree and hands each bone's world
//! frame to a [`PoseVisitor`].
//!
//! # Example
//!
//! ```rust,no_run
//! use mocap_character::{Character, CharacterConfig};
//!
//! let mut character = Character::load("subject.asf", "walk.amc", CharacterConfig::default());
//! if !character.has_skeleton() {
//!     eprintln!("{:?}", character.load_errors());
//!     return;
//! }
//!
//! character.advance(0.5);
//! for (id, start, end) in character.joint_positions() {
//!     let bone = character.skeleton().bone(id).unwrap();
//!     println!("{}: {start} -> {end}", bone.name());
//! }
//! ```

pub mod character;
pub mod config;
pub mod error;
pub mod visitor;

pub use character::Character;
pub use config::CharacterConfig;
pub use error::{CharacterError, Result};
pub use visitor::{JointCollector, PoseVisitor};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
