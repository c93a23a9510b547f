//! Math helpers for motion-capture viewers
//!
//! - [`spline`]: piecewise cubic Hermite curves ([`Spline3`])
//! - [`camera`]: orbit camera and perspective projection matrices
//!
//! # Example
//!
//! ```rust
//! use glam::Vec3;
//! use mocap_utils::{Spline3, SplinePoint3};
//!
//! let spline = Spline3::new(vec![
//!     SplinePoint3::new(0.0, Vec3::ZERO, Vec3::ZERO),
//!     SplinePoint3::new(1.0, Vec3::X, Vec3::ZERO),
//! ])?;
//! assert_eq!(spline.value(0.5), Vec3::new(0.5, 0.0, 0.0));
//! # Ok::<(), mocap_utils::SplineError>(())
//! ```

pub mod camera;
pub mod error;
pub mod spline;

pub use camera::{OrbitCamera, Perspective};
pub use error::{Result, SplineError};
pub use spline::{Spline3, SplinePoint3};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
