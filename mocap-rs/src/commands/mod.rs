//! Command implementations for each file format

pub mod motion;
pub mod pose;
pub mod skeleton;
pub mod spline;
