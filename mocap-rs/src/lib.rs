//! mocap-rs library
//!
//! The command implementations behind the `mocap-rs` binary.

pub mod cli;
pub mod commands;
pub mod utils;
