//! Root CLI structure for mocap-rs

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mocap-rs")]
#[command(about = "Command-line tools for Acclaim motion-capture files", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ASF skeleton operations
    Skeleton {
        #[command(subcommand)]
        command: crate::commands::skeleton::SkeletonCommands,
    },

    /// AMC motion operations
    Motion {
        #[command(subcommand)]
        command: crate::commands::motion::MotionCommands,
    },

    /// Play a motion on a skeleton and print the posed joints
    Pose(crate::commands::pose::PoseArgs),

    /// Hermite spline operations
    Spline {
        #[command(subcommand)]
        command: crate::commands::spline::SplineCommands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
