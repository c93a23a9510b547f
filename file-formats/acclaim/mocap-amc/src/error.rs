use std::io;
use thiserror::Error;

/// Error types for AMC motion parsing and validation
#[derive(Error, Debug)]
pub enum AmcError {
    /// I/O Error during reading
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stream holds no frames
    #[error("motion stream contains no frames")]
    Empty,

    /// A frame number or channel value could not be parsed
    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },

    /// A bone sample appeared before the first frame number
    #[error("line {line}: sample before the first frame number")]
    SampleBeforeFrame { line: usize },

    /// A frame names a bone the skeleton does not declare
    #[error("frame {frame}: unknown bone '{name}'")]
    UnknownBone { frame: u32, name: String },

    /// A bone sample has the wrong number of values for its channels
    #[error("frame {frame}: bone '{bone}' expects {expected} values, found {found}")]
    ChannelMismatch {
        frame: u32,
        bone: String,
        expected: usize,
        found: usize,
    },
}

/// Result type using AmcError
pub type Result<T> = std::result::Result<T, AmcError>;
