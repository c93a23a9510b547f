use std::io;
use thiserror::Error;

/// Error types for ASF skeleton parsing
#[derive(Error, Debug)]
pub enum AsfError {
    /// I/O Error during reading
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A numeric field could not be parsed
    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },

    /// The file ended inside a section that requires a terminator
    #[error("unexpected end of file inside {section}")]
    UnexpectedEof { section: &'static str },

    /// The hierarchy references a bone that was never declared
    #[error("line {line}: unknown bone '{name}'")]
    UnknownBone { line: usize, name: String },

    /// Two bone records share the same name
    #[error("duplicate bone '{name}'")]
    DuplicateBone { name: String },

    /// A bone was attached to more than one parent
    #[error("line {line}: bone '{name}' already has a parent")]
    MultipleParents { line: usize, name: String },

    /// A required field is missing from a bone record
    #[error("bone #{bone}: missing field '{field}'")]
    MissingField { bone: u32, field: &'static str },

    /// Any other malformed construct
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
}

impl AsfError {
    pub(crate) fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }
}

/// Result type using AsfError
pub type Result<T> = std::result::Result<T, AsfError>;
