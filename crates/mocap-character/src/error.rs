use mocap_amc::AmcError;
use mocap_asf::AsfError;
use thiserror::Error;

/// Error types for strict character loading
#[derive(Error, Debug)]
pub enum CharacterError {
    /// The skeleton description could not be read or parsed
    #[error("skeleton: {0}")]
    Skeleton(#[from] AsfError),

    /// The motion stream could not be read, parsed or matched to the skeleton
    #[error("motion: {0}")]
    Motion(#[from] AmcError),

    /// The skeleton parsed but declares no bones
    #[error("skeleton declares no bones")]
    EmptySkeleton,
}

/// Result type using CharacterError
pub type Result<T> = std::result::Result<T, CharacterError>;
