use std::path::PathBuf;

use thiserror::Error;

/// Errors from reply computation.
///
/// A responder failure never surfaces to the visitor as an error state; the
/// session substitutes the profile's error reply and clears the loading flag.
#[derive(Debug, Error)]
pub enum ResponderError {
    #[error("reply computation failed: {0}")]
    Computation(String),
}

/// Errors related to loading a responder profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("profile not found at '{}'", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read profile '{path}': {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("failed to parse profile '{path}': {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("invalid profile: {0}")]
    Invalid(String),
}
