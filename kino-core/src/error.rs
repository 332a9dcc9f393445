use kino_model::ModelError;
use thiserror::Error;

/// Error taxonomy shared by the query engine, the progress reporter and the
/// remote client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KinoError {
    /// Malformed input from the caller. Never retried.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Transport failure, non-success status or malformed payload from a
    /// remote collaborator.
    #[error("Remote unavailable: {0}")]
    RemoteUnavailable(String),

    /// The remote collaborator has no matching resource.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}

impl KinoError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        KinoError::InvalidArgument(msg.into())
    }

    pub fn remote(msg: impl Into<String>) -> Self {
        KinoError::RemoteUnavailable(msg.into())
    }

    /// Whether a user-facing retry action makes sense for this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, KinoError::RemoteUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, KinoError>;
