use thiserror::Error;

use crate::api::ApiError;

/// Top-level error type for CLI command handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// A precondition on the local session is not met, e.g. running
    /// `analyze` before any resume has been uploaded.
    #[error("{0}")]
    Precondition(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Backend request failed: {0}")]
    Api(#[from] ApiError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
