use thiserror::Error;

use crate::utils::AppError;

/// Server lifecycle errors (startup and shutdown)
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Initialization failed: {0}")]
    App(#[from] AppError),
}

/// Result alias for server lifecycle operations
pub type Result<T> = std::result::Result<T, ServerError>;
