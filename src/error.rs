// error.rs
// Error kinds surfaced to the presentation layer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DebtError {
    /// Rejected input: empty name, non-positive amount, short password, bad month index.
    #[error("validation error: {0}")]
    Validation(String),

    #[error("debt not found: {0}")]
    NotFound(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    /// The session gate is closed; log in first.
    #[error("session is locked")]
    Locked,

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),

    #[error("document error: {0}")]
    Document(#[from] serde_json::Error),
}

impl DebtError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        DebtError::Validation(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, DebtError>;
