use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Duplicate record: {0}")]
    Duplicate(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Storage unavailable: {0}")]
    Upstream(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
}

/// Coarse classification reported to callers alongside the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Duplicate,
    NotFound,
    Upstream,
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Validation(_) => ErrorKind::Validation,
            CoreError::Duplicate(_) => ErrorKind::Duplicate,
            CoreError::NotFound(_) => ErrorKind::NotFound,
            CoreError::Upstream(_) | CoreError::Io(_) | CoreError::Serde(_) => {
                ErrorKind::Upstream
            }
        }
    }

    pub fn is_duplicate(&self) -> bool {
        self.kind() == ErrorKind::Duplicate
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Validation => "ValidationError",
            ErrorKind::Duplicate => "DuplicateError",
            ErrorKind::NotFound => "NotFoundError",
            ErrorKind::Upstream => "UpstreamError",
        };
        f.write_str(label)
    }
}
