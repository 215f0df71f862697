//! Typed failures returned by the engine. The HTTP boundary maps them to
//! status codes; the engine itself never logs or writes to a transport.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Input failed structural validation (bad pip values, duplicates, empty fields).
    #[error("malformed input: {0}")]
    MalformedInput(String),
    /// The table cannot be a single open trail of played bones.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
    #[error("internal error: {0}")]
    Internal(String),
}

/// Coarse classification used when translating errors to responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Client,
    Server,
}

impl EngineError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        EngineError::MalformedInput(msg.into())
    }

    pub fn invalid_layout(msg: impl Into<String>) -> Self {
        EngineError::InvalidLayout(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::MalformedInput(_) | EngineError::InvalidLayout(_) => ErrorKind::Client,
            EngineError::Internal(_) => ErrorKind::Server,
        }
    }

    /// Short label for log fields.
    pub fn label(&self) -> &'static str {
        match self {
            EngineError::MalformedInput(_) => "malformed_input",
            EngineError::InvalidLayout(_) => "invalid_layout",
            EngineError::Internal(_) => "internal",
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
