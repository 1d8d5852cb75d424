use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChatError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Coarse classification used by the display layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// The backend call could not be completed
    Transport,
    /// The backend answered but without the expected content
    MalformedResponse,
    /// Caller error, never produced by a dispatched request
    InvalidRequest,
}

impl ChatError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ChatError::Network(_) | ChatError::Http { .. } | ChatError::Timeout(_) => {
                FailureKind::Transport
            }
            ChatError::MalformedResponse(_) | ChatError::Serialization(_) => {
                FailureKind::MalformedResponse
            }
            ChatError::UnknownModel(_) | ChatError::Config(_) => FailureKind::InvalidRequest,
        }
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(e: serde_json::Error) -> Self {
        ChatError::Serialization(e.to_string())
    }
}
