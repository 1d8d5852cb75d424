//! Port traits — the hexagonal architecture boundary.
//!
//! Defined here in `chat-core` (pure Rust); the HTTP implementation lives
//! in `chat-platform`. The core never imports platform code.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use chat_types::{config::GenerationOptions, message::WireMessage, Result};

/// Request body sent to the inference backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatPayload {
    pub messages: Vec<WireMessage>,
    pub model: String,
    pub stream: bool,
    pub options: GenerationOptions,
}

/// Validated, complete (non-streaming) reply
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub content: String,
    pub model: Option<String>,
    pub created_at: Option<String>,
    pub done: bool,
    /// Nanoseconds, as reported by the backend
    pub total_duration: Option<u64>,
}

/// Result of a backend health probe
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BackendHealth {
    /// Names of the models installed on the backend
    pub models: Vec<String>,
}

#[async_trait(?Send)]
pub trait ChatBackend {
    /// Full-response chat call. Non-success status, transport errors and
    /// timeouts come back as `Err`; a body without content as
    /// `ChatError::MalformedResponse`.
    async fn send_chat(&self, payload: &ChatPayload) -> Result<ChatReply>;

    /// Health check listing installed models
    async fn ping(&self) -> Result<BackendHealth>;

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}
