//! Request builder: turns a user utterance into a backend payload.

use chat_types::{
    config::GenerationOptions,
    message::{Turn, WireMessage},
};

use crate::ports::ChatPayload;

/// Composes outgoing payloads around a fixed system preamble.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    system_prompt: String,
}

impl RequestBuilder {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Build the payload for `utterance`.
    ///
    /// Prior turns are not replayed: every request carries exactly the
    /// system preamble and the new user message, so the backend sees each
    /// exchange in isolation. `history` is accepted so callers don't need
    /// to know that.
    pub fn build(
        &self,
        _history: &[Turn],
        utterance: &str,
        model: &str,
        options: &GenerationOptions,
    ) -> ChatPayload {
        ChatPayload {
            messages: vec![
                WireMessage::system(&self.system_prompt),
                WireMessage::user(utterance),
            ],
            model: model.to_string(),
            stream: false,
            options: *options,
        }
    }
}
