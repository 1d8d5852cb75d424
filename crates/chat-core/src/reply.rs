//! Decoding of backend replies.
//!
//! The backend answers `{message: {role, content}, model, created_at, done,
//! total_duration}`. Only `message.content` is required; anything else
//! missing is tolerated.

use serde::Deserialize;

use chat_types::{ChatError, Result};

use crate::ports::{BackendHealth, ChatReply};

#[derive(Deserialize)]
struct ApiReply {
    message: Option<ApiMessage>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    done: Option<bool>,
    #[serde(default)]
    total_duration: Option<u64>,
}

#[derive(Deserialize)]
struct ApiMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiPing {
    #[serde(default)]
    models: Vec<ApiModel>,
}

#[derive(Deserialize)]
struct ApiModel {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    model: Option<String>,
}

/// Decode and validate a chat reply body.
pub fn decode_reply(body: &str) -> Result<ChatReply> {
    let api: ApiReply = serde_json::from_str(body)
        .map_err(|e| ChatError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    let message = api
        .message
        .ok_or_else(|| ChatError::MalformedResponse("missing `message`".to_string()))?;
    let content = message
        .content
        .ok_or_else(|| ChatError::MalformedResponse("missing `message.content`".to_string()))?;

    if content.trim().is_empty() {
        return Err(ChatError::MalformedResponse(
            "empty `message.content`".to_string(),
        ));
    }

    Ok(ChatReply {
        content,
        model: api.model,
        created_at: api.created_at,
        done: api.done.unwrap_or(true),
        total_duration: api.total_duration,
    })
}

/// Decode a health probe body into the list of installed model names.
pub fn decode_ping(body: &str) -> Result<BackendHealth> {
    let api: ApiPing = serde_json::from_str(body)
        .map_err(|e| ChatError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    Ok(BackendHealth {
        models: api
            .models
            .into_iter()
            .filter_map(|m| m.name.or(m.model))
            .collect(),
    })
}
