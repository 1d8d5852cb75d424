use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ChatError;

/// Top-level client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub backend: BackendConfig,
    /// Allow-list of selectable models, in display order
    pub models: Vec<ModelOption>,
    pub default_model: String,
    pub system_prompt: String,
    pub options: GenerationOptions,
    /// Assistant turn appended when a request fails
    pub fallback_reply: String,
    /// User-facing notice shown for a failed request
    pub error_notice: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            models: default_models(),
            default_model: "vinallama/vinallama-7b".to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            options: GenerationOptions::default(),
            fallback_reply: DEFAULT_FALLBACK_REPLY.to_string(),
            error_notice: DEFAULT_ERROR_NOTICE.to_string(),
        }
    }
}

impl ChatConfig {
    /// Parse a JSON override. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let config: ChatConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.backend.base_url.trim().is_empty() {
            return Err(ChatError::Config("backend.base_url is empty".to_string()));
        }
        if self.models.is_empty() {
            return Err(ChatError::Config("model allow-list is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for model in &self.models {
            if model.id.trim().is_empty() {
                return Err(ChatError::Config("model id is empty".to_string()));
            }
            if !seen.insert(model.id.as_str()) {
                return Err(ChatError::Config(format!("duplicate model id: {}", model.id)));
            }
        }

        if !self.is_allowed(&self.default_model) {
            return Err(ChatError::Config(format!(
                "default model {} is not in the allow-list",
                self.default_model
            )));
        }
        if self.system_prompt.trim().is_empty() {
            return Err(ChatError::Config("system_prompt is empty".to_string()));
        }
        if self.fallback_reply.trim().is_empty() {
            return Err(ChatError::Config("fallback_reply is empty".to_string()));
        }
        self.options.validate()
    }

    pub fn is_allowed(&self, model_id: &str) -> bool {
        self.models.iter().any(|m| m.id == model_id)
    }

    pub fn model_label<'a>(&'a self, model_id: &'a str) -> &'a str {
        self.models
            .iter()
            .find(|m| m.id == model_id)
            .map(|m| m.label.as_str())
            .unwrap_or(model_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    /// `None` waits for the backend indefinitely
    pub request_timeout_ms: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout_ms: Some(60_000),
        }
    }
}

/// A selectable model with its human-readable label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelOption {
    pub id: String,
    pub label: String,
}

impl ModelOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Generation parameters sent with every request. Fixed, not user-tunable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    pub temperature: f32,
    /// Context window in tokens; the backend calls it `num_ctx`
    #[serde(rename = "num_ctx", alias = "context_window")]
    pub context_window: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            context_window: 2048,
        }
    }
}

impl GenerationOptions {
    fn validate(&self) -> crate::Result<()> {
        if !self.temperature.is_finite() || !(0.0..=2.0).contains(&self.temperature) {
            return Err(ChatError::Config(format!(
                "temperature {} outside 0.0..=2.0",
                self.temperature
            )));
        }
        if self.context_window == 0 {
            return Err(ChatError::Config("context_window must be positive".to_string()));
        }
        Ok(())
    }
}

fn default_models() -> Vec<ModelOption> {
    vec![
        ModelOption::new("vinallama/vinallama-7b", "Vinallama 7B"),
        ModelOption::new("gemma:2b", "Gemma 2B"),
        ModelOption::new("mistral", "Mistral 7B"),
        ModelOption::new("openchat/openchat-3.5", "OpenChat 3.5"),
    ]
}

pub const DEFAULT_SYSTEM_PROMPT: &str =
    "Bạn là trợ lý AI nói tiếng Việt. Luôn trả lời bằng tiếng Việt với phong cách thân thiện, nhiệt tình.";

pub const DEFAULT_FALLBACK_REPLY: &str = "Xin lỗi, tôi gặp sự cố khi xử lý yêu cầu của bạn.";

pub const DEFAULT_ERROR_NOTICE: &str = "Không thể kết nối đến server. Vui lòng thử lại sau.";
