//! Configuration loading from the host page.
//!
//! The page may embed an override as
//! `<script type="application/json" id="chat-config">{...}</script>`.
//! Anything missing or invalid falls back to `ChatConfig::default()`.

use chat_types::config::ChatConfig;

pub const CONFIG_ELEMENT_ID: &str = "chat-config";

pub fn load_config(document: &web_sys::Document) -> ChatConfig {
    match document.get_element_by_id(CONFIG_ELEMENT_ID) {
        Some(element) => resolve_config(&element.text_content().unwrap_or_default()),
        None => {
            log::info!("No #{} element, using default config", CONFIG_ELEMENT_ID);
            ChatConfig::default()
        }
    }
}

/// Parse an embedded override, falling back to defaults on any error.
pub fn resolve_config(json: &str) -> ChatConfig {
    if json.trim().is_empty() {
        return ChatConfig::default();
    }

    match ChatConfig::from_json(json) {
        Ok(config) => {
            log::info!(
                "Config loaded: backend {}, {} model(s)",
                config.backend.base_url,
                config.models.len()
            );
            config
        }
        Err(e) => {
            log::error!("Ignoring #{}: {}", CONFIG_ELEMENT_ID, e);
            ChatConfig::default()
        }
    }
}
