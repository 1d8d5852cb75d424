//! WASM-target tests for chat-platform (Node.js runtime).
//!
//! Covers URL construction and the timeout wrapper under
//! wasm32-unknown-unknown via `wasm-pack test --node`. Real HTTP
//! round-trips need a running backend and are not exercised here.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use chat_core::ports::ChatBackend;
use chat_platform::llm::http::with_timeout;
use chat_platform::llm::HttpChatBackend;
use chat_types::config::BackendConfig;
use chat_types::ChatError;

fn backend(base_url: &str, timeout: Option<u64>) -> HttpChatBackend {
    HttpChatBackend::new(BackendConfig {
        base_url: base_url.to_string(),
        request_timeout_ms: timeout,
    })
}

#[wasm_bindgen_test]
fn urls_from_base() {
    let backend = backend("http://localhost:8000", Some(1000));
    assert_eq!(backend.chat_url(), "http://localhost:8000/chat");
    assert_eq!(backend.ping_url(), "http://localhost:8000/ping");
    assert_eq!(backend.timeout_ms(), Some(1000));
}

#[wasm_bindgen_test]
fn trailing_slash_is_dropped() {
    let backend = backend("http://example.test/api/", None);
    assert_eq!(backend.chat_url(), "http://example.test/api/chat");
    assert_eq!(backend.backend_name(), "http://example.test/api");
}

#[wasm_bindgen_test]
async fn timeout_fires_on_stalled_call() {
    let result: chat_types::Result<()> =
        with_timeout(futures::future::pending(), Some(20)).await;
    assert_eq!(result, Err(ChatError::Timeout(20)));
}

#[wasm_bindgen_test]
async fn ready_result_beats_timer() {
    let result = with_timeout(async { Ok(7) }, Some(5_000)).await;
    assert_eq!(result, Ok(7));
}

#[wasm_bindgen_test]
async fn no_timeout_passes_through() {
    let result: chat_types::Result<u8> =
        with_timeout(async { Err(ChatError::Network("down".to_string())) }, None).await;
    assert_eq!(result, Err(ChatError::Network("down".to_string())));
}
