//! HTTP chat backend adapter.
//!
//! Speaks the inference service's full-response protocol:
//! `POST {base}/chat` for completions and `GET {base}/ping` for health.
//! Uses browser `fetch()` via gloo-net for WASM compatibility.

use std::future::Future;

use async_trait::async_trait;
use futures::future::{select, Either};
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;

use chat_core::ports::*;
use chat_core::reply::{decode_ping, decode_reply};
use chat_types::{config::BackendConfig, ChatError, Result};

pub struct HttpChatBackend {
    base_url: String,
    timeout_ms: Option<u64>,
}

impl HttpChatBackend {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_ms: config.request_timeout_ms,
        }
    }

    pub fn chat_url(&self) -> String {
        format!("{}/chat", self.base_url)
    }

    pub fn ping_url(&self) -> String {
        format!("{}/ping", self.base_url)
    }

    pub fn timeout_ms(&self) -> Option<u64> {
        self.timeout_ms
    }

    async fn post_chat(&self, payload: &ChatPayload) -> Result<ChatReply> {
        let response = Request::post(&self.chat_url())
            .header("Content-Type", "application/json")
            .json(payload)
            .map_err(|e| ChatError::Serialization(e.to_string()))?
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let body = read_body(response).await?;
        decode_reply(&body)
    }

    async fn get_ping(&self) -> Result<BackendHealth> {
        let response = Request::get(&self.ping_url())
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let body = read_body(response).await?;
        decode_ping(&body)
    }
}

#[async_trait(?Send)]
impl ChatBackend for HttpChatBackend {
    async fn send_chat(&self, payload: &ChatPayload) -> Result<ChatReply> {
        with_timeout(self.post_chat(payload), self.timeout_ms).await
    }

    async fn ping(&self) -> Result<BackendHealth> {
        with_timeout(self.get_ping(), self.timeout_ms).await
    }

    fn backend_name(&self) -> &str {
        &self.base_url
    }
}

/// Resolve `fut`, or fail with `ChatError::Timeout` once `timeout_ms` elapses.
/// `None` waits forever.
pub async fn with_timeout<T, F>(fut: F, timeout_ms: Option<u64>) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let Some(ms) = timeout_ms else {
        return fut.await;
    };

    // setTimeout takes a u32 delay
    let timer = TimeoutFuture::new(ms.min(u32::MAX as u64) as u32);
    match select(Box::pin(fut), Box::pin(timer)).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => Err(ChatError::Timeout(ms)),
    }
}

async fn read_body(response: Response) -> Result<String> {
    if !response.ok() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        log::warn!("{} answered HTTP {}", response.url(), status);
        return Err(ChatError::Http { status, body });
    }

    response
        .text()
        .await
        .map_err(|e| ChatError::Network(e.to_string()))
}
