//! WASM-target tests for chat-core.
//!
//! Drives the session controller with a mock backend under
//! wasm32-unknown-unknown via `wasm-pack test --node`.

#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use wasm_bindgen_test::*;

use chat_core::event_bus::EventBus;
use chat_core::ports::*;
use chat_core::request::RequestBuilder;
use chat_core::session::*;
use chat_types::config::*;
use chat_types::message::*;
use chat_types::ChatError;

struct EchoBackend {
    fail: bool,
    calls: RefCell<u32>,
}

#[async_trait(?Send)]
impl ChatBackend for EchoBackend {
    async fn send_chat(&self, payload: &ChatPayload) -> chat_types::Result<ChatReply> {
        *self.calls.borrow_mut() += 1;
        if self.fail {
            return Err(ChatError::Network("unreachable".to_string()));
        }
        Ok(ChatReply {
            content: format!("echo: {}", payload.messages[1].content),
            model: Some(payload.model.clone()),
            created_at: None,
            done: true,
            total_duration: None,
        })
    }

    async fn ping(&self) -> chat_types::Result<BackendHealth> {
        Ok(BackendHealth::default())
    }

    fn backend_name(&self) -> &str {
        "echo"
    }
}

fn controller(fail: bool) -> (SessionController, Rc<EchoBackend>) {
    let backend = Rc::new(EchoBackend {
        fail,
        calls: RefCell::new(0),
    });
    let controller =
        SessionController::new(ChatConfig::default(), backend.clone(), EventBus::new()).unwrap();
    (controller, backend)
}

#[wasm_bindgen_test]
fn builder_two_messages() {
    let payload = RequestBuilder::new("sys").build(
        &[Turn::user("old")],
        "new",
        "mistral",
        &GenerationOptions::default(),
    );
    assert_eq!(payload.messages.len(), 2);
    assert!(!payload.stream);
}

#[wasm_bindgen_test]
async fn submit_success() {
    let (controller, backend) = controller(false);
    controller.update_pending_input("hello");
    controller.submit().await;

    let view = controller.view();
    assert_eq!(view.history.len(), 2);
    assert_eq!(view.history[1].text, "echo: hello");
    assert_eq!(*backend.calls.borrow(), 1);
}

#[wasm_bindgen_test]
async fn submit_failure_appends_fallback() {
    let (controller, _backend) = controller(true);
    controller.update_pending_input("hello");
    controller.submit().await;

    let view = controller.view();
    assert_eq!(view.history[1].text, DEFAULT_FALLBACK_REPLY);
    assert!(view.last_error.is_some());
    assert!(!view.request_in_flight);
}

#[wasm_bindgen_test]
async fn submit_empty_does_not_dispatch() {
    let (controller, backend) = controller(false);
    controller.update_pending_input("   ");
    let outcome = controller.submit().await;

    assert_eq!(outcome, SubmitOutcome::Rejected(RejectReason::EmptyInput));
    assert_eq!(*backend.calls.borrow(), 0);
}
