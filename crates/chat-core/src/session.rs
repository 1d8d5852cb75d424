//! Session controller — owns the conversation and the request lifecycle.
//!
//! One submission cycle runs Idle → Submitting → Idle:
//! 1. Stage: guard, append the user turn, clear input, mark in flight, build payload
//! 2. Dispatch: await the backend (the only suspension point)
//! 3. Resolve: append the reply, or the fallback reply plus `last_error`
//!
//! State lives behind `Rc<RefCell<_>>` and is never borrowed across the
//! dispatch await, so the UI can read it while a request is in flight.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use chat_types::{
    config::{ChatConfig, ModelOption},
    event::SessionEvent,
    message::{Author, Turn},
    ChatError, FailureKind, Result,
};

use crate::event_bus::EventBus;
use crate::ports::{ChatBackend, ChatPayload, ChatReply};
use crate::request::RequestBuilder;

/// Last known reachability of the backend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BackendStatus {
    Unknown,
    Online { models: Vec<String> },
    Offline(String),
}

impl BackendStatus {
    pub fn is_online(&self) -> bool {
        matches!(self, BackendStatus::Online { .. })
    }
}

/// Why a submission was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    InFlight,
    EmptyInput,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Nothing happened; state is untouched
    Rejected(RejectReason),
    /// The reply was appended to the history
    Completed { request_id: u64 },
    /// The fallback reply was appended and `last_error` set
    Failed { request_id: u64, error: ChatError },
}

/// Error as shown to the user: a fixed notice plus the technical detail
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorNotice {
    pub kind: FailureKind,
    pub message: String,
    pub detail: String,
}

/// Read-only projection of the session for the display layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub history: Vec<Turn>,
    pub pending_input: String,
    pub request_in_flight: bool,
    pub last_error: Option<ErrorNotice>,
    pub selected_model: String,
    pub models: Vec<ModelOption>,
    pub backend_status: BackendStatus,
}

struct SessionState {
    history: Vec<Turn>,
    pending_input: String,
    request_in_flight: bool,
    last_error: Option<ChatError>,
    selected_model: String,
    backend_status: BackendStatus,
    request_counter: u64,
}

/// Owns the session state and its mutation API. Clone-cheap; clones share
/// the same session.
#[derive(Clone)]
pub struct SessionController {
    state: Rc<RefCell<SessionState>>,
    config: Rc<ChatConfig>,
    builder: Rc<RequestBuilder>,
    backend: Rc<dyn ChatBackend>,
    event_bus: EventBus,
}

impl SessionController {
    pub fn new(
        config: ChatConfig,
        backend: Rc<dyn ChatBackend>,
        event_bus: EventBus,
    ) -> Result<Self> {
        config.validate()?;

        let state = SessionState {
            history: Vec::new(),
            pending_input: String::new(),
            request_in_flight: false,
            last_error: None,
            selected_model: config.default_model.clone(),
            backend_status: BackendStatus::Unknown,
            request_counter: 0,
        };

        Ok(Self {
            state: Rc::new(RefCell::new(state)),
            builder: Rc::new(RequestBuilder::new(&config.system_prompt)),
            config: Rc::new(config),
            backend,
            event_bus,
        })
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub fn update_pending_input(&self, text: impl Into<String>) {
        self.state.borrow_mut().pending_input = text.into();
    }

    /// Change the target model. Returns `Ok(false)` without touching state
    /// while a request is in flight.
    pub fn select_model(&self, model_id: &str) -> Result<bool> {
        if !self.config.is_allowed(model_id) {
            return Err(ChatError::UnknownModel(model_id.to_string()));
        }

        {
            let mut state = self.state.borrow_mut();
            if state.request_in_flight {
                log::debug!("Model change to {} ignored: request in flight", model_id);
                return Ok(false);
            }
            if state.selected_model == model_id {
                return Ok(true);
            }
            state.selected_model = model_id.to_string();
        }

        log::info!("Model selected: {}", model_id);
        self.event_bus.emit(SessionEvent::ModelSelected {
            model: model_id.to_string(),
        });
        Ok(true)
    }

    pub fn dismiss_error(&self) {
        self.state.borrow_mut().last_error = None;
    }

    /// Submit the pending input.
    ///
    /// Ignored while a request is in flight or when the trimmed input is
    /// empty. Otherwise always returns to Idle, with either the reply or
    /// the fallback reply appended.
    pub async fn submit(&self) -> SubmitOutcome {
        let (request_id, payload) = match self.stage() {
            Ok(staged) => staged,
            Err(reason) => {
                log::debug!("Submission ignored: {:?}", reason);
                return SubmitOutcome::Rejected(reason);
            }
        };

        log::info!(
            "Request #{} dispatched to {} (model {})",
            request_id,
            self.backend.backend_name(),
            payload.model
        );
        self.event_bus.emit(SessionEvent::RequestStarted {
            request_id,
            model: payload.model.clone(),
        });

        let result = self.backend.send_chat(&payload).await;
        self.resolve(request_id, result)
    }

    fn stage(&self) -> std::result::Result<(u64, ChatPayload), RejectReason> {
        let mut state = self.state.borrow_mut();
        if state.request_in_flight {
            return Err(RejectReason::InFlight);
        }

        let utterance = state.pending_input.trim().to_string();
        if utterance.is_empty() {
            return Err(RejectReason::EmptyInput);
        }

        let prior = state.history.len();
        state.history.push(Turn::user(utterance.clone()));
        state.pending_input.clear();
        state.request_in_flight = true;
        state.last_error = None;
        state.request_counter += 1;
        let request_id = state.request_counter;

        let payload = self.builder.build(
            &state.history[..prior],
            &utterance,
            &state.selected_model,
            &self.config.options,
        );
        drop(state);

        self.event_bus.emit(SessionEvent::TurnAppended {
            index: prior,
            author: Author::User,
        });
        Ok((request_id, payload))
    }

    fn resolve(&self, request_id: u64, result: Result<ChatReply>) -> SubmitOutcome {
        let mut state = self.state.borrow_mut();
        let index = state.history.len();

        let outcome = match result {
            Ok(reply) => {
                log::info!(
                    "Request #{} completed ({} chars, {:?}ns)",
                    request_id,
                    reply.content.len(),
                    reply.total_duration
                );
                state.history.push(Turn::assistant(reply.content));
                SubmitOutcome::Completed { request_id }
            }
            Err(error) => {
                log::warn!("Request #{} failed: {}", request_id, error);
                state.last_error = Some(error.clone());
                state.history.push(Turn::assistant(&self.config.fallback_reply));
                SubmitOutcome::Failed { request_id, error }
            }
        };
        state.request_in_flight = false;
        drop(state);

        self.event_bus.emit(SessionEvent::TurnAppended {
            index,
            author: Author::Assistant,
        });
        match &outcome {
            SubmitOutcome::Failed { error, .. } => {
                self.event_bus.emit(SessionEvent::RequestFailed {
                    request_id,
                    message: error.to_string(),
                });
            }
            _ => {
                self.event_bus
                    .emit(SessionEvent::RequestSucceeded { request_id });
            }
        }
        outcome
    }

    /// Ask the backend which models it has installed. Leaves the
    /// conversation untouched.
    pub async fn probe_backend(&self) -> BackendStatus {
        let status = match self.backend.ping().await {
            Ok(health) => {
                log::info!(
                    "Backend {} online, {} model(s) installed",
                    self.backend.backend_name(),
                    health.models.len()
                );
                BackendStatus::Online {
                    models: health.models,
                }
            }
            Err(e) => {
                log::warn!("Backend {} unreachable: {}", self.backend.backend_name(), e);
                BackendStatus::Offline(e.to_string())
            }
        };

        self.state.borrow_mut().backend_status = status.clone();
        self.event_bus.emit(SessionEvent::BackendStatusChanged {
            online: status.is_online(),
        });
        status
    }

    pub fn is_busy(&self) -> bool {
        self.state.borrow().request_in_flight
    }

    pub fn view(&self) -> SessionView {
        let state = self.state.borrow();
        SessionView {
            history: state.history.clone(),
            pending_input: state.pending_input.clone(),
            request_in_flight: state.request_in_flight,
            last_error: state.last_error.as_ref().map(|e| ErrorNotice {
                kind: e.kind(),
                message: self.config.error_notice.clone(),
                detail: e.to_string(),
            }),
            selected_model: state.selected_model.clone(),
            models: self.config.models.clone(),
            backend_status: state.backend_status.clone(),
        }
    }
}
