//! UI-level state that drives rendering.
//! A read-only projection of the session, refreshed each frame from
//! `SessionController::view()` plus status text derived from the EventBus.

use chat_core::session::{BackendStatus, ErrorNotice, SessionView};
use chat_types::{config::ModelOption, event::SessionEvent, message::Turn};

pub const STATUS_READY: &str = "Sẵn sàng";
pub const STATUS_BUSY: &str = "Đang xử lý...";

/// What the user asked for during a frame. The app forwards these to the
/// session controller in order.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatAction {
    InputChanged(String),
    Submit,
    SelectModel(String),
    DismissError,
}

/// State visible to UI panels
pub struct UiState {
    pub history: Vec<Turn>,
    /// Input field content, mirrored from the controller's pending input
    pub draft: String,
    pub request_in_flight: bool,
    pub last_error: Option<ErrorNotice>,
    pub selected_model: String,
    pub models: Vec<ModelOption>,
    pub backend_status: BackendStatus,
    /// Status line text
    pub status_text: String,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
            draft: String::new(),
            request_in_flight: false,
            last_error: None,
            selected_model: String::new(),
            models: Vec::new(),
            backend_status: BackendStatus::Unknown,
            status_text: STATUS_READY.to_string(),
        }
    }

    /// Replace the projection with a fresh snapshot
    pub fn sync(&mut self, view: SessionView) {
        self.history = view.history;
        self.draft = view.pending_input;
        self.request_in_flight = view.request_in_flight;
        self.last_error = view.last_error;
        self.selected_model = view.selected_model;
        self.models = view.models;
        self.backend_status = view.backend_status;
    }

    /// Process events from the EventBus and update the status line
    pub fn process_events(&mut self, events: Vec<SessionEvent>) {
        for event in events {
            match event {
                SessionEvent::RequestStarted { model, .. } => {
                    self.status_text = format!("{} ({})", STATUS_BUSY, model);
                }
                SessionEvent::RequestSucceeded { .. } => {
                    self.status_text = STATUS_READY.to_string();
                }
                SessionEvent::RequestFailed { message, .. } => {
                    self.status_text = format!("Lỗi: {}", message);
                }
                SessionEvent::ModelSelected { model } => {
                    self.status_text = format!("Model: {}", model);
                }
                SessionEvent::BackendStatusChanged { online } => {
                    if !online {
                        self.status_text = "Server offline".to_string();
                    }
                }
                SessionEvent::TurnAppended { .. } => {}
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.request_in_flight
    }

    pub fn can_send(&self) -> bool {
        !self.is_busy() && !self.draft.trim().is_empty()
    }

    pub fn selected_label(&self) -> &str {
        self.models
            .iter()
            .find(|m| m.id == self.selected_model)
            .map(|m| m.label.as_str())
            .unwrap_or(self.selected_model.as_str())
    }

    /// Installed-on-backend marker for the model selector; `None` when the
    /// backend hasn't been probed successfully.
    pub fn is_installed(&self, model_id: &str) -> Option<bool> {
        match &self.backend_status {
            BackendStatus::Online { models } => Some(
                models
                    .iter()
                    .any(|m| m == model_id || m.strip_suffix(":latest") == Some(model_id)),
            ),
            _ => None,
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
