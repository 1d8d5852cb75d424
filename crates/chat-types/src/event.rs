use serde::{Deserialize, Serialize};

use crate::message::Author;

/// Events emitted by the session controller.
/// UI subscribes to these for reactive updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A turn was appended at `index` in the history
    TurnAppended { index: usize, author: Author },
    /// A submission was accepted and dispatched
    RequestStarted { request_id: u64, model: String },
    /// The backend answered with usable content
    RequestSucceeded { request_id: u64 },
    /// The request failed; a fallback turn was appended
    RequestFailed { request_id: u64, message: String },
    /// The target model changed
    ModelSelected { model: String },
    /// Result of a backend health probe
    BackendStatusChanged { online: bool },
}
