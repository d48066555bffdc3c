//! Event types for the Portico session event bus.
//!
//! `SessionEvent` is the unified event type broadcast as a conversation
//! session mutates. All variants are Clone + Send + Sync for use with tokio
//! broadcast channels.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chat::ChatMessage;

/// Events emitted by a conversation session.
///
/// Used by the event bus to communicate transcript and widget changes to
/// subscribers (terminal UI, logging). Event order matches mutation order:
/// a subscriber replaying `MessageAppended` events reconstructs the
/// transcript exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A message was appended to the transcript.
    MessageAppended {
        session_id: Uuid,
        message: ChatMessage,
    },

    /// The loading flag flipped.
    LoadingChanged { session_id: Uuid, is_loading: bool },

    /// The widget was opened, closed, minimized, or restored.
    VisibilityChanged {
        session_id: Uuid,
        is_open: bool,
        is_minimized: bool,
    },
}

impl SessionEvent {
    /// Returns the session this event belongs to.
    pub fn session_id(&self) -> Uuid {
        match self {
            SessionEvent::MessageAppended { session_id, .. }
            | SessionEvent::LoadingChanged { session_id, .. }
            | SessionEvent::VisibilityChanged { session_id, .. } => *session_id,
        }
    }
}
