//! Chat message and session state types for Portico.
//!
//! These types model one widget conversation: the messages in its
//! append-only transcript, the reply-lifecycle phase, and the snapshot of
//! UI-affecting flags the embedding front end renders from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Author of a message in the widget transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single message in the widget transcript.
///
/// The transcript is append-only: messages are never edited or reordered
/// after insertion, and the first entry is always the seeded assistant
/// greeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Build a user message stamped with the current time.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// Build an assistant message stamped with the current time.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// Reply-lifecycle phase of a session.
///
/// `AwaitingReply` is the loading flag viewed as a state: exactly one reply
/// may be in flight, and every accepted submission returns the session to
/// `Idle` whether the responder succeeded or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    AwaitingReply,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::Idle => write!(f, "idle"),
            SessionPhase::AwaitingReply => write!(f, "awaiting_reply"),
        }
    }
}

impl FromStr for SessionPhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "idle" => Ok(SessionPhase::Idle),
            "awaiting_reply" => Ok(SessionPhase::AwaitingReply),
            other => Err(format!("invalid session phase: '{other}'")),
        }
    }
}

/// Snapshot of the UI-affecting session flags.
///
/// `is_minimized` is meaningful only while `is_open` is true (the original
/// widget keeps the minimize toggle inside the open header). `pending_input`
/// is the draft the user has typed but not yet sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WidgetState {
    pub is_open: bool,
    pub is_minimized: bool,
    pub is_loading: bool,
    pub pending_input: String,
}

impl WidgetState {
    /// Whether the transcript body is currently visible.
    pub fn is_visible(&self) -> bool {
        self.is_open && !self.is_minimized
    }
}
