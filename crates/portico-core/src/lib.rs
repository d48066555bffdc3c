//! Conversation session logic for Portico.
//!
//! This crate owns the chat widget's behavior: the append-only message log,
//! the widget flags, the submit/reply state machine, and the keyword rule
//! responder. It depends only on `portico-types` and tokio -- never on
//! terminal or filesystem crates.

pub mod event;
pub mod responder;
pub mod session;
