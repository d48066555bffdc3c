//! Shared domain types for Portico.
//!
//! This crate contains the core domain types used across the Portico widget:
//! chat messages, the session state snapshot, the responder profile, session
//! events, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod error;
pub mod event;
pub mod profile;
