//! Reply computation abstractions for Portico.
//!
//! This module defines the `Responder` trait the session calls to turn user
//! input into an assistant reply, plus the `RuleResponder` keyword-table
//! implementation that ships with the widget.

pub mod rules;

pub use rules::RuleResponder;

use portico_types::error::ResponderError;

/// Trait for reply generators.
///
/// Responders are synchronous and pure: the session owns the artificial
/// reply delay and the error fallback, so implementations just map input to
/// reply text or fail. Object-safe so the session can hold `Arc<dyn
/// Responder>` and tests can swap in failing doubles.
pub trait Responder: Send + Sync {
    /// Short identifier used in logs (e.g., "rules").
    fn name(&self) -> &str;

    /// Compute the assistant reply for one user input.
    fn respond(&self, input: &str) -> Result<String, ResponderError>;
}
