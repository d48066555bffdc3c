//! The conversation session state machine.
//!
//! `ConversationSession` owns the append-only message log and the widget
//! flags, serializes submissions through the loading guard, and broadcasts
//! every mutation as a `SessionEvent`. One session lives for one page view;
//! nothing is persisted.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use uuid::Uuid;

use portico_types::chat::{ChatMessage, SessionPhase, WidgetState};
use portico_types::event::SessionEvent;
use portico_types::profile::ResponderProfile;

use crate::event::EventBus;
use crate::responder::Responder;

/// Copy and tuning the session owns directly.
///
/// The rule-table copy lives in the responder; the session only needs the
/// greeting it seeds, the reply it substitutes when the responder fails, and
/// the artificial delay.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Assistant greeting seeded as the first transcript entry.
    pub greeting: String,
    /// Reply appended when reply computation fails.
    pub error_reply: String,
    /// Artificial pause between accepting input and appending the reply.
    pub reply_delay: Duration,
}

impl SessionConfig {
    pub fn from_profile(profile: &ResponderProfile) -> Self {
        Self {
            greeting: profile.greeting.clone(),
            error_reply: profile.error_reply.clone(),
            reply_delay: Duration::from_millis(profile.reply_delay_ms),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from_profile(&ResponderProfile::default())
    }
}

/// What `submit` did with the input.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Input accepted; the ticket resolves when the reply is appended.
    Accepted(ReplyTicket),
    /// Input was empty after trimming; nothing changed.
    IgnoredEmpty,
    /// A reply is already in flight; nothing changed.
    IgnoredBusy,
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Handle to one in-flight reply.
///
/// Awaiting the ticket is optional. The reply runs as a spawned task, so the
/// assistant message is appended whether or not anyone waits, and dropping
/// the ticket never cancels it.
#[derive(Debug)]
pub struct ReplyTicket {
    handle: JoinHandle<ChatMessage>,
}

impl ReplyTicket {
    /// Wait for the in-flight reply and return the appended assistant
    /// message. `None` only if the reply task panicked.
    pub async fn reply(self) -> Option<ChatMessage> {
        self.handle.await.ok()
    }
}

struct SessionInner {
    log: Vec<ChatMessage>,
    state: WidgetState,
}

/// The chat widget's conversation session.
///
/// State transitions:
/// - `Idle --submit(text)--> AwaitingReply`, guarded on non-blank text.
/// - `AwaitingReply --reply appended--> Idle`, fires unconditionally
///   (success or error fallback), so the widget can never stay loading.
///
/// `submit` while `AwaitingReply` is a no-op, which keeps at most one reply
/// in flight and makes the delay non-cumulative. Open/close/minimize are
/// independent of the reply cycle: an in-flight reply still lands after the
/// widget closes.
///
/// Cloning produces a shared view (backed by `Arc<Mutex<...>>`).
#[derive(Clone)]
pub struct ConversationSession {
    id: Uuid,
    inner: Arc<Mutex<SessionInner>>,
    responder: Arc<dyn Responder>,
    events: EventBus,
    reply_delay: Duration,
    error_reply: String,
}

impl ConversationSession {
    /// Create a session with the greeting seeded as the first transcript
    /// entry. The widget starts closed, not minimized, and idle.
    ///
    /// No event fires for the seed: subscribers attach after construction
    /// and read the greeting from `transcript()`.
    pub fn new(config: SessionConfig, responder: Arc<dyn Responder>, events: EventBus) -> Self {
        let inner = SessionInner {
            log: vec![ChatMessage::assistant(config.greeting)],
            state: WidgetState::default(),
        };
        Self {
            id: Uuid::now_v7(),
            inner: Arc::new(Mutex::new(inner)),
            responder,
            events,
            reply_delay: config.reply_delay,
            error_reply: config.error_reply,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Subscribe to this session's mutation events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Snapshot of the message log, oldest first. Always starts with the
    /// seeded greeting.
    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.lock_inner().log.clone()
    }

    /// Snapshot of the widget flags and draft.
    pub fn widget_state(&self) -> WidgetState {
        self.lock_inner().state.clone()
    }

    /// Current phase, derived from the loading flag.
    pub fn phase(&self) -> SessionPhase {
        if self.lock_inner().state.is_loading {
            SessionPhase::AwaitingReply
        } else {
            SessionPhase::Idle
        }
    }

    /// Open the widget. Already open is a no-op and publishes nothing.
    pub fn open(&self) {
        let mut inner = self.lock_inner();
        if !inner.state.is_open {
            inner.state.is_open = true;
            self.publish_visibility(&inner);
        }
    }

    /// Close the widget. The log and any in-flight reply are unaffected.
    pub fn close(&self) {
        let mut inner = self.lock_inner();
        if inner.state.is_open {
            inner.state.is_open = false;
            self.publish_visibility(&inner);
        }
    }

    /// Collapse or restore the widget body. A pure flag flip; it never
    /// touches the log or the loading state.
    pub fn toggle_minimize(&self) {
        let mut inner = self.lock_inner();
        inner.state.is_minimized = !inner.state.is_minimized;
        self.publish_visibility(&inner);
    }

    /// Replace the unsent draft.
    pub fn set_pending_input(&self, text: impl Into<String>) {
        self.lock_inner().state.pending_input = text.into();
    }

    /// Current unsent draft.
    pub fn pending_input(&self) -> String {
        self.lock_inner().state.pending_input.clone()
    }

    /// Submit the current draft. The draft clears only when accepted.
    pub fn submit_pending(&self) -> SubmitOutcome {
        let draft = self.pending_input();
        self.submit(&draft)
    }

    /// Submit user input.
    ///
    /// Rejected without side effects when the trimmed text is empty or a
    /// reply is already in flight. When accepted: the user message (raw, as
    /// typed) is appended, the draft clears, loading turns on, and a reply
    /// task is spawned that appends the assistant message after the
    /// configured delay and turns loading off. The task is detached, so the
    /// reply lands even if the widget closes or every handle drops first.
    ///
    /// Responder failure is absorbed here: the error reply is appended in
    /// place of the computed one and the session still returns to idle.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, text: &str) -> SubmitOutcome {
        if text.trim().is_empty() {
            return SubmitOutcome::IgnoredEmpty;
        }

        let reply = {
            let mut inner = self.lock_inner();
            if inner.state.is_loading {
                return SubmitOutcome::IgnoredBusy;
            }

            let message = ChatMessage::user(text);
            inner.log.push(message.clone());
            inner.state.pending_input.clear();
            inner.state.is_loading = true;

            // Publish under the lock so event order matches log order.
            self.events.publish(SessionEvent::MessageAppended {
                session_id: self.id,
                message,
            });
            self.events.publish(SessionEvent::LoadingChanged {
                session_id: self.id,
                is_loading: true,
            });

            match self.responder.respond(text) {
                Ok(reply) => reply,
                Err(error) => {
                    tracing::warn!(
                        session_id = %self.id,
                        responder = self.responder.name(),
                        %error,
                        "reply computation failed, substituting error reply"
                    );
                    self.error_reply.clone()
                }
            }
        };

        let session_id = self.id;
        let inner = Arc::clone(&self.inner);
        let events = self.events.clone();
        let delay = self.reply_delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let message = ChatMessage::assistant(reply);
            let mut inner = inner.lock().expect("session state lock poisoned");
            inner.log.push(message.clone());
            inner.state.is_loading = false;
            events.publish(SessionEvent::MessageAppended {
                session_id,
                message: message.clone(),
            });
            events.publish(SessionEvent::LoadingChanged {
                session_id,
                is_loading: false,
            });
            drop(inner);

            message
        });

        SubmitOutcome::Accepted(ReplyTicket { handle })
    }

    fn lock_inner(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().expect("session state lock poisoned")
    }

    fn publish_visibility(&self, inner: &SessionInner) {
        self.events.publish(SessionEvent::VisibilityChanged {
            session_id: self.id,
            is_open: inner.state.is_open,
            is_minimized: inner.state.is_minimized,
        });
    }
}

impl std::fmt::Debug for ConversationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationSession")
            .field("id", &self.id)
            .field("responder", &self.responder.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responder::RuleResponder;
    use portico_types::chat::MessageRole;
    use portico_types::error::ResponderError;

    struct FailingResponder;

    impl Responder for FailingResponder {
        fn name(&self) -> &str {
            "failing"
        }

        fn respond(&self, _input: &str) -> Result<String, ResponderError> {
            Err(ResponderError::Computation(
                "rule table unavailable".to_string(),
            ))
        }
    }

    fn test_session(delay_ms: u64) -> ConversationSession {
        let config = SessionConfig {
            reply_delay: Duration::from_millis(delay_ms),
            ..SessionConfig::default()
        };
        ConversationSession::new(
            config,
            Arc::new(RuleResponder::default()),
            EventBus::new(16),
        )
    }

    async fn submit_and_wait(session: &ConversationSession, text: &str) -> ChatMessage {
        match session.submit(text) {
            SubmitOutcome::Accepted(ticket) => {
                ticket.reply().await.expect("reply task panicked")
            }
            other => panic!("expected Accepted, got {other:?}"),
        }
    }

    #[test]
    fn session_starts_idle_with_seeded_greeting() {
        let session = test_session(5);
        let transcript = session.transcript();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].role, MessageRole::Assistant);
        assert_eq!(transcript[0].content, ResponderProfile::default().greeting);

        let state = session.widget_state();
        assert!(!state.is_open);
        assert!(!state.is_minimized);
        assert!(!state.is_loading);
        assert!(state.pending_input.is_empty());
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn open_close_and_minimize_transitions() {
        let session = test_session(5);

        session.open();
        assert!(session.widget_state().is_open);
        assert!(session.widget_state().is_visible());

        session.toggle_minimize();
        assert!(session.widget_state().is_minimized);
        assert!(!session.widget_state().is_visible());

        session.toggle_minimize();
        assert!(session.widget_state().is_visible());

        session.close();
        assert!(!session.widget_state().is_open);
    }

    #[tokio::test]
    async fn visibility_events_fire_only_on_change() {
        let session = test_session(5);
        let mut rx = session.subscribe();

        session.open();
        session.open(); // no-op, no event
        session.close();
        session.close(); // no-op, no event
        session.toggle_minimize();

        let mut seen = Vec::new();
        while let Ok(event) = rx.try_recv() {
            seen.push(event);
        }
        assert_eq!(seen.len(), 3);
        assert!(matches!(
            seen[0],
            SessionEvent::VisibilityChanged { is_open: true, .. }
        ));
        assert!(matches!(
            seen[1],
            SessionEvent::VisibilityChanged { is_open: false, .. }
        ));
        assert!(matches!(
            seen[2],
            SessionEvent::VisibilityChanged {
                is_minimized: true,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn blank_submissions_are_ignored() {
        let session = test_session(5);

        assert!(matches!(session.submit(""), SubmitOutcome::IgnoredEmpty));
        assert!(matches!(session.submit("   "), SubmitOutcome::IgnoredEmpty));
        assert!(matches!(
            session.submit("\t\n"),
            SubmitOutcome::IgnoredEmpty
        ));

        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(!session.widget_state().is_loading);
    }

    #[tokio::test]
    async fn accepted_submission_grows_log_by_two() {
        let session = test_session(5);

        let outcome = session.submit("What are your skills?");
        let SubmitOutcome::Accepted(ticket) = outcome else {
            panic!("expected Accepted");
        };

        // User message lands synchronously; reply is still in flight.
        let transcript = session.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[1].role, MessageRole::User);
        assert_eq!(transcript[1].content, "What are your skills?");
        assert!(session.widget_state().is_loading);
        assert_eq!(session.phase(), SessionPhase::AwaitingReply);

        let reply = ticket.reply().await.expect("reply task panicked");
        assert_eq!(reply.role, MessageRole::Assistant);
        assert!(reply.content.contains("React"));

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[2], reply);
        assert!(transcript[2].created_at >= transcript[1].created_at);
        assert!(!session.widget_state().is_loading);
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[tokio::test]
    async fn canned_reply_scenarios() {
        let session = test_session(1);

        let reply = submit_and_wait(&session, "Hello there").await;
        assert_eq!(
            reply.content,
            "Hello! Thanks for visiting my portfolio. I'm excited to connect with you!"
        );

        let reply = submit_and_wait(&session, "What are your skills?").await;
        assert!(reply.content.contains("full-stack development"));

        let reply = submit_and_wait(&session, "asdkjhasd").await;
        assert_eq!(reply.content, ResponderProfile::default().fallback_reply);
    }

    #[tokio::test]
    async fn submission_while_loading_is_rejected() {
        let session = test_session(50);

        let first = session.submit("hello");
        assert!(first.is_accepted());
        assert!(matches!(
            session.submit("project"),
            SubmitOutcome::IgnoredBusy
        ));
        assert_eq!(session.transcript().len(), 2);

        let SubmitOutcome::Accepted(ticket) = first else {
            panic!("expected Accepted");
        };
        ticket.reply().await.expect("reply task panicked");
        assert_eq!(session.transcript().len(), 3);

        // Guard releases once the reply lands.
        assert!(session.submit("project").is_accepted());
    }

    #[tokio::test]
    async fn user_message_keeps_text_as_typed() {
        let session = test_session(1);
        submit_and_wait(&session, "  Hello there  ").await;
        assert_eq!(session.transcript()[1].content, "  Hello there  ");
    }

    #[tokio::test]
    async fn draft_clears_only_on_accepted_submission() {
        let session = test_session(1);

        session.set_pending_input("   ");
        assert!(matches!(
            session.submit_pending(),
            SubmitOutcome::IgnoredEmpty
        ));
        assert_eq!(session.pending_input(), "   ");

        session.set_pending_input("What projects have you built?");
        let SubmitOutcome::Accepted(ticket) = session.submit_pending() else {
            panic!("expected Accepted");
        };
        assert!(session.pending_input().is_empty());
        assert_eq!(
            session.transcript()[1].content,
            "What projects have you built?"
        );
        ticket.reply().await.expect("reply task panicked");
    }

    #[tokio::test]
    async fn responder_failure_substitutes_error_reply() {
        let config = SessionConfig {
            reply_delay: Duration::from_millis(1),
            ..SessionConfig::default()
        };
        let session =
            ConversationSession::new(config, Arc::new(FailingResponder), EventBus::new(16));

        let reply = submit_and_wait(&session, "hello").await;
        assert_eq!(reply.content, ResponderProfile::default().error_reply);

        // Log still grows by two and the session is usable again.
        assert_eq!(session.transcript().len(), 3);
        assert!(!session.widget_state().is_loading);
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.submit("again").is_accepted());
    }

    #[tokio::test]
    async fn reply_lands_after_ticket_is_dropped() {
        let session = test_session(10);

        drop(session.submit("hello"));
        assert_eq!(session.transcript().len(), 2);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(session.transcript().len(), 3);
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[tokio::test]
    async fn reply_lands_while_widget_is_closed() {
        let session = test_session(10);
        session.open();

        let outcome = session.submit("hello");
        session.close();

        let SubmitOutcome::Accepted(ticket) = outcome else {
            panic!("expected Accepted");
        };
        ticket.reply().await.expect("reply task panicked");

        let state = session.widget_state();
        assert!(!state.is_open);
        assert!(!state.is_loading);
        assert_eq!(session.transcript().len(), 3);
    }

    #[tokio::test]
    async fn events_follow_mutation_order() {
        let session = test_session(1);
        let mut rx = session.subscribe();

        submit_and_wait(&session, "hello").await;

        let first = rx.recv().await.unwrap();
        assert!(matches!(
            &first,
            SessionEvent::MessageAppended { message, .. }
                if message.role == MessageRole::User
        ));
        assert!(matches!(
            rx.recv().await.unwrap(),
            SessionEvent::LoadingChanged {
                is_loading: true,
                ..
            }
        ));
        assert!(matches!(
            &rx.recv().await.unwrap(),
            SessionEvent::MessageAppended { message, .. }
                if message.role == MessageRole::Assistant
        ));
        assert!(matches!(
            rx.recv().await.unwrap(),
            SessionEvent::LoadingChanged {
                is_loading: false,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn clone_shares_state() {
        let session = test_session(1);
        let session2 = session.clone();
        assert_eq!(session.id(), session2.id());

        submit_and_wait(&session2, "hello").await;
        assert_eq!(session.transcript().len(), 3);
    }
}
