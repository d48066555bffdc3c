//! Main widget loop orchestration.
//!
//! Coordinates the session lifecycle: profile-driven session construction,
//! welcome banner and greeting, the input loop with slash commands, the
//! typing spinner while a reply is in flight, and visibility-aware reply
//! rendering driven by the session's event stream.

use std::sync::Arc;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::broadcast;
use tracing::info;

use portico_core::event::EventBus;
use portico_core::responder::RuleResponder;
use portico_core::session::{ConversationSession, SessionConfig, SubmitOutcome};
use portico_types::chat::{ChatMessage, MessageRole};
use portico_types::event::SessionEvent;
use portico_types::profile::ResponderProfile;

use crate::profile::ProfileSource;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::transcript;

/// Run the interactive widget loop.
///
/// The session outlives nothing here: one loop, one session, no
/// persistence. `delay_ms` overrides the profile's reply delay;
/// `start_closed` leaves the widget closed until `/open`.
pub async fn run_chat_loop(
    profile: &ResponderProfile,
    source: &ProfileSource,
    delay_ms: Option<u64>,
    start_closed: bool,
) -> anyhow::Result<()> {
    let mut config = SessionConfig::from_profile(profile);
    if let Some(ms) = delay_ms {
        config.reply_delay = Duration::from_millis(ms);
    }
    let effective_delay_ms = config.reply_delay.as_millis() as u64;

    let responder = Arc::new(RuleResponder::from_profile(profile));
    let session = ConversationSession::new(config, responder, EventBus::default());
    if !start_closed {
        session.open();
    }

    print_welcome_banner(
        &profile.title,
        source,
        profile.rules.len(),
        effective_delay_ms,
        &session.id().to_string(),
    );

    // The seeded greeting is the whole transcript at this point.
    if session.widget_state().is_visible() {
        for message in &session.transcript() {
            println!("  {}", transcript::format_message(message, &profile.title));
        }
        println!();
    } else {
        println!(
            "  {}\n",
            style("The widget is closed. /open to show it.").dim()
        );
    }

    info!(session_id = %session.id(), "widget session started");

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) =
        ChatInput::new(prompt).map_err(|e| anyhow::anyhow!("failed to initialize input: {e}"))?;

    loop {
        match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!(
                    "\n  {}",
                    style("Press Ctrl+D to exit, or keep chatting.").dim()
                );
                continue;
            }
            InputEvent::Line(line) => {
                if let Some(cmd) = commands::parse(&line) {
                    match cmd {
                        ChatCommand::Help => commands::print_help(),
                        ChatCommand::Clear => chat_input.clear(),
                        ChatCommand::Exit => {
                            println!("\n  {}", style("Session ended.").dim());
                            break;
                        }
                        ChatCommand::Open => {
                            session.open();
                            // Reopening shows everything accumulated while closed.
                            transcript::render_transcript(&session.transcript(), &profile.title);
                        }
                        ChatCommand::Close => {
                            session.close();
                            println!(
                                "\n  {}\n",
                                style("Widget closed. The log keeps accumulating; /open to view.")
                                    .dim()
                            );
                        }
                        ChatCommand::Minimize => {
                            session.toggle_minimize();
                            let state = session.widget_state();
                            if state.is_minimized {
                                println!("\n  {}\n", style("Widget minimized.").dim());
                            } else if state.is_visible() {
                                transcript::render_transcript(
                                    &session.transcript(),
                                    &profile.title,
                                );
                            }
                        }
                        ChatCommand::History => {
                            transcript::render_transcript(&session.transcript(), &profile.title);
                        }
                        ChatCommand::State => print_state(&session),
                        ChatCommand::Unknown(name) => {
                            println!(
                                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                                style("?").yellow().bold(),
                                style(name).dim()
                            );
                        }
                    }
                    continue;
                }

                // Subscribe before submitting so every event of this reply
                // cycle is observed.
                let mut rx = session.subscribe();
                session.set_pending_input(line);
                match session.submit_pending() {
                    SubmitOutcome::IgnoredEmpty => continue,
                    SubmitOutcome::IgnoredBusy => {
                        println!(
                            "\n  {}\n",
                            style("Still replying to the last message.").dim()
                        );
                    }
                    SubmitOutcome::Accepted(_ticket) => {
                        // The reply task is detached; render from the event
                        // stream rather than the ticket.
                        let spinner = ProgressBar::new_spinner();
                        spinner.set_style(
                            ProgressStyle::default_spinner()
                                .template("{spinner:.cyan} {msg}")
                                .unwrap(),
                        );
                        spinner.set_message("typing...");
                        spinner.enable_steady_tick(Duration::from_millis(80));

                        let reply = await_reply(&mut rx, &session).await;
                        spinner.finish_and_clear();

                        match reply {
                            Some(message) if session.widget_state().is_visible() => {
                                println!(
                                    "\n  {} {}\n",
                                    style(format!("{} >", profile.title)).cyan().bold(),
                                    message.content
                                );
                            }
                            Some(_) => {
                                println!(
                                    "\n  {}\n",
                                    style("Reply arrived while the widget was hidden; /open to view.")
                                        .dim()
                                );
                            }
                            None => {
                                println!("\n  {}\n", style("No reply arrived.").dim());
                            }
                        }
                    }
                }
            }
        }
    }

    info!(
        session_id = %session.id(),
        messages = session.transcript().len(),
        "widget session ended"
    );
    Ok(())
}

/// Wait for the in-flight reply and return the appended assistant message.
///
/// Renders off the event feed: the user message and loading-on events pass
/// through first, then the assistant `MessageAppended` arrives. A lagged or
/// closed receiver falls back to the log snapshot.
async fn await_reply(
    rx: &mut broadcast::Receiver<SessionEvent>,
    session: &ConversationSession,
) -> Option<ChatMessage> {
    loop {
        match rx.recv().await {
            Ok(SessionEvent::MessageAppended { message, .. })
                if message.role == MessageRole::Assistant =>
            {
                return Some(message);
            }
            Ok(_) => continue,
            Err(_) => return session.transcript().last().cloned(),
        }
    }
}

fn print_state(session: &ConversationSession) {
    let state = session.widget_state();
    println!();
    println!("  {}  {}", style("Phase:").bold(), session.phase());
    println!(
        "  {}  open={} minimized={} loading={}",
        style("Flags:").bold(),
        state.is_open,
        state.is_minimized,
        state.is_loading
    );
    println!(
        "  {}    {} messages",
        style("Log:").bold(),
        session.transcript().len()
    );
    println!();
}
