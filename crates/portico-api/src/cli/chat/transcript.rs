//! Transcript rendering for the widget loop.
//!
//! The transcript is the widget's scrolling message body: one line per
//! message, oldest first, with a dim clock and a colored speaker label.

use chrono::{DateTime, Utc};
use console::style;

use portico_types::chat::{ChatMessage, MessageRole};

/// Render the full transcript, oldest first.
pub fn render_transcript(messages: &[ChatMessage], title: &str) {
    println!();
    for message in messages {
        println!("  {}", format_message(message, title));
    }
    println!();
}

/// One transcript line. The assistant speaks as the widget title.
pub fn format_message(message: &ChatMessage, title: &str) -> String {
    let speaker = match message.role {
        MessageRole::User => style("You").green().bold(),
        MessageRole::Assistant => style(title).cyan().bold(),
    };
    format!(
        "{} {} {}",
        style(format_clock(&message.created_at)).dim(),
        speaker,
        message.content
    )
}

fn format_clock(at: &DateTime<Utc>) -> String {
    at.format("%H:%M:%S").to_string()
}
