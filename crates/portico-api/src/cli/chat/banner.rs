//! Welcome banner display for widget sessions.
//!
//! Prints a styled banner when a session starts, showing the widget title,
//! where the profile came from, the reply delay, and the session ID.

use console::style;

use crate::profile::ProfileSource;

/// Print the welcome banner at the start of a widget session.
pub fn print_welcome_banner(
    title: &str,
    source: &ProfileSource,
    rule_count: usize,
    delay_ms: u64,
    session_id: &str,
) {
    println!();
    println!("  {}", style(title).cyan().bold());
    println!();
    println!(
        "  {}  {}",
        style("Profile:").bold(),
        style(source.to_string()).dim()
    );
    println!(
        "  {}    {}",
        style("Rules:").bold(),
        style(format!("{rule_count} reply rules + fallback")).dim()
    );
    println!(
        "  {}    {}",
        style("Delay:").bold(),
        style(format!("{delay_ms}ms")).dim()
    );
    println!(
        "  {}  {}",
        style("Session:").bold(),
        style(&session_id[..8.min(session_id.len())]).dim()
    );
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
