//! Slash command parsing and execution for the widget loop.
//!
//! Commands start with `/` and map onto the widget's flag operations:
//! open, close, and minimize mirror what the portfolio page's buttons do.

use console::style;

/// Available slash commands in the widget loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal screen.
    Clear,
    /// Exit the session.
    Exit,
    /// Open the widget.
    Open,
    /// Close the widget.
    Close,
    /// Collapse or restore the widget body.
    Minimize,
    /// Render the full transcript.
    History,
    /// Show the widget flags.
    State,
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    match trimmed.to_lowercase().as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        "/open" => Some(ChatCommand::Open),
        "/close" => Some(ChatCommand::Close),
        "/min" | "/minimize" => Some(ChatCommand::Minimize),
        "/history" => Some(ChatCommand::History),
        "/state" => Some(ChatCommand::State),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}     {}", style("/help").cyan(), "Show this help message");
    println!("  {}    {}", style("/clear").cyan(), "Clear the screen");
    println!("  {}     {}", style("/open").cyan(), "Open the widget");
    println!("  {}    {}", style("/close").cyan(), "Close the widget");
    println!(
        "  {}      {}",
        style("/min").cyan(),
        "Minimize or restore the widget body"
    );
    println!("  {}  {}", style("/history").cyan(), "Show the transcript");
    println!("  {}    {}", style("/state").cyan(), "Show the widget flags");
    println!("  {}     {}", style("/exit").cyan(), "End the session");
    println!();
    println!(
        "  {}",
        style("Anything else is sent to the widget as a message").dim()
    );
    println!();
}
