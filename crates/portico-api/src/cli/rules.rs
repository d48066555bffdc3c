//! Reply rule table inspection.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use portico_types::profile::ResponderProfile;

use crate::profile::ProfileSource;

/// Print the ordered reply rule table with the fallback copy below it.
pub fn show_rules(profile: &ResponderProfile, source: &ProfileSource, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&profile.rules)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("Keywords").fg(Color::White),
        Cell::new("Reply").fg(Color::White),
    ]);

    for (idx, rule) in profile.rules.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1).fg(Color::DarkGrey),
            Cell::new(rule.keywords.join(", ")).fg(Color::Cyan),
            Cell::new(truncate(&rule.reply, 70)),
        ]);
    }

    println!();
    println!(
        "  {} {}",
        style("Rule table from").bold(),
        style(source.to_string()).dim()
    );
    println!(
        "  {}",
        style("First matching rule wins; matching is case-insensitive substring.").dim()
    );
    println!();
    println!("{table}");
    println!();
    println!("  {}  {}", style("Fallback:").bold(), profile.fallback_reply);
    println!("  {}     {}", style("Error:").bold(), profile.error_reply);
    println!();

    Ok(())
}

/// Truncate to at most `max` bytes with a `...` suffix, backing the cut off
/// to a char boundary so a multi-byte reply is never split mid-character.
fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut cut = max - 3;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &text[..cut])
}
