//! Profile management commands: path, init, show.

use std::path::Path;

use anyhow::Result;
use console::style;

use portico_types::profile::ResponderProfile;

use crate::profile::{default_profile_path, load_profile};

/// Print the default profile path and whether it exists.
pub async fn show_path(json: bool) -> Result<()> {
    let path = default_profile_path();
    let exists = tokio::fs::try_exists(&path).await.unwrap_or(false);

    if json {
        let out = serde_json::json!({
            "path": path.display().to_string(),
            "exists": exists,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!("  {}    {}", style("Path:").bold(), path.display());
    println!(
        "  {}  {}",
        style("Exists:").bold(),
        if exists {
            format!("{}", style("yes").green())
        } else {
            format!("{}", style("no (built-in defaults in use)").dim())
        }
    );
    println!();

    Ok(())
}

/// Write the built-in profile to the default path for editing.
pub async fn init(force: bool, json: bool) -> Result<()> {
    let path = default_profile_path();

    if tokio::fs::try_exists(&path).await.unwrap_or(false) && !force {
        anyhow::bail!(
            "profile already exists at '{}' (use --force to overwrite)",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let contents = toml::to_string_pretty(&ResponderProfile::default())?;
    tokio::fs::write(&path, contents).await?;

    if json {
        let out = serde_json::json!({
            "path": path.display().to_string(),
            "written": true,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Profile written to {}",
        style("✓").green().bold(),
        style(path.display().to_string()).cyan()
    );
    println!(
        "  {}",
        style("Edit the greeting, rules, and replies, then run: portico chat").dim()
    );
    println!();

    Ok(())
}

/// Show the effective profile after defaults are applied.
pub async fn show(explicit: Option<&Path>, json: bool) -> Result<()> {
    let (profile, source) = load_profile(explicit).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {}",
        style("Profile from").bold(),
        style(source.to_string()).dim()
    );
    println!();
    for line in toml::to_string_pretty(&profile)?.lines() {
        println!("  {line}");
    }
    println!();

    Ok(())
}
