//! Portico CLI entry point.
//!
//! Binary name: `portico`
//!
//! Parses CLI arguments, loads the responder profile, then dispatches to the
//! interactive chat loop or one of the inspection commands.

mod cli;
mod profile;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ProfileCommand};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,portico_core=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Shell completions don't need a profile
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "portico", &mut std::io::stdout());
        return Ok(());
    }

    match cli.command {
        Commands::Chat {
            profile,
            delay_ms,
            closed,
        } => {
            let (profile, source) = profile::load_profile(profile.as_deref()).await?;
            cli::chat::loop_runner::run_chat_loop(&profile, &source, delay_ms, closed).await?;
        }

        Commands::Rules { profile } => {
            let (profile, source) = profile::load_profile(profile.as_deref()).await?;
            cli::rules::show_rules(&profile, &source, cli.json)?;
        }

        Commands::Profile { action } => match action {
            ProfileCommand::Path => {
                cli::profile::show_path(cli.json).await?;
            }
            ProfileCommand::Init { force } => {
                cli::profile::init(force, cli.json).await?;
            }
            ProfileCommand::Show { profile } => {
                cli::profile::show(profile.as_deref(), cli.json).await?;
            }
        },

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
