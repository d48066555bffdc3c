//! CLI command definitions and dispatch for the `portico` binary.
//!
//! Uses clap derive macros for argument parsing. The widget itself is
//! interactive (`portico chat`); the remaining commands inspect or manage
//! the responder profile.

pub mod chat;
pub mod profile;
pub mod rules;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Portfolio chat widget in your terminal.
#[derive(Parser)]
#[command(name = "portico", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive session with the chat widget.
    Chat {
        /// Path to a responder profile TOML (default: ~/.portico/profile.toml).
        #[arg(long, env = "PORTICO_PROFILE")]
        profile: Option<PathBuf>,

        /// Override the artificial reply delay in milliseconds.
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Start with the widget closed (open it with /open).
        #[arg(long)]
        closed: bool,
    },

    /// Show the reply rule table the responder will use.
    Rules {
        /// Path to a responder profile TOML.
        #[arg(long, env = "PORTICO_PROFILE")]
        profile: Option<PathBuf>,
    },

    /// Manage the responder profile file.
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Print the default profile path and whether it exists.
    Path,

    /// Write the built-in profile to the default path for editing.
    Init {
        /// Overwrite an existing profile file.
        #[arg(long)]
        force: bool,
    },

    /// Show the effective profile after defaults are applied.
    Show {
        /// Path to a responder profile TOML.
        #[arg(long, env = "PORTICO_PROFILE")]
        profile: Option<PathBuf>,
    },
}
