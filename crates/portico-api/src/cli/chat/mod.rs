//! Interactive terminal front end for the chat widget.
//!
//! This module implements the full widget loop: the welcome banner and
//! seeded greeting, async line input, slash commands mapped to the widget
//! flags, a typing spinner while a reply is in flight, and transcript
//! rendering. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod transcript;
