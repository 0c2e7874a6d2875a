//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the diver binary.

mod check;
mod commands;
mod play;
mod worlds;

pub use check::handle_check_command;
pub use commands::{Cli, Commands, PlayArgs};
pub use play::handle_play_command;
pub use worlds::handle_worlds_command;
