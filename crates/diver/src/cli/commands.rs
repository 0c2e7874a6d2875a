//! Command-line structure.

use clap::{Args, Parser, Subcommand};
use diver_core::World;
use diver_models::ProviderKind;
use std::path::PathBuf;

/// Interactive fiction driven by large language models.
#[derive(Parser, Debug)]
#[command(name = "diver")]
#[command(version)]
#[command(about = "Interactive fiction driven by large language models")]
pub struct Cli {
    /// Settings file (defaults to <config_dir>/diver/diver.toml)
    #[arg(short, long, global = true, env = "DIVER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Provider to use, overriding settings
    #[arg(short, long, global = true)]
    pub provider: Option<ProviderKind>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the available worlds
    Worlds,
    /// Resolve the provider and confirm its credential works
    Check,
    /// Play a story in the terminal
    Play(PlayArgs),
}

/// Options for `play`.
#[derive(Args, Debug, Default)]
pub struct PlayArgs {
    /// World to play in (asked interactively when omitted)
    #[arg(short, long)]
    pub world: Option<World>,

    /// Use the offline demo provider
    #[arg(long)]
    pub demo: bool,

    /// Use the world's sample character instead of creating one
    #[arg(long)]
    pub sample: bool,

    /// Accept typed answers that are not among the offered choices
    #[arg(long)]
    pub free_text: bool,
}
