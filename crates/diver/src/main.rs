//! The diver binary.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use diver::SettingsLoader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut loader = SettingsLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_file(path.clone());
    }
    let settings = loader.load()?;
    let provider = settings.provider().clone().with_kind(cli.provider);
    let settings = settings.with_provider(provider);

    let metrics = diver_core::init_metrics("diver", 30)?;
    info!("Starting diver");

    let result = match cli.command {
        Commands::Worlds => {
            cli::handle_worlds_command(&settings);
            Ok(())
        }
        Commands::Check => cli::handle_check_command(&settings).await,
        Commands::Play(args) => cli::handle_play_command(settings, args).await,
    };

    if let Err(e) = diver_core::shutdown_metrics(metrics) {
        warn!(error = %e, "Metrics were not flushed");
    }
    result
}
