//! Command routing logic for CLI

use herald_core::config::Settings;

use crate::args::{Cli, Commands};
use crate::commands;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli, settings: Settings) -> anyhow::Result<()> {
    tracing::debug!(settings = ?settings, "Resolved settings");

    match cli.command() {
        Commands::Run => commands::run::execute(settings).await,
        Commands::Sync => commands::sync::execute(settings).await,
        Commands::Commands => commands::list::execute(settings).await,
        Commands::Replay { file, dry_run } => {
            commands::replay::execute(settings, &file, dry_run).await
        }
    }
}
