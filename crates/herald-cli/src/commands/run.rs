//! `herald run`

use herald_core::catalog::RestCatalogApi;
use herald_core::config::Settings;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;

use crate::gateway;
use crate::signal_handler::ShutdownSignal;

/// Start the bot and dispatch gateway events from stdin until EOF or Ctrl+C
pub async fn execute(settings: Settings) -> anyhow::Result<()> {
    let api = Arc::new(RestCatalogApi::from_settings(&settings));
    let bot = super::start(super::builder(settings)).await?;

    // Detached; failures are logged by the task and never stop the bot.
    let _sync = bot.spawn_sync(api);

    let shutdown = ShutdownSignal::install()?;
    let stats = gateway::pump(&bot, BufReader::new(tokio::io::stdin()), shutdown.token()).await?;

    info!(
        events = stats.events,
        skipped = stats.skipped,
        "Gateway stream finished"
    );
    Ok(())
}
