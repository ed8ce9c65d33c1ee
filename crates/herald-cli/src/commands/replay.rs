//! `herald replay`

use anyhow::Context;
use herald_core::catalog::RestCatalogApi;
use herald_core::config::Settings;
use herald_core::dispatch::UserCache;
use herald_core::interaction::RecordingResponder;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::gateway;

/// Dispatch the gateway events recorded in `file`
///
/// A dry run records replies and trusts payload users instead of calling the
/// platform, and skips the catalog update.
pub async fn execute(settings: Settings, file: &Path, dry_run: bool) -> anyhow::Result<()> {
    let reader = BufReader::new(
        File::open(file)
            .await
            .with_context(|| format!("Failed to open {}", file.display()))?,
    );

    if dry_run {
        let responder = Arc::new(RecordingResponder::new());
        let users = UserCache::new(
            settings.users.capacity,
            Duration::from_secs(settings.users.ttl_secs),
        );
        let bot = super::start(
            super::builder(settings)
                .with_responder(responder.clone())
                .with_users(Arc::new(users)),
        )
        .await?;

        let stats = gateway::pump(&bot, reader, CancellationToken::new()).await?;

        for reply in responder.replies() {
            println!(
                "[{}] /{}: {}",
                reply.interaction_id,
                reply.command.as_deref().unwrap_or("?"),
                reply.content
            );
        }
        println!("{} events replayed, {} lines skipped", stats.events, stats.skipped);
        return Ok(());
    }

    let api = Arc::new(RestCatalogApi::from_settings(&settings));
    let bot = super::start(super::builder(settings)).await?;
    let sync = bot.spawn_sync(api);

    let stats = gateway::pump(&bot, reader, CancellationToken::new()).await?;
    if let Ok(Err(e)) = sync.await {
        warn!(error = %e, "Catalog was not updated during replay");
    }
    println!("{} events replayed, {} lines skipped", stats.events, stats.skipped);
    Ok(())
}
