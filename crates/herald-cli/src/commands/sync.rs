//! `herald sync`

use anyhow::Context;
use herald_core::catalog::RestCatalogApi;
use herald_core::config::Settings;
use std::sync::Arc;

/// Discover commands and wait for the catalog update to finish
pub async fn execute(settings: Settings) -> anyhow::Result<()> {
    let api = Arc::new(RestCatalogApi::from_settings(&settings));
    let bot = super::start(super::builder(settings)).await?;

    let report = bot
        .spawn_sync(api)
        .await
        .context("Catalog synchronization task panicked")?
        .context("Catalog synchronization failed")?;

    println!(
        "Synchronized {} commands (global: {}, guild: {}) in {:.2}s",
        bot.definitions().len(),
        report.global,
        report.guild,
        report.elapsed.as_secs_f64()
    );
    Ok(())
}
