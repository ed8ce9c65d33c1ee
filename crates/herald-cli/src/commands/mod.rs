//! CLI commands

pub mod list;
pub mod replay;
pub mod run;
pub mod sync;

use anyhow::Context;
use herald_core::bot::{Bot, BotBuilder};
use herald_core::config::Settings;
use std::sync::Arc;

/// Builder over the bundled handler manifest
fn builder(settings: Settings) -> BotBuilder {
    Bot::builder(Arc::new(settings), herald_handlers::manifest())
}

/// Start a bot, turning startup failures into a fatal error
async fn start(builder: BotBuilder) -> anyhow::Result<Bot> {
    builder.start().await.context("Handler discovery failed")
}
