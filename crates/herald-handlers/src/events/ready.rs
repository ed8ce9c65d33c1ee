//! `ready` handler

use async_trait::async_trait;
use herald_core::error::HeraldResult;
use herald_core::handler::{BotContext, EventHandler};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Logs the session user once the gateway is ready
pub struct Ready {
    ctx: Arc<BotContext>,
}

impl Ready {
    pub fn new(ctx: Arc<BotContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl EventHandler for Ready {
    async fn run(&self, args: Vec<Value>) -> HeraldResult<()> {
        let username = args
            .first()
            .and_then(|ready| ready.pointer("/user/username"))
            .and_then(Value::as_str)
            .unwrap_or("unknown");

        info!(
            event_type = "ready",
            user = %username,
            status = %self.ctx.settings().presence.status,
            "Logged in"
        );
        Ok(())
    }
}
