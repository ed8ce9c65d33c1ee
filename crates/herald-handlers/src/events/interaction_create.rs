//! `interactionCreate` handler

use async_trait::async_trait;
use herald_core::dispatch::{DispatchOutcome, Dispatcher};
use herald_core::error::{HeraldError, HeraldResult};
use herald_core::handler::EventHandler;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Hands every interaction to the [`Dispatcher`]
pub struct InteractionCreate {
    dispatcher: Arc<Dispatcher>,
}

impl InteractionCreate {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl EventHandler for InteractionCreate {
    async fn run(&self, args: Vec<Value>) -> HeraldResult<()> {
        let raw = args.first().ok_or_else(|| {
            HeraldError::handler("interactionCreate", "event carried no interaction")
        })?;

        match self.dispatcher.on_interaction(raw).await {
            DispatchOutcome::Ignored(reason) => {
                debug!(reason = %reason, "Interaction discarded");
                Ok(())
            }
            // Command errors are logged on the command task; only a panic surfaces here.
            DispatchOutcome::Invoked(handle) => handle.await.map_err(|e| {
                HeraldError::handler("interactionCreate", format!("command task failed: {}", e))
            }),
        }
    }
}
