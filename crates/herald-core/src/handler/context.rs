//! Shared context handed to handler factories

use std::sync::Arc;

use crate::config::Settings;
use crate::dispatch::Dispatcher;
use crate::error::HeraldResult;
use crate::interaction::{Interaction, InteractionResponder};

/// Everything a command needs from the process: settings and a way to reply
#[derive(Clone)]
pub struct BotContext {
    settings: Arc<Settings>,
    responder: Arc<dyn InteractionResponder>,
}

impl BotContext {
    pub fn new(settings: Arc<Settings>, responder: Arc<dyn InteractionResponder>) -> Self {
        Self {
            settings,
            responder,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn responder(&self) -> &Arc<dyn InteractionResponder> {
        &self.responder
    }

    /// Reply to an interaction through the configured responder
    pub async fn respond(&self, interaction: &Interaction, content: &str) -> HeraldResult<()> {
        self.responder.respond(interaction, content).await
    }
}

/// Context handed to event handler factories
#[derive(Clone)]
pub struct EventContext {
    pub bot: Arc<BotContext>,
    pub dispatcher: Arc<Dispatcher>,
}
