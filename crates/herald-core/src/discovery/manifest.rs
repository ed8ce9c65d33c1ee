//! Static handler registration table

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::HeraldResult;
use crate::handler::{BotContext, Command, EventContext, EventHandler};

/// Builds a command from the shared context
pub type CommandFactory =
    Arc<dyn Fn(&Arc<BotContext>) -> HeraldResult<Arc<dyn Command>> + Send + Sync>;

/// Builds an event handler from the event context
pub type EventFactory =
    Arc<dyn Fn(&EventContext) -> HeraldResult<Arc<dyn EventHandler>> + Send + Sync>;

/// Handler key → factory table, fixed at startup
#[derive(Clone, Default)]
pub struct HandlerManifest {
    commands: HashMap<String, CommandFactory>,
    events: HashMap<String, EventFactory>,
}

impl HandlerManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command factory under a handler key
    pub fn with_command<F>(mut self, key: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&Arc<BotContext>) -> HeraldResult<Arc<dyn Command>> + Send + Sync + 'static,
    {
        self.commands.insert(key.into(), Arc::new(factory));
        self
    }

    /// Register an event handler factory under a handler key
    pub fn with_event<F>(mut self, key: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&EventContext) -> HeraldResult<Arc<dyn EventHandler>> + Send + Sync + 'static,
    {
        self.events.insert(key.into(), Arc::new(factory));
        self
    }

    pub fn command_factory(&self, key: &str) -> Option<&CommandFactory> {
        self.commands.get(key)
    }

    pub fn event_factory(&self, key: &str) -> Option<&EventFactory> {
        self.events.get(key)
    }

    /// Known command keys, sorted
    pub fn command_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Known event keys, sorted
    pub fn event_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.events.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl std::fmt::Debug for HandlerManifest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerManifest")
            .field("commands", &self.command_keys())
            .field("events", &self.event_keys())
            .finish()
    }
}
