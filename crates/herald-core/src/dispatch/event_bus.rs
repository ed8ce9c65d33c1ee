//! Event subscription table

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::discovery::DiscoveredEvent;
use crate::handler::EventHandler;

/// Binds event handlers to platform event names
///
/// Built once at startup; emitting never mutates the table.
#[derive(Default)]
pub struct EventBus {
    handlers: HashMap<String, Vec<Arc<dyn EventHandler>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handler for `event`
    pub fn subscribe(&mut self, event: impl Into<String>, handler: Arc<dyn EventHandler>) {
        self.handlers.entry(event.into()).or_default().push(handler);
    }

    /// Subscribe every discovered handler under its event name
    pub fn bind_all(&mut self, events: impl IntoIterator<Item = DiscoveredEvent>) {
        for event in events {
            info!(event = %event.name, key = %event.key, "Bound event handler");
            self.subscribe(event.name, event.handler);
        }
    }

    /// Run every handler for `event` on its own task
    ///
    /// Returns the spawned tasks; handler errors are logged there. Events
    /// nobody subscribed to are dropped.
    pub fn emit(&self, event: &str, args: Vec<Value>) -> Vec<JoinHandle<()>> {
        let Some(handlers) = self.handlers.get(event) else {
            debug!(event = %event, "No handler subscribed");
            return Vec::new();
        };

        handlers
            .iter()
            .map(|handler| {
                let handler = handler.clone();
                let args = args.clone();
                let event = event.to_string();
                tokio::spawn(async move {
                    if let Err(e) = handler.run(args).await {
                        error!(event = %event, error = %e, "Event handler failed");
                    }
                })
            })
            .collect()
    }

    /// Subscribed event names, sorted
    pub fn event_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn handler_count(&self, event: &str) -> usize {
        self.handlers.get(event).map_or(0, Vec::len)
    }
}
