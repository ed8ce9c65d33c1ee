//! Registry implementation

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;

use crate::error::{HeraldError, HeraldResult};
use crate::handler::Command;

struct Registered {
    command: Arc<dyn Command>,
    /// Handler key the command was discovered from
    source: String,
}

/// Name → command map shared between Discovery and the Dispatcher
#[derive(Default)]
pub struct Registry {
    commands: DashMap<String, Registered>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command discovered from `source`
    ///
    /// Fails if the name is already taken; the existing entry is kept.
    pub fn insert(&self, command: Arc<dyn Command>, source: impl Into<String>) -> HeraldResult<()> {
        let source = source.into();
        match self.commands.entry(command.name().to_string()) {
            Entry::Occupied(existing) => Err(HeraldError::duplicate_command(
                existing.key().clone(),
                existing.get().source.clone(),
                source,
            )),
            Entry::Vacant(slot) => {
                slot.insert(Registered { command, source });
                Ok(())
            }
        }
    }

    /// Get a command by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.commands.get(name).map(|entry| entry.command.clone())
    }

    /// Alias of [`Registry::get`] used on the dispatch path
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.get(name)
    }

    /// Handler key a command was discovered from
    pub fn source_of(&self, name: &str) -> Option<String> {
        self.commands.get(name).map(|entry| entry.source.clone())
    }

    /// Check if a command exists
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Get command count
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.commands.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Snapshot of all commands, sorted by name
    pub fn commands(&self) -> Vec<Arc<dyn Command>> {
        let mut commands: Vec<Arc<dyn Command>> =
            self.commands.iter().map(|e| e.command.clone()).collect();
        commands.sort_by(|a, b| a.name().cmp(b.name()));
        commands
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("commands", &self.names())
            .finish()
    }
}
