//! Directory traversal and handler construction

use futures::future::{BoxFuture, FutureExt, try_join_all};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info, warn};

use super::manifest::HandlerManifest;
use crate::config::LoadFailurePolicy;
use crate::error::{HeraldError, HeraldResult, OptionExt, ResultExt};
use crate::handler::{
    BotContext, Command, CommandDefinition, EventContext, EventHandler, event_name_from_stem,
};
use crate::registry::Registry;

/// Optional per-file overrides
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct HandlerFile {
    enabled: Option<bool>,
}

/// An event handler found in the events directory
#[derive(Clone)]
pub struct DiscoveredEvent {
    /// Platform event name (`interactionCreate`)
    pub name: String,
    /// Handler key it was built from (`InteractionCreate`)
    pub key: String,
    pub handler: Arc<dyn EventHandler>,
}

/// Discovers handler units and populates the [`Registry`]
pub struct Discovery {
    manifest: Arc<HandlerManifest>,
    registry: Arc<Registry>,
    policy: LoadFailurePolicy,
}

impl Discovery {
    /// Create a discovery run that fails on the first bad handler file
    pub fn new(manifest: Arc<HandlerManifest>, registry: Arc<Registry>) -> Self {
        Self {
            manifest,
            registry,
            policy: LoadFailurePolicy::Abort,
        }
    }

    /// Set the load failure policy
    pub fn with_policy(mut self, policy: LoadFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Discover commands under `root`
    ///
    /// Every enabled command with a catalog definition is inserted into the
    /// registry and its definition returned, in sorted path order. Sibling
    /// entries are processed concurrently.
    pub async fn discover(
        &self,
        ctx: &Arc<BotContext>,
        root: &Path,
    ) -> HeraldResult<Vec<CommandDefinition>> {
        ensure_dir(root, "commands")?;

        let definitions = self.discover_dir(ctx, root, root.to_path_buf()).await?;

        info!(
            event_type = "commandsDiscovered",
            root = %root.display(),
            count = definitions.len(),
            "Discovered commands"
        );
        Ok(definitions)
    }

    fn discover_dir<'a>(
        &'a self,
        ctx: &'a Arc<BotContext>,
        root: &'a Path,
        dir: PathBuf,
    ) -> BoxFuture<'a, HeraldResult<Vec<CommandDefinition>>> {
        async move {
            let entries = read_sorted(&dir).await?;

            let visits = entries.into_iter().map(move |(path, is_dir)| {
                if is_dir {
                    self.discover_dir(ctx, root, path)
                } else {
                    self.visit_command_file(ctx, root, path).boxed()
                }
            });

            let nested = try_join_all(visits).await?;
            Ok(nested.into_iter().flatten().collect())
        }
        .boxed()
    }

    async fn visit_command_file(
        &self,
        ctx: &Arc<BotContext>,
        root: &Path,
        path: PathBuf,
    ) -> HeraldResult<Vec<CommandDefinition>> {
        let key = handler_key(root, &path)?;

        let (command, overrides) = match self.load_command(ctx, &key, &path).await {
            Ok(loaded) => loaded,
            Err(e) => return self.absorb(e, &key).map(|_| Vec::new()),
        };

        // The file can only turn a command off.
        if overrides.enabled == Some(false) || !command.is_registrable() {
            debug!(key = %key, name = %command.name(), "Skipping disabled or undefined command");
            return Ok(Vec::new());
        }

        let definition = match checked_definition(command.as_ref()) {
            Ok(definition) => definition,
            Err(e) => return self.absorb(e, &key).map(|_| Vec::new()),
        };

        // Duplicates are fatal regardless of the load policy.
        self.registry.insert(command, key.clone())?;
        debug!(key = %key, name = %definition.name, "Registered command");

        Ok(vec![definition])
    }

    async fn load_command(
        &self,
        ctx: &Arc<BotContext>,
        key: &str,
        path: &Path,
    ) -> HeraldResult<(Arc<dyn Command>, HandlerFile)> {
        let factory = self.manifest.command_factory(key).ok_or_else(|| {
            HeraldError::discovery_at(
                format!("No command registered for handler '{}'", key),
                path.display().to_string(),
            )
        })?;

        let overrides = read_overrides(path).await?;

        let command = factory(ctx).map_err(|e| {
            HeraldError::discovery_at(
                format!("Failed to construct command '{}': {}", key, e),
                path.display().to_string(),
            )
        })?;

        Ok((command, overrides))
    }

    /// Discover event handlers directly inside `root` (no recursion)
    pub async fn discover_events(
        &self,
        ctx: &EventContext,
        root: &Path,
    ) -> HeraldResult<Vec<DiscoveredEvent>> {
        ensure_dir(root, "events")?;

        let mut events = Vec::new();
        for (path, is_dir) in read_sorted(root).await? {
            if is_dir {
                debug!(path = %path.display(), "Ignoring directory in events root");
                continue;
            }

            let key = handler_key(root, &path)?;
            match self.load_event(ctx, &key, &path).await {
                Ok(Some(handler)) => events.push(DiscoveredEvent {
                    name: event_name_from_stem(&key),
                    key,
                    handler,
                }),
                Ok(None) => debug!(key = %key, "Skipping disabled event handler"),
                Err(e) => self.absorb(e, &key)?,
            }
        }

        info!(
            event_type = "eventsDiscovered",
            root = %root.display(),
            count = events.len(),
            "Discovered event handlers"
        );
        Ok(events)
    }

    async fn load_event(
        &self,
        ctx: &EventContext,
        key: &str,
        path: &Path,
    ) -> HeraldResult<Option<Arc<dyn EventHandler>>> {
        let factory = self.manifest.event_factory(key).ok_or_else(|| {
            HeraldError::discovery_at(
                format!("No event handler registered for handler '{}'", key),
                path.display().to_string(),
            )
        })?;

        if read_overrides(path).await?.enabled == Some(false) {
            return Ok(None);
        }

        factory(ctx).map(Some).map_err(|e| {
            HeraldError::discovery_at(
                format!("Failed to construct event handler '{}': {}", key, e),
                path.display().to_string(),
            )
        })
    }

    /// Apply the load failure policy to a per-file error
    fn absorb(&self, error: HeraldError, key: &str) -> HeraldResult<()> {
        match self.policy {
            LoadFailurePolicy::Abort => Err(error),
            LoadFailurePolicy::Skip => {
                warn!(key = %key, error = %error, "Skipping handler that failed to load");
                Ok(())
            }
        }
    }
}

/// Catalog definition of a command about to be registered
fn checked_definition(command: &dyn Command) -> HeraldResult<CommandDefinition> {
    let definition = command
        .definition()
        .cloned()
        .context(format!("Command '{}' has no catalog definition", command.name()))?;

    definition.validate()?;
    if definition.name != command.name() {
        return Err(HeraldError::invalid_definition(
            &definition.name,
            format!("definition name differs from command name '{}'", command.name()),
        ));
    }
    Ok(definition)
}

fn ensure_dir(root: &Path, what: &str) -> HeraldResult<()> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(HeraldError::discovery_at(
            format!("{} directory does not exist", what),
            root.display().to_string(),
        ))
    }
}

/// Directory entries sorted by file name, hidden files removed
async fn read_sorted(dir: &Path) -> HeraldResult<Vec<(PathBuf, bool)>> {
    let mut reader = fs::read_dir(dir).await.map_err(|e| {
        HeraldError::io_at(
            format!("Failed to read handler directory: {}", e),
            dir.display().to_string(),
        )
    })?;

    let mut entries = Vec::new();
    while let Some(entry) = reader.next_entry().await.map_err(|e| {
        HeraldError::io_at(
            format!("Failed to read directory entry: {}", e),
            dir.display().to_string(),
        )
    })? {
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let is_dir = entry
            .file_type()
            .await
            .with_context(|| format!("Failed to stat {}", entry.path().display()))?
            .is_dir();
        entries.push((entry.path(), is_dir));
    }

    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
}

/// Root-relative path without extension, `/`-separated
fn handler_key(root: &Path, path: &Path) -> HeraldResult<String> {
    let relative = path.strip_prefix(root).map_err(|_| {
        HeraldError::discovery_at("Handler file outside root", path.display().to_string())
    })?;

    let mut parts: Vec<String> = Vec::new();
    if let Some(parent) = relative.parent() {
        for component in parent.components() {
            parts.push(component.as_os_str().to_string_lossy().into_owned());
        }
    }
    let stem = relative
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            HeraldError::discovery_at("Invalid handler file name", path.display().to_string())
        })?;
    parts.push(stem);

    Ok(parts.join("/"))
}

async fn read_overrides(path: &Path) -> HeraldResult<HandlerFile> {
    let content = fs::read_to_string(path).await.map_err(|e| {
        HeraldError::io_at(
            format!("Failed to read handler file: {}", e),
            path.display().to_string(),
        )
    })?;

    if content.trim().is_empty() {
        return Ok(HandlerFile::default());
    }

    toml::from_str(&content).map_err(|e| {
        HeraldError::discovery_at(
            format!("Invalid handler file: {}", e),
            path.display().to_string(),
        )
    })
}

#[cfg(test)]
mod key_tests {
    use super::handler_key;
    use std::path::Path;

    #[test]
    fn test_handler_key() {
        let root = Path::new("/bot/commands");
        assert_eq!(
            handler_key(root, Path::new("/bot/commands/PingTwo.toml")).unwrap(),
            "PingTwo"
        );
        assert_eq!(
            handler_key(root, Path::new("/bot/commands/nested/NestedTwo.toml")).unwrap(),
            "nested/NestedTwo"
        );
        assert_eq!(
            handler_key(root, Path::new("/bot/commands/a/b/Deep")).unwrap(),
            "a/b/Deep"
        );
        assert!(handler_key(root, Path::new("/elsewhere/X.toml")).is_err());
    }
}
