//! Command trait and metadata

use async_trait::async_trait;
use serde::Serialize;

use super::definition::CommandDefinition;
use super::permissions::Permission;
use crate::error::HeraldResult;
use crate::interaction::Interaction;

/// Metadata every command carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandConf {
    /// Unique command name; the registry key
    pub name: String,
    /// Whether the command should be registered at all
    pub enabled: bool,
    pub description: String,
    /// Free-form grouping label for help output
    pub category: String,
    /// Usage string, typically the prefix followed by the name
    pub usage: String,
    /// Permissions the invoking member must hold
    pub required_permissions: Vec<Permission>,
}

impl CommandConf {
    /// Create enabled metadata with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            description: String::new(),
            category: String::new(),
            usage: String::new(),
            required_permissions: Vec::new(),
        }
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set usage string
    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Add required permission
    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.required_permissions.push(permission);
        self
    }

    /// Mark as disabled
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// A slash command
///
/// Commands are immutable after construction and shared behind `Arc`, so
/// `run` takes `&self` and an owned interaction.
#[async_trait]
pub trait Command: Send + Sync {
    /// Command metadata
    fn conf(&self) -> &CommandConf;

    /// Catalog payload; `None` keeps the command out of the registry
    fn definition(&self) -> Option<&CommandDefinition>;

    /// Registry key
    fn name(&self) -> &str {
        &self.conf().name
    }

    /// Whether Discovery registers this command
    fn is_registrable(&self) -> bool {
        self.conf().enabled && self.definition().is_some()
    }

    /// Authorization gate checked before `run`
    ///
    /// Default: the invoking member holds every required permission.
    fn can_run(&self, interaction: &Interaction) -> bool {
        interaction
            .member_permissions()
            .contains_all(&self.conf().required_permissions)
    }

    /// Execute the command
    async fn run(&self, interaction: Interaction) -> HeraldResult<()>;
}
