//! Interaction dispatcher

use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::user_cache::UserDirectory;
use crate::interaction::Interaction;
use crate::registry::Registry;

/// Platform event carrying interactions
pub const INTERACTION_CREATE: &str = "interactionCreate";

/// Why an interaction was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// The payload is not a valid interaction
    Malformed,
    /// Not an application-command interaction
    NotCommand,
    /// No registered command has this name
    UnknownCommand,
    /// The interaction has no member or the member has no user
    MissingMember,
    /// The member's user could not be resolved
    UnknownUser,
    /// `can_run` returned false
    Unauthorized,
}

impl fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Malformed => "malformed interaction",
            Self::NotCommand => "not a command interaction",
            Self::UnknownCommand => "unknown command",
            Self::MissingMember => "missing member",
            Self::UnknownUser => "unknown user",
            Self::Unauthorized => "unauthorized",
        };
        f.write_str(text)
    }
}

/// Terminal state of one dispatch
#[derive(Debug)]
pub enum DispatchOutcome {
    Ignored(DiscardReason),
    /// The command's task; awaiting it is optional
    Invoked(JoinHandle<()>),
}

impl DispatchOutcome {
    pub fn is_invoked(&self) -> bool {
        matches!(self, Self::Invoked(_))
    }

    pub fn discard_reason(&self) -> Option<DiscardReason> {
        match self {
            Self::Ignored(reason) => Some(*reason),
            Self::Invoked(_) => None,
        }
    }
}

/// Routes interactions to registered commands
pub struct Dispatcher {
    registry: Arc<Registry>,
    users: Arc<dyn UserDirectory>,
}

impl Dispatcher {
    pub fn new(registry: Arc<Registry>, users: Arc<dyn UserDirectory>) -> Self {
        Self { registry, users }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Handle a raw `interactionCreate` payload
    pub async fn on_interaction(&self, raw: &Value) -> DispatchOutcome {
        match serde_json::from_value::<Interaction>(raw.clone()) {
            Ok(interaction) => self.dispatch(interaction).await,
            Err(e) => {
                warn!(error = %e, "Dropping malformed interaction payload");
                DispatchOutcome::Ignored(DiscardReason::Malformed)
            }
        }
    }

    /// Run the dispatch pipeline for a parsed interaction
    pub async fn dispatch(&self, interaction: Interaction) -> DispatchOutcome {
        let Some(name) = interaction.command_name().map(str::to_string) else {
            debug!(interaction_id = %interaction.id, kind = ?interaction.kind, "Ignoring non-command interaction");
            return DispatchOutcome::Ignored(DiscardReason::NotCommand);
        };

        let Some(command) = self.registry.lookup(&name) else {
            debug!(command = %name, "Ignoring interaction for unregistered command");
            return DispatchOutcome::Ignored(DiscardReason::UnknownCommand);
        };

        let Some(member_user) = interaction.member.as_ref().and_then(|m| m.user.as_ref()) else {
            warn!(command = %name, "Slash command received, but interaction author is null");
            return DispatchOutcome::Ignored(DiscardReason::MissingMember);
        };

        let Some(user) = self.users.resolve(member_user).await else {
            warn!(
                command = %name,
                user_id = %member_user.id,
                "Slash command received, but interaction member cannot be found"
            );
            return DispatchOutcome::Ignored(DiscardReason::UnknownUser);
        };

        info!(
            command = %name,
            user = %user.username,
            user_id = %user.id,
            "Slash command received"
        );

        if !command.can_run(&interaction) {
            debug!(command = %name, user_id = %user.id, "Command refused by authorization check");
            return DispatchOutcome::Ignored(DiscardReason::Unauthorized);
        }

        let handle = tokio::spawn(async move {
            if let Err(e) = command.run(interaction).await {
                error!(command = %name, error = %e, "Command failed");
            }
        });
        DispatchOutcome::Invoked(handle)
    }
}
