//! Interaction payload types
//!
//! These mirror the subset of the platform's interaction object that dispatch
//! and the bundled commands need. Unknown fields are ignored.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::handler::Permissions;

/// Interaction type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    Ping,
    ApplicationCommand,
    MessageComponent,
    Autocomplete,
    ModalSubmit,
    Unknown(u8),
}

impl InteractionKind {
    fn code(self) -> u8 {
        match self {
            Self::Ping => 1,
            Self::ApplicationCommand => 2,
            Self::MessageComponent => 3,
            Self::Autocomplete => 4,
            Self::ModalSubmit => 5,
            Self::Unknown(code) => code,
        }
    }
}

impl From<u8> for InteractionKind {
    fn from(code: u8) -> Self {
        match code {
            1 => Self::Ping,
            2 => Self::ApplicationCommand,
            3 => Self::MessageComponent,
            4 => Self::Autocomplete,
            5 => Self::ModalSubmit,
            other => Self::Unknown(other),
        }
    }
}

impl Serialize for InteractionKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for InteractionKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u8::deserialize(deserializer).map(Self::from)
    }
}

/// A platform user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
    #[serde(default)]
    pub bot: bool,
}

impl User {
    /// Name to show in logs and replies
    pub fn display_name(&self) -> &str {
        self.global_name.as_deref().unwrap_or(&self.username)
    }
}

/// The invoking guild member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Missing for partial members
    #[serde(default)]
    pub user: Option<User>,
    /// Effective permissions in the channel the interaction came from
    #[serde(default)]
    pub permissions: Permissions,
    #[serde(default)]
    pub nick: Option<String>,
}

/// Data of an application command interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandData {
    #[serde(default)]
    pub id: String,
    pub name: String,
}

/// An inbound interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: String,
    #[serde(default)]
    pub application_id: String,
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub guild_id: Option<String>,
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub data: Option<CommandData>,
    #[serde(default)]
    pub member: Option<Member>,
    /// Set instead of `member` in direct messages
    #[serde(default)]
    pub user: Option<User>,
}

impl Interaction {
    /// Whether this interaction invokes a slash command
    pub fn is_command(&self) -> bool {
        self.kind == InteractionKind::ApplicationCommand && self.data.is_some()
    }

    /// Invoked command name, if this is a command interaction
    pub fn command_name(&self) -> Option<&str> {
        if self.kind != InteractionKind::ApplicationCommand {
            return None;
        }
        self.data.as_ref().map(|d| d.name.as_str())
    }

    /// Permissions of the invoking member; empty outside guilds
    pub fn member_permissions(&self) -> Permissions {
        self.member
            .as_ref()
            .map(|m| m.permissions)
            .unwrap_or_default()
    }
}
