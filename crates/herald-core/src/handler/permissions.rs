//! Platform permission flags

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::HeraldError;

/// A single named permission and its platform bit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    CreateInstantInvite,
    KickMembers,
    BanMembers,
    Administrator,
    ManageChannels,
    ManageGuild,
    AddReactions,
    ViewAuditLog,
    ViewChannel,
    SendMessages,
    ManageMessages,
    EmbedLinks,
    AttachFiles,
    ReadMessageHistory,
    MentionEveryone,
    UseExternalEmojis,
    ManageNicknames,
    ManageRoles,
    ManageWebhooks,
    UseApplicationCommands,
    ModerateMembers,
}

impl Permission {
    /// Every known permission, in bit order
    pub const ALL: [Permission; 21] = [
        Self::CreateInstantInvite,
        Self::KickMembers,
        Self::BanMembers,
        Self::Administrator,
        Self::ManageChannels,
        Self::ManageGuild,
        Self::AddReactions,
        Self::ViewAuditLog,
        Self::ViewChannel,
        Self::SendMessages,
        Self::ManageMessages,
        Self::EmbedLinks,
        Self::AttachFiles,
        Self::ReadMessageHistory,
        Self::MentionEveryone,
        Self::UseExternalEmojis,
        Self::ManageNicknames,
        Self::ManageRoles,
        Self::ManageWebhooks,
        Self::UseApplicationCommands,
        Self::ModerateMembers,
    ];

    /// Bit value as defined by the platform
    pub const fn bit(self) -> u64 {
        match self {
            Self::CreateInstantInvite => 1 << 0,
            Self::KickMembers => 1 << 1,
            Self::BanMembers => 1 << 2,
            Self::Administrator => 1 << 3,
            Self::ManageChannels => 1 << 4,
            Self::ManageGuild => 1 << 5,
            Self::AddReactions => 1 << 6,
            Self::ViewAuditLog => 1 << 7,
            Self::ViewChannel => 1 << 10,
            Self::SendMessages => 1 << 11,
            Self::ManageMessages => 1 << 13,
            Self::EmbedLinks => 1 << 14,
            Self::AttachFiles => 1 << 15,
            Self::ReadMessageHistory => 1 << 16,
            Self::MentionEveryone => 1 << 17,
            Self::UseExternalEmojis => 1 << 18,
            Self::ManageNicknames => 1 << 27,
            Self::ManageRoles => 1 << 28,
            Self::ManageWebhooks => 1 << 29,
            Self::UseApplicationCommands => 1 << 31,
            Self::ModerateMembers => 1 << 40,
        }
    }

    /// PascalCase name, as used in command metadata
    pub const fn name(self) -> &'static str {
        match self {
            Self::CreateInstantInvite => "CreateInstantInvite",
            Self::KickMembers => "KickMembers",
            Self::BanMembers => "BanMembers",
            Self::Administrator => "Administrator",
            Self::ManageChannels => "ManageChannels",
            Self::ManageGuild => "ManageGuild",
            Self::AddReactions => "AddReactions",
            Self::ViewAuditLog => "ViewAuditLog",
            Self::ViewChannel => "ViewChannel",
            Self::SendMessages => "SendMessages",
            Self::ManageMessages => "ManageMessages",
            Self::EmbedLinks => "EmbedLinks",
            Self::AttachFiles => "AttachFiles",
            Self::ReadMessageHistory => "ReadMessageHistory",
            Self::MentionEveryone => "MentionEveryone",
            Self::UseExternalEmojis => "UseExternalEmojis",
            Self::ManageNicknames => "ManageNicknames",
            Self::ManageRoles => "ManageRoles",
            Self::ManageWebhooks => "ManageWebhooks",
            Self::UseApplicationCommands => "UseApplicationCommands",
            Self::ModerateMembers => "ModerateMembers",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Permission {
    type Err = HeraldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| HeraldError::other(format!("Unknown permission: {}", s)))
    }
}

impl Serialize for Permission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A set of permission bits
///
/// The platform encodes permission sets as decimal strings, which is what
/// serde reads and writes here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Permissions(u64);

impl Permissions {
    /// Empty set
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Set from raw bits
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Raw bits
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Union of the given permissions
    pub fn from_iter_of<I: IntoIterator<Item = Permission>>(perms: I) -> Self {
        Self(perms.into_iter().fold(0, |acc, p| acc | p.bit()))
    }

    /// Whether `permission` is granted. Administrator grants everything.
    pub fn contains(self, permission: Permission) -> bool {
        self.0 & Permission::Administrator.bit() != 0 || self.0 & permission.bit() != 0
    }

    /// Whether every permission in `required` is granted
    pub fn contains_all(self, required: &[Permission]) -> bool {
        required.iter().all(|p| self.contains(*p))
    }
}

impl Serialize for Permissions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<u64>()
            .map(Self)
            .map_err(|e| serde::de::Error::custom(format!("invalid permission bits '{}': {}", raw, e)))
    }
}
