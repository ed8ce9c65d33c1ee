//! Catalog definitions for slash commands
//!
//! A [`CommandDefinition`] is the payload the platform stores in its command
//! catalog. It serializes to the platform's JSON shape.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::permissions::Permissions;
use crate::error::{HeraldError, HeraldResult};

const NAME_MAX: usize = 32;
const DESCRIPTION_MAX: usize = 100;
const OPTIONS_MAX: usize = 25;

/// Type of a command option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    String,
    Integer,
    Boolean,
    User,
    Channel,
    Role,
    Number,
}

impl OptionKind {
    fn code(self) -> u8 {
        match self {
            Self::String => 3,
            Self::Integer => 4,
            Self::Boolean => 5,
            Self::User => 6,
            Self::Channel => 7,
            Self::Role => 8,
            Self::Number => 10,
        }
    }

    fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            3 => Self::String,
            4 => Self::Integer,
            5 => Self::Boolean,
            6 => Self::User,
            7 => Self::Channel,
            8 => Self::Role,
            10 => Self::Number,
            _ => return None,
        })
    }
}

impl Serialize for OptionKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for OptionKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        Self::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown option type {}", code)))
    }
}

/// An argument of a slash command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOption {
    #[serde(rename = "type")]
    pub kind: OptionKind,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub required: bool,
}

impl CommandOption {
    /// Create a new optional argument
    pub fn new(kind: OptionKind, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            description: description.into(),
            required: false,
        }
    }

    /// Mark as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Chat-input command payload for the platform's command catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDefinition {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_member_permissions: Option<Permissions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dm_permission: Option<bool>,
    /// Always 1 (chat input)
    #[serde(rename = "type", default = "chat_input")]
    pub kind: u8,
}

fn chat_input() -> u8 {
    1
}

impl CommandDefinition {
    /// Create a definition with a name and description
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            options: Vec::new(),
            default_member_permissions: None,
            dm_permission: None,
            kind: chat_input(),
        }
    }

    /// Add an option
    pub fn with_option(mut self, option: CommandOption) -> Self {
        self.options.push(option);
        self
    }

    /// Restrict visibility to members holding these permissions
    pub fn with_default_member_permissions(mut self, permissions: Permissions) -> Self {
        self.default_member_permissions = Some(permissions);
        self
    }

    /// Allow or forbid use in direct messages
    pub fn with_dm_permission(mut self, allowed: bool) -> Self {
        self.dm_permission = Some(allowed);
        self
    }

    /// Check the platform's naming and length constraints
    pub fn validate(&self) -> HeraldResult<()> {
        validate_name(&self.name).map_err(|m| HeraldError::invalid_definition(&self.name, m))?;
        validate_description(&self.description)
            .map_err(|m| HeraldError::invalid_definition(&self.name, m))?;

        if self.options.len() > OPTIONS_MAX {
            return Err(HeraldError::invalid_definition(
                &self.name,
                format!("at most {} options are allowed", OPTIONS_MAX),
            ));
        }

        let mut seen_optional = false;
        for option in &self.options {
            validate_name(&option.name).map_err(|m| {
                HeraldError::invalid_definition(&self.name, format!("option '{}': {}", option.name, m))
            })?;
            validate_description(&option.description).map_err(|m| {
                HeraldError::invalid_definition(&self.name, format!("option '{}': {}", option.name, m))
            })?;
            if option.required && seen_optional {
                return Err(HeraldError::invalid_definition(
                    &self.name,
                    format!("required option '{}' follows an optional one", option.name),
                ));
            }
            seen_optional |= !option.required;
        }

        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), String> {
    let len = name.chars().count();
    if len == 0 || len > NAME_MAX {
        return Err(format!("name must be 1-{} characters", NAME_MAX));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err("name may only contain lowercase letters, digits, '-' and '_'".to_string());
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), String> {
    let len = description.chars().count();
    if len == 0 || len > DESCRIPTION_MAX {
        return Err(format!("description must be 1-{} characters", DESCRIPTION_MAX));
    }
    Ok(())
}
