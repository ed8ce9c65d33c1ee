//! Resolved bot settings

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::logging_config::LoggingConfig;
use super::timeouts;
use crate::error::HeraldError;

/// Default REST API base of the platform
pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";

/// What Discovery does when a single handler file cannot be constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadFailurePolicy {
    /// Fail the whole discovery run (startup aborts)
    #[default]
    Abort,
    /// Log a warning and keep discovering the remaining files
    Skip,
}

impl FromStr for LoadFailurePolicy {
    type Err = HeraldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            other => Err(HeraldError::config(format!(
                "Unknown load failure policy '{}', expected 'abort' or 'skip'",
                other
            ))),
        }
    }
}

/// Directories scanned for handler files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerPaths {
    pub commands: PathBuf,
    pub events: PathBuf,
}

impl Default for HandlerPaths {
    fn default() -> Self {
        Self {
            commands: PathBuf::from("handlers/commands"),
            events: PathBuf::from("handlers/events"),
        }
    }
}

/// Presence advertised after login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Presence {
    pub status: String,
}

impl Default for Presence {
    fn default() -> Self {
        Self {
            status: "online".to_string(),
        }
    }
}

/// Catalog synchronization settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// REST API base URL
    pub api_base: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: timeouts::CATALOG_REQUEST_SECS,
        }
    }
}

/// Discovery settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub load_policy: LoadFailurePolicy,
}

/// User cache settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserCacheConfig {
    /// Maximum number of cached users
    pub capacity: usize,
    /// Seconds after which a cached user is refreshed
    pub ttl_secs: u64,
}

impl Default for UserCacheConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            ttl_secs: 300,
        }
    }
}

/// Credentials for the URL shortener service used by some commands
#[derive(Clone, PartialEq, Eq)]
pub struct AcmUrlCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for AcmUrlCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AcmUrlCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Immutable bot settings, resolved once at startup
#[derive(Clone)]
pub struct Settings {
    /// Bot token used for REST and gateway authentication
    pub token: String,
    /// Invocation prefix, used in command usage strings
    pub prefix: String,
    /// Application (client) ID
    pub client_id: String,
    /// Guild that receives the guild-scoped catalog
    pub guild_id: String,
    pub acmurl: AcmUrlCredentials,
    pub paths: HandlerPaths,
    pub presence: Presence,
    pub catalog: CatalogConfig,
    pub discovery: DiscoveryConfig,
    pub users: UserCacheConfig,
    pub logging: LoggingConfig,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("token", &"<redacted>")
            .field("prefix", &self.prefix)
            .field("client_id", &self.client_id)
            .field("guild_id", &self.guild_id)
            .field("acmurl", &self.acmurl)
            .field("paths", &self.paths)
            .field("presence", &self.presence)
            .field("catalog", &self.catalog)
            .field("discovery", &self.discovery)
            .field("users", &self.users)
            .field("logging", &self.logging)
            .finish()
    }
}

impl Settings {
    /// Settings with placeholder credentials, for tests and dry runs
    pub fn for_testing() -> Self {
        Self {
            token: "test-token".to_string(),
            prefix: "!".to_string(),
            client_id: "100000000000000001".to_string(),
            guild_id: "200000000000000002".to_string(),
            acmurl: AcmUrlCredentials {
                username: "acm".to_string(),
                password: "acm".to_string(),
            },
            paths: HandlerPaths::default(),
            presence: Presence::default(),
            catalog: CatalogConfig::default(),
            discovery: DiscoveryConfig::default(),
            users: UserCacheConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Build a usage string for a command name (`!ping`)
    pub fn usage_for(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let settings = Settings::for_testing();
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("test-token"));
        assert!(!debug.contains("password: \"acm\""));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_usage_for_uses_prefix() {
        let settings = Settings::for_testing();
        assert_eq!(settings.usage_for("pingtwo"), "!pingtwo");
    }

    #[test]
    fn test_load_policy_parse() {
        assert_eq!("skip".parse::<LoadFailurePolicy>().unwrap(), LoadFailurePolicy::Skip);
        assert_eq!("ABORT".parse::<LoadFailurePolicy>().unwrap(), LoadFailurePolicy::Abort);
        assert!("ignore".parse::<LoadFailurePolicy>().is_err());
    }
}
