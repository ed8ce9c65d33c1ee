//! Layered settings loading
//!
//! Defaults, then an optional TOML file, then environment variables. A `.env`
//! file is folded into the process environment first when present.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::logging_config::LoggingConfig;
use super::settings::{
    AcmUrlCredentials, CatalogConfig, DiscoveryConfig, HandlerPaths, Presence, Settings,
    UserCacheConfig,
};
use crate::error::{HeraldError, HeraldResult};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "herald.toml";

/// Shape of the optional TOML file; every field may be omitted
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    token: Option<String>,
    prefix: Option<String>,
    client_id: Option<String>,
    guild_id: Option<String>,
    acmurl: FileAcmUrl,
    paths: HandlerPaths,
    presence: Presence,
    catalog: CatalogConfig,
    discovery: DiscoveryConfig,
    users: UserCacheConfig,
    logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileAcmUrl {
    username: Option<String>,
    password: Option<String>,
}

/// Loads [`Settings`] and fails fast on missing required values
#[derive(Debug, Clone, Default)]
pub struct SettingsLoader {
    config_file: Option<PathBuf>,
    dotenv_file: Option<PathBuf>,
}

impl SettingsLoader {
    /// Create a loader with no file layer
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a TOML file before applying the environment. A missing file is skipped.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Load a specific dotenv file instead of searching for `.env`
    pub fn with_dotenv_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.dotenv_file = Some(path.into());
        self
    }

    /// Resolve settings from the process environment
    pub fn load(&self) -> HeraldResult<Settings> {
        let dotenv_result = match &self.dotenv_file {
            Some(path) => dotenv::from_path(path).map(|_| path.clone()),
            None => dotenv::dotenv(),
        };
        if let Ok(path) = dotenv_result {
            debug!(path = %path.display(), "Loaded dotenv file");
        }

        self.load_with(|key| std::env::var(key).ok())
    }

    /// Resolve settings using `lookup` as the environment
    pub fn load_with<F>(&self, lookup: F) -> HeraldResult<Settings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match &self.config_file {
            Some(path) => read_file(path)?,
            None => FileSettings::default(),
        };

        // Empty values count as absent.
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = require(var("BOT_TOKEN").or(file.token), "bot token", "BOT_TOKEN")?;
        let prefix = require(var("BOT_PREFIX").or(file.prefix), "bot prefix", "BOT_PREFIX")?;
        let client_id = require(var("CLIENT_ID").or(file.client_id), "app client ID", "CLIENT_ID")?;
        let guild_id = require(
            var("DISCORD_GUILD_ID").or(file.guild_id),
            "Discord Guild ID",
            "DISCORD_GUILD_ID",
        )?;
        let username = require(
            var("ACMURL_USERNAME").or(file.acmurl.username),
            "ACMURL Username",
            "ACMURL_USERNAME",
        )?;
        let password = require(
            var("ACMURL_PASSWORD").or(file.acmurl.password),
            "ACMURL Password",
            "ACMURL_PASSWORD",
        )?;

        let mut paths = file.paths;
        if let Some(dir) = var("HERALD_COMMANDS_DIR") {
            paths.commands = PathBuf::from(dir);
        }
        if let Some(dir) = var("HERALD_EVENTS_DIR") {
            paths.events = PathBuf::from(dir);
        }

        let mut catalog = file.catalog;
        if let Some(base) = var("HERALD_API_BASE") {
            catalog.api_base = base;
        }
        if let Some(secs) = var("HERALD_SYNC_TIMEOUT_SECS") {
            catalog.timeout_secs = secs.parse().map_err(|_| {
                HeraldError::config_with_context(
                    "Invalid HERALD_SYNC_TIMEOUT_SECS value",
                    format!("Parsing timeout value '{}'", secs),
                )
            })?;
        }
        if catalog.timeout_secs == 0 {
            return Err(HeraldError::config("Catalog timeout must be greater than zero"));
        }

        let mut discovery = file.discovery;
        if let Some(policy) = var("HERALD_LOAD_POLICY") {
            discovery.load_policy = policy.parse()?;
        }

        let mut logging = file.logging;
        if let Some(level) = var("HERALD_LOG") {
            logging.level = level;
        }
        if let Some(format) = var("HERALD_LOG_FORMAT") {
            logging.format = format.parse()?;
        }

        Ok(Settings {
            token,
            prefix,
            client_id,
            guild_id,
            acmurl: AcmUrlCredentials { username, password },
            paths,
            presence: file.presence,
            catalog,
            discovery,
            users: file.users,
            logging,
        })
    }
}

fn require(value: Option<String>, what: &str, variable: &str) -> HeraldResult<String> {
    value.ok_or_else(|| HeraldError::missing_setting(what, variable))
}

fn read_file(path: &Path) -> HeraldResult<FileSettings> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file not found, using defaults");
        return Ok(FileSettings::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        HeraldError::config_with_context(
            format!("Failed to read config file: {}", e),
            format!("Reading configuration from '{}'", path.display()),
        )
    })?;

    toml::from_str(&content).map_err(|e| {
        HeraldError::config_with_context(
            format!("Failed to parse TOML config: {}", e),
            format!("Deserializing TOML configuration from '{}'", path.display()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LoadFailurePolicy, LogFormat};
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn full_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("BOT_TOKEN", "token-abc"),
            ("BOT_PREFIX", "!"),
            ("CLIENT_ID", "111"),
            ("DISCORD_GUILD_ID", "222"),
            ("ACMURL_USERNAME", "user"),
            ("ACMURL_PASSWORD", "pass"),
        ])
    }

    fn lookup<'a>(
        env: &'a HashMap<&'static str, &'static str>,
    ) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| env.get(key).map(|v| v.to_string())
    }

    #[test]
    fn test_load_from_env() {
        let env = full_env();
        let settings = SettingsLoader::new().load_with(lookup(&env)).unwrap();

        assert_eq!(settings.token, "token-abc");
        assert_eq!(settings.prefix, "!");
        assert_eq!(settings.client_id, "111");
        assert_eq!(settings.guild_id, "222");
        assert_eq!(settings.acmurl.username, "user");
        assert_eq!(settings.paths, HandlerPaths::default());
        assert_eq!(settings.discovery.load_policy, LoadFailurePolicy::Abort);
    }

    #[test]
    fn test_each_required_value_fails_fast() {
        for (key, what) in [
            ("BOT_TOKEN", "bot token"),
            ("BOT_PREFIX", "bot prefix"),
            ("CLIENT_ID", "app client ID"),
            ("DISCORD_GUILD_ID", "Discord Guild ID"),
            ("ACMURL_USERNAME", "ACMURL Username"),
            ("ACMURL_PASSWORD", "ACMURL Password"),
        ] {
            let mut env = full_env();
            env.remove(key);
            let err = SettingsLoader::new().load_with(lookup(&env)).unwrap_err();
            assert!(err.is_fatal());
            assert!(
                err.to_string().ends_with(what),
                "missing {} produced '{}'",
                key,
                err
            );
        }
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let mut env = full_env();
        env.insert("BOT_TOKEN", "  ");
        assert!(SettingsLoader::new().load_with(lookup(&env)).is_err());
    }

    #[test]
    fn test_file_layer_with_env_override() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("herald.toml");
        fs::write(
            &path,
            r#"
prefix = "?"
client_id = "from-file"

[paths]
commands = "bot/commands"

[catalog]
timeout_secs = 5

[discovery]
load_policy = "skip"

[logging]
format = "json"
"#,
        )
        .unwrap();

        let mut env = full_env();
        env.remove("BOT_PREFIX");
        env.remove("CLIENT_ID");
        env.insert("HERALD_EVENTS_DIR", "bot/events");

        let settings = SettingsLoader::new()
            .with_config_file(&path)
            .load_with(lookup(&env))
            .unwrap();

        assert_eq!(settings.prefix, "?");
        assert_eq!(settings.client_id, "from-file");
        assert_eq!(settings.paths.commands, PathBuf::from("bot/commands"));
        assert_eq!(settings.paths.events, PathBuf::from("bot/events"));
        assert_eq!(settings.catalog.timeout_secs, 5);
        assert_eq!(settings.discovery.load_policy, LoadFailurePolicy::Skip);
        assert_eq!(settings.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let env = full_env();
        let settings = SettingsLoader::new()
            .with_config_file("/nonexistent/herald.toml")
            .load_with(lookup(&env))
            .unwrap();
        assert_eq!(settings.catalog, CatalogConfig::default());
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let mut env = full_env();
        env.insert("HERALD_SYNC_TIMEOUT_SECS", "soon");
        assert!(SettingsLoader::new().load_with(lookup(&env)).is_err());

        env.insert("HERALD_SYNC_TIMEOUT_SECS", "0");
        assert!(SettingsLoader::new().load_with(lookup(&env)).is_err());
    }

    #[test]
    #[serial_test::serial]
    fn test_load_reads_process_env() {
        let temp = TempDir::new().unwrap();
        let dotenv_path = temp.path().join(".env");
        fs::write(
            &dotenv_path,
            "BOT_TOKEN=dotenv-token\nBOT_PREFIX=!\nCLIENT_ID=1\nDISCORD_GUILD_ID=2\nACMURL_USERNAME=u\nACMURL_PASSWORD=p\n",
        )
        .unwrap();

        let settings = SettingsLoader::new()
            .with_dotenv_file(&dotenv_path)
            .load()
            .unwrap();
        assert_eq!(settings.token, "dotenv-token");

        unsafe {
            for key in [
                "BOT_TOKEN",
                "BOT_PREFIX",
                "CLIENT_ID",
                "DISCORD_GUILD_ID",
                "ACMURL_USERNAME",
                "ACMURL_PASSWORD",
            ] {
                std::env::remove_var(key);
            }
        }
    }
}
