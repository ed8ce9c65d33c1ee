//! Configuration management for Herald
//!
//! Settings are resolved once at process start from, in increasing priority:
//! built-in defaults, an optional TOML file, a `.env` file and the process
//! environment. Any missing required value is a fatal startup error.

mod loader;
mod logging_config;
mod settings;

pub mod timeouts;

pub use loader::{SettingsLoader, DEFAULT_CONFIG_FILE};
pub use logging_config::{LogFormat, LoggingConfig};
pub use settings::{
    AcmUrlCredentials, CatalogConfig, DiscoveryConfig, HandlerPaths, LoadFailurePolicy, Presence,
    Settings, UserCacheConfig,
};
