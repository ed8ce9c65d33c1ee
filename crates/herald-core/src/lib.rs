//! Herald Core Library
//!
//! Registration and dispatch subsystem of the Herald bot runtime: the
//! handler unit contract, handler discovery, the command registry, command
//! catalog synchronization and interaction dispatch.

pub mod bot;
pub mod catalog;
pub mod config;
pub mod discovery;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod interaction;
pub mod registry;

// Re-export commonly used types
pub use bot::{Bot, BotBuilder, GatewayEvent};
pub use catalog::{CatalogApi, CatalogScope, CatalogSynchronizer, RestCatalogApi, SyncError, SyncReport};
pub use config::{LoadFailurePolicy, Settings, SettingsLoader};
pub use discovery::{Discovery, HandlerManifest};
pub use dispatch::{DiscardReason, DispatchOutcome, Dispatcher, EventBus, UserCache, UserDirectory};
pub use error::{HeraldError, HeraldResult};
pub use handler::{
    BotContext, Command, CommandConf, CommandDefinition, EventContext, EventHandler, Permission,
    Permissions,
};
pub use interaction::{Interaction, InteractionResponder, RecordingResponder, RestResponder};
pub use registry::Registry;
