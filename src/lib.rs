//! Herald
//!
//! Command registration and event dispatch runtime for chat-platform bots.
//! This crate re-exports [`herald_core`] and the bundled handlers from
//! [`herald_handlers`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use herald::{Bot, RestCatalogApi, SettingsLoader};
//!
//! # async fn start() -> anyhow::Result<()> {
//! let settings = SettingsLoader::new().load()?;
//! let api = Arc::new(RestCatalogApi::from_settings(&settings));
//! let bot = Bot::builder(Arc::new(settings), herald::handlers::manifest())
//!     .start()
//!     .await?;
//! bot.spawn_sync(api);
//! # Ok(())
//! # }
//! ```

pub use herald_core::*;

/// Bundled handler units
pub mod handlers {
    pub use herald_handlers::*;
}
