//! Handler units shipped with Herald
//!
//! Every handler is listed in [`manifest`] under its handler key, which is
//! the path of its handler file relative to the commands or events root
//! without the extension.

pub mod commands;
pub mod events;

pub use commands::{Nested, NestedTwo, PingTwo};
pub use events::{InteractionCreate, Ready};

use herald_core::discovery::HandlerManifest;
use herald_core::handler::{Command, EventHandler};
use std::sync::Arc;

/// Handler key → factory table for every bundled handler
pub fn manifest() -> HandlerManifest {
    HandlerManifest::new()
        .with_command("PingTwo", |ctx| Ok(Arc::new(PingTwo::new(ctx.clone())) as Arc<dyn Command>))
        .with_command("nested/Nested", |ctx| {
            Ok(Arc::new(Nested::new(ctx.clone())) as Arc<dyn Command>)
        })
        .with_command("nested/NestedTwo", |ctx| {
            Ok(Arc::new(NestedTwo::new(ctx.clone())) as Arc<dyn Command>)
        })
        .with_event("InteractionCreate", |ctx| {
            Ok(Arc::new(InteractionCreate::new(ctx.dispatcher.clone())) as Arc<dyn EventHandler>)
        })
        .with_event("Ready", |ctx| {
            Ok(Arc::new(Ready::new(ctx.bot.clone())) as Arc<dyn EventHandler>)
        })
}
