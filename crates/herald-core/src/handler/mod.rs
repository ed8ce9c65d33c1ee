//! Handler unit contract
//!
//! A handler unit is either a [`Command`], invoked by name through an
//! interaction, or an [`EventHandler`], invoked for a platform event. Both are
//! constructed once at startup from a factory that receives the shared
//! [`BotContext`].

mod command;
mod context;
mod definition;
mod event;
mod permissions;

pub use command::{Command, CommandConf};
pub use context::{BotContext, EventContext};
pub use definition::{CommandDefinition, CommandOption, OptionKind};
pub use event::{EventHandler, event_name_from_stem};
pub use permissions::{Permission, Permissions};
