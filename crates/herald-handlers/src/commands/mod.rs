//! Slash commands

mod nested;
mod ping_two;

pub use nested::{Nested, NestedTwo};
pub use ping_two::PingTwo;

use herald_core::config::Settings;
use herald_core::handler::{CommandConf, CommandDefinition, Permission};

const PING_DESCRIPTION: &str = "Pings the bot.";

/// Metadata shared by the ping-style commands
fn ping_conf(settings: &Settings, name: &str) -> CommandConf {
    CommandConf::new(name)
        .with_description(PING_DESCRIPTION)
        .with_category("Information")
        .with_usage(settings.usage_for(name))
        .with_permission(Permission::SendMessages)
}

fn ping_definition(name: &str) -> CommandDefinition {
    CommandDefinition::new(name, PING_DESCRIPTION)
}
