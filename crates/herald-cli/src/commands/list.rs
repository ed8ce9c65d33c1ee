//! `herald commands`

use herald_core::config::Settings;
use herald_core::dispatch::UserCache;
use herald_core::interaction::RecordingResponder;
use std::sync::Arc;
use std::time::Duration;

/// Print the commands discovery registers
pub async fn execute(settings: Settings) -> anyhow::Result<()> {
    let bot = super::start(
        super::builder(settings)
            .with_responder(Arc::new(RecordingResponder::new()))
            .with_users(Arc::new(UserCache::new(1, Duration::ZERO))),
    )
    .await?;

    let registry = bot.registry();
    if registry.is_empty() {
        println!("No commands registered.");
        return Ok(());
    }

    println!("{:<16} {:<14} {:<20} {:<24} DESCRIPTION", "NAME", "CATEGORY", "USAGE", "SOURCE");
    for command in registry.commands() {
        let conf = command.conf();
        let source = registry.source_of(&conf.name).unwrap_or_default();
        println!(
            "{:<16} {:<14} {:<20} {:<24} {}",
            conf.name, conf.category, conf.usage, source, conf.description
        );
    }
    println!("\n{} commands, events: {}", registry.len(), bot.events().event_names().join(", "));
    Ok(())
}
