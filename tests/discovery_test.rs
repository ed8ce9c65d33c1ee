//! Discovery over the handler tree shipped in `handlers/`

use herald::config::LoadFailurePolicy;
use herald::{Bot, Discovery, Registry, RecordingResponder, Settings, UserCache};
use herald::handler::BotContext;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

fn handlers_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("handlers")
}

fn settings() -> Settings {
    let mut settings = Settings::for_testing();
    settings.paths.commands = handlers_root().join("commands");
    settings.paths.events = handlers_root().join("events");
    settings
}

#[tokio::test]
async fn test_shipped_tree_registers_nested_commands() {
    let settings = Arc::new(settings());
    let ctx = Arc::new(BotContext::new(
        settings.clone(),
        Arc::new(RecordingResponder::new()),
    ));
    let discovery = Discovery::new(
        Arc::new(herald::handlers::manifest()),
        Arc::new(Registry::new()),
    )
    .with_policy(LoadFailurePolicy::Abort);

    let definitions = discovery
        .discover(&ctx, &settings.paths.commands)
        .await
        .unwrap();

    let names: Vec<&str> = definitions.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["pingtwo", "nested", "nestedtwo"]);
    assert_eq!(
        discovery.registry().source_of("nested").as_deref(),
        Some("nested/Nested")
    );
    assert!(definitions.iter().all(|d| d.description == "Pings the bot."));
}

#[tokio::test]
async fn test_shipped_tree_binds_events() {
    let bot = Bot::builder(Arc::new(settings()), herald::handlers::manifest())
        .with_responder(Arc::new(RecordingResponder::new()))
        .with_users(Arc::new(UserCache::new(8, Duration::from_secs(60))))
        .start()
        .await
        .unwrap();

    assert_eq!(bot.events().event_names(), vec!["interactionCreate", "ready"]);
    assert_eq!(bot.registry().len(), bot.definitions().len());
}
