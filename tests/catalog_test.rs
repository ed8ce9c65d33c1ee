//! Catalog synchronization against a mock platform API

use herald::{Bot, CatalogSynchronizer, RecordingResponder, RestCatalogApi, Settings, UserCache};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Echoes the submitted commands back, like the platform does
struct EchoCatalog;

impl Respond for EchoCatalog {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        ResponseTemplate::new(200).set_body_json(body)
    }
}

async fn bot(api_base: String) -> Bot {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("handlers");
    let mut settings = Settings::for_testing();
    settings.paths.commands = root.join("commands");
    settings.paths.events = root.join("events");
    settings.catalog.api_base = api_base;

    Bot::builder(Arc::new(settings), herald::handlers::manifest())
        .with_responder(Arc::new(RecordingResponder::new()))
        .with_users(Arc::new(UserCache::new(8, Duration::from_secs(60))))
        .start()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_repeated_sync_sends_identical_payloads() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(header("Authorization", "Bot test-token"))
        .respond_with(EchoCatalog)
        .expect(4)
        .mount(&server)
        .await;

    let bot = bot(server.uri()).await;
    let api = Arc::new(RestCatalogApi::from_settings(bot.settings()));

    let first = bot.spawn_sync(api.clone()).await.unwrap().unwrap();
    let second = bot.spawn_sync(api).await.unwrap().unwrap();
    assert_eq!((first.global, first.guild), (3, 3));
    assert_eq!((second.global, second.guild), (3, 3));

    let requests = server.received_requests().await.unwrap();
    let paths: Vec<&str> = requests.iter().map(|r| r.url.path()).collect();
    assert_eq!(
        paths,
        vec![
            "/applications/100000000000000001/commands",
            "/applications/100000000000000001/guilds/200000000000000002/commands",
            "/applications/100000000000000001/commands",
            "/applications/100000000000000001/guilds/200000000000000002/commands",
        ]
    );

    let bodies: Vec<Value> = requests
        .iter()
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect();
    assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(bodies[0][0]["name"], "pingtwo");
    assert_eq!(bodies[0][0]["type"], 1);
}

#[tokio::test]
async fn test_failed_global_replace_leaves_bot_running() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/applications/100000000000000001/commands"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream error"))
        .expect(1)
        .mount(&server)
        .await;

    let bot = bot(server.uri()).await;
    let synchronizer = Arc::new(CatalogSynchronizer::new(
        Arc::new(RestCatalogApi::from_settings(bot.settings())),
        bot.settings().guild_id.clone(),
    ));

    let err = synchronizer
        .spawn(bot.definitions().to_vec())
        .await
        .unwrap()
        .unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(bot.registry().len(), 3);
}
