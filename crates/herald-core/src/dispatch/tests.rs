use super::user_cache::MockUserFetcher;
use super::*;
use crate::config::Settings;
use crate::error::{HeraldError, HeraldResult};
use crate::handler::{BotContext, Command, CommandConf, CommandDefinition, EventHandler, Permission};
use crate::interaction::{Interaction, RecordingResponder, User};
use crate::registry::Registry;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

struct Recorder {
    ctx: Arc<BotContext>,
    conf: CommandConf,
    definition: CommandDefinition,
    reply: &'static str,
    allow: bool,
    fail: bool,
    runs: Arc<AtomicUsize>,
}

#[async_trait]
impl Command for Recorder {
    fn conf(&self) -> &CommandConf {
        &self.conf
    }

    fn definition(&self) -> Option<&CommandDefinition> {
        Some(&self.definition)
    }

    fn can_run(&self, _interaction: &Interaction) -> bool {
        self.allow
    }

    async fn run(&self, interaction: Interaction) -> HeraldResult<()> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(HeraldError::handler(&self.conf.name, "boom"));
        }
        self.ctx.respond(&interaction, self.reply).await
    }
}

struct Harness {
    dispatcher: Dispatcher,
    responder: Arc<RecordingResponder>,
    ctx: Arc<BotContext>,
    registry: Arc<Registry>,
}

impl Harness {
    fn new() -> Self {
        Self::with_users(Arc::new(UserCache::new(16, Duration::from_secs(60))))
    }

    fn with_users(users: Arc<dyn UserDirectory>) -> Self {
        let responder = Arc::new(RecordingResponder::new());
        let ctx = Arc::new(BotContext::new(
            Arc::new(Settings::for_testing()),
            responder.clone(),
        ));
        let registry = Arc::new(Registry::new());
        Self {
            dispatcher: Dispatcher::new(registry.clone(), users),
            responder,
            ctx,
            registry,
        }
    }

    fn register(&self, name: &'static str, reply: &'static str, allow: bool, fail: bool) -> Arc<AtomicUsize> {
        let runs = Arc::new(AtomicUsize::new(0));
        let command = Recorder {
            ctx: self.ctx.clone(),
            conf: CommandConf::new(name).with_permission(Permission::SendMessages),
            definition: CommandDefinition::new(name, "records calls"),
            reply,
            allow,
            fail,
            runs: runs.clone(),
        };
        self.registry.insert(Arc::new(command), name).unwrap();
        runs
    }
}

fn command_payload(name: &str) -> Value {
    json!({
        "id": "900",
        "application_id": "100",
        "type": 2,
        "token": "tok",
        "guild_id": "200",
        "data": { "id": "1", "name": name },
        "member": {
            "user": { "id": "42", "username": "ada" },
            "permissions": "2048"
        }
    })
}

async fn finish(outcome: DispatchOutcome) {
    if let DispatchOutcome::Invoked(handle) = outcome {
        handle.await.unwrap();
    }
}

#[tokio::test]
async fn test_successful_round_trip() {
    let harness = Harness::new();
    let runs = harness.register("pingtwo", "Pong 2!", true, false);

    let outcome = harness.dispatcher.on_interaction(&command_payload("pingtwo")).await;
    assert!(outcome.is_invoked());
    finish(outcome).await;

    assert_eq!(runs.load(Ordering::SeqCst), 1);
    let replies = harness.responder.replies();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].content, "Pong 2!");
    assert_eq!(replies[0].command.as_deref(), Some("pingtwo"));
}

#[tokio::test]
async fn test_unknown_command_is_ignored() {
    let harness = Harness::new();
    let runs = harness.register("pingtwo", "Pong 2!", true, false);

    let outcome = harness
        .dispatcher
        .on_interaction(&command_payload("doesnotexist"))
        .await;

    assert_eq!(outcome.discard_reason(), Some(DiscardReason::UnknownCommand));
    assert_eq!(runs.load(Ordering::SeqCst), 0);
    assert!(harness.responder.replies().is_empty());
}

#[tokio::test]
async fn test_non_command_interaction_is_ignored() {
    let harness = Harness::new();
    let runs = harness.register("pingtwo", "Pong 2!", true, false);

    let mut payload = command_payload("pingtwo");
    payload["type"] = json!(3);
    let outcome = harness.dispatcher.on_interaction(&payload).await;

    assert_eq!(outcome.discard_reason(), Some(DiscardReason::NotCommand));
    assert_eq!(runs.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_malformed_payload_is_ignored() {
    let harness = Harness::new();
    let outcome = harness.dispatcher.on_interaction(&json!({ "type": "x" })).await;
    assert_eq!(outcome.discard_reason(), Some(DiscardReason::Malformed));
}

#[tokio::test]
async fn test_missing_member_is_ignored() {
    let harness = Harness::new();
    let runs = harness.register("pingtwo", "Pong 2!", true, false);

    let mut payload = command_payload("pingtwo");
    payload.as_object_mut().unwrap().remove("member");
    payload["user"] = json!({ "id": "42", "username": "ada" });
    let outcome = harness.dispatcher.on_interaction(&payload).await;

    assert_eq!(outcome.discard_reason(), Some(DiscardReason::MissingMember));
    assert_eq!(runs.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unresolvable_user_is_ignored() {
    let mut fetcher = MockUserFetcher::new();
    fetcher.expect_fetch_user().times(1).returning(|_| Ok(None));
    let users = UserCache::new(16, Duration::from_secs(60)).with_fetcher(Arc::new(fetcher));

    let harness = Harness::with_users(Arc::new(users));
    let runs = harness.register("pingtwo", "Pong 2!", true, false);

    let outcome = harness.dispatcher.on_interaction(&command_payload("pingtwo")).await;
    assert_eq!(outcome.discard_reason(), Some(DiscardReason::UnknownUser));
    assert_eq!(runs.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_authorization_gate_blocks_run() {
    let harness = Harness::new();
    let runs = harness.register("secret", "nope", false, false);

    for _ in 0..3 {
        let outcome = harness.dispatcher.on_interaction(&command_payload("secret")).await;
        assert_eq!(outcome.discard_reason(), Some(DiscardReason::Unauthorized));
    }
    assert_eq!(runs.load(Ordering::SeqCst), 0);
    assert!(harness.responder.replies().is_empty());
}

#[tokio::test]
async fn test_failing_command_does_not_affect_next_dispatch() {
    let harness = Harness::new();
    let failing = harness.register("broken", "", true, true);
    let working = harness.register("pingtwo", "Pong 2!", true, false);

    finish(harness.dispatcher.on_interaction(&command_payload("broken")).await).await;
    finish(harness.dispatcher.on_interaction(&command_payload("pingtwo")).await).await;

    assert_eq!(failing.load(Ordering::SeqCst), 1);
    assert_eq!(working.load(Ordering::SeqCst), 1);
    assert_eq!(harness.registry.len(), 2);
    assert_eq!(harness.responder.replies().len(), 1);
}

fn user(id: &str, name: &str) -> User {
    User {
        id: id.to_string(),
        username: name.to_string(),
        global_name: None,
        bot: false,
    }
}

#[tokio::test]
async fn test_user_cache_without_fetcher_trusts_payload() {
    let cache = UserCache::new(4, Duration::from_secs(60));
    let resolved = cache.resolve(&user("1", "ada")).await.unwrap();
    assert_eq!(resolved.username, "ada");
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_user_cache_serves_fresh_entries_without_fetching() {
    let mut fetcher = MockUserFetcher::new();
    fetcher.expect_fetch_user().never();
    let cache = UserCache::new(4, Duration::from_secs(60)).with_fetcher(Arc::new(fetcher));

    cache.observe(user("1", "cached-name"));
    let resolved = cache.resolve(&user("1", "payload-name")).await.unwrap();
    assert_eq!(resolved.username, "cached-name");
}

#[tokio::test]
async fn test_user_cache_refreshes_stale_entries() {
    let mut fetcher = MockUserFetcher::new();
    fetcher
        .expect_fetch_user()
        .times(1)
        .returning(|id| Ok(Some(user(id, "renamed"))));
    let cache = UserCache::new(4, Duration::ZERO).with_fetcher(Arc::new(fetcher));

    cache.observe(user("1", "old"));
    let resolved = cache.resolve(&user("1", "old")).await.unwrap();
    assert_eq!(resolved.username, "renamed");
    assert_eq!(cache.get("1").unwrap().username, "renamed");
}

#[tokio::test]
async fn test_user_cache_falls_back_to_stale_on_fetch_error() {
    let mut fetcher = MockUserFetcher::new();
    fetcher
        .expect_fetch_user()
        .returning(|_| Err(HeraldError::http("timeout")));
    let cache = UserCache::new(4, Duration::ZERO).with_fetcher(Arc::new(fetcher));

    assert!(cache.resolve(&user("1", "ada")).await.is_none());
    cache.observe(user("1", "ada"));
    assert_eq!(cache.resolve(&user("1", "ada")).await.unwrap().username, "ada");
}

#[tokio::test]
async fn test_user_cache_is_bounded() {
    let cache = UserCache::new(2, Duration::from_secs(60));
    for id in ["1", "2", "3"] {
        cache.observe(user(id, id));
    }
    assert_eq!(cache.len(), 2);
    assert!(cache.get("1").is_none());
}

struct CountingHandler {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

#[async_trait]
impl EventHandler for CountingHandler {
    async fn run(&self, args: Vec<Value>) -> HeraldResult<()> {
        self.calls.fetch_add(args.len(), Ordering::SeqCst);
        if self.fail {
            return Err(HeraldError::handler("counting", "boom"));
        }
        Ok(())
    }
}

#[tokio::test]
async fn test_event_bus_emits_to_all_subscribers() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut bus = EventBus::new();
    bus.subscribe(
        "ready",
        Arc::new(CountingHandler {
            calls: calls.clone(),
            fail: true,
        }),
    );
    bus.subscribe(
        "ready",
        Arc::new(CountingHandler {
            calls: calls.clone(),
            fail: false,
        }),
    );

    for handle in bus.emit("ready", vec![json!({}), json!({})]) {
        handle.await.unwrap();
    }

    assert_eq!(calls.load(Ordering::SeqCst), 4);
    assert_eq!(bus.handler_count("ready"), 2);
    assert_eq!(bus.event_names(), vec!["ready"]);
}

#[tokio::test]
async fn test_event_bus_drops_unsubscribed_events() {
    let bus = EventBus::new();
    assert!(bus.emit("messageCreate", vec![json!({})]).is_empty());
}
