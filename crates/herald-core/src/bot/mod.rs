//! Process wiring
//!
//! [`Bot`] performs the startup sequence: command discovery fills the
//! registry, event handlers are discovered and bound on the [`EventBus`],
//! and the definition set is kept for catalog synchronization. After
//! startup the handler sets never change.

mod gateway;


pub use gateway::GatewayEvent;

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;

use crate::catalog::{CatalogApi, CatalogSynchronizer, SyncError, SyncReport};
use crate::config::Settings;
use crate::discovery::{Discovery, HandlerManifest};
use crate::dispatch::{Dispatcher, EventBus, RestUserFetcher, UserCache, UserDirectory};
use crate::error::HeraldResult;
use crate::handler::{BotContext, CommandDefinition, EventContext};
use crate::interaction::{InteractionResponder, RestResponder};
use crate::registry::Registry;

/// A started bot: populated registry, bound events and the definition set
pub struct Bot {
    ctx: Arc<BotContext>,
    registry: Arc<Registry>,
    dispatcher: Arc<Dispatcher>,
    bus: EventBus,
    definitions: Vec<CommandDefinition>,
}

/// Builder for [`Bot`]
pub struct BotBuilder {
    settings: Arc<Settings>,
    manifest: HandlerManifest,
    responder: Option<Arc<dyn InteractionResponder>>,
    users: Option<Arc<dyn UserDirectory>>,
}

impl BotBuilder {
    /// Reply through `responder` instead of the REST callback endpoint
    pub fn with_responder(mut self, responder: Arc<dyn InteractionResponder>) -> Self {
        self.responder = Some(responder);
        self
    }

    /// Resolve users through `users` instead of the REST-backed cache
    pub fn with_users(mut self, users: Arc<dyn UserDirectory>) -> Self {
        self.users = Some(users);
        self
    }

    /// Discover handlers and bind events
    pub async fn start(self) -> HeraldResult<Bot> {
        let settings = self.settings;
        let responder = self
            .responder
            .unwrap_or_else(|| Arc::new(RestResponder::new(settings.catalog.api_base.clone())));
        let users = self.users.unwrap_or_else(|| {
            let fetcher =
                RestUserFetcher::new(settings.catalog.api_base.clone(), settings.token.clone());
            Arc::new(
                UserCache::new(
                    settings.users.capacity,
                    Duration::from_secs(settings.users.ttl_secs),
                )
                .with_fetcher(Arc::new(fetcher)),
            )
        });

        let ctx = Arc::new(BotContext::new(settings.clone(), responder));
        let registry = Arc::new(Registry::new());
        let discovery = Discovery::new(Arc::new(self.manifest), registry.clone())
            .with_policy(settings.discovery.load_policy);

        let definitions = discovery.discover(&ctx, &settings.paths.commands).await?;

        let dispatcher = Arc::new(Dispatcher::new(registry.clone(), users));
        let event_ctx = EventContext {
            bot: ctx.clone(),
            dispatcher: dispatcher.clone(),
        };
        let mut bus = EventBus::new();
        bus.bind_all(
            discovery
                .discover_events(&event_ctx, &settings.paths.events)
                .await?,
        );

        info!(
            commands = registry.len(),
            events = bus.event_names().len(),
            "Bot started"
        );

        Ok(Bot {
            ctx,
            registry,
            dispatcher,
            bus,
            definitions,
        })
    }
}

impl Bot {
    pub fn builder(settings: Arc<Settings>, manifest: HandlerManifest) -> BotBuilder {
        BotBuilder {
            settings,
            manifest,
            responder: None,
            users: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        self.ctx.settings()
    }

    pub fn context(&self) -> &Arc<BotContext> {
        &self.ctx
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    pub fn events(&self) -> &EventBus {
        &self.bus
    }

    /// Definitions of every registered command, in discovery order
    pub fn definitions(&self) -> &[CommandDefinition] {
        &self.definitions
    }

    /// Start catalog synchronization on a detached task
    pub fn spawn_sync(
        &self,
        api: Arc<dyn CatalogApi>,
    ) -> JoinHandle<Result<SyncReport, SyncError>> {
        let synchronizer = CatalogSynchronizer::new(api, self.settings().guild_id.clone());
        Arc::new(synchronizer).spawn(self.definitions.clone())
    }

    /// Emit a gateway event on the bus
    pub fn handle(&self, event: GatewayEvent) -> Vec<JoinHandle<()>> {
        let name = event.name.clone();
        self.bus.emit(&name, event.into_args())
    }
}
