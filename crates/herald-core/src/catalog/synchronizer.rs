//! Catalog synchronizer

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{error, info};

use super::api::{CatalogApi, CatalogScope, RestCatalogApi};
use super::error::SyncError;
use crate::config::Settings;
use crate::error::HeraldError;
use crate::handler::CommandDefinition;

/// Result of a successful synchronization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Commands the global catalog reports after the replace
    pub global: usize,
    /// Commands the guild catalog reports after the replace
    pub guild: usize,
    pub elapsed: Duration,
}

/// Reconciles the platform catalogs with the discovered definitions
pub struct CatalogSynchronizer {
    api: Arc<dyn CatalogApi>,
    guild_id: String,
}

impl CatalogSynchronizer {
    pub fn new(api: Arc<dyn CatalogApi>, guild_id: impl Into<String>) -> Self {
        Self {
            api,
            guild_id: guild_id.into(),
        }
    }

    /// Synchronizer over the REST API described by `settings`
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            Arc::new(RestCatalogApi::from_settings(settings)),
            settings.guild_id.clone(),
        )
    }

    /// Replace the global catalog, then the guild catalog, with `definitions`
    ///
    /// Stops at the first failure; a failed global replace skips the guild one.
    pub async fn synchronize(
        &self,
        definitions: &[CommandDefinition],
    ) -> Result<SyncReport, SyncError> {
        for definition in definitions {
            definition.validate().map_err(|e| match e {
                HeraldError::InvalidDefinition { name, message } => {
                    SyncError::InvalidDefinition { name, message }
                }
                other => SyncError::InvalidDefinition {
                    name: definition.name.clone(),
                    message: other.to_string(),
                },
            })?;
        }

        let started = Instant::now();
        info!(
            event_type = "slashCommandLoading",
            count = definitions.len(),
            "Loading slash commands on the platform catalog"
        );

        let global = self
            .api
            .bulk_overwrite(&CatalogScope::Global, definitions)
            .await?;
        let guild = self
            .api
            .bulk_overwrite(&CatalogScope::Guild(self.guild_id.clone()), definitions)
            .await?;

        let report = SyncReport {
            global,
            guild,
            elapsed: started.elapsed(),
        };
        info!(
            event_type = "slashCommandLoaded",
            global = report.global,
            guild = report.guild,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Loaded slash commands on the platform catalog"
        );
        Ok(report)
    }

    /// Run [`synchronize`](Self::synchronize) on a detached task
    ///
    /// The outcome is logged by the task; the handle can be awaited or dropped.
    pub fn spawn(
        self: Arc<Self>,
        definitions: Vec<CommandDefinition>,
    ) -> JoinHandle<Result<SyncReport, SyncError>> {
        tokio::spawn(async move {
            let result = self.synchronize(&definitions).await;
            if let Err(e) = &result {
                error!(
                    event_type = "slashCommandLoadFailed",
                    error = %e,
                    retryable = e.is_retryable(),
                    "Catalog synchronization failed; the platform catalog may be stale"
                );
            }
            result
        })
    }
}
