//! Catalog REST boundary

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::debug;

use super::error::SyncError;
use crate::config::Settings;
use crate::handler::CommandDefinition;

/// Which catalog a bulk replace targets
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CatalogScope {
    /// Every guild the application is installed in
    Global,
    /// A single guild
    Guild(String),
}

impl fmt::Display for CatalogScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("global catalog"),
            Self::Guild(id) => write!(f, "guild catalog {}", id),
        }
    }
}

/// Replaces a command catalog with a new set of definitions
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Replace the whole catalog of `scope`; returns how many commands the
    /// platform now reports for it
    async fn bulk_overwrite(
        &self,
        scope: &CatalogScope,
        definitions: &[CommandDefinition],
    ) -> Result<usize, SyncError>;
}

/// [`CatalogApi`] over the platform REST API
pub struct RestCatalogApi {
    client: Client,
    api_base: String,
    application_id: String,
    token: String,
    timeout: Duration,
}

impl RestCatalogApi {
    pub fn new(
        api_base: impl Into<String>,
        application_id: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            application_id: application_id.into(),
            token: token.into(),
            timeout: crate::config::timeouts::catalog_request_timeout(),
        }
    }

    /// Build from resolved settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.catalog.api_base.clone(),
            settings.client_id.clone(),
            settings.token.clone(),
        )
        .with_timeout(Duration::from_secs(settings.catalog.timeout_secs))
    }

    /// Override the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Collection URL for a scope
    pub fn url_for(&self, scope: &CatalogScope) -> String {
        match scope {
            CatalogScope::Global => {
                format!("{}/applications/{}/commands", self.api_base, self.application_id)
            }
            CatalogScope::Guild(guild_id) => format!(
                "{}/applications/{}/guilds/{}/commands",
                self.api_base, self.application_id, guild_id
            ),
        }
    }

    fn transport_error(&self, scope: &CatalogScope, error: reqwest::Error) -> SyncError {
        if error.is_timeout() {
            SyncError::Timeout {
                scope: scope.clone(),
                seconds: self.timeout.as_secs(),
            }
        } else {
            SyncError::Transport {
                scope: scope.clone(),
                message: error.to_string(),
            }
        }
    }
}

#[async_trait]
impl CatalogApi for RestCatalogApi {
    async fn bulk_overwrite(
        &self,
        scope: &CatalogScope,
        definitions: &[CommandDefinition],
    ) -> Result<usize, SyncError> {
        let url = self.url_for(scope);
        debug!(scope = %scope, count = definitions.len(), "Replacing command catalog");

        let response = self
            .client
            .put(&url)
            .header("Authorization", format!("Bot {}", self.token))
            .timeout(self.timeout)
            .json(definitions)
            .send()
            .await
            .map_err(|e| self.transport_error(scope, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::Api {
                scope: scope.clone(),
                status: status.as_u16(),
                body,
            });
        }

        // The replace already succeeded; an unreadable body only loses the count.
        let body = response.bytes().await.unwrap_or_default();
        let stored = serde_json::from_slice::<Value>(&body).ok();
        Ok(stored
            .as_ref()
            .and_then(Value::as_array)
            .map_or(definitions.len(), Vec::len))
    }
}
