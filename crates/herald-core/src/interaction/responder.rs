//! Replying to interactions

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use super::types::Interaction;
use crate::config::timeouts;
use crate::error::{HeraldError, HeraldResult};

/// Sends replies to interactions on behalf of commands
#[async_trait]
pub trait InteractionResponder: Send + Sync {
    /// Reply to `interaction` with a plain message
    async fn respond(&self, interaction: &Interaction, content: &str) -> HeraldResult<()>;
}

/// Responder that posts interaction callbacks to the platform REST API
pub struct RestResponder {
    client: Client,
    api_base: String,
    timeout: Duration,
}

impl RestResponder {
    /// Create a responder against `api_base` (e.g. `https://discord.com/api/v10`)
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            timeout: timeouts::interaction_callback_timeout(),
        }
    }

    /// Override the callback timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn callback_url(&self, interaction: &Interaction) -> String {
        format!(
            "{}/interactions/{}/{}/callback",
            self.api_base, interaction.id, interaction.token
        )
    }

    /// Callback URL safe to log; the interaction token is a credential
    fn redacted_url(&self, interaction: &Interaction) -> String {
        format!("{}/interactions/{}/<token>/callback", self.api_base, interaction.id)
    }
}

#[async_trait]
impl InteractionResponder for RestResponder {
    async fn respond(&self, interaction: &Interaction, content: &str) -> HeraldResult<()> {
        let url = self.callback_url(interaction);
        // 4 = CHANNEL_MESSAGE_WITH_SOURCE
        let body = json!({ "type": 4, "data": { "content": content } });

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| HeraldError::Http {
                message: format!("Interaction callback failed: {}", e.without_url()),
                url: Some(self.redacted_url(interaction)),
                status_code: None,
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(HeraldError::http_status(
                format!("Interaction callback rejected: {}", text),
                self.redacted_url(interaction),
                status.as_u16(),
            ));
        }

        debug!(interaction_id = %interaction.id, "Replied to interaction");
        Ok(())
    }
}

/// A reply captured by [`RecordingResponder`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedReply {
    pub interaction_id: String,
    pub command: Option<String>,
    pub content: String,
}

/// Responder that keeps replies in memory instead of sending them
#[derive(Debug, Default)]
pub struct RecordingResponder {
    replies: Mutex<Vec<RecordedReply>>,
}

impl RecordingResponder {
    pub fn new() -> Self {
        Self::default()
    }

    /// All replies recorded so far, in order
    pub fn replies(&self) -> Vec<RecordedReply> {
        self.replies.lock().clone()
    }
}

#[async_trait]
impl InteractionResponder for RecordingResponder {
    async fn respond(&self, interaction: &Interaction, content: &str) -> HeraldResult<()> {
        self.replies.lock().push(RecordedReply {
            interaction_id: interaction.id.clone(),
            command: interaction.command_name().map(str::to_string),
            content: content.to_string(),
        });
        Ok(())
    }
}
