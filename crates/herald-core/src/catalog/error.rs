//! Catalog synchronization errors

use thiserror::Error;

use super::api::CatalogScope;

/// Failure of a catalog bulk replace
#[derive(Error, Debug, Clone)]
pub enum SyncError {
    /// A definition would be rejected by the platform; nothing was sent
    #[error("Invalid command definition '{name}': {message}")]
    InvalidDefinition { name: String, message: String },

    /// The request did not complete in time
    #[error("Catalog update for {scope} timed out after {seconds}s")]
    Timeout { scope: CatalogScope, seconds: u64 },

    /// Connection or protocol failure
    #[error("Catalog update for {scope} failed: {message}")]
    Transport { scope: CatalogScope, message: String },

    /// The platform answered with a non-success status
    #[error("Catalog update for {scope} rejected with status {status}: {body}")]
    Api {
        scope: CatalogScope,
        status: u16,
        body: String,
    },
}

impl SyncError {
    /// Scope of the failed request, if a request was made
    pub fn scope(&self) -> Option<&CatalogScope> {
        match self {
            Self::InvalidDefinition { .. } => None,
            Self::Timeout { scope, .. } | Self::Transport { scope, .. } | Self::Api { scope, .. } => {
                Some(scope)
            }
        }
    }

    /// Whether retrying the same request might succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Transport { .. } => true,
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            Self::InvalidDefinition { .. } => false,
        }
    }
}
