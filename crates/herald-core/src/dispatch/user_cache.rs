//! User identity resolution

use async_trait::async_trait;
use lru::LruCache;
use parking_lot::Mutex;
use reqwest::{Client, StatusCode};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::config::timeouts;
use crate::error::{HeraldError, HeraldResult};
use crate::interaction::User;

/// Resolves the user behind an interaction
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolve `user` (as seen in a payload) to a current identity
    async fn resolve(&self, user: &User) -> Option<User>;
}

/// Fetches users from the platform
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserFetcher: Send + Sync {
    /// `Ok(None)` when the platform does not know the user
    async fn fetch_user(&self, id: &str) -> HeraldResult<Option<User>>;
}

/// Fetches users over REST (`GET /users/{id}`)
pub struct RestUserFetcher {
    client: Client,
    api_base: String,
    token: String,
    timeout: Duration,
}

impl RestUserFetcher {
    pub fn new(api_base: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.into(),
            timeout: timeouts::user_fetch_timeout(),
        }
    }
}

#[async_trait]
impl UserFetcher for RestUserFetcher {
    async fn fetch_user(&self, id: &str) -> HeraldResult<Option<User>> {
        let url = format!("{}/users/{}", self.api_base, id);
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bot {}", self.token))
            .timeout(self.timeout)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json::<User>().await?)),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(HeraldError::http_status(
                    format!("User lookup failed: {}", body),
                    url,
                    status.as_u16(),
                ))
            }
        }
    }
}

struct CachedUser {
    user: User,
    refreshed_at: Instant,
}

/// Bounded user cache with time-based refresh
///
/// Fresh entries are served from memory. Missing or stale entries are
/// refreshed through the fetcher; without a fetcher the payload's own user
/// object is trusted.
pub struct UserCache {
    entries: Mutex<LruCache<String, CachedUser>>,
    ttl: Duration,
    fetcher: Option<Arc<dyn UserFetcher>>,
}

impl UserCache {
    /// Create a cache holding at most `capacity` users
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
            fetcher: None,
        }
    }

    /// Refresh missing and stale users through `fetcher`
    pub fn with_fetcher(mut self, fetcher: Arc<dyn UserFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Insert or replace a user
    pub fn observe(&self, user: User) {
        self.entries.lock().put(
            user.id.clone(),
            CachedUser {
                user,
                refreshed_at: Instant::now(),
            },
        );
    }

    /// Cached user regardless of age
    pub fn get(&self, id: &str) -> Option<User> {
        self.entries.lock().get(id).map(|c| c.user.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn fresh(&self, id: &str) -> Option<User> {
        let mut entries = self.entries.lock();
        match entries.get(id) {
            Some(cached) if cached.refreshed_at.elapsed() < self.ttl => Some(cached.user.clone()),
            _ => None,
        }
    }
}

#[async_trait]
impl UserDirectory for UserCache {
    async fn resolve(&self, user: &User) -> Option<User> {
        if let Some(cached) = self.fresh(&user.id) {
            return Some(cached);
        }

        let Some(fetcher) = &self.fetcher else {
            self.observe(user.clone());
            return Some(user.clone());
        };

        match fetcher.fetch_user(&user.id).await {
            Ok(Some(fetched)) => {
                debug!(user_id = %fetched.id, "Refreshed user");
                self.observe(fetched.clone());
                Some(fetched)
            }
            Ok(None) => {
                self.entries.lock().pop(&user.id);
                None
            }
            Err(e) => {
                warn!(user_id = %user.id, error = %e, "User refresh failed");
                self.get(&user.id)
            }
        }
    }
}
