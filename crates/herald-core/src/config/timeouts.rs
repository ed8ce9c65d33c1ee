//! Centralized timeout configuration
//!
//! Default timeout values for the REST calls Herald makes. All of them can be
//! overridden via configuration.

use std::time::Duration;

/// Default timeout for each catalog bulk-replace request (15 seconds)
pub const CATALOG_REQUEST_SECS: u64 = 15;

/// Default timeout for interaction callbacks (3 seconds, the platform's reply window)
pub const INTERACTION_CALLBACK_SECS: u64 = 3;

/// Default timeout for user lookups (10 seconds)
pub const USER_FETCH_SECS: u64 = 10;

/// Get catalog request timeout as Duration
pub fn catalog_request_timeout() -> Duration {
    Duration::from_secs(CATALOG_REQUEST_SECS)
}

/// Get interaction callback timeout as Duration
pub fn interaction_callback_timeout() -> Duration {
    Duration::from_secs(INTERACTION_CALLBACK_SECS)
}

/// Get user fetch timeout as Duration
pub fn user_fetch_timeout() -> Duration {
    Duration::from_secs(USER_FETCH_SECS)
}
