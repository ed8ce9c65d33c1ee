//! Event handler trait

use async_trait::async_trait;
use serde_json::Value;

use crate::error::HeraldResult;

/// Handler bound to one platform event name
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Handle one occurrence of the event with its raw arguments
    async fn run(&self, args: Vec<Value>) -> HeraldResult<()>;
}

/// Derive the subscribed event name from a handler file stem
///
/// Only the first letter is lower-cased: `InteractionCreate` becomes
/// `interactionCreate`.
pub fn event_name_from_stem(stem: &str) -> String {
    let mut chars = stem.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
