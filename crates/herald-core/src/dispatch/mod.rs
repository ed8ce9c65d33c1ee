//! Event routing and interaction dispatch
//!
//! The [`EventBus`] is the subscription table that binds discovered event
//! handlers to platform event names. The [`Dispatcher`] implements the
//! interaction pipeline used by the `interactionCreate` handler:
//!
//! 1. Filter: only application-command interactions continue
//! 2. Resolve: the command must be in the [`Registry`](crate::registry::Registry)
//! 3. Identify actor: the member and its user must be resolvable
//! 4. Authorize: [`Command::can_run`](crate::handler::Command::can_run)
//! 5. Invoke: `run` on its own task, not awaited
//!
//! Steps 1-4 end in a logged discard; nothing is retried.

mod dispatcher;
mod event_bus;
mod user_cache;

#[cfg(test)]
mod tests;

pub use dispatcher::{DiscardReason, DispatchOutcome, Dispatcher, INTERACTION_CREATE};
pub use event_bus::EventBus;
pub use user_cache::{RestUserFetcher, UserCache, UserDirectory, UserFetcher};
