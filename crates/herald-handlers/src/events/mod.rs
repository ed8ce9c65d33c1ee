//! Event handlers

mod interaction_create;
mod ready;

pub use interaction_create::InteractionCreate;
pub use ready::Ready;
