//! Inbound interactions and replies

mod responder;
mod types;

pub use responder::{InteractionResponder, RecordedReply, RecordingResponder, RestResponder};
pub use types::{CommandData, Interaction, InteractionKind, Member, User};
