//! Command catalog synchronization
//!
//! Pushes the discovered command definitions to the platform's command
//! catalog. Each push is a bulk replace: the sent list becomes the complete
//! catalog for that scope, so repeating a push is harmless.
//!
//! The global catalog is replaced first, then the guild catalog with the same
//! payload. Guild-scoped commands appear immediately, while global ones take
//! a while to propagate.

mod api;
mod error;
mod synchronizer;


pub use api::{CatalogApi, CatalogScope, RestCatalogApi};
pub use error::SyncError;
pub use synchronizer::{CatalogSynchronizer, SyncReport};
