//! Handler discovery
//!
//! Walks the configured handler directories and constructs every handler
//! unit found there. The directory tree is the manifest: a file's path
//! relative to the root, without extension, is its handler key
//! (`PingTwo`, `nested/NestedTwo`), and the key selects a factory from the
//! static [`HandlerManifest`].
//!
//! A handler file may be empty, or contain TOML overriding registration:
//!
//! ```toml
//! enabled = false
//! ```

mod manifest;
mod walker;


pub use manifest::{CommandFactory, EventFactory, HandlerManifest};
pub use walker::{DiscoveredEvent, Discovery};
