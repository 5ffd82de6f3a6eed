//! Path-addressed configuration store
//!
//! Holds one JSON configuration tree and replaces it on every change.
//! Updates are expressed as sparse patches that are deep-merged into the
//! current value, so writing one leaf never drops its siblings.

mod error;
mod merge;
mod path;
mod store;

pub use error::PatchParseError;
pub use merge::{deep_merge, merge_layers};
pub use path::ConfigPath;
pub use store::{ConfigSnapshot, ConfigStore};

pub use serde_json::{Map, Value};
