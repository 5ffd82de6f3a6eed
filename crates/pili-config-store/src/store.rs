//! The configuration store
//!
//! One current configuration value, replaced wholesale on every change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::PatchParseError;
use crate::merge::deep_merge;
use crate::path::ConfigPath;

static NULL: Value = Value::Null;

/// Holds the current configuration and applies patches to it.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    current: Value,
    revision: u64,
    updated_at: DateTime<Utc>,
}

impl ConfigStore {
    /// Create a store around an initial configuration.
    pub fn new(initial: Value) -> Self {
        Self {
            current: initial,
            revision: 0,
            updated_at: Utc::now(),
        }
    }

    /// The current configuration.
    pub fn current(&self) -> &Value {
        &self.current
    }

    /// Number of changes installed since creation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Value at `path`, or null when any segment is absent.
    pub fn read(&self, path: &ConfigPath) -> &Value {
        path.lookup(&self.current).unwrap_or(&NULL)
    }

    /// Value at `path`, `None` when absent (as opposed to present and null).
    pub fn lookup(&self, path: &ConfigPath) -> Option<&Value> {
        path.lookup(&self.current)
    }

    /// Write `value` at `path` by deep-merging the single-branch patch.
    ///
    /// At the root only an object is accepted. Any other value is ignored
    /// and the configuration is returned unchanged.
    pub fn write(&mut self, path: &ConfigPath, value: Value) -> &Value {
        if path.is_root() && !value.is_object() {
            warn!(value = %value, "ignored non-object write at root");
            return &self.current;
        }
        debug!(path = %path, value = %value, "write");
        let patch = path.patch_for(value);
        self.install(patch)
    }

    /// Parse `text` as a JSON object and deep-merge it.
    ///
    /// Text that parses to anything other than an object (`42`, `null`,
    /// `[1]`, `"x"`) is rejected like malformed JSON. On failure nothing
    /// changes and the error is returned.
    pub fn apply_raw_patch(&mut self, text: &str) -> Result<&Value, PatchParseError> {
        let patch = match parse_patch(text) {
            Ok(patch) => patch,
            Err(e) => {
                warn!(error = %e, "rejected raw patch");
                return Err(e);
            }
        };
        debug!(keys = patch.as_object().map_or(0, |m| m.len()), "apply raw patch");
        Ok(self.install(patch))
    }

    /// Deep-merge an already-built patch.
    pub fn apply_patch(&mut self, patch: Value) -> &Value {
        self.install(patch)
    }

    /// Capture the current configuration with its revision.
    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            revision: self.revision,
            updated_at: self.updated_at,
            config: self.current.clone(),
        }
    }

    pub fn into_value(self) -> Value {
        self.current
    }

    fn install(&mut self, patch: Value) -> &Value {
        // Merge into a copy so anyone holding the previous tree keeps it intact
        let next = deep_merge(self.current.clone(), patch);
        self.current = next;
        self.revision += 1;
        self.updated_at = Utc::now();
        &self.current
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(Value::Object(serde_json::Map::new()))
    }
}

/// Parse raw patch text, requiring an object at the top level.
pub(crate) fn parse_patch(text: &str) -> Result<Value, PatchParseError> {
    let value: Value = serde_json::from_str(text)?;
    match value {
        Value::Object(_) => Ok(value),
        Value::Null => Err(PatchParseError::not_an_object("null")),
        Value::Bool(_) => Err(PatchParseError::not_an_object("boolean")),
        Value::Number(_) => Err(PatchParseError::not_an_object("number")),
        Value::String(_) => Err(PatchParseError::not_an_object("string")),
        Value::Array(_) => Err(PatchParseError::not_an_object("array")),
    }
}

/// A configuration captured at one revision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    pub revision: u64,
    pub updated_at: DateTime<Utc>,
    pub config: Value,
}

impl ConfigSnapshot {
    /// SHA-256 hex digest of the RFC 8785 canonical form of the configuration.
    ///
    /// Equal configurations give equal digests regardless of key order.
    pub fn digest(&self) -> Result<String, serde_json::Error> {
        let jcs_bytes = serde_json_canonicalizer::to_vec(&self.config)?;
        let mut hasher = Sha256::new();
        hasher.update(&jcs_bytes);
        Ok(hex::encode(hasher.finalize()))
    }
}
