//! Startup configuration with provenance
//!
//! The configuration the screen starts from is the merge of:
//! 1. Built-in defaults for the platform
//! 2. An optional config file (.toml or .json)
//! 3. CLI overrides (`path=value`)

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::defaults::{unset_empty_file_paths, StreamingConfig};
use crate::platform::Platform;
use pili_config_store::{merge_layers, ConfigPath, ConfigStore};

/// Origin of a configuration layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Builtin,
    File,
    Cli,
}

/// One layer that fed the startup configuration.
///
/// Only the file layer carries a path and a digest of its bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSource {
    pub origin: ConfigOrigin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// Merged startup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartupConfig {
    pub platform: Platform,

    /// The merged configuration object
    pub config: Value,

    /// Contributing sources in precedence order
    pub sources: Vec<ConfigSource>,
}

impl StartupConfig {
    /// Build the startup configuration from layers
    pub fn build(
        platform: Platform,
        config_path: Option<&Path>,
        overrides: &[String],
    ) -> Result<Self, ConfigError> {
        let mut layers = Vec::new();
        let mut sources = Vec::new();

        // Layer 1: Built-in defaults
        let defaults = StreamingConfig::defaults(platform)
            .to_value()
            .map_err(|e| ConfigError::ParseError(format!("defaults: {}", e)))?;
        layers.push(defaults);
        sources.push(ConfigSource {
            origin: ConfigOrigin::Builtin,
            path: None,
            digest: None,
        });

        // Layer 2: Config file
        if let Some(path) = config_path {
            let (value, digest) = load_config_file(path)?;
            layers.push(value);
            sources.push(ConfigSource {
                origin: ConfigOrigin::File,
                path: Some(path.to_string_lossy().to_string()),
                digest: Some(digest),
            });
        }

        // Layer 3: CLI overrides
        if !overrides.is_empty() {
            let patches = overrides
                .iter()
                .map(|o| parse_override(o.as_str()))
                .collect::<Result<Vec<_>, _>>()?;
            layers.push(merge_layers(patches));
            sources.push(ConfigSource {
                origin: ConfigOrigin::Cli,
                path: None,
                digest: None,
            });
        }

        let mut store = ConfigStore::new(merge_layers(layers));
        let rewritten = unset_empty_file_paths(&mut store);
        if !rewritten.is_empty() {
            debug!(count = rewritten.len(), "empty startup file paths unset");
        }
        let config = store.into_value();
        info!(%platform, layers = sources.len(), "startup configuration built");

        Ok(Self {
            platform,
            config,
            sources,
        })
    }

    /// Get a config value by path (dot-separated)
    pub fn get(&self, path: &str) -> Option<&Value> {
        ConfigPath::parse(path).lookup(&self.config)
    }

    /// Get a config value as string
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(|v| v.as_str())
    }

    /// Get a config value as u64
    pub fn get_u64(&self, path: &str) -> Option<u64> {
        self.get(path).and_then(|v| v.as_u64())
    }

    /// Get a config value as bool
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(|v| v.as_bool())
    }
}

/// Load a .toml or .json config file, returning the value and digest
fn load_config_file(path: &Path) -> Result<(Value, String), ConfigError> {
    let bytes = fs::read(path)
        .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let digest = hex::encode(hasher.finalize());

    let contents = String::from_utf8(bytes)
        .map_err(|e| ConfigError::ParseError(format!("Invalid UTF-8: {}", e)))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    let value = match extension.as_deref() {
        Some("json") => serde_json::from_str::<Value>(&contents)
            .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e)))?,
        Some("toml") => {
            let toml_value: toml::Value = toml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;
            json_from_toml(toml_value)
        }
        _ => {
            return Err(ConfigError::ParseError(format!(
                "unsupported config file type: {} (expected .toml or .json)",
                path.display()
            )))
        }
    };

    if !value.is_object() {
        return Err(ConfigError::ParseError(format!(
            "{}: top level must be an object",
            path.display()
        )));
    }

    debug!(path = %path.display(), %digest, "loaded config file");
    Ok((value, digest))
}

/// TOML tables become objects in file order; datetimes become their
/// string form and non-finite floats become null.
fn json_from_toml(value: toml::Value) -> Value {
    use toml::Value as T;

    match value {
        T::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, inner)| (key, json_from_toml(inner)))
                .collect(),
        ),
        T::Array(items) => items.into_iter().map(json_from_toml).collect(),
        T::Float(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
        T::Integer(i) => Value::from(i),
        T::Boolean(b) => Value::Bool(b),
        T::String(s) => Value::String(s),
        T::Datetime(dt) => Value::String(dt.to_string()),
    }
}

/// Parse a `path=value` override into a single-branch patch.
///
/// The value is read as JSON when it parses, otherwise as a plain string,
/// so `camera=front` and `profile.quicEnable=true` both work.
pub fn parse_override(raw: &str) -> Result<Value, ConfigError> {
    let (path, value) = raw
        .split_once('=')
        .ok_or_else(|| ConfigError::InvalidOverride(format!("{} (expected path=value)", raw)))?;

    let path = path.trim();
    if path.is_empty() {
        return Err(ConfigError::InvalidOverride(format!("{} (empty path)", raw)));
    }

    let value = serde_json::from_str::<Value>(value)
        .unwrap_or_else(|_| Value::String(value.to_string()));

    Ok(ConfigPath::parse(path).patch_for(value))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid override: {0}")]
    InvalidOverride(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_build_with_defaults_only() {
        let config = StartupConfig::build(Platform::Android, None, &[]).unwrap();

        assert_eq!(config.get_str("camera"), Some("back"));
        assert_eq!(config.get_u64("profile.videoStreamingSetting.fps"), Some(30));
        assert_eq!(config.sources.len(), 1);
        assert_eq!(config.sources[0].origin, ConfigOrigin::Builtin);
    }

    #[test]
    fn test_build_with_cli_overrides() {
        let overrides = vec![
            "camera=front".to_string(),
            "profile.quicEnable=true".to_string(),
            "profile.videoStreamingSetting.fps=15".to_string(),
        ];
        let config = StartupConfig::build(Platform::Android, None, &overrides).unwrap();

        assert_eq!(config.get_str("camera"), Some("front"));
        assert_eq!(config.get_bool("profile.quicEnable"), Some(true));
        assert_eq!(config.get_u64("profile.videoStreamingSetting.fps"), Some(15));
        assert_eq!(config.get_u64("profile.videoStreamingSetting.bps"), Some(819200));
        assert_eq!(config.sources.last().unwrap().origin, ConfigOrigin::Cli);
    }

    #[test]
    fn test_parse_override_value_types() {
        assert_eq!(parse_override("a.b=1").unwrap(), json!({"a": {"b": 1}}));
        assert_eq!(parse_override("a=null").unwrap(), json!({"a": null}));
        assert_eq!(parse_override("a=front").unwrap(), json!({"a": "front"}));
        assert_eq!(parse_override("a=x=y").unwrap(), json!({"a": "x=y"}));
    }

    #[test]
    fn test_parse_override_errors() {
        assert!(matches!(parse_override("camera"), Err(ConfigError::InvalidOverride(_))));
        assert!(matches!(parse_override("=1"), Err(ConfigError::InvalidOverride(_))));
    }

    #[test]
    fn test_load_toml_file() {
        let mut temp = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(temp, "camera = \"front\"").unwrap();
        writeln!(temp, "[profile.videoStreamingSetting]").unwrap();
        writeln!(temp, "fps = 24").unwrap();

        let config = StartupConfig::build(Platform::Android, Some(temp.path()), &[]).unwrap();

        assert_eq!(config.get_str("camera"), Some("front"));
        assert_eq!(config.get_u64("profile.videoStreamingSetting.fps"), Some(24));
        assert_eq!(config.get_u64("profile.videoStreamingSetting.maxFrameInterval"), Some(60));
        assert_eq!(config.sources[1].origin, ConfigOrigin::File);
        assert_eq!(config.sources[1].digest.as_ref().map(|d| d.len()), Some(64));
    }

    #[test]
    fn test_load_json_file_then_cli_wins() {
        let mut temp = Builder::new().suffix(".json").tempfile().unwrap();
        write!(temp, r#"{{"camera": "front", "muted": true}}"#).unwrap();

        let overrides = vec!["camera=back".to_string()];
        let config =
            StartupConfig::build(Platform::Ios, Some(temp.path()), &overrides).unwrap();

        assert_eq!(config.get_str("camera"), Some("back"));
        assert_eq!(config.get_bool("muted"), Some(true));
        assert_eq!(config.sources.len(), 3);
    }

    #[test]
    fn test_empty_file_path_from_layers_is_null() {
        let mut temp = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(temp, "pictureStreamingFile = \"\"").unwrap();

        let overrides = vec![r#"watermarkSetting.src="""#.to_string()];
        let config =
            StartupConfig::build(Platform::Android, Some(temp.path()), &overrides).unwrap();

        assert_eq!(config.get("watermarkSetting.src"), Some(&Value::Null));
        assert_eq!(config.get("pictureStreamingFile"), Some(&Value::Null));
        assert_eq!(config.get_u64("watermarkSetting.alpha"), Some(122));
    }

    #[test]
    fn test_toml_arrays_and_floats() {
        let mut temp = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(temp, "tags = [\"a\", \"b\"]").unwrap();
        writeln!(temp, "[audioMixVolume]").unwrap();
        writeln!(temp, "musicVolume = 0.25").unwrap();

        let config = StartupConfig::build(Platform::Ios, Some(temp.path()), &[]).unwrap();

        assert_eq!(config.get("tags"), Some(&json!(["a", "b"])));
        assert_eq!(config.get("audioMixVolume.musicVolume"), Some(&json!(0.25)));
    }

    #[test]
    fn test_unsupported_extension() {
        let temp = Builder::new().suffix(".yaml").tempfile().unwrap();
        let result = StartupConfig::build(Platform::Android, Some(temp.path()), &[]);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result =
            StartupConfig::build(Platform::Android, Some(Path::new("/nonexistent/pili.toml")), &[]);
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_json_file_must_be_object() {
        let mut temp = Builder::new().suffix(".json").tempfile().unwrap();
        write!(temp, "[1, 2]").unwrap();
        let result = StartupConfig::build(Platform::Android, Some(temp.path()), &[]);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
