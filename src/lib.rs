//! Pili streaming demo
//!
//! Headless model of the Pili live-streaming demo screen: the default
//! streaming configuration, the form controls bound into it, runtime JSON
//! patches, and the engine and permission collaborators around it. The
//! configuration itself lives in a [`pili_config_store::ConfigStore`].

pub mod config;
pub mod engine;
pub mod inputs;
pub mod logging;
pub mod permission;
pub mod platform;
pub mod screen;
pub mod session;

pub use config::{ConfigError, StartupConfig, StreamingConfig};
pub use engine::{EngineEvent, EngineProps, StreamState, StreamingEngine, TracingEngine};
pub use inputs::{screen_controls, Binding, InputError, InputKind};
pub use permission::{Capability, PermissionGate, StaticGate};
pub use platform::Platform;
pub use screen::{Screen, ScreenEvent};

pub use pili_config_store::{ConfigPath, ConfigStore, PatchParseError};
