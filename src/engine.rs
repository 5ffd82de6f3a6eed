//! Streaming engine collaborator
//!
//! The engine does capture, encoding and transport. The screen only hands
//! it the full configuration on every render and records what it reports
//! back through its two callbacks.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

use crate::config::StreamingConfig;

/// Engine-reported stream state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamState {
    Idle,
    Preparing,
    Ready,
    Connecting,
    Streaming,
    Shutdown,
    Error,
    Disconnected,
    /// Any state name this build does not know
    #[serde(untagged)]
    Unknown(String),
}

impl StreamState {
    pub fn as_str(&self) -> &str {
        match self {
            StreamState::Idle => "idle",
            StreamState::Preparing => "preparing",
            StreamState::Ready => "ready",
            StreamState::Connecting => "connecting",
            StreamState::Streaming => "streaming",
            StreamState::Shutdown => "shutdown",
            StreamState::Error => "error",
            StreamState::Disconnected => "disconnected",
            StreamState::Unknown(name) => name,
        }
    }
}

impl FromStr for StreamState {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "idle" => StreamState::Idle,
            "preparing" => StreamState::Preparing,
            "ready" => StreamState::Ready,
            "connecting" => StreamState::Connecting,
            "streaming" => StreamState::Streaming,
            "shutdown" => StreamState::Shutdown,
            "error" => StreamState::Error,
            "disconnected" => StreamState::Disconnected,
            other => StreamState::Unknown(other.to_string()),
        })
    }
}

impl fmt::Display for StreamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-form stream statistics record reported by the engine
pub type StreamInfo = Map<String, Value>;

/// Callbacks from the engine into the host
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    StateChanged(StreamState),
    StreamInfoChanged(StreamInfo),
}

/// Property bag handed to the engine.
///
/// The configuration as-is, plus `profile.video` and `profile.audio`
/// aliases of the streaming settings that older engine builds still read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EngineProps(Value);

impl EngineProps {
    pub fn from_config(config: &Value) -> Self {
        let mut props = config.clone();
        if let Some(profile) = props.get_mut("profile").and_then(Value::as_object_mut) {
            let video = profile.get("videoStreamingSetting").cloned();
            let audio = profile.get("audioStreamingSetting").cloned();
            if let Some(video) = video {
                profile.insert("video".to_string(), video);
            }
            if let Some(audio) = audio {
                profile.insert("audio".to_string(), audio);
            }
        }
        Self(props)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

/// The external streaming component
pub trait StreamingEngine {
    /// Receive the full current configuration. Called on every render.
    fn configure(&mut self, props: &EngineProps);
}

/// Engine stand-in that logs each configuration it receives.
#[derive(Debug, Default)]
pub struct TracingEngine {
    configured: u64,
}

impl TracingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configured(&self) -> u64 {
        self.configured
    }
}

impl StreamingEngine for TracingEngine {
    fn configure(&mut self, props: &EngineProps) {
        self.configured += 1;
        match StreamingConfig::from_value(props.as_value()) {
            Ok(config) => info!(
                render = self.configured,
                url = %config.rtmp_url,
                started = config.started,
                camera = %config.camera,
                fps = config.profile.video_streaming_setting.fps,
                bps = config.profile.video_streaming_setting.bps,
                "engine configured"
            ),
            Err(e) => warn!(
                render = self.configured,
                error = %e,
                "engine configured with a configuration it cannot fully read"
            ),
        }
    }
}

/// Engine that keeps every property bag it was given
#[derive(Debug, Default)]
pub struct RecordingEngine {
    pub received: Vec<EngineProps>,
}

impl RecordingEngine {
    pub fn last(&self) -> Option<&EngineProps> {
        self.received.last()
    }
}

impl StreamingEngine for RecordingEngine {
    fn configure(&mut self, props: &EngineProps) {
        self.received.push(props.clone());
    }
}
