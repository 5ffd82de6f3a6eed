//! The streaming demo screen
//!
//! Headless model of the single screen: the configuration store, the raw
//! patch text box with its error line, the bound controls, and what the
//! engine last reported. Events are applied one at a time; every change
//! installs a new configuration value.

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::unset_empty_file_paths;
use crate::engine::{EngineEvent, EngineProps, StreamInfo, StreamState, StreamingEngine};
use crate::inputs::{screen_controls, Binding, InputError};
use crate::permission::{self, PermissionGate};
use crate::platform::Platform;
use pili_config_store::ConfigStore;

pub const PERMISSION_DENIED_TEXT: &str = "Permission not granted";

/// Something that happens on the screen
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenEvent {
    /// The patch text box changed
    EditPatchText(String),
    /// The submit button was pressed
    SubmitPatch,
    /// A control produced a new value
    Control { index: usize, value: Value },
    /// The engine called back
    Engine(EngineEvent),
}

/// Screen state
pub struct Screen<E: StreamingEngine> {
    platform: Platform,
    permission_granted: bool,
    state: Option<StreamState>,
    stream_info: Option<StreamInfo>,
    patch_input: String,
    patch_error: Option<String>,
    store: ConfigStore,
    controls: Vec<Binding>,
    engine: E,
}

impl<E: StreamingEngine> Screen<E> {
    /// Create the screen. It is not interactive until [`Screen::start`]
    /// resolves the permission request.
    pub fn new(platform: Platform, initial: Value, engine: E) -> Self {
        let mut store = ConfigStore::new(initial);
        unset_empty_file_paths(&mut store);
        Self {
            platform,
            permission_granted: false,
            state: None,
            stream_info: None,
            patch_input: String::new(),
            patch_error: None,
            store,
            controls: screen_controls(platform),
            engine,
        }
    }

    /// Resolve the startup permission request. Returns whether the screen
    /// became interactive.
    pub fn start(&mut self, gate: &mut dyn PermissionGate) -> bool {
        self.permission_granted = permission::acquire(self.platform, gate);
        self.permission_granted
    }

    pub fn is_interactive(&self) -> bool {
        self.permission_granted
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn config(&self) -> &Value {
        self.store.current()
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn controls(&self) -> &[Binding] {
        &self.controls
    }

    pub fn state(&self) -> Option<&StreamState> {
        self.state.as_ref()
    }

    pub fn stream_info(&self) -> Option<&StreamInfo> {
        self.stream_info.as_ref()
    }

    pub fn patch_input(&self) -> &str {
        &self.patch_input
    }

    pub fn patch_error(&self) -> Option<&str> {
        self.patch_error.as_deref()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Apply one event.
    ///
    /// Events arriving before permission is granted are dropped. A rejected
    /// control value is returned as an error and changes nothing; a bad
    /// patch is not an error here, it is shown on the error line.
    pub fn handle(&mut self, event: ScreenEvent) -> Result<(), InputError> {
        if !self.permission_granted {
            debug!(?event, "screen not interactive, event dropped");
            return Ok(());
        }

        match event {
            ScreenEvent::EditPatchText(text) => {
                self.patch_input = text;
            }
            ScreenEvent::SubmitPatch => self.submit_patch(),
            ScreenEvent::Control { index, value } => {
                let binding = self
                    .controls
                    .get(index)
                    .ok_or(InputError::UnknownControl(index))?;
                binding.on_change(&mut self.store, value)?;
            }
            ScreenEvent::Engine(EngineEvent::StateChanged(state)) => {
                debug!(%state, "engine state changed");
                self.state = Some(state);
            }
            ScreenEvent::Engine(EngineEvent::StreamInfoChanged(info)) => {
                self.stream_info = Some(info);
            }
        }
        Ok(())
    }

    fn submit_patch(&mut self) {
        self.patch_error = None;
        match self.store.apply_raw_patch(&self.patch_input) {
            Ok(_) => {
                let rewritten = unset_empty_file_paths(&mut self.store);
                if !rewritten.is_empty() {
                    debug!(count = rewritten.len(), "empty file paths normalised to null");
                }
            }
            Err(e) => {
                warn!(error = %e, "patch submission rejected");
                self.patch_error = Some(e.to_string());
            }
        }
    }

    /// Render the screen as text, handing the engine the current
    /// configuration first.
    pub fn render(&mut self) -> String {
        if !self.permission_granted {
            return PERMISSION_DENIED_TEXT.to_string();
        }

        let props = EngineProps::from_config(self.store.current());
        self.engine.configure(&props);

        let mut out = String::new();
        out.push_str(&format!("Patch: {}\n", self.patch_input));
        if let Some(ref error) = self.patch_error {
            out.push_str(&format!("Error: {}\n", error));
        }

        for (index, binding) in self.controls.iter().enumerate() {
            out.push_str(&format!(
                "[{:2}] {} ({}): {}\n",
                index,
                binding.label,
                binding.kind.name(),
                binding.value(&self.store)
            ));
        }

        let state_text = self
            .state
            .as_ref()
            .map_or_else(|| "none".to_string(), |s| s.to_string());
        let info_text = self.stream_info.as_ref().map_or_else(
            || "none".to_string(),
            |info| Value::Object(info.clone()).to_string(),
        );

        out.push_str("Pili@Rust\n");
        out.push_str(&format!("State: {}\n", state_text));
        out.push_str(&format!("StreamInfo: {}\n", info_text));
        out.push_str("streamingConfig: \n");
        out.push_str(&format!("{:#}\n", self.store.current()));
        out
    }
}
