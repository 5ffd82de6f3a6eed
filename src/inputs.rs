//! Form-input bindings
//!
//! Each control on the screen is bound to one configuration path. A binding
//! reads its current value from the store and turns user input into a store
//! write, after checking the input fits the control.

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::consts;
use crate::platform::Platform;
use pili_config_store::{ConfigPath, ConfigStore};

/// Kind of on-screen control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Boolean toggle
    Switch,
    /// One of a fixed set of symbolic values
    Choice(&'static [&'static str]),
    /// Optional file path; empty means unset
    File,
}

impl InputKind {
    pub fn name(&self) -> &'static str {
        match self {
            InputKind::Switch => "switch",
            InputKind::Choice(_) => "choice",
            InputKind::File => "file",
        }
    }
}

/// One control bound to a configuration path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub label: &'static str,
    pub path: &'static str,
    pub kind: InputKind,
}

impl Binding {
    pub const fn new(label: &'static str, path: &'static str, kind: InputKind) -> Self {
        Self { label, path, kind }
    }

    pub fn config_path(&self) -> ConfigPath {
        ConfigPath::parse(self.path)
    }

    /// Current value of the bound field
    pub fn value<'a>(&self, store: &'a ConfigStore) -> &'a Value {
        store.read(&self.config_path())
    }

    /// Check a new value against the control kind.
    ///
    /// Returns the value to write; file inputs map `""` to `null`.
    pub fn validate(&self, value: Value) -> Result<Value, InputError> {
        match (self.kind, value) {
            (InputKind::Switch, v @ Value::Bool(_)) => Ok(v),
            (InputKind::Choice(options), Value::String(s)) => {
                if options.contains(&s.as_str()) {
                    Ok(Value::String(s))
                } else {
                    Err(InputError::NotAnOption {
                        label: self.label,
                        value: s,
                        options: options.join(", "),
                    })
                }
            }
            (InputKind::File, Value::Null) => Ok(Value::Null),
            (InputKind::File, Value::String(s)) if s.is_empty() => Ok(Value::Null),
            (InputKind::File, v @ Value::String(_)) => Ok(v),
            (kind, other) => Err(InputError::TypeMismatch {
                label: self.label,
                expected: kind.name(),
                got: other.to_string(),
            }),
        }
    }

    /// Parse typed-in text for this control.
    pub fn parse_input(&self, raw: &str) -> Result<Value, InputError> {
        let raw = raw.trim();
        let value = match self.kind {
            InputKind::Switch => match raw.to_lowercase().as_str() {
                "true" | "on" | "yes" | "1" => Value::Bool(true),
                "false" | "off" | "no" | "0" => Value::Bool(false),
                _ => {
                    return Err(InputError::TypeMismatch {
                        label: self.label,
                        expected: "switch",
                        got: raw.to_string(),
                    })
                }
            },
            InputKind::Choice(_) => Value::String(raw.to_string()),
            InputKind::File => match raw {
                "" | "null" | "none" => Value::Null,
                path => Value::String(path.to_string()),
            },
        };
        self.validate(value)
    }

    /// Validate `value` and write it through the store.
    pub fn on_change(&self, store: &mut ConfigStore, value: Value) -> Result<(), InputError> {
        let value = match self.validate(value) {
            Ok(v) => v,
            Err(e) => {
                warn!(path = self.path, error = %e, "rejected input");
                return Err(e);
            }
        };
        debug!(label = self.label, path = self.path, %value, "input changed");
        store.write(&self.config_path(), value);
        Ok(())
    }
}

/// The demo screen's controls, in display order
pub fn screen_controls(platform: Platform) -> Vec<Binding> {
    use InputKind::{Choice, File, Switch};

    vec![
        Binding::new("Start streaming", "started", Switch),
        Binding::new("Mute", "muted", Switch),
        Binding::new("Manual focus", "focus", Switch),
        Binding::new("Camera", "camera", Choice(consts::CAMERAS)),
        Binding::new(
            "AV codec type",
            "profile.avCodecType",
            Choice(consts::av_codec_types(platform)),
        ),
        Binding::new(
            "Camera resolution",
            "profile.cameraStreamingSetting.resolution",
            Choice(consts::camera_resolutions(platform)),
        ),
        Binding::new(
            "Camera focus mode",
            "profile.cameraStreamingSetting.focusMode",
            Choice(consts::CAMERA_FOCUS_MODES),
        ),
        Binding::new(
            "Camera video orientation",
            "profile.cameraStreamingSetting.videoOrientation",
            Choice(consts::CAMERA_VIDEO_ORIENTATIONS),
        ),
        Binding::new(
            "Microphone sample rate",
            "profile.microphoneSteamingSetting.sampleRate",
            Choice(consts::MICROPHONE_SAMPLE_RATES),
        ),
        Binding::new(
            "Microphone channel",
            "profile.microphoneSteamingSetting.channel",
            Choice(consts::MICROPHONE_CHANNELS),
        ),
        Binding::new(
            "Echo cancellation",
            "profile.microphoneSteamingSetting.isAecEnable",
            Switch,
        ),
        Binding::new(
            "Video encode orientation",
            "profile.videoStreamingSetting.encodeOrientation",
            Choice(consts::VIDEO_ENCODE_ORIENTATIONS),
        ),
        Binding::new(
            "H.264 profile",
            "profile.videoStreamingSetting.h264Profile",
            Choice(consts::video_h264_profiles(platform)),
        ),
        Binding::new("Use QUIC", "profile.quicEnable", Switch),
        Binding::new(
            "Bitrate adjust mode",
            "profile.bitrateAdjustMode",
            Choice(consts::BITRATE_ADJUST_MODES),
        ),
        Binding::new(
            "Encoder RC mode",
            "profile.encoderRCMode",
            Choice(consts::ENCODER_RC_MODES),
        ),
        Binding::new("Built-in face beauty", "faceBeautyEnable", Switch),
        Binding::new("Watermark file", "watermarkSetting.src", File),
        Binding::new("Picture streaming", "pictureStreamingEnable", Switch),
        Binding::new("Picture streaming file", "pictureStreamingFile", File),
        Binding::new("Torch", "torchEnable", Switch),
        Binding::new("Capture frame", "captureFrame", Switch),
        Binding::new("Preview mirror", "previewMirrorEnable", Switch),
        Binding::new("Encoding mirror", "encodingMirrorEnable", Switch),
        Binding::new("Play mix audio", "playMixAudio", Switch),
        Binding::new("Mix audio file", "audioMixFile.filePath", File),
        Binding::new("Loop mix audio file", "audioMixFile.loop", Switch),
        Binding::new("Audio mixing playback", "playbackEnable", Switch),
    ]
}

/// Errors for control input
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("{label}: expected {expected} input, got {got}")]
    TypeMismatch {
        label: &'static str,
        expected: &'static str,
        got: String,
    },

    #[error("{label}: '{value}' is not one of [{options}]")]
    NotAnOption {
        label: &'static str,
        value: String,
        options: String,
    },

    #[error("no control at index {0}")]
    UnknownControl(usize),
}
