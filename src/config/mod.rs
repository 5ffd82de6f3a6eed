//! Streaming configuration
//!
//! Built-in defaults, the SDK's symbolic constant tables, and the layered
//! startup configuration:
//! 1. Built-in defaults for the platform
//! 2. Config file (`--config pili.toml`)
//! 3. CLI overrides (`--set path=value`)

pub mod consts;
mod defaults;
mod effective;

pub use defaults::{
    unset_empty_file_paths, AudioMixFile, AudioMixVolume, AudioStreamingSetting, BitrateRange,
    CameraStreamingSetting, FaceBeautySetting, MicrophoneStreamingSetting, Position, Profile,
    Size, StreamingConfig, VideoStreamingSetting, WatermarkSetting, DEFAULT_RTMP_URL,
    FILE_PATH_FIELDS,
};
pub use effective::{parse_override, ConfigError, ConfigOrigin, ConfigSource, StartupConfig};
