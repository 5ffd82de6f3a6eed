//! Built-in streaming defaults (layer 1)
//!
//! Typed description of the demo's default configuration. The store works
//! on the open JSON tree; these structs produce the initial tree and give
//! engines a typed view of it.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::platform::Platform;
use pili_config_store::{ConfigPath, ConfigStore};

pub const DEFAULT_RTMP_URL: &str = "rtmp://pili-publish.qnsdk.com/sdk-live/111";

/// Fields holding an optional file path. "Unset" is always `null`.
pub const FILE_PATH_FIELDS: &[&str] = &[
    "watermarkSetting.src",
    "pictureStreamingFile",
    "audioMixFile.filePath",
];

/// Top-level streaming configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingConfig {
    #[serde(rename = "rtmpURL")]
    pub rtmp_url: String,
    pub camera: String,
    pub muted: bool,
    pub zoom: u32,
    pub focus: bool,
    pub started: bool,

    pub face_beauty_enable: bool,
    pub face_beauty_setting: FaceBeautySetting,
    pub watermark_setting: WatermarkSetting,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub picture_streaming_file: Option<String>,
    pub picture_streaming_enable: bool,
    pub torch_enable: bool,
    pub capture_frame: bool,
    pub preview_mirror_enable: bool,
    pub encoding_mirror_enable: bool,
    pub audio_mix_file: AudioMixFile,
    pub play_mix_audio: bool,
    pub audio_mix_volume: AudioMixVolume,
    pub playback_enable: bool,

    pub profile: Profile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceBeautySetting {
    pub beauty_level: f64,
    pub whiten: f64,
    pub redden: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatermarkSetting {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub src: Option<String>,
    /// 0-255
    pub alpha: u8,
    pub position: Position,
    pub size: Size,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioMixFile {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub file_path: Option<String>,
    #[serde(rename = "loop")]
    pub looping: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioMixVolume {
    pub mic_volume: f64,
    pub music_volume: f64,
}

/// Encoder, capture and transport profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub video_streaming_setting: VideoStreamingSetting,
    pub audio_streaming_setting: AudioStreamingSetting,
    pub encoding_size: String,
    pub av_codec_type: String,
    pub camera_streaming_setting: CameraStreamingSetting,
    /// Key spelling follows the SDK's property name
    #[serde(rename = "microphoneSteamingSetting")]
    pub microphone_streaming_setting: MicrophoneStreamingSetting,
    pub quic_enable: bool,
    pub bitrate_adjust_mode: String,
    pub adaptive_bitrate_range: BitrateRange,
    #[serde(rename = "encoderRCMode")]
    pub encoder_rc_mode: String,
    /// Seconds between stream-info callbacks
    pub stream_info_update_interval: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStreamingSetting {
    pub fps: u32,
    /// Bits per second
    pub bps: u32,
    pub max_frame_interval: u32,
    pub encode_orientation: String,
    pub h264_profile: String,
    pub custom_video_encode_size: Size,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioStreamingSetting {
    /// Sample rate in Hz
    pub rate: u32,
    /// Bits per second
    pub bitrate: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraStreamingSetting {
    pub resolution: String,
    pub focus_mode: String,
    pub video_orientation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MicrophoneStreamingSetting {
    pub sample_rate: String,
    pub channel: String,
    pub is_aec_enable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BitrateRange {
    pub min_bitrate: u32,
    pub max_bitrate: u32,
}

impl StreamingConfig {
    /// Built-in defaults for a platform
    pub fn defaults(platform: Platform) -> Self {
        let (h264_profile, av_codec_type, resolution) = match platform {
            Platform::Android => ("baseline", "SW_VIDEO_CODEC", "MEDIUM_RATIO_4_3"),
            Platform::Ios => (
                "baselineAutoLevel",
                "PLH264EncoderType_AVFoundation",
                "AVCaptureSessionPresetMedium",
            ),
        };

        Self {
            rtmp_url: DEFAULT_RTMP_URL.to_string(),
            camera: "back".to_string(),
            muted: false,
            zoom: 1,
            focus: false,
            started: true,
            face_beauty_enable: false,
            face_beauty_setting: FaceBeautySetting {
                beauty_level: 0.0,
                whiten: 0.0,
                redden: 0.0,
            },
            watermark_setting: WatermarkSetting {
                src: None,
                alpha: 122,
                position: Position { x: 0, y: 0 },
                size: Size {
                    width: 50,
                    height: 50,
                },
            },
            picture_streaming_file: None,
            picture_streaming_enable: false,
            torch_enable: false,
            capture_frame: false,
            preview_mirror_enable: false,
            encoding_mirror_enable: false,
            audio_mix_file: AudioMixFile {
                file_path: None,
                looping: false,
            },
            play_mix_audio: false,
            audio_mix_volume: AudioMixVolume {
                mic_volume: 0.5,
                music_volume: 0.5,
            },
            playback_enable: false,
            profile: Profile {
                video_streaming_setting: VideoStreamingSetting {
                    fps: 30,
                    bps: 800 * 1024,
                    max_frame_interval: 60,
                    encode_orientation: "portrait".to_string(),
                    h264_profile: h264_profile.to_string(),
                    custom_video_encode_size: Size {
                        width: 800,
                        height: 1024,
                    },
                },
                audio_streaming_setting: AudioStreamingSetting {
                    rate: 44100,
                    bitrate: 96 * 1024,
                },
                encoding_size: "e480".to_string(),
                av_codec_type: av_codec_type.to_string(),
                camera_streaming_setting: CameraStreamingSetting {
                    resolution: resolution.to_string(),
                    focus_mode: "auto".to_string(),
                    video_orientation: "landscapeLeft".to_string(),
                },
                microphone_streaming_setting: MicrophoneStreamingSetting {
                    sample_rate: "r16000".to_string(),
                    channel: "mono".to_string(),
                    is_aec_enable: false,
                },
                quic_enable: false,
                bitrate_adjust_mode: "auto".to_string(),
                adaptive_bitrate_range: BitrateRange {
                    min_bitrate: 1024,
                    max_bitrate: 1024 * 1024,
                },
                encoder_rc_mode: "bitratePriority".to_string(),
                stream_info_update_interval: 5,
            },
        }
    }

    /// Convert to JSON Value for merging
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    /// Typed view of a configuration tree.
    ///
    /// Unknown keys are ignored; missing or mistyped known keys are errors.
    pub fn from_value(value: &Value) -> serde_json::Result<Self> {
        Self::deserialize(value)
    }
}

/// Normalise empty-string file paths in the store to `null`.
///
/// Returns the paths that were rewritten.
pub fn unset_empty_file_paths(store: &mut ConfigStore) -> Vec<ConfigPath> {
    let mut rewritten = Vec::new();
    for field in FILE_PATH_FIELDS {
        let path = ConfigPath::parse(field);
        if store.read(&path).as_str() == Some("") {
            store.write(&path, Value::Null);
            rewritten.push(path);
        }
    }
    rewritten
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()))
}
