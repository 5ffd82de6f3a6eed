//! Symbolic constant tables of the streaming SDK
//!
//! Values are carried through the configuration as the SDK's symbolic
//! names. Tables that differ per platform are selected with [`Platform`].

use crate::platform::Platform;

pub const CAMERAS: &[&str] = &["back", "front"];

pub const AV_CODEC_TYPES_ANDROID: &[&str] = &[
    "SW_VIDEO_WITH_HW_AUDIO_CODEC",
    "SW_VIDEO_WITH_SW_AUDIO_CODEC",
    "HW_VIDEO_WITH_HW_AUDIO_CODEC",
    "HW_VIDEO_SURFACE_AS_INPUT_WITH_HW_AUDIO_CODEC",
    "HW_VIDEO_SURFACE_AS_INPUT_WITH_SW_AUDIO_CODEC",
    "HW_VIDEO_YUV_AS_INPUT_WITH_HW_AUDIO_CODEC",
    "SW_VIDEO_CODEC",
    "HW_VIDEO_CODEC",
    "SW_AUDIO_CODEC",
    "HW_AUDIO_CODEC",
];

pub const AV_CODEC_TYPES_IOS: &[&str] = &[
    "PLH264EncoderType_AVFoundation",
    "PLH264EncoderType_VideoToolbox",
];

pub const CAMERA_RESOLUTIONS_ANDROID: &[&str] = &[
    "SMALL_RATIO_4_3",
    "SMALL_RATIO_16_9",
    "MEDIUM_RATIO_4_3",
    "MEDIUM_RATIO_16_9",
    "LARGE_RATIO_4_3",
    "LARGE_RATIO_16_9",
];

pub const CAMERA_RESOLUTIONS_IOS: &[&str] = &[
    "AVCaptureSessionPresetLow",
    "AVCaptureSessionPresetMedium",
    "AVCaptureSessionPresetHigh",
    "AVCaptureSessionPreset640x480",
    "AVCaptureSessionPreset1280x720",
    "AVCaptureSessionPreset1920x1080",
    "AVCaptureSessionPreset3840x2160",
];

pub const CAMERA_FOCUS_MODES: &[&str] = &["auto", "continuousPicture", "continuousVideo"];

pub const CAMERA_VIDEO_ORIENTATIONS: &[&str] = &[
    "portrait",
    "portraitUpsideDown",
    "landscapeRight",
    "landscapeLeft",
];

pub const MICROPHONE_SAMPLE_RATES: &[&str] = &["r16000", "r44100"];

pub const MICROPHONE_CHANNELS: &[&str] = &["mono", "stereo"];

pub const VIDEO_ENCODE_ORIENTATIONS: &[&str] = &["portrait", "landscape"];

pub const VIDEO_H264_PROFILES_ANDROID: &[&str] = &["baseline", "main", "high"];

pub const VIDEO_H264_PROFILES_IOS: &[&str] = &[
    "baseline30",
    "baseline31",
    "baseline41",
    "baselineAutoLevel",
    "main30",
    "main31",
    "main32",
    "main41",
    "mainAutoLevel",
    "high40",
    "high41",
    "highAutoLevel",
];

pub const BITRATE_ADJUST_MODES: &[&str] = &["auto", "manual", "disable"];

pub const ENCODER_RC_MODES: &[&str] = &["qualityPriority", "bitratePriority"];

pub const VIDEO_ENCODINGS: &[&str] = &["e240", "e480", "e544", "e720", "e1088"];

pub fn av_codec_types(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Android => AV_CODEC_TYPES_ANDROID,
        Platform::Ios => AV_CODEC_TYPES_IOS,
    }
}

pub fn camera_resolutions(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Android => CAMERA_RESOLUTIONS_ANDROID,
        Platform::Ios => CAMERA_RESOLUTIONS_IOS,
    }
}

pub fn video_h264_profiles(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Android => VIDEO_H264_PROFILES_ANDROID,
        Platform::Ios => VIDEO_H264_PROFILES_IOS,
    }
}
