//! Screen flow tests
//!
//! Drives the demo screen the way a user would:
//! - startup layers feed the initial configuration
//! - controls and raw patches both go through the store's deep merge
//! - the engine sees every rendered configuration
//! - nothing is interactive before permission is granted

use pili_demo::engine::RecordingEngine;
use pili_demo::session;
use pili_demo::{
    EngineEvent, Platform, Screen, ScreenEvent, StartupConfig, StaticGate, StreamState,
    StreamingConfig,
};
use serde_json::json;
use std::io::{Cursor, Write};
use tempfile::Builder;

fn started_screen(platform: Platform) -> Screen<RecordingEngine> {
    let startup = StartupConfig::build(platform, None, &[]).unwrap();
    let mut screen = Screen::new(platform, startup.config, RecordingEngine::default());
    assert!(screen.start(&mut StaticGate::granting()));
    screen
}

fn control_index(screen: &Screen<RecordingEngine>, path: &str) -> usize {
    screen
        .controls()
        .iter()
        .position(|b| b.path == path)
        .unwrap_or_else(|| panic!("no control bound to {}", path))
}

fn submit(screen: &mut Screen<RecordingEngine>, text: &str) {
    screen
        .handle(ScreenEvent::EditPatchText(text.to_string()))
        .unwrap();
    screen.handle(ScreenEvent::SubmitPatch).unwrap();
}

// =============================================================================
// Patch Submission
// =============================================================================

#[test]
fn test_camera_patch_changes_nothing_else() {
    let mut screen = started_screen(Platform::Android);
    let mut expected = screen.config().clone();

    submit(&mut screen, r#"{"camera":"front"}"#);

    expected["camera"] = json!("front");
    assert_eq!(screen.config(), &expected);
}

#[test]
fn test_fps_patch_keeps_bps() {
    let mut screen = started_screen(Platform::Android);
    submit(&mut screen, r#"{"profile":{"videoStreamingSetting":{"fps":15}}}"#);

    let video = &screen.config()["profile"]["videoStreamingSetting"];
    assert_eq!(video["fps"], 15);
    assert_eq!(video["bps"], 819200);
    assert_eq!(video["customVideoEncodeSize"]["height"], 1024);
}

#[test]
fn test_same_patch_twice_is_idempotent() {
    let mut screen = started_screen(Platform::Ios);
    let patch = r#"{"watermarkSetting":{"src":"/tmp/logo.png","size":{"width":80}},"zoom":2}"#;

    submit(&mut screen, patch);
    let once = screen.config().clone();
    submit(&mut screen, patch);

    assert_eq!(screen.config(), &once);
    assert_eq!(once["watermarkSetting"]["size"]["height"], 50);
}

#[test]
fn test_malformed_patch_keeps_config_and_reports() {
    let mut screen = started_screen(Platform::Android);
    let before = screen.config().clone();

    submit(&mut screen, "{bad json");

    assert_eq!(screen.config(), &before);
    let error = screen.patch_error().unwrap().to_string();
    assert!(error.contains("line 1"), "{}", error);
    assert!(screen.render().contains(&error));
}

#[test]
fn test_null_patch_unsets_branch_only() {
    let mut screen = started_screen(Platform::Android);
    submit(&mut screen, r#"{"profile":{"adaptiveBitrateRange":null}}"#);

    assert!(screen.config()["profile"]["adaptiveBitrateRange"].is_null());
    assert_eq!(screen.config()["profile"]["streamInfoUpdateInterval"], 5);
}

// =============================================================================
// Controls
// =============================================================================

#[test]
fn test_controls_and_patches_share_one_config() {
    let mut screen = started_screen(Platform::Android);
    let torch = control_index(&screen, "torchEnable");
    let rc_mode = control_index(&screen, "profile.encoderRCMode");

    screen
        .handle(ScreenEvent::Control { index: torch, value: json!(true) })
        .unwrap();
    submit(&mut screen, r#"{"profile":{"quicEnable":true}}"#);
    screen
        .handle(ScreenEvent::Control { index: rc_mode, value: json!("qualityPriority") })
        .unwrap();

    let config = screen.config();
    assert_eq!(config["torchEnable"], true);
    assert_eq!(config["profile"]["quicEnable"], true);
    assert_eq!(config["profile"]["encoderRCMode"], "qualityPriority");
    assert_eq!(config["profile"]["bitrateAdjustMode"], "auto");
}

#[test]
fn test_rejected_control_changes_nothing() {
    let mut screen = started_screen(Platform::Ios);
    let profile = control_index(&screen, "profile.videoStreamingSetting.h264Profile");
    let before = screen.config().clone();

    assert!(screen
        .handle(ScreenEvent::Control { index: profile, value: json!("baseline") })
        .is_err());
    assert_eq!(screen.config(), &before);
}

#[test]
fn test_typed_view_after_edits() {
    let mut screen = started_screen(Platform::Android);
    let mix_file = control_index(&screen, "audioMixFile.filePath");

    screen
        .handle(ScreenEvent::Control { index: mix_file, value: json!("/sdcard/bgm.mp3") })
        .unwrap();
    submit(&mut screen, r#"{"audioMixVolume":{"musicVolume":0.8}}"#);

    let typed = StreamingConfig::from_value(screen.config()).unwrap();
    assert_eq!(typed.audio_mix_file.file_path.as_deref(), Some("/sdcard/bgm.mp3"));
    assert_eq!(typed.audio_mix_volume.music_volume, 0.8);
    assert_eq!(typed.audio_mix_volume.mic_volume, 0.5);
}

// =============================================================================
// Engine and Permission
// =============================================================================

#[test]
fn test_engine_receives_each_rendered_config() {
    let mut screen = started_screen(Platform::Android);
    screen.render();
    submit(&mut screen, r#"{"started":false}"#);
    screen
        .handle(ScreenEvent::Engine(EngineEvent::StateChanged(StreamState::Shutdown)))
        .unwrap();
    let text = screen.render();

    assert!(text.contains("State: shutdown"));
    let received = &screen.engine().received;
    assert_eq!(received.len(), 2);
    assert_eq!(received[0].as_value()["started"], true);
    assert_eq!(received[1].as_value()["started"], false);
    assert_eq!(
        received[1].as_value()["profile"]["audio"],
        received[1].as_value()["profile"]["audioStreamingSetting"]
    );
}

#[test]
fn test_android_without_permission_is_inert() {
    let startup = StartupConfig::build(Platform::Android, None, &[]).unwrap();
    let mut screen = Screen::new(Platform::Android, startup.config.clone(), RecordingEngine::default());
    screen.start(&mut StaticGate::denying());

    let mut output = Vec::new();
    session::run(
        &mut screen,
        Cursor::new("{\"muted\":true}\n:submit\n"),
        &mut output,
    )
    .unwrap();

    let output = String::from_utf8(output).unwrap();
    assert!(output.lines().all(|l| l.is_empty() || l == "Permission not granted"));
    assert_eq!(screen.config(), &startup.config);
    assert!(screen.engine().received.is_empty());
}

// =============================================================================
// Startup Layers
// =============================================================================

#[test]
fn test_file_and_cli_layers_reach_the_screen() {
    let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "rtmpURL = \"rtmp://example.com/live/demo\"").unwrap();
    writeln!(file, "[profile.audioStreamingSetting]").unwrap();
    writeln!(file, "rate = 48000").unwrap();

    let overrides = vec!["profile.audioStreamingSetting.bitrate=131072".to_string()];
    let startup = StartupConfig::build(Platform::Ios, Some(file.path()), &overrides).unwrap();
    let mut screen = Screen::new(Platform::Ios, startup.config, RecordingEngine::default());
    screen.start(&mut StaticGate::denying());

    let audio = &screen.config()["profile"]["audioStreamingSetting"];
    assert_eq!(audio["rate"], 48000);
    assert_eq!(audio["bitrate"], 131072);
    assert_eq!(screen.config()["rtmpURL"], "rtmp://example.com/live/demo");

    let text = screen.render();
    assert!(text.contains("rtmp://example.com/live/demo"));
}

#[test]
fn test_empty_startup_file_path_is_unset_before_first_patch() {
    let overrides = vec![r#"watermarkSetting.src="""#.to_string()];
    let startup = StartupConfig::build(Platform::Android, None, &overrides).unwrap();
    assert!(startup.config["watermarkSetting"]["src"].is_null());

    let mut screen = Screen::new(Platform::Android, startup.config, RecordingEngine::default());
    assert!(screen.start(&mut StaticGate::granting()));
    let mut expected = screen.config().clone();

    submit(&mut screen, r#"{"camera":"front"}"#);

    expected["camera"] = json!("front");
    assert_eq!(screen.config(), &expected);
}

#[test]
fn test_screen_unsets_empty_file_paths_in_initial_config() {
    let mut initial = StreamingConfig::defaults(Platform::Ios).to_value().unwrap();
    initial["audioMixFile"]["filePath"] = json!("");

    let screen = Screen::new(Platform::Ios, initial, RecordingEngine::default());

    assert!(screen.config()["audioMixFile"]["filePath"].is_null());
    assert_eq!(screen.config()["audioMixFile"]["loop"], false);
}
