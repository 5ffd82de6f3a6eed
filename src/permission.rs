//! Device permission gate
//!
//! On platforms that require it, the screen stays non-interactive until a
//! one-shot request for the capture capabilities resolves true.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::platform::Platform;

/// A device capability the streaming screen needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Camera,
    RecordAudio,
    ReadExternalStorage,
    ReadPhoneState,
    AccessCoarseLocation,
}

impl Capability {
    /// Android permission name
    pub fn android_permission(&self) -> &'static str {
        match self {
            Capability::Camera => "android.permission.CAMERA",
            Capability::RecordAudio => "android.permission.RECORD_AUDIO",
            Capability::ReadExternalStorage => "android.permission.READ_EXTERNAL_STORAGE",
            Capability::ReadPhoneState => "android.permission.READ_PHONE_STATE",
            Capability::AccessCoarseLocation => "android.permission.ACCESS_COARSE_LOCATION",
        }
    }
}

/// Capabilities requested at startup
pub const REQUIRED_CAPABILITIES: &[Capability] = &[
    Capability::Camera,
    Capability::RecordAudio,
    Capability::ReadExternalStorage,
    Capability::ReadPhoneState,
    Capability::AccessCoarseLocation,
];

/// Grants or denies a set of capabilities
pub trait PermissionGate {
    fn request(&mut self, capabilities: &[Capability]) -> bool;
}

/// Gate with a fixed answer
#[derive(Debug, Clone, Copy)]
pub struct StaticGate {
    granted: bool,
}

impl StaticGate {
    pub fn granting() -> Self {
        Self { granted: true }
    }

    pub fn denying() -> Self {
        Self { granted: false }
    }
}

impl PermissionGate for StaticGate {
    fn request(&mut self, _capabilities: &[Capability]) -> bool {
        self.granted
    }
}

/// Run the startup permission request for `platform`.
///
/// Platforms that need no permission resolve true without asking.
pub fn acquire(platform: Platform, gate: &mut dyn PermissionGate) -> bool {
    if !platform.requires_permission() {
        return true;
    }
    let granted = gate.request(REQUIRED_CAPABILITIES);
    info!(%platform, granted, "permission request resolved");
    granted
}
