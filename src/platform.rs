//! Target platform of the streaming SDK

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mobile platform the configuration is built for.
///
/// A handful of defaults (codec type, H.264 profile, camera resolution)
/// use platform-specific constant tables, and only Android gates the
/// screen behind a runtime permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Android,
    Ios,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
        }
    }

    /// Whether device capabilities must be granted before the screen is usable
    pub fn requires_permission(&self) -> bool {
        matches!(self, Platform::Android)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "android" => Ok(Platform::Android),
            "ios" => Ok(Platform::Ios),
            other => Err(format!("unknown platform '{}' (expected android or ios)", other)),
        }
    }
}
