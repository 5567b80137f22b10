//! Device abstraction layer.
//!
//! The target handhelds are identified by external signals only; nothing here
//! probes hardware.
//!
//! - `paths` - SD-card directory layout for a platform
//!
//! `Platform` picks the per-platform package directory and userdata folder.
//! `DeviceClass` picks the canvas resolution and rendering scale.

pub mod paths;

pub use paths::Layout;

use crate::config::LayoutConfig;
use serde::{Deserialize, Serialize};

/// Platform the tool is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Development host; uses a local mock SD card.
    Mac,
    Tg5040,
    Tg5050,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Mac => "mac",
            Platform::Tg5040 => "tg5040",
            Platform::Tg5050 => "tg5050",
        }
    }

    /// Resolve a platform from the launcher's `PLATFORM` value.
    ///
    /// TG3040 hardware shares the TG5040 build.
    pub fn from_signal(value: Option<&str>) -> Self {
        let upper = value.unwrap_or_default().to_uppercase();
        if upper.contains("TG5050") {
            Platform::Tg5050
        } else if upper.contains("TG5040") || upper.contains("TG3040") {
            Platform::Tg5040
        } else if upper == "MAC" || (upper.is_empty() && cfg!(target_os = "macos")) {
            Platform::Mac
        } else {
            Platform::Tg5040
        }
    }

    /// Resolve the platform from the process environment.
    pub fn detect() -> Self {
        Self::from_signal(std::env::var(LayoutConfig::ENV_PLATFORM).ok().as_deref())
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Screen class of the device, chosen by an external signal.
///
/// There is deliberately no runtime detection of the lower-resolution device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    /// 1280x720 panels (Smart Pro, TG5050).
    #[default]
    Widescreen,
    /// 1024x768 panel.
    Brick,
}

impl DeviceClass {
    /// Canvas size in pixels.
    pub fn canvas_size(&self) -> (u32, u32) {
        match self {
            DeviceClass::Widescreen => (1280, 720),
            DeviceClass::Brick => (1024, 768),
        }
    }

    /// The launcher's FIXED_SCALE for this screen.
    pub fn render_scale(&self) -> u32 {
        match self {
            DeviceClass::Widescreen => 2,
            DeviceClass::Brick => 3,
        }
    }

    pub fn from_signal(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()) {
            Some(v) if v == "brick" => DeviceClass::Brick,
            _ => DeviceClass::Widescreen,
        }
    }

    /// Resolve the device class from the process environment.
    pub fn detect() -> Self {
        Self::from_signal(std::env::var(LayoutConfig::ENV_DEVICE).ok().as_deref())
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "widescreen" | "1280x720" => Some(DeviceClass::Widescreen),
            "brick" | "1024x768" => Some(DeviceClass::Brick),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_from_signal() {
        assert_eq!(Platform::from_signal(Some("tg5050")), Platform::Tg5050);
        assert_eq!(Platform::from_signal(Some("TG5040")), Platform::Tg5040);
        assert_eq!(Platform::from_signal(Some("tg3040")), Platform::Tg5040);
        assert_eq!(Platform::from_signal(Some("mac")), Platform::Mac);
        assert_eq!(Platform::from_signal(Some("something")), Platform::Tg5040);
    }

    #[test]
    fn test_device_class_canvas() {
        assert_eq!(DeviceClass::Widescreen.canvas_size(), (1280, 720));
        assert_eq!(DeviceClass::Brick.canvas_size(), (1024, 768));
        assert_eq!(DeviceClass::from_signal(Some("BRICK")), DeviceClass::Brick);
        assert_eq!(DeviceClass::from_signal(Some("smartpro")), DeviceClass::Widescreen);
        assert_eq!(DeviceClass::from_signal(None), DeviceClass::Widescreen);
    }

    #[test]
    fn test_device_class_from_str() {
        assert_eq!(DeviceClass::from_str("1024x768"), Some(DeviceClass::Brick));
        assert_eq!(DeviceClass::from_str("Widescreen"), Some(DeviceClass::Widescreen));
        assert_eq!(DeviceClass::from_str("4k"), None);
    }
}
