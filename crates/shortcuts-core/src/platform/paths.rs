//! SD-card path layout.
//!
//! Every path the library touches is derived from a [`Layout`], so tests can
//! point the whole library at a temporary directory.

use super::Platform;
use crate::config::{AppConfig, LayoutConfig};
use crate::error::{Result, ShortcutError};
use std::env;
use std::path::{Path, PathBuf};

/// Resolved directory layout of one SD card.
#[derive(Debug, Clone)]
pub struct Layout {
    pub platform: Platform,
    /// SD-card root.
    pub sdcard: PathBuf,
    /// Category directories and shortcuts live here.
    pub content_root: PathBuf,
    /// Utility packages for this platform.
    pub packages_root: PathBuf,
    /// The device's single global wallpaper.
    pub wallpaper: PathBuf,
    /// Persisted preferences.
    pub settings: PathBuf,
}

impl Layout {
    /// Build the layout for an explicit SD-card root.
    pub fn new(sdcard: impl AsRef<Path>, platform: Platform) -> Self {
        let sdcard = sdcard.as_ref().to_path_buf();
        Self {
            platform,
            content_root: sdcard.join(LayoutConfig::CONTENT_DIR_NAME),
            packages_root: sdcard
                .join(LayoutConfig::PACKAGES_DIR_NAME)
                .join(Self::package_platform_dir(platform)),
            wallpaper: sdcard.join(LayoutConfig::WALLPAPER_FILE_NAME),
            settings: sdcard
                .join(LayoutConfig::USERDATA_DIR_NAME)
                .join(platform.as_str())
                .join(AppConfig::SETTINGS_FILE_NAME),
            sdcard,
        }
    }

    /// Build the layout from `SDCARD_PATH`, falling back to the device mount
    /// point (or `./mock_sdcard` on the development host).
    pub fn from_env(platform: Platform) -> Result<Self> {
        let sdcard = match env::var(LayoutConfig::ENV_SDCARD) {
            Ok(value) if !value.trim().is_empty() => PathBuf::from(value),
            _ if platform == Platform::Mac => {
                let cwd = env::current_dir().map_err(|e| ShortcutError::Config {
                    message: format!("Could not determine current directory: {}", e),
                })?;
                cwd.join(LayoutConfig::MOCK_SDCARD_DIR_NAME)
            }
            _ => PathBuf::from(LayoutConfig::DEFAULT_SDCARD),
        };
        Ok(Self::new(sdcard, platform))
    }

    // The mock card only carries the tg5040 package tree.
    fn package_platform_dir(platform: Platform) -> &'static str {
        match platform {
            Platform::Mac => Platform::Tg5040.as_str(),
            other => other.as_str(),
        }
    }

    /// Path of a category directory by its folder name.
    pub fn category_dir(&self, name: &str) -> PathBuf {
        self.content_root.join(name)
    }

    /// Path of a shortcut directory by its encoded folder name.
    pub fn shortcut_dir(&self, folder_name: &str) -> PathBuf {
        self.content_root.join(folder_name)
    }

    /// Whether `path` sits directly inside the content root.
    pub fn is_in_content_root(&self, path: &Path) -> bool {
        path.parent() == Some(self.content_root.as_path())
    }

    /// Default log file location.
    ///
    /// # Platform Behavior
    /// - **Mac**: `./shortcuts.log`
    /// - **Devices**: `$SHARED_USERDATA_PATH/<platform>/logs/shortcuts.log`,
    ///   falling back to `$HOME/.userdata`, then `/root/.userdata`
    pub fn log_file(&self) -> PathBuf {
        if self.platform == Platform::Mac {
            return PathBuf::from(".").join(AppConfig::LOG_FILE_NAME);
        }

        let userdata = match env::var(LayoutConfig::ENV_SHARED_USERDATA) {
            Ok(value) if !value.is_empty() => PathBuf::from(value),
            _ => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("/root"))
                .join(LayoutConfig::USERDATA_DIR_NAME),
        };

        userdata
            .join(self.platform.as_str())
            .join(LayoutConfig::LOGS_DIR_NAME)
            .join(AppConfig::LOG_FILE_NAME)
    }
}
