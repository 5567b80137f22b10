//! Builder for configuring ShortcutsApi initialization.

use super::ShortcutsApi;
use crate::artwork::Compositor;
use crate::error::{Result, ShortcutError};
use crate::platform::{DeviceClass, Layout, Platform};
use crate::shortcut::ShortcutWriter;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Builder for configuring ShortcutsApi initialization.
///
/// # Example
///
/// ```rust,ignore
/// use shortcuts_core::{DeviceClass, Platform, ShortcutsApi};
///
/// let api = ShortcutsApi::builder("/mnt/SDCARD")
///     .platform(Platform::Tg5040)
///     .device(DeviceClass::Brick)
///     .build()?;
/// ```
pub struct ShortcutsApiBuilder {
    sdcard: Option<PathBuf>,
    platform: Option<Platform>,
    device: Option<DeviceClass>,
    auto_create_dirs: bool,
}

impl ShortcutsApiBuilder {
    /// Start from an explicit SD-card root. `None` resolves it from the environment.
    pub fn new(sdcard: Option<PathBuf>) -> Self {
        Self {
            sdcard,
            platform: None,
            device: None,
            auto_create_dirs: false,
        }
    }

    /// Override the `PLATFORM` signal.
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Override the `DEVICE` signal.
    pub fn device(mut self, device: DeviceClass) -> Self {
        self.device = Some(device);
        self
    }

    /// Create the content and package roots if they don't exist.
    ///
    /// Default: `false` (the SD card must already exist)
    pub fn auto_create_dirs(mut self, enable: bool) -> Self {
        self.auto_create_dirs = enable;
        self
    }

    /// Build the ShortcutsApi instance.
    pub fn build(self) -> Result<ShortcutsApi> {
        let platform = self.platform.unwrap_or_else(Platform::detect);
        let device = self.device.unwrap_or_else(DeviceClass::detect);
        let layout = match self.sdcard {
            Some(sdcard) => Layout::new(sdcard, platform),
            None => Layout::from_env(platform)?,
        };

        if self.auto_create_dirs {
            for dir in [&layout.content_root, &layout.packages_root] {
                fs::create_dir_all(dir)
                    .map_err(|e| ShortcutError::io("create directory", dir.as_path(), e))?;
            }
        } else if !layout.sdcard.is_dir() {
            return Err(ShortcutError::Config {
                message: format!("SD card root does not exist: {}", layout.sdcard.display()),
            });
        }

        info!(
            "Shortcuts API ready: sdcard={} platform={} device={:?}",
            layout.sdcard.display(),
            platform,
            device
        );

        let compositor = Compositor::new(device, layout.wallpaper.clone());
        Ok(ShortcutsApi {
            writer: ShortcutWriter::new(layout, compositor),
        })
    }
}
