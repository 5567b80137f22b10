//! Persisted user preferences.
//!
//! A small JSON record on the SD card. Loading never fails: a missing or
//! malformed file yields the defaults, so preference trouble can't block
//! shortcut creation.

mod atomic;

pub use atomic::{atomic_read_json, atomic_write_json};

use crate::error::{Result, ShortcutError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// What the compositor emits when a shortcut has no source artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtworkMode {
    /// Write a solid black canvas so every shortcut looks the same.
    #[default]
    AlwaysEmit,
    /// Write the base layer (wallpaper or black) on its own.
    BaseOnly,
    /// Write nothing and leave the launcher's default background.
    SkipIfMissing,
}

impl ArtworkMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtworkMode::AlwaysEmit => "always_emit",
            ArtworkMode::BaseOnly => "base_only",
            ArtworkMode::SkipIfMissing => "skip_if_missing",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "always_emit" | "always" => Some(ArtworkMode::AlwaysEmit),
            "base_only" | "base" => Some(ArtworkMode::BaseOnly),
            "skip_if_missing" | "skip" => Some(ArtworkMode::SkipIfMissing),
            _ => None,
        }
    }
}

impl std::fmt::Display for ArtworkMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User preferences consumed by the writer, scanner and compositor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Generate artwork when a shortcut is created.
    #[serde(default)]
    pub copy_artwork: bool,
    #[serde(default)]
    pub artwork_mode: ArtworkMode,
    /// List disabled entries and empty categories.
    #[serde(default)]
    pub show_hidden: bool,
    /// Composite onto the device wallpaper when one is present.
    #[serde(default = "default_true")]
    pub use_global_wallpaper: bool,
    /// Overrides `use_global_wallpaper`.
    #[serde(default)]
    pub force_black_background: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            copy_artwork: false,
            artwork_mode: ArtworkMode::default(),
            show_hidden: false,
            use_global_wallpaper: true,
            force_black_background: false,
        }
    }
}

impl Preferences {
    /// Whether the base layer should be built from the global wallpaper.
    pub fn wallpaper_enabled(&self) -> bool {
        self.use_global_wallpaper && !self.force_black_background
    }

    /// Update one field from its serialized key and a textual value.
    pub fn set_field(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "copy_artwork" => self.copy_artwork = parse_bool(key, value)?,
            "show_hidden" => self.show_hidden = parse_bool(key, value)?,
            "use_global_wallpaper" => self.use_global_wallpaper = parse_bool(key, value)?,
            "force_black_background" => self.force_black_background = parse_bool(key, value)?,
            "artwork_mode" => {
                self.artwork_mode = ArtworkMode::from_str(value).ok_or_else(|| {
                    ShortcutError::validation(
                        key,
                        format!(
                            "unknown mode '{}' (expected always_emit, base_only or skip_if_missing)",
                            value
                        ),
                    )
                })?
            }
            other => {
                return Err(ShortcutError::validation(
                    other,
                    "unknown preference".to_string(),
                ))
            }
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "on" | "1" | "yes" => Ok(true),
        "false" | "off" | "0" | "no" => Ok(false),
        _ => Err(ShortcutError::validation(
            key,
            format!("expected on/off, got '{}'", value),
        )),
    }
}

/// Load preferences, falling back to defaults on any problem.
pub fn load_preferences(path: &Path) -> Preferences {
    match atomic_read_json::<Preferences>(path) {
        Ok(Some(prefs)) => {
            debug!("Loaded preferences from {}", path.display());
            prefs
        }
        Ok(None) => Preferences::default(),
        Err(e) => {
            warn!("Discarding preferences at {}: {}", path.display(), e);
            Preferences::default()
        }
    }
}

/// Persist preferences.
pub fn save_preferences(path: &Path, prefs: &Preferences) -> Result<()> {
    atomic_write_json(path, prefs, false)?;
    info!(
        "Saved preferences: copy_artwork={} artwork_mode={} show_hidden={} wallpaper={} force_black={}",
        prefs.copy_artwork,
        prefs.artwork_mode,
        prefs.show_hidden,
        prefs.use_global_wallpaper,
        prefs.force_black_background
    );
    Ok(())
}
