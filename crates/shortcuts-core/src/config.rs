//! Centralized configuration for the shortcuts library.
//!
//! This module provides the fixed conventions of the external launcher: path
//! layout, naming markers, shortcut file set, and thumbnail geometry.

/// Application-level configuration.
pub struct AppConfig;

impl AppConfig {
    pub const APP_NAME: &'static str = "Shortcuts";
    pub const LOG_FILE_NAME: &'static str = "shortcuts.log";
    pub const SETTINGS_FILE_NAME: &'static str = "shortcuts_settings.json";
}

/// On-device directory layout.
pub struct LayoutConfig;

impl LayoutConfig {
    pub const DEFAULT_SDCARD: &'static str = "/mnt/SDCARD";
    pub const MOCK_SDCARD_DIR_NAME: &'static str = "mock_sdcard";
    pub const CONTENT_DIR_NAME: &'static str = "Roms";
    pub const PACKAGES_DIR_NAME: &'static str = "Tools";
    pub const USERDATA_DIR_NAME: &'static str = ".userdata";
    pub const LOGS_DIR_NAME: &'static str = "logs";
    pub const WALLPAPER_FILE_NAME: &'static str = "bg.png";
    pub const PACKAGE_SUFFIX: &'static str = ".pak";
    pub const DISABLED_SUFFIX: &'static str = ".disabled";
    pub const MAP_FILE_NAME: &'static str = "map.txt";

    // Environment signals
    pub const ENV_SDCARD: &'static str = "SDCARD_PATH";
    pub const ENV_PLATFORM: &'static str = "PLATFORM";
    pub const ENV_DEVICE: &'static str = "DEVICE";
    pub const ENV_SHARED_USERDATA: &'static str = "SHARED_USERDATA_PATH";
}

/// Sort-position prefixes understood by the launcher.
pub struct CodecConfig;

impl CodecConfig {
    /// Current Bottom marker (WORD JOINER).
    pub const BOTTOM_MARKER: &'static str = "\u{2060}";
    /// Superseded Bottom marker (ZERO WIDTH SPACE); rendered as a box on some fonts.
    pub const DEPRECATED_BOTTOM_MARKER: &'static str = "\u{200B}";
    /// First-generation visible prefix.
    pub const LEGACY_GLYPH: &'static str = "\u{2605} ";
    pub const LEGACY_GLYPH_BARE: &'static str = "\u{2605}";
    /// Top prefix; the launcher trims any leading "{digits}) " before display.
    pub const TOP_PREFIX: &'static str = "0) ";
}

/// Shortcut file set.
pub struct WriterConfig;

impl WriterConfig {
    pub const MARKER_FILE: &'static str = ".shortcut";
    pub const POINTER_EXT: &'static str = "m3u";
    pub const PLAYLIST_EXT: &'static str = "m3u";
    pub const INDEX_EXT: &'static str = "cue";
    /// Tag carried by every utility shortcut; routes it to the bridge package.
    pub const UTILITY_TAG: &'static str = "SHORTCUT";
    pub const UTILITY_TARGET_FILE: &'static str = "target";
    /// Literal pointer-file content for utility shortcuts.
    pub const UTILITY_POINTER_TOKEN: &'static str = "target";
}

/// Artwork geometry, matching the launcher's game-list thumbnail.
pub struct ArtworkConfig;

impl ArtworkConfig {
    pub const MEDIA_DIR_NAME: &'static str = ".media";
    pub const OUTPUT_FILE_NAME: &'static str = "bg.png";
    pub const SOURCE_EXT: &'static str = "png";

    pub const THUMB_WIDTH_FRACTION: f64 = 0.45;
    pub const THUMB_HEIGHT_FRACTION: f64 = 0.60;
    /// CFG_DEFAULT_THUMBRADIUS before device scaling.
    pub const LOGICAL_CORNER_RADIUS: u32 = 20;
    /// BUTTON_MARGIN * 3 before device scaling.
    pub const LOGICAL_RIGHT_MARGIN: u32 = 15;
}
