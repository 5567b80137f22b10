//! High-level facade over the scanner, writer and compositor.
//!
//! Preferences are re-read from disk on every call that needs them, so
//! changes made by another tool take effect without a restart.

mod builder;

pub use builder::ShortcutsApiBuilder;

use crate::artwork::{self, BulkReport, Compositor};
use crate::config::LayoutConfig;
use crate::error::{Result, ShortcutError};
use crate::inventory::{self, Category, GameEntry, Shortcut, UtilityPackage};
use crate::platform::{DeviceClass, Layout};
use crate::preferences::{self, Preferences};
use crate::shortcut::{Position, ShortcutWriter};
use std::path::PathBuf;

/// Main entry point for shortcut management on one SD card.
pub struct ShortcutsApi {
    pub(crate) writer: ShortcutWriter,
}

impl ShortcutsApi {
    /// Builder for an explicit SD-card root.
    pub fn builder(sdcard: impl Into<PathBuf>) -> ShortcutsApiBuilder {
        ShortcutsApiBuilder::new(Some(sdcard.into()))
    }

    /// Everything resolved from `SDCARD_PATH`, `PLATFORM` and `DEVICE`.
    pub fn from_env() -> Result<Self> {
        ShortcutsApiBuilder::new(None).build()
    }

    pub fn layout(&self) -> &Layout {
        self.writer.layout()
    }

    pub fn device(&self) -> DeviceClass {
        self.compositor().device()
    }

    fn compositor(&self) -> &Compositor {
        self.writer.compositor()
    }

    // ========================================
    // Preferences
    // ========================================

    pub fn preferences(&self) -> Preferences {
        preferences::load_preferences(&self.layout().settings)
    }

    pub fn save_preferences(&self, prefs: &Preferences) -> Result<()> {
        preferences::save_preferences(&self.layout().settings, prefs)
    }

    /// Update one preference by key and persist it.
    pub fn set_preference(&self, key: &str, value: &str) -> Result<Preferences> {
        let mut prefs = self.preferences();
        prefs.set_field(key, value)?;
        self.save_preferences(&prefs)?;
        Ok(prefs)
    }

    // ========================================
    // Inventory
    // ========================================

    pub fn categories(&self) -> Result<Vec<Category>> {
        inventory::scan_categories(self.layout(), self.preferences().show_hidden)
    }

    pub fn games(&self, category: &Category) -> Result<Vec<GameEntry>> {
        inventory::scan_games(&category.path, self.preferences().show_hidden)
    }

    pub fn utilities(&self) -> Result<Vec<UtilityPackage>> {
        inventory::scan_utilities(self.layout())
    }

    pub fn shortcuts(&self) -> Result<Vec<Shortcut>> {
        inventory::scan_shortcuts(self.layout())
    }

    /// Look up a category by folder name, display name or tag (case-insensitive).
    pub fn find_category(&self, query: &str) -> Result<Category> {
        let categories = inventory::scan_categories(self.layout(), true)?;
        categories
            .into_iter()
            .find(|c| {
                c.name == query
                    || c.display.eq_ignore_ascii_case(query)
                    || c.tag.eq_ignore_ascii_case(query)
            })
            .ok_or_else(|| ShortcutError::NotFound(self.layout().category_dir(query)))
    }

    /// Look up a game by file name, relative path or display name.
    pub fn find_game(&self, category: &Category, query: &str) -> Result<GameEntry> {
        let games = inventory::scan_games(&category.path, true)?;
        games
            .into_iter()
            .find(|g| {
                g.name == query
                    || g.relative_path.to_string_lossy() == query
                    || g.display.eq_ignore_ascii_case(query)
            })
            .ok_or_else(|| ShortcutError::NotFound(category.path.join(query)))
    }

    /// Look up a utility package by name, with or without the `.pak` suffix.
    pub fn find_utility(&self, query: &str) -> Result<UtilityPackage> {
        let wanted = query.strip_suffix(LayoutConfig::PACKAGE_SUFFIX).unwrap_or(query);
        self.utilities()?
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ShortcutError::NotFound(self.layout().packages_root.join(query)))
    }

    /// Look up a shortcut by folder name, or by display name and optional tag.
    ///
    /// An exact folder name wins. A display name shared by shortcuts with
    /// different tags is ambiguous unless `tag` narrows it to one.
    pub fn find_shortcut(&self, query: &str, tag: Option<&str>) -> Result<Shortcut> {
        let shortcuts = self.shortcuts()?;
        if let Some(exact) = shortcuts.iter().find(|s| s.folder_name == query) {
            return Ok(exact.clone());
        }

        let mut matches: Vec<Shortcut> = shortcuts
            .into_iter()
            .filter(|s| s.display.eq_ignore_ascii_case(query))
            .filter(|s| tag.map_or(true, |t| s.tag.eq_ignore_ascii_case(t)))
            .collect();
        match matches.len() {
            0 => Err(ShortcutError::NotFound(self.layout().shortcut_dir(query))),
            1 => Ok(matches.remove(0)),
            _ => {
                let mut candidates: Vec<String> = matches.into_iter().map(|s| s.folder_name).collect();
                candidates.sort();
                Err(ShortcutError::Ambiguous {
                    query: query.to_string(),
                    candidates,
                })
            }
        }
    }

    // ========================================
    // Shortcuts
    // ========================================

    /// Whether a shortcut for (display, tag) exists at any position.
    pub fn shortcut_exists(&self, display: &str, tag: &str) -> bool {
        self.writer.shortcut_exists(display, tag)
    }

    pub fn create_game_shortcut(
        &self,
        category: &Category,
        game: &GameEntry,
        position: Position,
    ) -> Result<Shortcut> {
        self.writer
            .create_game_shortcut(category, game, position, &self.preferences())
    }

    pub fn create_utility_shortcut(
        &self,
        package: &UtilityPackage,
        position: Position,
    ) -> Result<Shortcut> {
        self.writer
            .create_utility_shortcut(package, position, &self.preferences())
    }

    pub fn remove_shortcut(&self, shortcut: &Shortcut) -> Result<()> {
        self.writer.remove_shortcut(&shortcut.path)
    }

    // ========================================
    // Artwork
    // ========================================

    pub fn regenerate_artwork(&self) -> Result<BulkReport> {
        artwork::regenerate_all(self.layout(), self.compositor(), &self.preferences())
    }

    pub fn remove_artwork(&self) -> Result<BulkReport> {
        artwork::remove_all(self.layout())
    }
}
