//! Shortcut directory creation and removal.
//!
//! A shortcut is a directory in the content root holding a pointer file, a
//! marker file with the clean display name and, for utilities, a file with
//! the package path. Writes are not transactional: an interrupted creation
//! leaves a partial directory that the scanner reports and that re-creating
//! at the same position overwrites.

use super::naming::{is_shortcut_dir, Position, ShortcutName};
use crate::artwork::Compositor;
use crate::config::{ArtworkConfig, WriterConfig};
use crate::error::{Result, ShortcutError};
use crate::inventory::{pointer_file, read_shortcut, Category, GameEntry, GameKind, Shortcut, UtilityPackage};
use crate::platform::Layout;
use crate::preferences::Preferences;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

/// Read the clean display name from a shortcut's marker file.
pub fn read_marker(shortcut_dir: &Path) -> Option<String> {
    let data = fs::read_to_string(shortcut_dir.join(WriterConfig::MARKER_FILE)).ok()?;
    let display = data.trim();
    if display.is_empty() {
        None
    } else {
        Some(display.to_string())
    }
}

/// Write the clean display name into a shortcut's marker file.
pub fn write_marker(shortcut_dir: &Path, display: &str) -> Result<()> {
    write_file(&shortcut_dir.join(WriterConfig::MARKER_FILE), display, "write marker file")
}

fn write_file(path: &Path, contents: &str, step: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| ShortcutError::io(step, path, e))
}

/// Pointer-file content for a game: relative path from the shortcut directory.
///
/// - file: `../<category>/<entry>`
/// - multi-disc: `../<category>/<entry>/<name>.m3u`
/// - cue folder: `../<category>/<entry>/<name>.cue`
pub fn game_pointer(category_name: &str, game: &GameEntry) -> String {
    let relative: Vec<String> = game
        .relative_path
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();
    let base = format!("../{}/{}", category_name, relative.join("/"));

    match game.kind {
        GameKind::SingleFile => base,
        GameKind::MultiDisc => format!("{}/{}.{}", base, game.name, WriterConfig::PLAYLIST_EXT),
        GameKind::IndexFolder => format!("{}/{}.{}", base, game.name, WriterConfig::INDEX_EXT),
    }
}

/// Whether `dir` holds a shortcut, complete or partial.
///
/// A partial shortcut may have lost its marker but still carries the pointer
/// file named after its folder.
fn holds_shortcut(dir: &Path, folder_name: &str) -> bool {
    dir.is_dir() && (is_shortcut_dir(dir) || pointer_file(dir, folder_name).is_file())
}

/// Creates and removes shortcut directories on one SD card.
pub struct ShortcutWriter {
    layout: Layout,
    compositor: Compositor,
}

impl ShortcutWriter {
    pub fn new(layout: Layout, compositor: Compositor) -> Self {
        Self { layout, compositor }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    /// Directory of an existing shortcut for (display, tag), at any position.
    ///
    /// Probes the three current encodings first, then decodes every shortcut
    /// directory so names from older marker generations are found too.
    pub fn find_existing(&self, display: &str, tag: &str) -> Option<PathBuf> {
        if let Ok(name) = ShortcutName::new(display, tag, Position::Bottom) {
            for candidate in name.all_positions() {
                let folder_name = candidate.encode();
                let dir = self.layout.shortcut_dir(&folder_name);
                if holds_shortcut(&dir, &folder_name) {
                    return Some(dir);
                }
            }
        }

        let entries = fs::read_dir(&self.layout.content_root).ok()?;
        entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir() && is_shortcut_dir(path))
            .find(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .and_then(ShortcutName::decode)
                    .map(|decoded| decoded.display() == display && decoded.tag() == tag)
                    .unwrap_or(false)
            })
    }

    /// Whether a shortcut for (display, tag) exists under any position.
    pub fn shortcut_exists(&self, display: &str, tag: &str) -> bool {
        self.find_existing(display, tag).is_some()
    }

    /// Create the shortcut directory for `name`.
    ///
    /// An existing shortcut with the same identity at another position is a
    /// duplicate; one with the exact same folder name is overwritten. A plain
    /// folder that happens to carry the encoded name is never written into.
    fn prepare(&self, name: &ShortcutName) -> Result<PathBuf> {
        let folder_name = name.encode();

        if let Some(existing) = self.find_existing(name.display(), name.tag()) {
            let same_folder = existing
                .file_name()
                .map(|n| n.to_string_lossy() == folder_name.as_str())
                .unwrap_or(false);
            if !same_folder {
                return Err(ShortcutError::AlreadyExists {
                    display: name.display().to_string(),
                    tag: name.tag().to_string(),
                });
            }
            debug!("Overwriting shortcut files in {}", existing.display());
        }

        let dir = self.layout.shortcut_dir(&folder_name);
        if dir.exists() && !holds_shortcut(&dir, &folder_name) {
            return Err(ShortcutError::FolderInUse(dir));
        }
        fs::create_dir_all(&dir).map_err(|e| ShortcutError::io("create shortcut directory", &dir, e))?;
        Ok(dir)
    }

    /// Write the marker, optionally generate artwork, and re-read the result.
    fn finish(
        &self,
        dir: &Path,
        name: &ShortcutName,
        art_src: PathBuf,
        prefs: &Preferences,
    ) -> Result<Shortcut> {
        write_marker(dir, name.display())?;

        if prefs.copy_artwork {
            if let Err(e) = self.compositor.generate(Some(&art_src), dir, prefs) {
                warn!("Artwork generation for {} failed: {}", dir.display(), e);
            }
        }

        read_shortcut(dir).ok_or_else(|| ShortcutError::NotFound(dir.to_path_buf()))
    }

    /// Create a shortcut to a game.
    pub fn create_game_shortcut(
        &self,
        category: &Category,
        game: &GameEntry,
        position: Position,
        prefs: &Preferences,
    ) -> Result<Shortcut> {
        let name = ShortcutName::new(game.display.as_str(), category.tag.as_str(), position)?;
        info!(
            "Creating game shortcut: name={} category={} entry={} kind={}",
            name,
            category.name,
            game.relative_path.display(),
            game.kind.label()
        );

        let dir = self.prepare(&name)?;
        let pointer = game_pointer(&category.name, game);
        write_file(&pointer_file(&dir, &name.encode()), &pointer, "write pointer file")?;

        let art_src = category
            .path
            .join(ArtworkConfig::MEDIA_DIR_NAME)
            .join(format!("{}.{}", game.display, ArtworkConfig::SOURCE_EXT));
        let shortcut = self.finish(&dir, &name, art_src, prefs)?;

        info!("Created shortcut {} -> {}", dir.display(), pointer);
        Ok(shortcut)
    }

    /// Create a shortcut to a utility package.
    pub fn create_utility_shortcut(
        &self,
        package: &UtilityPackage,
        position: Position,
        prefs: &Preferences,
    ) -> Result<Shortcut> {
        let name = ShortcutName::new(package.display.as_str(), WriterConfig::UTILITY_TAG, position)?;
        info!(
            "Creating utility shortcut: name={} package={}",
            name,
            package.path.display()
        );

        let dir = self.prepare(&name)?;
        let package_path = package.path.to_string_lossy();
        write_file(
            &dir.join(WriterConfig::UTILITY_TARGET_FILE),
            &package_path,
            "write package path file",
        )?;
        write_file(
            &pointer_file(&dir, &name.encode()),
            WriterConfig::UTILITY_POINTER_TOKEN,
            "write pointer file",
        )?;

        let art_src = self
            .layout
            .packages_root
            .join(ArtworkConfig::MEDIA_DIR_NAME)
            .join(format!("{}.{}", package.display, ArtworkConfig::SOURCE_EXT));
        let shortcut = self.finish(&dir, &name, art_src, prefs)?;

        info!("Created shortcut {} -> {}", dir.display(), package_path);
        Ok(shortcut)
    }

    /// Delete a shortcut directory and everything in it.
    pub fn remove_shortcut(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(ShortcutError::NotFound(path.to_path_buf()));
        }
        if !path.is_dir() || !self.layout.is_in_content_root(path) || !is_shortcut_dir(path) {
            return Err(ShortcutError::NotAShortcut(path.to_path_buf()));
        }

        fs::remove_dir_all(path).map_err(|e| ShortcutError::io("remove shortcut directory", path, e))?;
        info!("Removed shortcut {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{scan_categories, scan_games, scan_utilities, ShortcutFile, ShortcutKind};
    use crate::platform::{DeviceClass, Platform};
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"rom").unwrap();
    }

    fn setup() -> (TempDir, ShortcutWriter) {
        let temp_dir = TempDir::new().unwrap();
        let layout = Layout::new(temp_dir.path(), Platform::Tg5040);
        let md = layout.category_dir("Sega Genesis (MD)");
        touch(&md.join("Battletoads (World).md"));
        touch(&md.join("Hacks/Sonic Delta.md"));
        let ps = layout.category_dir("Sony PlayStation (PS)");
        touch(&ps.join("Final Fantasy VII/Final Fantasy VII.m3u"));
        touch(&ps.join("Spyro/Spyro.cue"));
        fs::create_dir_all(layout.packages_root.join("SDLReader.pak")).unwrap();

        let compositor = Compositor::new(DeviceClass::Widescreen, layout.wallpaper.clone());
        (temp_dir, ShortcutWriter::new(layout, compositor))
    }

    fn game(writer: &ShortcutWriter, category: &str, display: &str) -> (Category, GameEntry) {
        let category = scan_categories(writer.layout(), false)
            .unwrap()
            .into_iter()
            .find(|c| c.name == category)
            .unwrap();
        let game = scan_games(&category.path, false)
            .unwrap()
            .into_iter()
            .find(|g| g.display == display)
            .unwrap();
        (category, game)
    }

    #[test]
    fn test_game_pointer_forms() {
        let (_tmp, writer) = setup();
        let (md, file) = game(&writer, "Sega Genesis (MD)", "Battletoads (World)");
        assert_eq!(game_pointer(&md.name, &file), "../Sega Genesis (MD)/Battletoads (World).md");

        let (_, nested) = game(&writer, "Sega Genesis (MD)", "Sonic Delta");
        assert_eq!(game_pointer(&md.name, &nested), "../Sega Genesis (MD)/Hacks/Sonic Delta.md");

        let (ps, multi) = game(&writer, "Sony PlayStation (PS)", "Final Fantasy VII");
        assert_eq!(
            game_pointer(&ps.name, &multi),
            "../Sony PlayStation (PS)/Final Fantasy VII/Final Fantasy VII.m3u"
        );

        let (_, cue) = game(&writer, "Sony PlayStation (PS)", "Spyro");
        assert_eq!(game_pointer(&ps.name, &cue), "../Sony PlayStation (PS)/Spyro/Spyro.cue");
    }

    #[test]
    fn test_create_game_shortcut_writes_file_set() {
        let (_tmp, writer) = setup();
        let (category, entry) = game(&writer, "Sega Genesis (MD)", "Battletoads (World)");

        let shortcut = writer
            .create_game_shortcut(&category, &entry, Position::Bottom, &Preferences::default())
            .unwrap();

        let folder = "\u{2060}Battletoads (World) (MD)";
        assert_eq!(shortcut.folder_name, folder);
        assert_eq!(shortcut.display, "Battletoads (World)");
        assert_eq!(shortcut.kind, ShortcutKind::Game);
        assert!(shortcut.is_complete());
        assert!(!shortcut.has_artwork);

        let dir = writer.layout().shortcut_dir(folder);
        assert_eq!(
            fs::read_to_string(dir.join(format!("{}.m3u", folder))).unwrap(),
            "../Sega Genesis (MD)/Battletoads (World).md"
        );
        assert_eq!(read_marker(&dir).as_deref(), Some("Battletoads (World)"));
        assert!(shortcut.target.unwrap().is_file());
    }

    #[test]
    fn test_create_utility_shortcut_writes_file_set() {
        let (_tmp, writer) = setup();
        let package = scan_utilities(writer.layout()).unwrap().remove(0);

        let shortcut = writer
            .create_utility_shortcut(&package, Position::Top, &Preferences::default())
            .unwrap();
        assert_eq!(shortcut.folder_name, "0) SDLReader (SHORTCUT)");
        assert!(shortcut.is_utility());
        assert_eq!(shortcut.target.as_deref(), Some(package.path.as_path()));

        let dir = writer.layout().shortcut_dir(&shortcut.folder_name);
        assert_eq!(
            fs::read_to_string(dir.join("0) SDLReader (SHORTCUT).m3u")).unwrap(),
            "target"
        );
        assert_eq!(
            fs::read_to_string(dir.join("target")).unwrap(),
            package.path.to_string_lossy()
        );
    }

    #[test]
    fn test_duplicate_at_other_position_is_rejected() {
        let (_tmp, writer) = setup();
        let (category, entry) = game(&writer, "Sega Genesis (MD)", "Battletoads (World)");
        let prefs = Preferences::default();

        writer
            .create_game_shortcut(&category, &entry, Position::Alphabetical, &prefs)
            .unwrap();
        for position in [Position::Top, Position::Bottom] {
            let err = writer
                .create_game_shortcut(&category, &entry, position, &prefs)
                .unwrap_err();
            assert!(matches!(err, ShortcutError::AlreadyExists { .. }), "{:?}", err);
        }

        // Same position overwrites and repairs a missing marker
        let dir = writer.layout().shortcut_dir("Battletoads (World) (MD)");
        fs::remove_file(dir.join(WriterConfig::MARKER_FILE)).unwrap();
        let repaired = writer
            .create_game_shortcut(&category, &entry, Position::Alphabetical, &prefs)
            .unwrap();
        assert!(repaired.is_complete());
    }

    #[test]
    fn test_legacy_shortcut_counts_as_existing() {
        let (_tmp, writer) = setup();
        fs::create_dir_all(writer.layout().content_root.join("\u{2605} Battletoads (World) (MD)")).unwrap();
        assert!(writer.shortcut_exists("Battletoads (World)", "MD"));

        let (category, entry) = game(&writer, "Sega Genesis (MD)", "Battletoads (World)");
        let err = writer
            .create_game_shortcut(&category, &entry, Position::Bottom, &Preferences::default())
            .unwrap_err();
        assert!(matches!(err, ShortcutError::AlreadyExists { .. }));
    }

    #[test]
    fn test_category_with_encoded_name_is_not_a_shortcut() {
        let (_tmp, writer) = setup();
        let doom = writer.layout().category_dir("Doom (DOOM)");
        touch(&doom.join("Doom.wad"));
        assert!(!writer.shortcut_exists("Doom", "DOOM"));

        let (category, entry) = game(&writer, "Doom (DOOM)", "Doom");
        let prefs = Preferences::default();
        let err = writer
            .create_game_shortcut(&category, &entry, Position::Alphabetical, &prefs)
            .unwrap_err();
        assert!(matches!(err, ShortcutError::FolderInUse(_)), "{:?}", err);
        assert!(!doom.join(WriterConfig::MARKER_FILE).exists());
        assert!(!pointer_file(&doom, "Doom (DOOM)").exists());

        // The category is untouched and other positions still work
        let categories = scan_categories(writer.layout(), false).unwrap();
        assert!(categories.iter().any(|c| c.name == "Doom (DOOM)"));
        let shortcut = writer
            .create_game_shortcut(&category, &entry, Position::Bottom, &prefs)
            .unwrap();
        assert_eq!(shortcut.folder_name, "\u{2060}Doom (DOOM)");
        assert!(writer.shortcut_exists("Doom", "DOOM"));
    }

    #[test]
    fn test_copy_artwork_generates_background() {
        let (_tmp, writer) = setup();
        let (category, entry) = game(&writer, "Sony PlayStation (PS)", "Spyro");
        let prefs = Preferences {
            copy_artwork: true,
            ..Preferences::default()
        };

        let shortcut = writer
            .create_game_shortcut(&category, &entry, Position::Bottom, &prefs)
            .unwrap();
        assert!(shortcut.has_artwork);
    }

    #[test]
    fn test_remove_shortcut() {
        let (_tmp, writer) = setup();
        let (category, entry) = game(&writer, "Sega Genesis (MD)", "Battletoads (World)");
        let shortcut = writer
            .create_game_shortcut(&category, &entry, Position::Bottom, &Preferences::default())
            .unwrap();

        let err = writer.remove_shortcut(&category.path).unwrap_err();
        assert!(matches!(err, ShortcutError::NotAShortcut(_)));

        writer.remove_shortcut(&shortcut.path).unwrap();
        assert!(!shortcut.path.exists());
        assert!(!writer.shortcut_exists("Battletoads (World)", "MD"));
        assert!(category.path.join("Battletoads (World).md").exists());

        let err = writer.remove_shortcut(&shortcut.path).unwrap_err();
        assert!(matches!(err, ShortcutError::NotFound(_)));
    }

    #[test]
    fn test_partial_shortcut_is_reported() {
        let (_tmp, writer) = setup();
        let package = scan_utilities(writer.layout()).unwrap().remove(0);
        let shortcut = writer
            .create_utility_shortcut(&package, Position::Bottom, &Preferences::default())
            .unwrap();
        fs::remove_file(shortcut.path.join(WriterConfig::UTILITY_TARGET_FILE)).unwrap();

        let rescanned = read_shortcut(&shortcut.path).unwrap();
        assert_eq!(rescanned.missing_files, vec![ShortcutFile::PackagePath]);
        assert!(rescanned.target.is_none());
    }
}
