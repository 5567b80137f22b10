//! Filesystem scans for categories, games, packages and shortcuts.

use super::types::{Category, GameEntry, GameKind, Shortcut, ShortcutFile, ShortcutKind, UtilityPackage};
use super::visibility::{strip_disabled, strip_extension, Visibility};
use crate::config::{ArtworkConfig, LayoutConfig, WriterConfig};
use crate::error::{Result, ShortcutError};
use crate::platform::Layout;
use crate::shortcut::naming::{extract_display_name, extract_tag, is_shortcut_dir, sort_key};
use crate::shortcut::{read_marker, ShortcutName};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// List the directory entries of `dir`, surfacing an unreadable directory as an error.
fn read_dir_names(dir: &Path, what: &str) -> Result<Vec<(String, PathBuf, bool)>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| ShortcutError::io(format!("read {} directory", what), dir, e))?;

    let mut out = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        let name = entry.file_name().to_string_lossy().to_string();
        out.push((name, entry.path(), is_dir));
    }
    Ok(out)
}

/// All category directories in the content root.
///
/// Shortcuts, tagless folders and hidden entries are excluded. Disabled and
/// empty categories appear only with `show_hidden`.
pub fn scan_categories(layout: &Layout, show_hidden: bool) -> Result<Vec<Category>> {
    let mut categories = Vec::new();

    for (name, path, is_dir) in read_dir_names(&layout.content_root, "content")? {
        if !is_dir {
            continue;
        }
        let visibility = Visibility::of(&name);
        if !visibility.is_listed(show_hidden) || is_shortcut_dir(&path) {
            continue;
        }
        let Some(tag) = extract_tag(&name) else {
            continue;
        };

        if !show_hidden {
            match scan_games(&path, false) {
                Ok(games) if games.is_empty() => continue,
                Ok(_) => {}
                Err(e) => {
                    warn!("Skipping unreadable category {}: {}", path.display(), e);
                    continue;
                }
            }
        }

        categories.push(Category {
            tag: tag.to_string(),
            display: extract_display_name(strip_disabled(&name)).to_string(),
            disabled: visibility == Visibility::Disabled,
            path,
            name,
        });
    }

    categories.sort_by_key(|c| sort_key(&c.display));
    info!(
        "scan_categories: dir={} categories={}",
        layout.content_root.display(),
        categories.len()
    );
    Ok(categories)
}

/// Classify a directory inside a category.
fn game_folder_kind(dir: &Path, name: &str) -> Option<GameKind> {
    if dir.join(format!("{}.{}", name, WriterConfig::PLAYLIST_EXT)).is_file() {
        Some(GameKind::MultiDisc)
    } else if dir.join(format!("{}.{}", name, WriterConfig::INDEX_EXT)).is_file() {
        Some(GameKind::IndexFolder)
    } else {
        None
    }
}

/// All games in a category directory.
///
/// Plain sub-folders are walked; game folders (multi-disc, cue) are leaves.
pub fn scan_games(category_dir: &Path, show_hidden: bool) -> Result<Vec<GameEntry>> {
    // Surface an unreadable category instead of an empty walk.
    fs::read_dir(category_dir)
        .map_err(|e| ShortcutError::io("read category directory", category_dir, e))?;

    let mut games = Vec::new();
    let mut walker = WalkDir::new(category_dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", category_dir.display(), e);
                continue;
            }
        };

        let is_dir = entry.file_type().is_dir();
        let name = entry.file_name().to_string_lossy().to_string();
        let visibility = Visibility::of(&name);
        if !visibility.is_listed(show_hidden) {
            if is_dir {
                walker.skip_current_dir();
            }
            continue;
        }

        let kind = if is_dir {
            match game_folder_kind(entry.path(), &name) {
                Some(kind) => {
                    walker.skip_current_dir();
                    kind
                }
                None => continue,
            }
        } else {
            GameKind::SingleFile
        };

        let display = match kind {
            GameKind::SingleFile => strip_extension(strip_disabled(&name)),
            GameKind::MultiDisc | GameKind::IndexFolder => strip_disabled(&name),
        }
        .to_string();

        let relative_path = entry
            .path()
            .strip_prefix(category_dir)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| PathBuf::from(&name));

        games.push(GameEntry {
            path: entry.path().to_path_buf(),
            relative_path,
            display,
            kind,
            disabled: visibility == Visibility::Disabled,
            name,
        });
    }

    games.sort_by(|a, b| {
        sort_key(&a.display)
            .cmp(&sort_key(&b.display))
            .then_with(|| a.relative_path.cmp(&b.relative_path))
    });
    debug!("scan_games: dir={} games={}", category_dir.display(), games.len());
    Ok(games)
}

/// All utility packages for this platform.
pub fn scan_utilities(layout: &Layout) -> Result<Vec<UtilityPackage>> {
    let mut packages = Vec::new();

    for (name, path, is_dir) in read_dir_names(&layout.packages_root, "packages")? {
        if !is_dir || Visibility::of(&name) != Visibility::Visible {
            continue;
        }
        let Some(display) = name.strip_suffix(LayoutConfig::PACKAGE_SUFFIX) else {
            continue;
        };
        if display.is_empty() {
            continue;
        }
        packages.push(UtilityPackage {
            display: display.to_string(),
            name: display.to_string(),
            path,
        });
    }

    packages.sort_by_key(|p| sort_key(&p.display));
    info!(
        "scan_utilities: dir={} packages={}",
        layout.packages_root.display(),
        packages.len()
    );
    Ok(packages)
}

/// All shortcuts in the content root, from every codec generation.
pub fn scan_shortcuts(layout: &Layout) -> Result<Vec<Shortcut>> {
    let mut shortcuts = Vec::new();

    for (_, path, is_dir) in read_dir_names(&layout.content_root, "content")? {
        if !is_dir || !is_shortcut_dir(&path) {
            continue;
        }
        if let Some(shortcut) = read_shortcut(&path) {
            shortcuts.push(shortcut);
        }
    }

    shortcuts.sort_by_key(|s| sort_key(&s.display));
    let incomplete = shortcuts.iter().filter(|s| !s.is_complete()).count();
    info!(
        "scan_shortcuts: dir={} shortcuts={} incomplete={}",
        layout.content_root.display(),
        shortcuts.len(),
        incomplete
    );
    Ok(shortcuts)
}

/// Read one shortcut directory. Returns `None` when the folder name has no tag.
///
/// Missing sub-files never fail the read; they are listed in `missing_files`.
pub fn read_shortcut(path: &Path) -> Option<Shortcut> {
    let folder_name = path.file_name()?.to_string_lossy().to_string();
    let Some((name, generation)) = ShortcutName::decode_with_generation(&folder_name) else {
        debug!("Ignoring shortcut without tag: {}", path.display());
        return None;
    };
    if let Some(generation) = generation {
        debug!("Decoded {:?} marker for {}", generation, folder_name);
    }

    let mut missing_files = Vec::new();

    let display = match read_marker(path) {
        Some(display) => display,
        None => {
            missing_files.push(ShortcutFile::Marker);
            name.display().to_string()
        }
    };

    let kind = if name.is_utility() {
        ShortcutKind::Utility
    } else {
        ShortcutKind::Game
    };

    let pointer = read_trimmed(&pointer_file(path, &folder_name));
    if pointer.is_none() {
        missing_files.push(ShortcutFile::Pointer);
    }

    let target = match kind {
        ShortcutKind::Utility => {
            let target = read_trimmed(&path.join(WriterConfig::UTILITY_TARGET_FILE));
            if target.is_none() {
                missing_files.push(ShortcutFile::PackagePath);
            }
            target.map(PathBuf::from)
        }
        ShortcutKind::Game => pointer.map(|relative| resolve_pointer(path, &relative)),
    };

    Some(Shortcut {
        tag: name.tag().to_string(),
        position: name.position(),
        has_artwork: path
            .join(ArtworkConfig::MEDIA_DIR_NAME)
            .join(ArtworkConfig::OUTPUT_FILE_NAME)
            .is_file(),
        path: path.to_path_buf(),
        folder_name,
        display,
        kind,
        target,
        missing_files,
    })
}

/// Pointer file of a shortcut directory: `<dir>/<folder>.m3u`.
pub fn pointer_file(shortcut_dir: &Path, folder_name: &str) -> PathBuf {
    shortcut_dir.join(format!("{}.{}", folder_name, WriterConfig::POINTER_EXT))
}

/// Resolve a relative pointer against its shortcut directory without touching
/// the filesystem, so `../<category>/<entry>` becomes `<content>/<category>/<entry>`.
fn resolve_pointer(shortcut_dir: &Path, relative: &str) -> PathBuf {
    let mut resolved = shortcut_dir.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::ParentDir => {
                resolved.pop();
            }
            Component::CurDir => {}
            other => resolved.push(other.as_os_str()),
        }
    }
    resolved
}

fn read_trimmed(path: &Path) -> Option<String> {
    let data = fs::read_to_string(path).ok()?;
    let trimmed = data.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
