//! Whole-card artwork passes over every existing shortcut.

use super::compositor::{ArtworkOutcome, Compositor};
use crate::config::ArtworkConfig;
use crate::error::Result;
use crate::inventory::{pointer_file, scan_shortcuts, Shortcut, ShortcutKind};
use crate::platform::Layout;
use crate::preferences::Preferences;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

/// Counts from a bulk pass. A per-shortcut failure is counted, never fatal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BulkReport {
    pub processed: usize,
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// `<dir>/.media/<display>.png`
fn media_source(dir: &Path, display: &str) -> PathBuf {
    dir.join(ArtworkConfig::MEDIA_DIR_NAME)
        .join(format!("{}.{}", display, ArtworkConfig::SOURCE_EXT))
}

/// Category folder named by a game pointer (`../<category>/...`).
fn pointer_category(pointer: &str) -> Option<String> {
    let mut components = Path::new(pointer).components();
    match (components.next(), components.next()) {
        (Some(Component::ParentDir), Some(Component::Normal(category))) => {
            Some(category.to_string_lossy().to_string())
        }
        _ => None,
    }
}

/// Source-art path for an existing shortcut.
///
/// Game shortcuts are traced back to their owning category through the
/// pointer file. Returns `None` when the owner can't be determined.
pub fn art_source_for(layout: &Layout, shortcut: &Shortcut) -> Option<PathBuf> {
    match shortcut.kind {
        ShortcutKind::Utility => Some(media_source(&layout.packages_root, &shortcut.display)),
        ShortcutKind::Game => {
            let pointer = fs::read_to_string(pointer_file(&shortcut.path, &shortcut.folder_name)).ok()?;
            let category = pointer_category(pointer.trim())?;
            Some(media_source(&layout.category_dir(&category), &shortcut.display))
        }
    }
}

/// Regenerate `.media/bg.png` for every shortcut under the current preferences.
pub fn regenerate_all(
    layout: &Layout,
    compositor: &Compositor,
    prefs: &Preferences,
) -> Result<BulkReport> {
    let shortcuts = scan_shortcuts(layout)?;
    let mut report = BulkReport::default();

    for shortcut in &shortcuts {
        report.processed += 1;

        let Some(art_src) = art_source_for(layout, shortcut) else {
            debug!("No art source derivable for {}", shortcut.path.display());
            report.skipped += 1;
            continue;
        };

        match compositor.generate(Some(&art_src), &shortcut.path, prefs) {
            Ok(ArtworkOutcome::Skipped) => report.skipped += 1,
            Ok(_) => report.written += 1,
            Err(e) => {
                warn!("Artwork for {} failed: {}", shortcut.path.display(), e);
                report.failed += 1;
            }
        }
    }

    info!(
        "regenerate_all: processed={} written={} skipped={} failed={}",
        report.processed, report.written, report.skipped, report.failed
    );
    Ok(report)
}

/// Delete generated artwork from every shortcut, and the media directory when
/// it ends up empty.
pub fn remove_all(layout: &Layout) -> Result<BulkReport> {
    let shortcuts = scan_shortcuts(layout)?;
    let mut report = BulkReport::default();

    for shortcut in &shortcuts {
        report.processed += 1;
        let media_dir = shortcut.path.join(ArtworkConfig::MEDIA_DIR_NAME);
        let output = media_dir.join(ArtworkConfig::OUTPUT_FILE_NAME);

        match fs::remove_file(&output) {
            Ok(()) => report.written += 1,
            Err(e) if e.kind() == ErrorKind::NotFound => report.skipped += 1,
            Err(e) => {
                warn!("Could not remove {}: {}", output.display(), e);
                report.failed += 1;
                continue;
            }
        }

        // Only succeeds when empty
        let _ = fs::remove_dir(&media_dir);
    }

    info!(
        "remove_all: processed={} removed={} absent={} failed={}",
        report.processed, report.written, report.skipped, report.failed
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_category() {
        assert_eq!(
            pointer_category("../Sega Genesis (MD)/Sonic.md").as_deref(),
            Some("Sega Genesis (MD)")
        );
        assert_eq!(
            pointer_category("../Sony PlayStation (PS)/FF7/FF7.m3u").as_deref(),
            Some("Sony PlayStation (PS)")
        );
        assert_eq!(pointer_category("target"), None);
        assert_eq!(pointer_category("/abs/path.md"), None);
    }
}
