//! Scan result types.
//!
//! All of these are rebuilt on every scan; none are cached.

use crate::shortcut::Position;
use serde::Serialize;
use std::path::PathBuf;

/// A category directory collecting all entries for one system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    /// Folder name, e.g. "Sega Genesis (MD)".
    pub name: String,
    /// e.g. "MD".
    pub tag: String,
    pub path: PathBuf,
    /// Name without the tag, e.g. "Sega Genesis".
    pub display: String,
    pub disabled: bool,
}

/// How a game is stored inside its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    /// A single ROM file.
    SingleFile,
    /// Folder `X/` holding the playlist `X/X.m3u`.
    MultiDisc,
    /// Folder `X/` holding the index `X/X.cue`.
    IndexFolder,
}

impl GameKind {
    pub fn label(&self) -> &'static str {
        match self {
            GameKind::SingleFile => "file",
            GameKind::MultiDisc => "multi-disc",
            GameKind::IndexFolder => "cue folder",
        }
    }
}

/// A game inside a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameEntry {
    /// File or folder name.
    pub name: String,
    pub path: PathBuf,
    /// Path below the category directory; differs from `name` for entries in sub-folders.
    pub relative_path: PathBuf,
    /// Name without extension or `.disabled` suffix.
    pub display: String,
    pub kind: GameKind,
    pub disabled: bool,
}

/// An installed utility package (`<Name>.pak`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UtilityPackage {
    pub name: String,
    pub path: PathBuf,
    pub display: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortcutKind {
    Game,
    Utility,
}

/// Files a complete shortcut directory is expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortcutFile {
    Pointer,
    Marker,
    PackagePath,
}

/// An existing shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shortcut {
    /// Encoded folder name.
    pub folder_name: String,
    pub tag: String,
    /// Clean display name.
    pub display: String,
    pub path: PathBuf,
    pub kind: ShortcutKind,
    /// Game file or package directory the shortcut resolves to.
    pub target: Option<PathBuf>,
    pub position: Position,
    /// Generated artwork is present.
    pub has_artwork: bool,
    /// Expected sub-files that are absent; non-empty after an interrupted write.
    pub missing_files: Vec<ShortcutFile>,
}

impl Shortcut {
    pub fn is_utility(&self) -> bool {
        self.kind == ShortcutKind::Utility
    }

    pub fn is_complete(&self) -> bool {
        self.missing_files.is_empty()
    }
}
