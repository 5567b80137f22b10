//! Read-only views of the SD card: categories, games, packages, shortcuts.

mod scanner;
mod types;
mod visibility;

pub use scanner::{
    pointer_file, read_shortcut, scan_categories, scan_games, scan_shortcuts, scan_utilities,
};
pub use types::{
    Category, GameEntry, GameKind, Shortcut, ShortcutFile, ShortcutKind, UtilityPackage,
};
pub use visibility::{strip_disabled, strip_extension, Visibility};
