//! Shortcut identity and on-disk file set.
//!
//! - `naming` - folder-name codec
//! - `writer` - creates and removes shortcut directories

pub mod naming;
mod writer;

pub use naming::{is_shortcut_dir, MarkerGeneration, Position, ShortcutName};
pub use writer::{game_pointer, read_marker, write_marker, ShortcutWriter};
