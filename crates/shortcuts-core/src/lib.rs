//! Shortcuts Core - launcher shortcut management for NextUI handhelds.
//!
//! Creates, lists and removes "shortcut" directories in the launcher's content
//! root. A shortcut points at a game inside a category or at a utility
//! package, sorts at a chosen position in the launcher's list, and can carry a
//! generated background image.
//!
//! # Example
//!
//! ```rust,ignore
//! use shortcuts_core::{Position, ShortcutsApi};
//!
//! fn main() -> shortcuts_core::Result<()> {
//!     let api = ShortcutsApi::from_env()?;
//!
//!     let category = api.find_category("MD")?;
//!     let game = api.find_game(&category, "Battletoads (World).md")?;
//!     let shortcut = api.create_game_shortcut(&category, &game, Position::Bottom)?;
//!     println!("Created {}", shortcut.path.display());
//!
//!     Ok(())
//! }
//! ```

pub mod artwork;
pub mod config;
pub mod error;
pub mod inventory;
pub mod platform;
pub mod preferences;
pub mod shortcut;

mod api;

// Re-export commonly used types
pub use api::{ShortcutsApi, ShortcutsApiBuilder};
pub use artwork::{ArtworkOutcome, BulkReport, Compositor};
pub use config::AppConfig;
pub use error::{Result, ShortcutError};
pub use inventory::{
    Category, GameEntry, GameKind, Shortcut, ShortcutFile, ShortcutKind, UtilityPackage,
};
pub use platform::{DeviceClass, Layout, Platform};
pub use preferences::{ArtworkMode, Preferences};
pub use shortcut::{MarkerGeneration, Position, ShortcutName, ShortcutWriter};
