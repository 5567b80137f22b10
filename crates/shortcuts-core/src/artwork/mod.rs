//! Background artwork for shortcut directories.
//!
//! - `geometry` - cover/fit arithmetic and art placement
//! - `mask` - rounded-corner alpha mask
//! - `compositor` - layer composition and PNG output
//! - `bulk` - regenerate or remove artwork for every shortcut

pub mod bulk;
pub mod compositor;
pub mod geometry;
pub mod mask;

pub use bulk::{art_source_for, regenerate_all, remove_all, BulkReport};
pub use compositor::{black_canvas, compose, cover, ArtworkOutcome, Compositor};
pub use geometry::{art_origin, cover_crop, cover_size, fit_within, thumbnail_box};
pub use mask::{apply_rounded_corners, corner_is_clipped};
