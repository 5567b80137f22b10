//! Two-layer artwork compositor.
//!
//! The base layer is the device wallpaper scaled to cover the canvas (or solid
//! black). The art layer is the source thumbnail fitted into the launcher's
//! thumbnail box, corner-masked, and placed right-aligned.

use super::geometry::{art_origin, cover_crop, cover_size, fit_within, thumbnail_box};
use super::mask::apply_rounded_corners;
use crate::config::ArtworkConfig;
use crate::error::{Result, ShortcutError};
use crate::platform::DeviceClass;
use crate::preferences::{ArtworkMode, Preferences};
use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// What a single generation run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtworkOutcome {
    /// Art composited onto the base layer.
    Composited,
    /// No art; a solid black canvas was written.
    PlainBlack,
    /// No art; the base layer was written on its own.
    BaseLayer,
    /// No art and nothing written.
    Skipped,
}

impl ArtworkOutcome {
    pub fn wrote_file(&self) -> bool {
        !matches!(self, ArtworkOutcome::Skipped)
    }
}

/// Solid black canvas.
pub fn black_canvas(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, BLACK)
}

/// Scale `src` to cover a `width` x `height` canvas and center-crop it.
pub fn cover(src: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let (src_w, src_h) = src.dimensions();
    let (scaled_w, scaled_h) = cover_size(src_w, src_h, width, height);
    let scaled = imageops::resize(src, scaled_w, scaled_h, FilterType::Triangle);
    let (x, y) = cover_crop(scaled_w, scaled_h, width, height);
    imageops::crop_imm(&scaled, x, y, width, height).to_image()
}

/// Fit `art` into the thumbnail box, mask its corners and draw it onto `base`.
///
/// Returns the placed art size.
pub fn compose(base: &mut RgbaImage, art: &RgbaImage, radius: u32, margin: u32) -> (u32, u32) {
    let (canvas_w, canvas_h) = base.dimensions();
    let (box_w, box_h) = thumbnail_box(canvas_w, canvas_h);
    let (art_w, art_h) = fit_within(art.width(), art.height(), box_w, box_h);

    let mut scaled = imageops::resize(art, art_w, art_h, FilterType::Triangle);
    apply_rounded_corners(&mut scaled, radius);

    let (x, y) = art_origin(canvas_w, canvas_h, art_w, art_h, margin);
    imageops::overlay(base, &scaled, x, y);
    (art_w, art_h)
}

/// Open an optional image; absent or undecodable files yield `None`.
fn load_optional(path: &Path, what: &str) -> Option<RgbaImage> {
    if !path.is_file() {
        debug!("No {} at {}", what, path.display());
        return None;
    }
    match image::open(path) {
        Ok(img) => Some(img.to_rgba8()),
        Err(e) => {
            warn!("Ignoring unreadable {} {}: {}", what, path.display(), e);
            None
        }
    }
}

/// Renders `.media/bg.png` for shortcut directories.
#[derive(Debug, Clone)]
pub struct Compositor {
    device: DeviceClass,
    wallpaper: PathBuf,
}

impl Compositor {
    pub fn new(device: DeviceClass, wallpaper: impl Into<PathBuf>) -> Self {
        Self {
            device,
            wallpaper: wallpaper.into(),
        }
    }

    pub fn device(&self) -> DeviceClass {
        self.device
    }

    pub fn corner_radius(&self) -> u32 {
        ArtworkConfig::LOGICAL_CORNER_RADIUS * self.device.render_scale()
    }

    pub fn right_margin(&self) -> u32 {
        ArtworkConfig::LOGICAL_RIGHT_MARGIN * self.device.render_scale()
    }

    /// Wallpaper cover-cropped to the canvas, or black.
    pub fn base_layer(&self, use_wallpaper: bool) -> RgbaImage {
        let (width, height) = self.device.canvas_size();
        if use_wallpaper {
            if let Some(wallpaper) = load_optional(&self.wallpaper, "wallpaper") {
                return cover(&wallpaper, width, height);
            }
        }
        black_canvas(width, height)
    }

    /// Build the output image in memory. `None` means nothing should be written.
    pub fn render(
        &self,
        art: Option<&RgbaImage>,
        prefs: &Preferences,
    ) -> (Option<RgbaImage>, ArtworkOutcome) {
        let (width, height) = self.device.canvas_size();
        match (art, prefs.artwork_mode) {
            (Some(art), _) => {
                let mut canvas = self.base_layer(prefs.wallpaper_enabled());
                let (art_w, art_h) =
                    compose(&mut canvas, art, self.corner_radius(), self.right_margin());
                debug!("Composited art {}x{} onto {}x{}", art_w, art_h, width, height);
                (Some(canvas), ArtworkOutcome::Composited)
            }
            (None, ArtworkMode::AlwaysEmit) => {
                (Some(black_canvas(width, height)), ArtworkOutcome::PlainBlack)
            }
            (None, ArtworkMode::BaseOnly) => (
                Some(self.base_layer(prefs.wallpaper_enabled())),
                ArtworkOutcome::BaseLayer,
            ),
            (None, ArtworkMode::SkipIfMissing) => (None, ArtworkOutcome::Skipped),
        }
    }

    /// Generate `<shortcut_dir>/.media/bg.png` from an optional art source.
    ///
    /// A missing or unreadable source counts as "no art". Only failures to
    /// write the output are errors.
    pub fn generate(
        &self,
        art_src: Option<&Path>,
        shortcut_dir: &Path,
        prefs: &Preferences,
    ) -> Result<ArtworkOutcome> {
        let art = art_src.and_then(|path| load_optional(path, "source art"));
        let (image, outcome) = self.render(art.as_ref(), prefs);

        let Some(image) = image else {
            debug!("No artwork written for {}", shortcut_dir.display());
            return Ok(outcome);
        };

        let media_dir = shortcut_dir.join(ArtworkConfig::MEDIA_DIR_NAME);
        fs::create_dir_all(&media_dir)
            .map_err(|e| ShortcutError::io("create media directory", &media_dir, e))?;

        let output = media_dir.join(ArtworkConfig::OUTPUT_FILE_NAME);
        image
            .save_with_format(&output, ImageFormat::Png)
            .map_err(|e| ShortcutError::image_with_path(e, &output))?;

        info!(
            "Generated artwork {} ({:?}, {}x{})",
            output.display(),
            outcome,
            image.width(),
            image.height()
        );
        Ok(outcome)
    }
}
