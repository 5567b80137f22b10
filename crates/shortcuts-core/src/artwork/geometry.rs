//! Canvas geometry for the artwork layers.
//!
//! Everything here is pure arithmetic over explicit dimensions.

use crate::config::ArtworkConfig;

/// Size a `src` image must be scaled to so it covers `dst` in both dimensions.
///
/// Uses the larger of the two ratios. Each result is rounded and never smaller
/// than the matching `dst` dimension, so a centered crop of `dst` always lands
/// on real pixels.
pub fn cover_size(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> (u32, u32) {
    if src_w == 0 || src_h == 0 {
        return (dst_w, dst_h);
    }
    let scale = (dst_w as f64 / src_w as f64).max(dst_h as f64 / src_h as f64);
    let w = ((src_w as f64 * scale).round() as u32).max(dst_w);
    let h = ((src_h as f64 * scale).round() as u32).max(dst_h);
    (w, h)
}

/// Top-left offset of a `dst`-sized window centered in a `scaled` image.
pub fn cover_crop(scaled_w: u32, scaled_h: u32, dst_w: u32, dst_h: u32) -> (u32, u32) {
    (
        scaled_w.saturating_sub(dst_w) / 2,
        scaled_h.saturating_sub(dst_h) / 2,
    )
}

/// Scale `src` to fit inside `max`, preserving aspect ratio.
///
/// Width is tried first; if the height then overflows, height is the
/// constraint instead. Integer arithmetic, results at least 1x1.
pub fn fit_within(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if src_w == 0 || src_h == 0 {
        return (max_w.max(1), max_h.max(1));
    }
    let (src_w, src_h, max_w, max_h) = (src_w as u64, src_h as u64, max_w as u64, max_h as u64);

    let mut w = max_w;
    let mut h = src_h * max_w / src_w;
    if h > max_h {
        h = max_h;
        w = src_w * max_h / src_h;
    }
    (w.max(1) as u32, h.max(1) as u32)
}

/// Bounding box for the art layer on a canvas.
pub fn thumbnail_box(canvas_w: u32, canvas_h: u32) -> (u32, u32) {
    (
        (canvas_w as f64 * ArtworkConfig::THUMB_WIDTH_FRACTION) as u32,
        (canvas_h as f64 * ArtworkConfig::THUMB_HEIGHT_FRACTION) as u32,
    )
}

/// Where the art layer goes: right-aligned with `margin`, vertically centered.
pub fn art_origin(canvas_w: u32, canvas_h: u32, art_w: u32, art_h: u32, margin: u32) -> (i64, i64) {
    let x = (canvas_w as i64 - art_w as i64 - margin as i64).max(0);
    let y = canvas_h as i64 / 2 - art_h as i64 / 2;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_size_fills_canvas() {
        // Narrower but taller than the canvas
        let (w, h) = cover_size(1000, 1000, 1280, 720);
        assert_eq!((w, h), (1280, 1280));

        // Wider but shorter
        let (w, h) = cover_size(2000, 500, 1280, 720);
        assert!(w >= 1280 && h >= 720);
        assert_eq!(h, 720);

        for (sw, sh) in [(1, 1), (3, 7), (1279, 719), (4000, 3000), (640, 480)] {
            let (w, h) = cover_size(sw, sh, 1024, 768);
            assert!(w >= 1024 && h >= 768, "{}x{} -> {}x{}", sw, sh, w, h);
        }
    }

    #[test]
    fn test_cover_crop_is_centered() {
        assert_eq!(cover_crop(1280, 1280, 1280, 720), (0, 280));
        assert_eq!(cover_crop(1281, 720, 1280, 720), (0, 0));
        assert_eq!(cover_crop(1280, 720, 1280, 720), (0, 0));
    }

    #[test]
    fn test_fit_within_keeps_aspect_and_bounds() {
        let (max_w, max_h) = (576, 432);
        for (sw, sh) in [(2000, 1000), (1000, 2000), (3000, 3000), (4000, 2250)] {
            let (w, h) = fit_within(sw, sh, max_w, max_h);
            assert!(w <= max_w && h <= max_h);
            let src_ratio = sw as f64 / sh as f64;
            let ratio = w as f64 / h as f64;
            assert!((src_ratio - ratio).abs() / src_ratio < 0.01, "{}x{} -> {}x{}", sw, sh, w, h);
            assert!(w == max_w || h == max_h);
        }
    }

    #[test]
    fn test_fit_within_degenerate() {
        assert_eq!(fit_within(0, 10, 576, 432), (576, 432));
        assert_eq!(fit_within(10000, 1, 576, 432), (576, 1));
    }

    #[test]
    fn test_thumbnail_box() {
        assert_eq!(thumbnail_box(1280, 720), (576, 432));
        assert_eq!(thumbnail_box(1024, 768), (460, 460));
    }

    #[test]
    fn test_art_origin() {
        assert_eq!(art_origin(1280, 720, 576, 432, 30), (674, 144));
        assert_eq!(art_origin(100, 100, 200, 50, 30), (0, 25));
    }
}
