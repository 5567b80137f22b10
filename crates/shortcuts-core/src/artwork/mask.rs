//! Rounded-corner alpha mask matching the launcher's thumbnail rendering.

use image::{Rgba, RgbaImage};

/// Distance of `pos` past the corner band of an axis of length `len`.
fn overshoot(pos: u32, len: u32, radius: u32) -> u64 {
    if pos < radius {
        (radius - pos) as u64
    } else if pos + radius >= len {
        // pos >= len - radius, distance measured from len - radius - 1
        (pos + radius + 1 - len) as u64
    } else {
        0
    }
}

/// Whether pixel (x, y) of a `w` x `h` image falls outside the corner arcs.
pub fn corner_is_clipped(x: u32, y: u32, w: u32, h: u32, radius: u32) -> bool {
    if radius == 0 || w == 0 || h == 0 {
        return false;
    }
    let dx = overshoot(x, w, radius);
    let dy = overshoot(y, h, radius);
    let r = radius as u64;
    dx * dx + dy * dy > r * r
}

/// Make every pixel outside the corner arcs fully transparent.
pub fn apply_rounded_corners(img: &mut RgbaImage, radius: u32) {
    let (w, h) = img.dimensions();
    if radius == 0 || w == 0 || h == 0 {
        return;
    }
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        if corner_is_clipped(x, y, w, h, radius) {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }
}
