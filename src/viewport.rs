// Canvas backing-store and pointer geometry.
//
// No web-sys types here; the callers read the DOM and pass plain numbers.

use crate::constants::MAX_DEVICE_PIXEL_RATIO;
use glam::Vec2;

/// Backing store size for a canvas laid out at `css_w` x `css_h` CSS pixels.
///
/// The device pixel ratio is clamped to `1..=MAX_DEVICE_PIXEL_RATIO` and
/// each side is at least one pixel.
pub fn backing_size(css_w: f64, css_h: f64, dpr: f64) -> (u32, u32) {
    let dpr = if dpr.is_finite() {
        dpr.clamp(1.0, MAX_DEVICE_PIXEL_RATIO)
    } else {
        1.0
    };
    let px = |css: f64| ((css.max(0.0) * dpr) as u32).max(1);
    (px(css_w), px(css_h))
}

/// Map a client-space point onto the backing store of a canvas whose
/// bounding rect starts at `rect_min` and spans `rect_size`.
///
/// `None` while the canvas has no layout box.
pub fn client_to_backing(
    client: Vec2,
    rect_min: Vec2,
    rect_size: Vec2,
    backing: (u32, u32),
) -> Option<Vec2> {
    if !(rect_size.x > 0.0 && rect_size.y > 0.0) {
        return None;
    }
    let scale = Vec2::new(backing.0 as f32, backing.1 as f32) / rect_size;
    Some((client - rect_min) * scale)
}
