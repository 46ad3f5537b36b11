//! Drawing target abstraction and a software rasterizer implementing it.

use glam::Vec2;

use crate::color::{Rgb, Rgba8};

/// Minimal 2D drawing API the effects render through.
///
/// The web front-end implements this over `CanvasRenderingContext2d`; the
/// native preview and the tests use [`PixelSurface`].
pub trait Surface {
    /// Backing size in device pixels.
    fn size(&self) -> (u32, u32);

    /// Fill the whole surface, or reset it to transparent when `color` is `None`.
    fn clear(&mut self, color: Option<Rgb>);

    /// Solid disc at `alpha` opacity.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb, alpha: f32);

    /// Radial gradient from `color` at `alpha` in the center to transparent at `radius`.
    fn fill_glow(&mut self, center: Vec2, radius: f32, color: Rgb, alpha: f32);

    /// Straight segment `width` pixels wide.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgb, alpha: f32);
}

/// CPU-side RGBA8 framebuffer with source-over blending.
#[derive(Clone, Debug)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

impl PixelSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba8::TRANSPARENT; width as usize * height as usize],
        }
    }

    /// Change the backing size. Contents are cleared.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize(width as usize * height as usize, Rgba8::TRANSPARENT);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Count of pixels that are not fully transparent.
    pub fn covered(&self) -> usize {
        self.pixels.iter().filter(|p| p.a > 0).count()
    }

    /// Visit every pixel whose center lies within `radius + 1` of `center`,
    /// passing the pixel and its distance from `center`.
    fn for_each_in_disc(
        &mut self,
        center: Vec2,
        radius: f32,
        mut f: impl FnMut(&mut Rgba8, f32),
    ) {
        if radius <= 0.0 || !center.is_finite() || self.width == 0 || self.height == 0 {
            return;
        }
        let reach = radius + 1.0;
        let x0 = (center.x - reach).floor().max(0.0) as i64;
        let y0 = (center.y - reach).floor().max(0.0) as i64;
        let x1 = ((center.x + reach).ceil() as i64).min(self.width as i64 - 1);
        let y1 = ((center.y + reach).ceil() as i64).min(self.height as i64 - 1);
        if x0 > x1 || y0 > y1 {
            return;
        }
        for y in y0..=y1 {
            let row = y as usize * self.width as usize;
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let d = p.distance(center);
                if d < reach {
                    f(&mut self.pixels[row + x as usize], d);
                }
            }
        }
    }
}

impl Surface for PixelSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Option<Rgb>) {
        let fill = color.map_or(Rgba8::TRANSPARENT, Rgba8::opaque);
        self.pixels.fill(fill);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        self.for_each_in_disc(center, radius, |px, d| {
            // one pixel of linear falloff at the rim
            let coverage = (radius + 0.5 - d).clamp(0.0, 1.0);
            if coverage > 0.0 {
                *px = px.blend(color, alpha * coverage);
            }
        });
    }

    fn fill_glow(&mut self, center: Vec2, radius: f32, color: Rgb, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        self.for_each_in_disc(center, radius, |px, d| {
            let falloff = (1.0 - d / radius).clamp(0.0, 1.0);
            if falloff > 0.0 {
                *px = px.blend(color, alpha * falloff);
            }
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgb, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        let half = width * 0.5;
        if alpha <= 0.0 || half <= 0.0 || !from.is_finite() || !to.is_finite() {
            return;
        }
        if self.width == 0 || self.height == 0 {
            return;
        }
        let reach = half + 1.0;
        let lo = from.min(to) - Vec2::splat(reach);
        let hi = from.max(to) + Vec2::splat(reach);
        let x0 = lo.x.floor().max(0.0) as i64;
        let y0 = lo.y.floor().max(0.0) as i64;
        let x1 = (hi.x.ceil() as i64).min(self.width as i64 - 1);
        let y1 = (hi.y.ceil() as i64).min(self.height as i64 - 1);
        let seg = to - from;
        let len_sq = seg.length_squared();
        for y in y0..=y1 {
            let row = y as usize * self.width as usize;
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let t = if len_sq > 0.0 {
                    ((p - from).dot(seg) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let d = p.distance(from + seg * t);
                let coverage = (half + 0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    let px = &mut self.pixels[row + x as usize];
                    *px = px.blend(color, alpha * coverage);
                }
            }
        }
    }
}
