use bytemuck::{Pod, Zeroable};

use crate::error::ConfigError;

/// Opaque 8-bit sRGB color. Alpha is carried separately by the drawing calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb` (leading `#` optional).
    pub fn from_hex(s: &str) -> Result<Self, ConfigError> {
        let hex = s.trim().trim_start_matches('#');
        let bad = || ConfigError::InvalidColor(s.to_string());
        let digit = |c: u8| -> Option<u8> { (c as char).to_digit(16).map(|d| d as u8) };
        let bytes = hex.as_bytes();
        match bytes.len() {
            6 => {
                let mut out = [0u8; 3];
                for (i, pair) in bytes.chunks(2).enumerate() {
                    out[i] = digit(pair[0]).ok_or_else(bad)? * 16 + digit(pair[1]).ok_or_else(bad)?;
                }
                Ok(Self::new(out[0], out[1], out[2]))
            }
            3 => {
                let mut out = [0u8; 3];
                for (i, c) in bytes.iter().enumerate() {
                    let d = digit(*c).ok_or_else(bad)?;
                    out[i] = d * 17;
                }
                Ok(Self::new(out[0], out[1], out[2]))
            }
            _ => Err(bad()),
        }
    }

    /// Linear blend toward `other`; `t` is clamped to [0, 1].
    pub fn mix(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb::new(lerp(self.r, other.r), lerp(self.g, other.g), lerp(self.b, other.b))
    }

    pub fn to_css(self, alpha: f32) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            self.r,
            self.g,
            self.b,
            alpha.clamp(0.0, 1.0)
        )
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// One RGBA8 pixel as stored by [`crate::surface::PixelSurface`].
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Rgba8 = Rgba8 { r: 0, g: 0, b: 0, a: 0 };

    pub const fn opaque(c: Rgb) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: 255,
        }
    }

    /// Source-over composite of `src` at coverage `alpha` onto `self`.
    pub fn blend(self, src: Rgb, alpha: f32) -> Rgba8 {
        let sa = alpha.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return self;
        }
        let da = self.a as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return Rgba8::TRANSPARENT;
        }
        let ch = |s: u8, d: u8| {
            let v = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgba8 {
            r: ch(src.r, self.r),
            g: ch(src.g, self.g),
            b: ch(src.b, self.b),
            a: (out_a * 255.0).round() as u8,
        }
    }
}
