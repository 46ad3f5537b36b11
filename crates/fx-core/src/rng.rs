use rand::prelude::*;
use std::f32::consts::TAU;

use crate::color::Rgb;

/// Seedable random source shared by every effect.
///
/// Hosts construct it from entropy; tests pass a fixed seed so particle
/// placement and colors are reproducible.
#[derive(Clone, Debug)]
pub struct FxRng {
    inner: StdRng,
}

impl FxRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
        }
    }

    /// Seeded when `seed` is given, entropy otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }

    /// Uniform in [0, 1).
    #[inline]
    pub fn unit(&mut self) -> f32 {
        self.inner.gen::<f32>()
    }

    /// `min + U * span`, the form every particle attribute is drawn in.
    #[inline]
    pub fn span(&mut self, min: f32, span: f32) -> f32 {
        min + self.unit() * span
    }

    /// Uniform in [0, `max`); 0 when `max` is not positive.
    #[inline]
    pub fn below(&mut self, max: f32) -> f32 {
        if max <= 0.0 {
            return 0.0;
        }
        // unit() < 1, but the product can still round up to max
        let v = self.unit() * max;
        if v < max {
            v
        } else {
            0.0
        }
    }

    #[inline]
    pub fn angle(&mut self) -> f32 {
        self.unit() * TAU
    }

    #[inline]
    pub fn chance(&mut self, p: f32) -> bool {
        self.unit() < p
    }

    pub fn pick(&mut self, palette: &[Rgb]) -> Rgb {
        palette.choose(&mut self.inner).copied().unwrap_or(Rgb::WHITE)
    }
}

