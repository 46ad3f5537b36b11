use glam::Vec2;

use crate::color::Rgb;
use crate::constants::*;
use crate::rng::FxRng;

/// One animated dot.
///
/// `target` is the letter cell a title particle settles on; ambient
/// particles use it as their anchor (drift base line).
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub target: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub opacity: f32,
    pub color: Rgb,
    pub phase: f32,
    pub wave_amplitude: f32,
    pub wave_speed: f32,
}

impl Particle {
    /// Title particle aimed at `target`, starting anywhere on the surface.
    pub fn spawn_title(
        target: Vec2,
        width: f32,
        height: f32,
        palette: &[Rgb],
        rng: &mut FxRng,
    ) -> Self {
        Self {
            pos: Vec2::new(rng.below(width), rng.below(height)),
            target,
            vel: Vec2::ZERO,
            size: rng.span(TITLE_SIZE_MIN, TITLE_SIZE_SPAN),
            opacity: rng.span(TITLE_OPACITY_MIN, TITLE_OPACITY_SPAN),
            color: rng.pick(palette),
            phase: rng.angle(),
            wave_amplitude: rng.span(WAVE_AMPLITUDE_MIN, WAVE_AMPLITUDE_SPAN),
            wave_speed: rng.span(WAVE_SPEED_MIN, WAVE_SPEED_SPAN),
        }
    }

    /// Organic oscillation around a base point.
    ///
    /// `base_x` shifts the phase so neighbouring columns move slightly out of
    /// step, which reads as a wave travelling across the letters.
    #[inline]
    pub fn wave_offset(&self, time_ms: f32, base_x: f32) -> Vec2 {
        let t = time_ms * 0.001 * self.wave_speed;
        let spatial = base_x * WAVE_SPATIAL_FREQ;
        Vec2::new(
            (t + self.phase + spatial).sin() * self.wave_amplitude,
            (t * WAVE_Y_TIME_RATIO + self.phase).cos()
                * self.wave_amplitude
                * WAVE_Y_AMPLITUDE_RATIO,
        )
    }

    #[inline]
    pub fn distance_to_target(&self) -> f32 {
        self.pos.distance(self.target)
    }
}

/// Quartic ease-out: fast start, gentle settle.
#[inline]
pub fn ease_out_quart(t: f32) -> f32 {
    1.0 - (1.0 - t.clamp(0.0, 1.0)).powi(4)
}

/// Hermite smoothstep on [0, 1].
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
