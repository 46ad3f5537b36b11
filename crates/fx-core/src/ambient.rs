//! Endless background starfield behind the page content.

use std::time::Duration;

use glam::Vec2;

use crate::config::{AmbientConfig, AmbientMode};
use crate::constants::*;
use crate::error::ConfigError;
use crate::particle::Particle;
use crate::rng::FxRng;
use crate::runner::{Effect, Step};
use crate::surface::Surface;

const MAX_FRAME_STEPS: f32 = 4.0;

/// Value bouncing linearly between two bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oscillator {
    pub value: f32,
    pub min: f32,
    pub max: f32,
    /// Units per second; the sign is the current direction.
    pub rate: f32,
}

impl Oscillator {
    fn random(min: f32, max: f32, speed: f32, rng: &mut FxRng) -> Self {
        let rate = speed * rng.span(0.5, 0.5);
        Self {
            value: rng.span(min, max - min),
            min,
            max,
            rate: if rng.chance(0.5) { rate } else { -rate },
        }
    }

    pub fn advance(&mut self, dt_sec: f32) {
        self.value += self.rate * dt_sec;
        if self.value > self.max {
            self.value = self.max - (self.value - self.max).min(self.max - self.min);
            self.rate = -self.rate.abs();
        } else if self.value < self.min {
            self.value = self.min + (self.min - self.value).min(self.max - self.min);
            self.rate = self.rate.abs();
        }
    }
}

#[derive(Clone, Debug)]
pub struct AmbientParticle {
    pub particle: Particle,
    pub opacity: Oscillator,
    pub size: Oscillator,
    /// Nearness in (0, 1]; scales drawn opacity, radius and speed.
    pub depth: f32,
}

/// Density-scaled particle field with no phase machine; runs until torn down.
pub struct AmbientField {
    config: AmbientConfig,
    rng: FxRng,
    width: u32,
    height: u32,
    particles: Vec<AmbientParticle>,
    run_start: Duration,
    last_step: Option<Duration>,
    pointer: Option<Vec2>,
}

impl AmbientField {
    pub fn new(
        config: AmbientConfig,
        width: u32,
        height: u32,
        now: Duration,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = FxRng::new(config.seed);
        let mut field = Self {
            config,
            rng,
            width,
            height,
            particles: Vec::new(),
            run_start: now,
            last_step: None,
            pointer: None,
        };
        field.regenerate(now);
        Ok(field)
    }

    fn regenerate(&mut self, now: Duration) {
        let count = self.config.particle_count(self.width, self.height);
        let (w, h) = (self.width as f32, self.height as f32);
        let mode = self.config.mode;
        let palette = &self.config.palette;
        let rng = &mut self.rng;
        self.particles = (0..count)
            .map(|_| {
                let pos = Vec2::new(rng.below(w), rng.below(h));
                let depth = 1.0 - rng.below(AMBIENT_DEPTH_LAYERS) / AMBIENT_DEPTH_LAYERS;
                let speed = AMBIENT_SPEED * rng.span(0.5, 1.0) * depth;
                let vel = match mode {
                    AmbientMode::Drift => Vec2::new(speed, 0.0),
                    AmbientMode::Wander => Vec2::from_angle(rng.angle()) * speed,
                };
                let opacity = Oscillator::random(
                    AMBIENT_OPACITY_MIN,
                    AMBIENT_OPACITY_MAX,
                    AMBIENT_OPACITY_SPEED,
                    rng,
                );
                let size =
                    Oscillator::random(AMBIENT_SIZE_MIN, AMBIENT_SIZE_MAX, AMBIENT_SIZE_SPEED, rng);
                AmbientParticle {
                    particle: Particle {
                        pos,
                        target: pos,
                        vel,
                        size: size.value * depth,
                        opacity: opacity.value * depth,
                        color: rng.pick(palette),
                        phase: rng.angle(),
                        wave_amplitude: rng
                            .span(AMBIENT_DRIFT_AMPLITUDE_MIN, AMBIENT_DRIFT_AMPLITUDE_SPAN),
                        wave_speed: rng.span(WAVE_SPEED_MIN, WAVE_SPEED_SPAN),
                    },
                    opacity,
                    size,
                    depth,
                }
            })
            .collect();
        self.run_start = now;
        self.last_step = None;
        log::info!(
            "[ambient] {} particles ({:?}) on {}x{}",
            self.particles.len(),
            mode,
            self.width,
            self.height
        );
    }

    pub fn mode(&self) -> AmbientMode {
        self.config.mode
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> &[AmbientParticle] {
        &self.particles
    }

    /// Pointer position in surface pixels, or `None` once it leaves.
    pub fn set_pointer(&mut self, pointer: Option<Vec2>) {
        self.pointer = pointer.filter(|p| p.is_finite());
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Particles linked to the pointer, with the link opacity for each.
    ///
    /// Opacity falls linearly from `GRAB_LINK_OPACITY` at the pointer to
    /// zero at the grab distance. Empty without a pointer.
    pub fn grab_links(&self) -> impl Iterator<Item = (Vec2, f32)> + '_ {
        let reach = self.config.grab_distance;
        self.pointer.into_iter().flat_map(move |from| {
            self.particles.iter().filter_map(move |ap| {
                let to = ap.particle.pos;
                let d = from.distance(to);
                let alpha = GRAB_LINK_OPACITY * (1.0 - d / reach);
                (d < reach && alpha > 0.0).then_some((to, alpha))
            })
        })
    }
}

/// Wrap `v` into [0, `max`); 0 on an empty axis.
#[inline]
pub fn wrap(v: f32, max: f32) -> f32 {
    if max <= 0.0 {
        return 0.0;
    }
    let r = v.rem_euclid(max);
    if r >= max {
        0.0
    } else {
        r
    }
}

impl Effect for AmbientField {
    fn resize(&mut self, width: u32, height: u32, now: Duration) {
        self.width = width;
        self.height = height;
        self.regenerate(now);
    }

    fn step(&mut self, now: Duration) -> Step {
        let dt_ms = match self.last_step {
            Some(prev) => now.saturating_sub(prev).as_secs_f32() * 1000.0,
            None => REFERENCE_FRAME_MS,
        };
        self.last_step = Some(now);
        let k = reference_frames(dt_ms).min(MAX_FRAME_STEPS);
        let dt_sec = k * REFERENCE_FRAME_MS / 1000.0;
        let time_sec = now.saturating_sub(self.run_start).as_secs_f32();
        let (w, h) = (self.width as f32, self.height as f32);
        let mode = self.config.mode;
        for ap in &mut self.particles {
            let p = &mut ap.particle;
            match mode {
                AmbientMode::Drift => {
                    p.pos.x = wrap(p.pos.x + p.vel.x * k, w);
                    let sway = (time_sec * p.wave_speed + p.phase).sin() * p.wave_amplitude;
                    p.pos.y = wrap(p.target.y + sway, h);
                }
                AmbientMode::Wander => {
                    let turn = self.rng.span(-AMBIENT_STEER, 2.0 * AMBIENT_STEER) * k;
                    p.vel = Vec2::from_angle(turn).rotate(p.vel);
                    p.pos = Vec2::new(
                        wrap(p.pos.x + p.vel.x * k, w),
                        wrap(p.pos.y + p.vel.y * k, h),
                    );
                }
            }
            ap.opacity.advance(dt_sec);
            ap.size.advance(dt_sec);
            p.opacity = ap.opacity.value * ap.depth;
            p.size = ap.size.value * ap.depth;
        }
        Step::Running
    }

    fn draw(&self, surface: &mut dyn Surface, _now: Duration) {
        surface.clear(self.config.background);
        if let Some(from) = self.pointer {
            for (to, alpha) in self.grab_links() {
                surface.stroke_line(from, to, GRAB_LINK_WIDTH, self.config.link_color, alpha);
            }
        }
        for ap in &self.particles {
            let p = &ap.particle;
            surface.fill_circle(p.pos, p.size, p.color, p.opacity);
        }
    }
}
