//! Loading-screen title: particles assemble into the word, hold, then disperse.

use std::time::Duration;

use glam::Vec2;

use crate::color::Rgb;
use crate::config::{DissolveStyle, TitleConfig};
use crate::constants::*;
use crate::error::ConfigError;
use crate::letters::{centroid, GlyphTable, Word};
use crate::particle::{ease_out_quart, smoothstep, Particle};
use crate::phase::{Phase, PhaseClock, Transition};
use crate::rng::FxRng;
use crate::runner::{Effect, Step};
use crate::surface::Surface;

// Frames longer than this many reference frames are integrated as if they were this long
const MAX_FRAME_STEPS: f32 = 4.0;

/// Title particle plus the bookkeeping the later phases need.
#[derive(Clone, Debug)]
pub struct TitleParticle {
    pub particle: Particle,
    /// Opacity drawn at spawn; pre-exit raises it toward 1 from here.
    pub base_opacity: f32,
    /// Opacity when dissolving began. Set once, along with the escape velocity.
    pub dissolve_from: Option<f32>,
    /// Drawn brightened this frame (pre-exit shimmer).
    pub bright: bool,
}

pub struct TitleAnimator {
    config: TitleConfig,
    word: Word,
    rng: FxRng,
    clock: PhaseClock,
    width: u32,
    height: u32,
    particles: Vec<TitleParticle>,
    centroid: Vec2,
    run_start: Duration,
    last_step: Option<Duration>,
    last_transition: Option<Transition>,
}

impl TitleAnimator {
    /// Build with the built-in glyphs. Fails on invalid configuration.
    pub fn new(
        config: TitleConfig,
        width: u32,
        height: u32,
        now: Duration,
    ) -> Result<Self, ConfigError> {
        Self::with_glyphs(config, &GlyphTable::builtin(), width, height, now)
    }

    pub fn with_glyphs(
        config: TitleConfig,
        glyphs: &GlyphTable,
        width: u32,
        height: u32,
        now: Duration,
    ) -> Result<Self, ConfigError> {
        let word = config.validate(glyphs)?;
        match config.timings.reconcile(config.min_display) {
            Some(m) if m.overruns() => log::warn!("[title] overlay stays up longer: {}", m),
            Some(m) => log::info!("[title] {}", m),
            None => {}
        }
        let rng = FxRng::new(config.seed);
        let mut animator = Self {
            clock: PhaseClock::new(config.timings, now),
            config,
            word,
            rng,
            width,
            height,
            particles: Vec::new(),
            centroid: Vec2::ZERO,
            run_start: now,
            last_step: None,
            last_transition: None,
        };
        animator.regenerate(now);
        Ok(animator)
    }

    fn regenerate(&mut self, now: Duration) {
        let (w, h) = (self.width as f32, self.height as f32);
        let targets = self.word.layout(w, h, self.config.particle_scale);
        self.centroid = centroid(&targets).unwrap_or(Vec2::new(w / 2.0, h / 2.0));
        let palette = &self.config.palette;
        let rng = &mut self.rng;
        self.particles = targets
            .into_iter()
            .map(|target| {
                let particle = Particle::spawn_title(target, w, h, palette, rng);
                TitleParticle {
                    base_opacity: particle.opacity,
                    particle,
                    dissolve_from: None,
                    bright: false,
                }
            })
            .collect();
        self.clock.restart(now);
        self.run_start = now;
        self.last_step = None;
        self.last_transition = None;
        log::info!(
            "[title] {} particles for {:?} on {}x{}",
            self.particles.len(),
            self.config.word,
            self.width,
            self.height
        );
    }

    pub fn phase(&self) -> Phase {
        self.clock.phase()
    }

    pub fn clock(&self) -> &PhaseClock {
        &self.clock
    }

    pub fn config(&self) -> &TitleConfig {
        &self.config
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> &[TitleParticle] {
        &self.particles
    }

    /// Mean of all letter targets; the pre-exit and burst effects push away from it.
    pub fn centroid(&self) -> Vec2 {
        self.centroid
    }

    /// The phase change made by the most recent `step`, if any.
    pub fn last_transition(&self) -> Option<Transition> {
        self.last_transition
    }

    /// Milliseconds since the run (re)started; drives the wave and glow oscillators.
    #[inline]
    fn wave_time(&self, now: Duration) -> f32 {
        now.saturating_sub(self.run_start).as_secs_f32() * 1000.0
    }

    fn frame_steps(&mut self, now: Duration) -> f32 {
        let steps = match self.last_step {
            Some(prev) => reference_frames(now.saturating_sub(prev).as_secs_f32() * 1000.0),
            None => 1.0,
        };
        self.last_step = Some(now);
        steps.min(MAX_FRAME_STEPS)
    }

    fn update_forming(&mut self, progress: f32, time: f32, k: f32) {
        let eased = ease_out_quart(progress);
        let approach = 1.0 - (1.0 - eased * FORMING_APPROACH_RATE).powf(k);
        for tp in &mut self.particles {
            let p = &mut tp.particle;
            p.pos += (p.target - p.pos) * approach;
            // wave fades as the particle closes in and as forming completes
            let strength =
                (p.distance_to_target() / FORMING_WAVE_FALLOFF_PX).min(1.0) * (1.0 - eased * 0.5);
            let wave = p.wave_offset(time, p.target.x);
            p.pos += wave * strength * FORMING_WAVE_GAIN * k;
        }
    }

    fn update_holding(&mut self, time: f32) {
        for tp in &mut self.particles {
            let p = &mut tp.particle;
            p.pos = p.target + p.wave_offset(time, p.target.x);
        }
    }

    fn update_pre_exit(&mut self, progress: f32, time: f32) {
        let t = smoothstep(progress);
        let spread = 1.0 + PRE_EXIT_SPREAD * t;
        let wave_gain = 1.0 + PRE_EXIT_WAVE_BOOST * t;
        let c = self.centroid;
        for tp in &mut self.particles {
            let p = &mut tp.particle;
            p.pos = c + (p.target - c) * spread + p.wave_offset(time, p.target.x) * wave_gain;
            p.opacity = tp.base_opacity + (1.0 - tp.base_opacity) * t;
            tp.bright = self.rng.chance(PRE_EXIT_BRIGHTEN_CHANCE * t);
        }
    }

    fn start_dissolve(&mut self) {
        let c = self.centroid;
        let style = self.config.dissolve;
        for tp in &mut self.particles {
            let p = &mut tp.particle;
            let angle = match style {
                DissolveStyle::Scatter => self.rng.angle(),
                DissolveStyle::Burst => {
                    let away = p.pos - c;
                    let base = if away.length_squared() > f32::EPSILON {
                        away.y.atan2(away.x)
                    } else {
                        self.rng.angle()
                    };
                    base + self.rng.span(-BURST_JITTER_RAD, 2.0 * BURST_JITTER_RAD)
                }
            };
            let speed = self.rng.span(DISSOLVE_SPEED_MIN, DISSOLVE_SPEED_SPAN);
            p.vel = Vec2::from_angle(angle) * speed;
            tp.dissolve_from = Some(p.opacity);
            tp.bright = false;
        }
    }

    fn update_dissolving(&mut self, progress: f32, time: f32, k: f32) {
        let friction = DISSOLVE_FRICTION.powf(k);
        let wave_decay = (1.0 - progress / DISSOLVE_WAVE_FADE).max(0.0);
        let shrink = DISSOLVE_SHRINK.powf(k);
        for tp in &mut self.particles {
            let p = &mut tp.particle;
            p.pos += p.vel * k;
            p.vel *= friction;
            p.vel.y += DISSOLVE_GRAVITY * k;
            let wave = p.wave_offset(time, p.pos.x);
            p.pos += wave * DISSOLVE_WAVE_GAIN * wave_decay * k;
            let from = tp.dissolve_from.unwrap_or(p.opacity);
            p.opacity = (from * (1.0 - progress)).min(p.opacity).max(0.0);
            p.size = (p.size * shrink).max(DISSOLVE_MIN_SIZE);
        }
    }

    fn glow_params(&self, time: f32, phase: Phase, pre_exit: f32) -> Option<(f32, f32)> {
        let boost = match phase {
            Phase::Holding => 0.0,
            Phase::PreExit => pre_exit,
            _ => return None,
        };
        let intensity = (GLOW_BASE_INTENSITY
            + (time / GLOW_PULSE_PERIOD_MS).sin() * GLOW_PULSE_INTENSITY)
            * (1.0 + GLOW_PRE_EXIT_INTENSITY_BOOST * boost);
        let radius_scale = GLOW_RADIUS_FACTOR
            * (1.0 + GLOW_RADIUS_PULSE * (time / GLOW_RADIUS_PERIOD_MS).sin())
            * (1.0 + GLOW_PRE_EXIT_RADIUS_BOOST * boost);
        Some((intensity, radius_scale))
    }
}

impl Effect for TitleAnimator {
    fn resize(&mut self, width: u32, height: u32, now: Duration) {
        self.width = width;
        self.height = height;
        self.regenerate(now);
    }

    fn step(&mut self, now: Duration) -> Step {
        if self.clock.phase() == Phase::Complete {
            return Step::Finished;
        }
        let k = self.frame_steps(now);
        self.last_transition = self.clock.advance(now);
        match self.last_transition.map(|t| t.to) {
            Some(Phase::Dissolving) => self.start_dissolve(),
            Some(Phase::Complete) => {
                for tp in &mut self.particles {
                    tp.particle.opacity = 0.0;
                }
                log::info!("[title] complete");
                return Step::Finished;
            }
            _ => {}
        }
        let time = self.wave_time(now);
        let progress = self.clock.progress(now);
        match self.clock.phase() {
            Phase::Forming => self.update_forming(progress, time, k),
            Phase::Holding => self.update_holding(time),
            Phase::PreExit => self.update_pre_exit(progress, time),
            Phase::Dissolving => self.update_dissolving(progress, time, k),
            Phase::Complete => return Step::Finished,
        }
        Step::Running
    }

    fn draw(&self, surface: &mut dyn Surface, now: Duration) {
        surface.clear(Some(self.config.background));
        let phase = self.clock.phase();
        let time = self.wave_time(now);
        let pre_exit = if phase == Phase::PreExit {
            smoothstep(self.clock.progress(now))
        } else {
            0.0
        };
        if let Some((intensity, radius_scale)) = self.glow_params(time, phase, pre_exit) {
            for tp in &self.particles {
                let p = &tp.particle;
                surface.fill_glow(p.pos, p.size * radius_scale, self.config.glow, intensity);
            }
        }
        for tp in &self.particles {
            let p = &tp.particle;
            if p.opacity <= 0.0 {
                continue;
            }
            let color = if tp.bright {
                p.color.mix(Rgb::WHITE, PRE_EXIT_BRIGHTEN_MIX)
            } else {
                p.color
            };
            surface.fill_circle(p.pos, p.size, color, p.opacity);
        }
    }
}
