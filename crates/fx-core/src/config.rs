//! Runtime configuration for the title and ambient effects.
//!
//! Defaults reproduce the site as shipped. Hosts override individual
//! fields (the web front-end reads `data-*` attributes, the native preview
//! reads CLI flags) and call `validate` before building an effect.

use std::fmt;
use std::time::Duration;

use crate::color::Rgb;
use crate::constants::*;
use crate::error::ConfigError;
use crate::letters::{GlyphTable, Word, DEFAULT_WORD};

/// Per-phase durations of the title animation. These are authoritative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TitleTimings {
    pub forming: Duration,
    pub holding: Duration,
    /// `None` skips the intensification step entirely.
    pub pre_exit: Option<Duration>,
    pub dissolving: Duration,
}

impl Default for TitleTimings {
    fn default() -> Self {
        Self {
            forming: Duration::from_millis(FORMING_MS),
            holding: Duration::from_millis(HOLDING_MS),
            pre_exit: Some(Duration::from_millis(PRE_EXIT_MS)),
            dissolving: Duration::from_millis(DISSOLVING_MS),
        }
    }
}

impl TitleTimings {
    /// Time from start of forming until completion fires.
    pub fn total(&self) -> Duration {
        self.forming + self.holding + self.pre_exit.unwrap_or_default() + self.dissolving
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.forming.is_zero() {
            return Err(ConfigError::ZeroDuration("forming"));
        }
        if self.holding.is_zero() {
            return Err(ConfigError::ZeroDuration("holding"));
        }
        if self.pre_exit.is_some_and(|d| d.is_zero()) {
            return Err(ConfigError::ZeroDuration("pre-exit"));
        }
        if self.dissolving.is_zero() {
            return Err(ConfigError::ZeroDuration("dissolving"));
        }
        Ok(())
    }

    /// Compare the phase budget with the host's advisory minimum display time.
    ///
    /// Returns `None` when they agree. Phases are never shortened or
    /// stretched to match; the caller decides whether to log the mismatch.
    pub fn reconcile(&self, min_display: Option<Duration>) -> Option<TimingMismatch> {
        let requested = min_display?;
        let scheduled = self.total();
        (requested != scheduled).then_some(TimingMismatch {
            requested,
            scheduled,
        })
    }
}

/// Disagreement between the advisory minimum display time and the phase budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimingMismatch {
    pub requested: Duration,
    pub scheduled: Duration,
}

impl TimingMismatch {
    /// The intro stays up longer than the host asked for.
    pub fn overruns(&self) -> bool {
        self.scheduled > self.requested
    }
}

impl fmt::Display for TimingMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "minimum display time is {}ms but phases take {}ms; keeping phase durations",
            self.requested.as_millis(),
            self.scheduled.as_millis()
        )
    }
}

/// How particles pick their escape direction when the title dissolves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DissolveStyle {
    /// Uniformly random direction.
    #[default]
    Scatter,
    /// Away from the word's centroid, with a little jitter.
    Burst,
}

impl DissolveStyle {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scatter" | "random" => Some(Self::Scatter),
            "burst" | "outward" => Some(Self::Burst),
            _ => None,
        }
    }
}

/// Settings for the loading-screen title effect.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleConfig {
    pub word: String,
    pub timings: TitleTimings,
    /// Advisory only; see [`TitleTimings::reconcile`].
    pub min_display: Option<Duration>,
    /// Grid cell size in pixels at the 400x300 design surface.
    pub particle_scale: f32,
    pub palette: Vec<Rgb>,
    pub background: Rgb,
    pub glow: Rgb,
    pub dissolve: DissolveStyle,
    /// Fixed seed for reproducible runs; entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            word: DEFAULT_WORD.to_string(),
            timings: TitleTimings::default(),
            min_display: None,
            particle_scale: DEFAULT_PARTICLE_SCALE,
            palette: TITLE_PALETTE.to_vec(),
            background: BACKGROUND,
            glow: GLOW_COLOR,
            dissolve: DissolveStyle::default(),
            seed: None,
        }
    }
}

impl TitleConfig {
    /// Check every field and resolve the word against `glyphs`.
    pub fn validate(&self, glyphs: &GlyphTable) -> Result<Word, ConfigError> {
        self.timings.validate()?;
        if !self.particle_scale.is_finite() || self.particle_scale <= 0.0 {
            return Err(ConfigError::InvalidScale(self.particle_scale));
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        glyphs.spell(&self.word)
    }
}

/// Motion pattern of the background field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AmbientMode {
    /// Horizontal drift with a sinusoidal vertical sway.
    Drift,
    /// Slow random wandering that wraps at the surface edges.
    #[default]
    Wander,
}

impl AmbientMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drift" | "wave" => Some(Self::Drift),
            "wander" | "scatter" => Some(Self::Wander),
            _ => None,
        }
    }
}

/// Settings for the endless background field.
#[derive(Clone, Debug, PartialEq)]
pub struct AmbientConfig {
    pub mode: AmbientMode,
    /// Particles per 1920x1080 worth of surface.
    pub density: f32,
    pub palette: Vec<Rgb>,
    /// Cleared to before each frame; `None` leaves the surface transparent.
    pub background: Option<Rgb>,
    /// Pointer links reach particles closer than this; 0 disables them.
    pub grab_distance: f32,
    pub link_color: Rgb,
    pub seed: Option<u64>,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            mode: AmbientMode::default(),
            density: AMBIENT_BASE_COUNT,
            palette: AMBIENT_PALETTE.to_vec(),
            background: None,
            grab_distance: GRAB_DISTANCE,
            link_color: GRAB_LINK_COLOR,
            seed: None,
        }
    }
}

impl AmbientConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.density.is_finite() || self.density < 0.0 {
            return Err(ConfigError::InvalidScale(self.density));
        }
        if !self.grab_distance.is_finite() || self.grab_distance < 0.0 {
            return Err(ConfigError::InvalidScale(self.grab_distance));
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(())
    }

    /// Particle count for a `width` x `height` surface.
    pub fn particle_count(&self, width: u32, height: u32) -> usize {
        let area = width as f32 * height as f32;
        (self.density * area / AMBIENT_DENSITY_AREA).round().max(0.0) as usize
    }
}
