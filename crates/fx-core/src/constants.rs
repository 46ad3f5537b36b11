use crate::color::Rgb;

// Shared tuning constants used by both web and native frontends.

// Reference frame used to express per-frame factors independent of refresh rate
pub const REFERENCE_FRAME_MS: f32 = 1000.0 / 60.0;

// Title phase durations (milliseconds)
pub const FORMING_MS: u64 = 1200;
pub const HOLDING_MS: u64 = 2800;
pub const PRE_EXIT_MS: u64 = 800;
pub const DISSOLVING_MS: u64 = 1200;

// Title layout: targets are laid out on a grid sized against a 400x300 design surface
pub const DESIGN_WIDTH: f32 = 400.0;
pub const DESIGN_HEIGHT: f32 = 300.0;
pub const DEFAULT_PARTICLE_SCALE: f32 = 8.0; // grid cell size at the design surface
pub const LETTER_SPACING_CELLS: usize = 2; // blank columns between letters

// Title particle appearance
pub const TITLE_SIZE_MIN: f32 = 3.0;
pub const TITLE_SIZE_SPAN: f32 = 2.0;
pub const TITLE_OPACITY_MIN: f32 = 0.3;
pub const TITLE_OPACITY_SPAN: f32 = 0.7;
pub const WAVE_AMPLITUDE_MIN: f32 = 2.0;
pub const WAVE_AMPLITUDE_SPAN: f32 = 4.0;
pub const WAVE_SPEED_MIN: f32 = 0.8;
pub const WAVE_SPEED_SPAN: f32 = 0.4;
pub const WAVE_SPATIAL_FREQ: f32 = 0.008; // phase shift per pixel of base x
pub const WAVE_Y_TIME_RATIO: f32 = 0.7;
pub const WAVE_Y_AMPLITUDE_RATIO: f32 = 0.6;

// Forming
pub const FORMING_APPROACH_RATE: f32 = 0.08; // fraction of remaining distance per reference frame
pub const FORMING_WAVE_FALLOFF_PX: f32 = 100.0; // distance at which the wave reaches full strength
pub const FORMING_WAVE_GAIN: f32 = 1.5;

// Pre-exit intensification
pub const PRE_EXIT_SPREAD: f32 = 0.06; // outward scale from centroid at full progress
pub const PRE_EXIT_WAVE_BOOST: f32 = 1.5;
pub const PRE_EXIT_BRIGHTEN_CHANCE: f32 = 0.6;
pub const PRE_EXIT_BRIGHTEN_MIX: f32 = 0.65; // blend toward white for brightened particles

// Dissolving
pub const DISSOLVE_SPEED_MIN: f32 = 2.0; // px per reference frame
pub const DISSOLVE_SPEED_SPAN: f32 = 4.0;
pub const DISSOLVE_FRICTION: f32 = 0.98;
pub const DISSOLVE_GRAVITY: f32 = 0.03; // px per reference frame squared, +y
pub const DISSOLVE_WAVE_GAIN: f32 = 0.3;
pub const DISSOLVE_WAVE_FADE: f32 = 0.8; // wave gone after this fraction of the phase
pub const DISSOLVE_SHRINK: f32 = 0.995;
pub const DISSOLVE_MIN_SIZE: f32 = 0.2;
pub const BURST_JITTER_RAD: f32 = 0.6;

// Glow under formed letters
pub const GLOW_BASE_INTENSITY: f32 = 0.1;
pub const GLOW_PULSE_INTENSITY: f32 = 0.05;
pub const GLOW_PULSE_PERIOD_MS: f32 = 500.0; // divisor of time inside sin()
pub const GLOW_RADIUS_FACTOR: f32 = 3.0;
pub const GLOW_RADIUS_PULSE: f32 = 0.1;
pub const GLOW_RADIUS_PERIOD_MS: f32 = 700.0;
pub const GLOW_PRE_EXIT_INTENSITY_BOOST: f32 = 2.0;
pub const GLOW_PRE_EXIT_RADIUS_BOOST: f32 = 0.6;

// Ambient field (density is defined per 1920x1080 area)
pub const AMBIENT_BASE_COUNT: f32 = 100.0;
pub const AMBIENT_DENSITY_AREA: f32 = 1920.0 * 1080.0;
pub const AMBIENT_SPEED: f32 = 0.3; // px per reference frame
pub const AMBIENT_STEER: f32 = 0.02; // random steering per reference frame
pub const AMBIENT_OPACITY_MIN: f32 = 0.1;
pub const AMBIENT_OPACITY_MAX: f32 = 0.8;
pub const AMBIENT_OPACITY_SPEED: f32 = 0.5; // opacity units per second
pub const AMBIENT_SIZE_MIN: f32 = 0.3;
pub const AMBIENT_SIZE_MAX: f32 = 2.5;
pub const AMBIENT_SIZE_SPEED: f32 = 1.0; // radius px per second
pub const AMBIENT_DRIFT_AMPLITUDE_MIN: f32 = 4.0;
pub const AMBIENT_DRIFT_AMPLITUDE_SPAN: f32 = 12.0;
pub const AMBIENT_DEPTH_LAYERS: f32 = 100.0; // far particles are fainter, smaller and slower

// Pointer grab links on the ambient field
pub const GRAB_DISTANCE: f32 = 120.0; // px; no link beyond this
pub const GRAB_LINK_OPACITY: f32 = 0.2; // at zero distance, fading linearly to 0
pub const GRAB_LINK_WIDTH: f32 = 1.0;

// Palettes
pub const BACKGROUND: Rgb = Rgb::new(0x0a, 0x0a, 0x0f);
pub const GLOW_COLOR: Rgb = Rgb::new(99, 102, 241);
pub const GRAB_LINK_COLOR: Rgb = Rgb::new(0x63, 0x66, 0xf1);
pub const TITLE_PALETTE: [Rgb; 5] = [
    Rgb::new(0xff, 0xff, 0xff),
    Rgb::new(0xa5, 0xb4, 0xfc),
    Rgb::new(0x81, 0x8c, 0xf8),
    Rgb::new(0x63, 0x66, 0xf1),
    Rgb::new(0xc7, 0xd2, 0xfe),
];
pub const AMBIENT_PALETTE: [Rgb; 4] = [
    Rgb::new(0xff, 0xff, 0xff),
    Rgb::new(0xa5, 0xb4, 0xfc),
    Rgb::new(0x81, 0x8c, 0xf8),
    Rgb::new(0x63, 0x66, 0xf1),
];

/// Number of reference frames covered by `dt_ms`.
#[inline]
pub fn reference_frames(dt_ms: f32) -> f32 {
    (dt_ms / REFERENCE_FRAME_MS).max(0.0)
}
