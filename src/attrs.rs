// Effect configuration from `data-*` attributes on the canvases.
//
// Kept free of web-sys so the parsing runs in host-side tests; the caller
// passes an attribute getter.

use fx_core::{AmbientConfig, AmbientMode, DissolveStyle, Rgb, TitleConfig};
use std::time::Duration;

pub const ATTR_MIN_DISPLAY_MS: &str = "data-min-display-ms";
pub const ATTR_FORMING_MS: &str = "data-forming-ms";
pub const ATTR_HOLDING_MS: &str = "data-holding-ms";
pub const ATTR_PRE_EXIT_MS: &str = "data-pre-exit-ms";
pub const ATTR_DISSOLVING_MS: &str = "data-dissolving-ms";
pub const ATTR_WORD: &str = "data-word";
pub const ATTR_SEED: &str = "data-seed";
pub const ATTR_DISSOLVE: &str = "data-dissolve";
pub const ATTR_MODE: &str = "data-mode";
pub const ATTR_PALETTE: &str = "data-palette";
pub const ATTR_BACKGROUND: &str = "data-background";
pub const ATTR_GLOW: &str = "data-glow";
pub const ATTR_GRAB_DISTANCE: &str = "data-grab-distance";

/// Whole milliseconds, e.g. `"1200"` or `"1200ms"`.
pub fn parse_ms(raw: &str) -> Option<Duration> {
    let s = raw.trim();
    let s = s.strip_suffix("ms").unwrap_or(s).trim();
    s.parse::<u64>().ok().map(Duration::from_millis)
}

pub fn parse_seed(raw: &str) -> Option<u64> {
    let s = raw.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

/// One `#rrggbb` or `#rgb` color.
pub fn parse_color(raw: &str) -> Option<Rgb> {
    Rgb::from_hex(raw)
        .map_err(|e| log::debug!("[config] {}", e))
        .ok()
}

/// Comma or whitespace separated colors. Any bad entry rejects the whole list.
pub fn parse_palette(raw: &str) -> Option<Vec<Rgb>> {
    let palette = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(parse_color)
        .collect::<Option<Vec<_>>>()?;
    (!palette.is_empty()).then_some(palette)
}

/// A color, or `"transparent"`/`"none"` for no fill.
pub fn parse_background(raw: &str) -> Option<Option<Rgb>> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "transparent" | "none" => Some(None),
        _ => parse_color(raw).map(Some),
    }
}

fn read<T>(
    get: &impl Fn(&str) -> Option<String>,
    name: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let raw = get(name)?;
    let parsed = parse(&raw);
    if parsed.is_none() {
        log::warn!("[config] ignoring {}={:?}", name, raw);
    }
    parsed
}

/// Title settings; unknown or malformed attributes keep their defaults.
pub fn title_config(get: impl Fn(&str) -> Option<String>) -> TitleConfig {
    let mut cfg = TitleConfig::default();
    if let Some(d) = read(&get, ATTR_FORMING_MS, parse_ms) {
        cfg.timings.forming = d;
    }
    if let Some(d) = read(&get, ATTR_HOLDING_MS, parse_ms) {
        cfg.timings.holding = d;
    }
    if let Some(d) = read(&get, ATTR_PRE_EXIT_MS, parse_ms) {
        // 0 turns the intensification step off
        cfg.timings.pre_exit = (!d.is_zero()).then_some(d);
    }
    if let Some(d) = read(&get, ATTR_DISSOLVING_MS, parse_ms) {
        cfg.timings.dissolving = d;
    }
    cfg.min_display = read(&get, ATTR_MIN_DISPLAY_MS, parse_ms);
    if let Some(word) = read(&get, ATTR_WORD, |s| {
        let w = s.trim();
        (!w.is_empty()).then(|| w.to_string())
    }) {
        cfg.word = word;
    }
    cfg.seed = read(&get, ATTR_SEED, parse_seed);
    if let Some(style) = read(&get, ATTR_DISSOLVE, DissolveStyle::parse) {
        cfg.dissolve = style;
    }
    if let Some(palette) = read(&get, ATTR_PALETTE, parse_palette) {
        cfg.palette = palette;
    }
    if let Some(bg) = read(&get, ATTR_BACKGROUND, parse_color) {
        cfg.background = bg;
    }
    if let Some(glow) = read(&get, ATTR_GLOW, parse_color) {
        cfg.glow = glow;
    }
    cfg
}

pub fn ambient_config(get: impl Fn(&str) -> Option<String>) -> AmbientConfig {
    let mut cfg = AmbientConfig::default();
    if let Some(mode) = read(&get, ATTR_MODE, AmbientMode::parse) {
        cfg.mode = mode;
    }
    cfg.seed = read(&get, ATTR_SEED, parse_seed);
    if let Some(palette) = read(&get, ATTR_PALETTE, parse_palette) {
        cfg.palette = palette;
    }
    if let Some(bg) = read(&get, ATTR_BACKGROUND, parse_background) {
        cfg.background = bg;
    }
    // the glow color doubles as the pointer link color here
    if let Some(link) = read(&get, ATTR_GLOW, parse_color) {
        cfg.link_color = link;
    }
    if let Some(d) = read(&get, ATTR_GRAB_DISTANCE, |s| {
        s.trim().parse::<f32>().ok().filter(|d| d.is_finite() && *d >= 0.0)
    }) {
        cfg.grab_distance = d;
    }
    cfg
}
