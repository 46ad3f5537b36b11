use thiserror::Error;

/// Rejected effect configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("no glyph for character {0:?}")]
    UnknownGlyph(char),
    #[error("title word is empty")]
    EmptyWord,
    #[error("{0} duration must be greater than zero")]
    ZeroDuration(&'static str),
    #[error("particle scale must be finite and positive, got {0}")]
    InvalidScale(f32),
    #[error("invalid color {0:?}, expected #rrggbb or #rgb")]
    InvalidColor(String),
    #[error("palette is empty")]
    EmptyPalette,
}
