//! Pixel-art glyphs for the intro title and their layout as particle targets.
//!
//! Each glyph is a 7x9 on/off grid. A word is laid out left to right with
//! [`LETTER_SPACING_CELLS`] blank columns between letters, scaled to the
//! surface and centered on it. One particle is spawned per "on" cell.

use fnv::FnvHashMap;
use glam::Vec2;
use smallvec::SmallVec;

use crate::constants::{DESIGN_HEIGHT, DESIGN_WIDTH, LETTER_SPACING_CELLS};
use crate::error::ConfigError;

pub const GLYPH_WIDTH: usize = 7;
pub const GLYPH_HEIGHT: usize = 9;

/// Immutable on/off cell grid for one letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub rows: [[u8; GLYPH_WIDTH]; GLYPH_HEIGHT],
}

impl Glyph {
    /// Number of lit cells, i.e. particles this glyph contributes.
    pub fn on_cells(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.iter().filter(|&&c| c != 0).count())
            .sum()
    }

    /// Iterate lit cells as `(row, col)`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cols)| {
            cols.iter()
                .enumerate()
                .filter(|&(_, &c)| c != 0)
                .map(move |(col, _)| (row, col))
        })
    }
}

pub const GLYPH_D: Glyph = Glyph {
    rows: [
        [1, 1, 1, 1, 1, 0, 0],
        [1, 0, 0, 0, 1, 1, 0],
        [1, 0, 0, 0, 0, 1, 0],
        [1, 0, 0, 0, 0, 1, 1],
        [1, 0, 0, 0, 0, 0, 1],
        [1, 0, 0, 0, 0, 1, 1],
        [1, 0, 0, 0, 0, 1, 0],
        [1, 0, 0, 0, 1, 1, 0],
        [1, 1, 1, 1, 1, 0, 0],
    ],
};

pub const GLYPH_S: Glyph = Glyph {
    rows: [
        [0, 1, 1, 1, 1, 1, 0],
        [1, 1, 0, 0, 0, 1, 1],
        [1, 1, 0, 0, 0, 0, 0],
        [1, 1, 0, 0, 0, 0, 0],
        [0, 1, 1, 1, 1, 1, 0],
        [0, 0, 0, 0, 0, 1, 1],
        [0, 0, 0, 0, 0, 1, 1],
        [1, 1, 0, 0, 0, 1, 1],
        [0, 1, 1, 1, 1, 1, 0],
    ],
};

pub const GLYPH_B: Glyph = Glyph {
    rows: [
        [1, 1, 1, 1, 1, 0, 0],
        [1, 0, 0, 0, 1, 1, 0],
        [1, 0, 0, 0, 0, 1, 0],
        [1, 0, 0, 0, 1, 1, 0],
        [1, 1, 1, 1, 1, 0, 0],
        [1, 0, 0, 0, 1, 1, 0],
        [1, 0, 0, 0, 0, 1, 0],
        [1, 0, 0, 0, 1, 1, 0],
        [1, 1, 1, 1, 1, 0, 0],
    ],
};

/// Word spelled by the intro unless configured otherwise.
pub const DEFAULT_WORD: &str = "DSB";

/// Lookup from character to glyph. Matching is case-insensitive.
#[derive(Clone, Debug)]
pub struct GlyphTable {
    glyphs: FnvHashMap<char, Glyph>,
}

impl Default for GlyphTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl GlyphTable {
    /// The letters shipped with the site.
    pub fn builtin() -> Self {
        let mut glyphs = FnvHashMap::default();
        glyphs.insert('D', GLYPH_D);
        glyphs.insert('S', GLYPH_S);
        glyphs.insert('B', GLYPH_B);
        Self { glyphs }
    }

    pub fn insert(&mut self, ch: char, glyph: Glyph) {
        self.glyphs.insert(ch.to_ascii_uppercase(), glyph);
    }

    pub fn get(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch.to_ascii_uppercase())
    }

    /// Resolve every character of `word`.
    pub fn spell(&self, word: &str) -> Result<Word, ConfigError> {
        let mut glyphs = SmallVec::new();
        for ch in word.chars() {
            let g = self.get(ch).ok_or(ConfigError::UnknownGlyph(ch))?;
            glyphs.push(*g);
        }
        if glyphs.is_empty() {
            return Err(ConfigError::EmptyWord);
        }
        Ok(Word { glyphs })
    }
}

/// A resolved sequence of glyphs ready to be laid out.
#[derive(Clone, Debug, PartialEq)]
pub struct Word {
    glyphs: SmallVec<[Glyph; 8]>,
}

impl Word {
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Total particles needed to draw the word.
    pub fn on_cells(&self) -> usize {
        self.glyphs.iter().map(Glyph::on_cells).sum()
    }

    /// Width of the laid-out word in grid cells.
    pub fn width_cells(&self) -> usize {
        let n = self.glyphs.len();
        n * GLYPH_WIDTH + n.saturating_sub(1) * LETTER_SPACING_CELLS
    }

    /// Target positions for a `width` x `height` surface, in glyph order.
    ///
    /// Cell size is `min(width / 400, height / 300) * particle_scale`; the
    /// grid is centered on the surface.
    pub fn layout(&self, width: f32, height: f32, particle_scale: f32) -> Vec<Vec2> {
        let scale = cell_size(width, height, particle_scale);
        let start = Vec2::new(
            (width - self.width_cells() as f32 * scale) / 2.0,
            (height - GLYPH_HEIGHT as f32 * scale) / 2.0,
        );
        let mut targets = Vec::with_capacity(self.on_cells());
        for (i, glyph) in self.glyphs.iter().enumerate() {
            let offset_x = (i * (GLYPH_WIDTH + LETTER_SPACING_CELLS)) as f32 * scale;
            for (row, col) in glyph.cells() {
                targets.push(Vec2::new(
                    start.x + offset_x + col as f32 * scale,
                    start.y + row as f32 * scale,
                ));
            }
        }
        targets
    }
}

/// Grid cell size in pixels for a surface of the given size.
#[inline]
pub fn cell_size(width: f32, height: f32, particle_scale: f32) -> f32 {
    (width / DESIGN_WIDTH).min(height / DESIGN_HEIGHT) * particle_scale
}

/// Mean of a set of points, or `None` when empty.
pub fn centroid(points: &[Vec2]) -> Option<Vec2> {
    if points.is_empty() {
        return None;
    }
    let sum: Vec2 = points.iter().copied().sum();
    Some(sum / points.len() as f32)
}
