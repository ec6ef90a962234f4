//! Per-glyph horizontal metrics

use serde::{Deserialize, Serialize};

use crate::source::GlyphSource;

/// Width and advance of one exported glyph, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GlyphMetrics {
    /// Ink width measured from the pen position
    pub width: u32,
    /// Horizontal advance
    pub advance: u32,
}

impl GlyphMetrics {
    pub const ZERO: GlyphMetrics = GlyphMetrics { width: 0, advance: 0 };

    /// Measure `symbol`.
    ///
    /// Width and advance are queried separately and may disagree in either
    /// direction; side bearings are kept as the font reports them. A symbol
    /// the font has no glyph for measures as zero.
    pub fn measure<S: GlyphSource + ?Sized>(source: &S, symbol: char) -> Self {
        let Some(ink) = source.bounding_box(symbol) else {
            return Self::ZERO;
        };
        Self {
            width: ink.folded_width(),
            advance: source.advance(symbol).unwrap_or(0),
        }
    }
}
