//! Glyph source abstraction
//!
//! Everything the compiler needs from a font backend: one line height for
//! the whole face, an ink box and advance per symbol, and the ability to
//! draw a symbol into a scratch canvas.

use crate::render::Canvas;

/// Horizontal ink extent of a glyph, in whole pixels relative to the pen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InkBox {
    /// Left edge of the ink (may be negative for overhanging glyphs)
    pub x: i32,
    /// Ink width
    pub width: u32,
}

impl InkBox {
    pub const EMPTY: InkBox = InkBox { x: 0, width: 0 };

    pub fn new(x: i32, width: u32) -> Self {
        Self { x, width }
    }

    /// Width once the box's left edge is moved to the pen position.
    ///
    /// Equals the right edge of the ink; anything left of the pen is
    /// clipped, and a box entirely left of the pen has no width.
    pub fn folded_width(&self) -> u32 {
        let right = self.x as i64 + self.width as i64;
        right.clamp(0, u32::MAX as i64) as u32
    }
}

/// A font backend the compiler can measure and render through
pub trait GlyphSource {
    /// Line height in pixels, shared by every glyph
    fn line_height(&self) -> u32;

    /// Ink box of `symbol`, or `None` when the font has no glyph for it
    fn bounding_box(&self, symbol: char) -> Option<InkBox>;

    /// Horizontal advance of `symbol` in pixels, or `None` when missing
    fn advance(&self, symbol: char) -> Option<u32>;

    /// Draw `symbol` in ink with its pen at x = 0 and its line band at
    /// y = 0..line_height. The canvas has already been cleared.
    fn render(&self, symbol: char, canvas: &mut Canvas);
}

impl<S: GlyphSource + ?Sized> GlyphSource for &S {
    fn line_height(&self) -> u32 {
        (**self).line_height()
    }

    fn bounding_box(&self, symbol: char) -> Option<InkBox> {
        (**self).bounding_box(symbol)
    }

    fn advance(&self, symbol: char) -> Option<u32> {
        (**self).advance(symbol)
    }

    fn render(&self, symbol: char, canvas: &mut Canvas) {
        (**self).render(symbol, canvas)
    }
}
