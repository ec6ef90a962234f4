//! Glyph rasterization

use crate::source::{GlyphSource, InkBox};
use crate::Result;

use super::Canvas;

/// Row-major 1-bit pixel matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonoBitmap {
    width: u32,
    height: u32,
    pixels: Vec<bool>,
}

impl MonoBitmap {
    /// Create an all-background bitmap
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; width as usize * height as usize],
        }
    }

    /// Build from row strings, `#` marking ink. Handy for fixtures.
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.first().map_or(0, |r| r.chars().count()) as u32;
        let mut bitmap = Self::new(width, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate().take(width as usize) {
                bitmap.set(x as u32, y as u32, c == '#');
            }
        }
        bitmap
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at (x, y); out of bounds reads as background
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.pixels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, ink: bool) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.pixels[idx] = ink;
        }
    }

    /// One row of pixels, left to right
    pub fn row(&self, y: u32) -> &[bool] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        (0..self.height).map(move |y| self.row(y))
    }

    /// Number of ink pixels
    pub fn ink_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p).count()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// A rasterized glyph
#[derive(Debug, Clone)]
pub struct RasterGlyph {
    /// Source symbol
    pub symbol: char,
    /// Ink box as reported by the font, before folding to the pen
    pub ink: InkBox,
    /// Thresholded pixels, `folded_width` x line height
    pub bitmap: MonoBitmap,
    /// The font had no glyph for this symbol
    pub missing: bool,
}

impl RasterGlyph {
    /// Blank, zero-width cell for a symbol the font cannot draw
    pub fn missing(symbol: char, line_height: u32) -> Self {
        Self {
            symbol,
            ink: InkBox::EMPTY,
            bitmap: MonoBitmap::new(0, line_height),
            missing: true,
        }
    }

    pub fn width(&self) -> u32 {
        self.bitmap.width()
    }
}

/// Renders symbols one at a time through a reusable scratch canvas
pub struct Rasterizer {
    canvas: Canvas,
    line_height: u32,
}

impl Rasterizer {
    /// Create a rasterizer for a face with the given line height
    pub fn new(line_height: u32) -> Result<Self> {
        Ok(Self {
            canvas: Canvas::new(line_height, line_height)?,
            line_height,
        })
    }

    pub fn line_height(&self) -> u32 {
        self.line_height
    }

    /// Rasterize one symbol.
    ///
    /// The bitmap covers the folded ink box horizontally and the full line
    /// band vertically. Symbols the source has no glyph for come back as a
    /// blank zero-width cell.
    pub fn rasterize<S: GlyphSource + ?Sized>(
        &mut self,
        source: &S,
        symbol: char,
    ) -> Result<RasterGlyph> {
        let Some(ink) = source.bounding_box(symbol) else {
            return Ok(RasterGlyph::missing(symbol, self.line_height));
        };

        let width = ink.folded_width();
        let drawn = width > 0 && self.line_height > 0;
        if drawn {
            // Rejects oversized glyphs before any pixel buffer is allocated
            self.canvas.ensure_size(width, self.line_height)?;
        }
        let mut bitmap = MonoBitmap::new(width, self.line_height);

        if drawn {
            self.canvas.clear();
            source.render(symbol, &mut self.canvas);

            for y in 0..self.line_height {
                for x in 0..width {
                    if self.canvas.is_ink(x, y) {
                        bitmap.set(x, y, true);
                    }
                }
            }
        }

        Ok(RasterGlyph {
            symbol,
            ink,
            bitmap,
            missing: false,
        })
    }
}
