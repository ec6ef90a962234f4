//! Outline font face scaled to a pixel size

use ttf_parser::{Face, GlyphId, OutlineBuilder};

use crate::render::{Canvas, HintingMode};
use crate::source::{GlyphSource, InkBox};
use crate::{BmpFontError, Result};

/// A parsed outline face at a fixed pixel size
pub struct OutlineFace<'a> {
    /// The underlying ttf-parser face
    face: Face<'a>,
    /// Pixel size requested
    size: f32,
    /// Font units to pixels
    scale: f32,
    /// Distance from the top of the line band to the baseline, in pixels
    baseline: f32,
    line_height: u32,
    hinting: HintingMode,
}

impl<'a> OutlineFace<'a> {
    /// Parse a face from font data and scale it to `size` pixels per em
    pub fn parse(data: &'a [u8], index: u32, size: f32) -> Result<Self> {
        if !size.is_finite() || size <= 0.0 {
            return Err(BmpFontError::FontUnavailable(format!("invalid pixel size {size}")));
        }
        let face = Face::parse(data, index)
            .map_err(|e| BmpFontError::FontParsing(e.to_string()))?;

        let mut outline = Self {
            face,
            size,
            scale: 1.0,
            baseline: 0.0,
            line_height: 0,
            hinting: HintingMode::default(),
        };
        outline.apply_metrics();
        Ok(outline)
    }

    /// Switch hinting mode, recomputing the vertical metrics
    pub fn with_hinting(mut self, hinting: HintingMode) -> Self {
        self.hinting = hinting;
        self.apply_metrics();
        self
    }

    fn apply_metrics(&mut self) {
        self.scale = self.size / self.face.units_per_em() as f32;
        let ascent = self.hinting.snap(self.face.ascender() as f32 * self.scale);
        let descent = self.hinting.snap(-(self.face.descender() as f32) * self.scale);
        self.baseline = ascent;
        self.line_height = (ascent + descent).round().max(0.0) as u32;
    }

    pub fn hinting(&self) -> HintingMode {
        self.hinting
    }

    /// Baseline offset from the top of the line band
    pub fn baseline(&self) -> f32 {
        self.baseline
    }

    /// Check if font has glyph for character
    pub fn has_char(&self, c: char) -> bool {
        self.glyph(c).is_some()
    }

    fn glyph(&self, c: char) -> Option<GlyphId> {
        self.face.glyph_index(c)
    }
}

impl GlyphSource for OutlineFace<'_> {
    fn line_height(&self) -> u32 {
        self.line_height
    }

    fn bounding_box(&self, symbol: char) -> Option<InkBox> {
        let glyph = self.glyph(symbol)?;

        // Glyphs without an outline (space) have ink of zero width
        let Some(bbox) = self.face.glyph_bounding_box(glyph) else {
            return Some(InkBox::EMPTY);
        };

        let left = (bbox.x_min as f32 * self.scale).floor() as i32;
        let right = (bbox.x_max as f32 * self.scale).ceil() as i32;
        Some(InkBox::new(left, (right - left).max(0) as u32))
    }

    fn advance(&self, symbol: char) -> Option<u32> {
        let glyph = self.glyph(symbol)?;
        let advance = self.face.glyph_hor_advance(glyph)?;
        Some((advance as f32 * self.scale).round() as u32)
    }

    fn render(&self, symbol: char, canvas: &mut Canvas) {
        let Some(glyph) = self.glyph(symbol) else {
            return;
        };

        let mut builder = PathBuilder::new(self.scale, self.baseline);
        if self.face.outline_glyph(glyph, &mut builder).is_none() {
            return;
        }
        if let Some(path) = builder.finish() {
            canvas.fill_path(&path);
        }
    }
}

/// Path builder that converts ttf-parser outlines to tiny-skia paths,
/// pen at x = 0 and baseline at `baseline` pixels from the top
struct PathBuilder {
    builder: tiny_skia::PathBuilder,
    scale: f32,
    baseline: f32,
}

impl PathBuilder {
    fn new(scale: f32, baseline: f32) -> Self {
        Self {
            builder: tiny_skia::PathBuilder::new(),
            scale,
            baseline,
        }
    }

    fn transform_x(&self, x: f32) -> f32 {
        x * self.scale
    }

    fn transform_y(&self, y: f32) -> f32 {
        self.baseline - y * self.scale // Flip Y axis
    }

    fn finish(self) -> Option<tiny_skia::Path> {
        self.builder.finish()
    }
}

impl OutlineBuilder for PathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(self.transform_x(x), self.transform_y(y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(self.transform_x(x), self.transform_y(y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(
            self.transform_x(x1), self.transform_y(y1),
            self.transform_x(x), self.transform_y(y),
        );
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(
            self.transform_x(x1), self.transform_y(y1),
            self.transform_x(x2), self.transform_y(y2),
            self.transform_x(x), self.transform_y(y),
        );
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_garbage() {
        let err = OutlineFace::parse(&[0u8; 12], 0, 16.0).err().unwrap();
        assert!(matches!(err, BmpFontError::FontParsing(_)));
    }

    #[test]
    fn test_rejects_bad_size() {
        let err = OutlineFace::parse(&[], 0, 0.0).err().unwrap();
        assert!(matches!(err, BmpFontError::FontUnavailable(_)));
        assert!(OutlineFace::parse(&[], 0, f32::NAN).is_err());
    }
}
