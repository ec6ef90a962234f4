//! Scratch canvas glyphs are drawn into before thresholding

use tiny_skia::{Color, FillRule, Paint, Path, Pixmap, Rect, Transform};

use crate::{BmpFontError, Result};

/// Pixels whose blue channel is below this value count as ink
pub const INK_THRESHOLD: u8 = 128;

/// Largest canvas, in pixels, a glyph may need
pub const MAX_CANVAS_PIXELS: u64 = 1 << 26;

/// White RGBA surface that glyphs are painted onto in black, without
/// anti-aliasing
pub struct Canvas {
    pixmap: Pixmap,
    paint: Paint<'static>,
}

impl Canvas {
    /// Create a white canvas of at least 1x1 pixels
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = allocate(width, height)?;

        let mut paint = Paint::default();
        paint.set_color_rgba8(0, 0, 0, 255);
        paint.anti_alias = false;

        let mut canvas = Self { pixmap, paint };
        canvas.clear();
        Ok(canvas)
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Grow the canvas so it covers `width` x `height`. Never shrinks.
    pub fn ensure_size(&mut self, width: u32, height: u32) -> Result<()> {
        if width <= self.width() && height <= self.height() {
            return Ok(());
        }
        self.pixmap = allocate(width.max(self.width()), height.max(self.height()))?;
        self.clear();
        Ok(())
    }

    /// Reset every pixel to the background color
    pub fn clear(&mut self) {
        self.pixmap.fill(Color::WHITE);
    }

    /// Fill a path in ink using the non-zero winding rule
    pub fn fill_path(&mut self, path: &Path) {
        self.pixmap.fill_path(
            path,
            &self.paint,
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    /// Fill an axis-aligned rectangle in ink. Degenerate rectangles are
    /// ignored.
    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        if let Some(rect) = Rect::from_xywh(x, y, width, height) {
            self.pixmap.fill_rect(rect, &self.paint, Transform::identity(), None);
        }
    }

    /// Whether the pixel at (x, y) is ink. Out-of-bounds pixels are
    /// background.
    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        self.pixmap
            .pixel(x, y)
            .is_some_and(|p| p.blue() < INK_THRESHOLD)
    }
}

fn allocate(width: u32, height: u32) -> Result<Pixmap> {
    if width as u64 * height as u64 > MAX_CANVAS_PIXELS {
        return Err(BmpFontError::Rasterization(format!(
            "{width}x{height} canvas exceeds {MAX_CANVAS_PIXELS} pixels"
        )));
    }
    Pixmap::new(width.max(1), height.max(1)).ok_or_else(|| {
        BmpFontError::Rasterization(format!("cannot allocate {width}x{height} canvas"))
    })
}
