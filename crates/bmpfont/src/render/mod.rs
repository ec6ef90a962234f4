//! Glyph rendering module

mod canvas;
mod rasterizer;
pub mod hinting;

pub use canvas::{Canvas, INK_THRESHOLD, MAX_CANVAS_PIXELS};
pub use rasterizer::{MonoBitmap, RasterGlyph, Rasterizer};
pub use hinting::HintingMode;
