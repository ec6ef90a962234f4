//! bmpfont - Bitmap Font Compiler
//!
//! This crate turns an outline font into a packed monochrome glyph table
//! for embedded display renderers:
//! - Font resolution and outline access (fontdb, ttf-parser)
//! - Monochrome glyph rasterization (tiny-skia, no anti-aliasing)
//! - Per-glyph width/advance extraction
//! - MSB-first, row-aligned bit packing
//! - Table serialization (canonical text, Rust source, JSON)

pub mod catalog;
pub mod source;
pub mod font;
pub mod render;
pub mod metrics;
pub mod pack;
pub mod table;
pub mod export;

pub use catalog::{GLYPH_CATALOG, GlyphCatalog};
pub use source::{GlyphSource, InkBox};
pub use font::{FontDatabase, FontSelection, FontStyle, FontWeight, OutlineFace};
pub use render::{Canvas, HintingMode, MonoBitmap, RasterGlyph, Rasterizer};
pub use metrics::GlyphMetrics;
pub use pack::{pack_bitmap, packed_len, row_bytes, unpack_bitmap};
pub use table::{DEFAULT_RUST_TYPE, PackedFont, TableFormat};
pub use export::{
    CompiledFont, ExportOptions, ExportSummary, compile, compile_catalog, export_font, export_source,
    write_atomic,
};

use std::path::PathBuf;

/// Errors raised while compiling or writing a bitmap font
#[derive(Debug, thiserror::Error)]
pub enum BmpFontError {
    #[error("Font not available: {0}")]
    FontUnavailable(String),

    #[error("Failed to parse font: {0}")]
    FontParsing(String),

    #[error("Catalog entry {index} ({symbol:?}) is not a single code point")]
    CatalogInvalid { index: usize, symbol: String },

    #[error("Rasterization failed: {0}")]
    Rasterization(String),

    #[error("{field}[{index}] = {value} does not fit the output format")]
    ValueOutOfRange { field: &'static str, index: usize, value: u32 },

    #[error("Malformed table: {0}")]
    TableParse(String),

    #[error("Inconsistent table: {0}")]
    InvalidTable(String),

    #[error("Cannot write {}: {source}", path.display())]
    DestinationUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BmpFontError>;
