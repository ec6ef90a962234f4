//! Packed font tables and their serialized forms

mod rust;
mod text;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::metrics::GlyphMetrics;
use crate::pack::{packed_len, unpack_bitmap};
use crate::render::MonoBitmap;
use crate::{BmpFontError, Result};

/// Type path the Rust output targets unless told otherwise
pub const DEFAULT_RUST_TYPE: &str = "crate::screen::Font";

/// The compiled table, all sequences in catalog order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackedFont {
    /// Rows per glyph, shared by the whole table
    pub line_height: u32,
    /// Packed rows of each glyph
    pub glyphs: Vec<Vec<u8>>,
    /// Ink width of each glyph
    pub widths: Vec<u32>,
    /// Horizontal advance of each glyph
    pub advances: Vec<u32>,
}

impl PackedFont {
    pub fn new(line_height: u32) -> Self {
        Self {
            line_height,
            ..Self::default()
        }
    }

    /// Append one glyph
    pub fn push(&mut self, bytes: Vec<u8>, metrics: GlyphMetrics) {
        self.glyphs.push(bytes);
        self.widths.push(metrics.width);
        self.advances.push(metrics.advance);
    }

    /// Number of glyphs
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Metrics of the glyph at `index`
    pub fn metrics(&self, index: usize) -> Option<GlyphMetrics> {
        Some(GlyphMetrics {
            width: *self.widths.get(index)?,
            advance: *self.advances.get(index)?,
        })
    }

    /// Unpack the glyph at `index` back into pixels
    pub fn bitmap(&self, index: usize) -> Option<MonoBitmap> {
        let bytes = self.glyphs.get(index)?;
        unpack_bitmap(bytes, *self.widths.get(index)?, self.line_height)
    }

    /// Total packed bytes across all glyphs
    pub fn byte_len(&self) -> usize {
        self.glyphs.iter().map(Vec::len).sum()
    }

    /// Check that the sections line up and every glyph has exactly
    /// `line_height` rows of its width
    pub fn validate(&self) -> Result<()> {
        if self.widths.len() != self.glyphs.len() || self.advances.len() != self.glyphs.len() {
            return Err(BmpFontError::InvalidTable(format!(
                "{} glyphs, {} widths, {} advances",
                self.glyphs.len(),
                self.widths.len(),
                self.advances.len()
            )));
        }
        for (index, (bytes, width)) in self.glyphs.iter().zip(&self.widths).enumerate() {
            let expected = packed_len(*width, self.line_height);
            if bytes.len() != expected {
                return Err(BmpFontError::InvalidTable(format!(
                    "glyph {index}: {} bytes, expected {expected} for width {width}",
                    bytes.len()
                )));
            }
        }
        Ok(())
    }

    /// Serialize in the given format
    pub fn render(&self, format: &TableFormat) -> Result<String> {
        match format {
            TableFormat::Table => Ok(text::write(self)),
            TableFormat::Rust { type_path } => rust::write(self, type_path),
            TableFormat::Json => {
                let mut out = serde_json::to_string_pretty(self)?;
                out.push('\n');
                Ok(out)
            }
        }
    }

    /// Parse the canonical text table and validate it
    pub fn parse_table(input: &str) -> Result<Self> {
        let font = text::parse(input)?;
        font.validate()?;
        Ok(font)
    }
}

/// Output format of an exported table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TableFormat {
    /// Canonical `lineHeight` / `glyphs` / `widths` / `advances` listing
    #[default]
    Table,
    /// Rust source defining a `FONT` constant of `type_path`
    Rust { type_path: String },
    /// JSON object
    Json,
}

impl TableFormat {
    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            TableFormat::Table => "txt",
            TableFormat::Rust { .. } => "rs",
            TableFormat::Json => "json",
        }
    }
}

impl FromStr for TableFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "table" => Ok(TableFormat::Table),
            "rust" => Ok(TableFormat::Rust {
                type_path: DEFAULT_RUST_TYPE.to_string(),
            }),
            "json" => Ok(TableFormat::Json),
            other => Err(format!("unknown table format '{other}' (expected table, rust or json)")),
        }
    }
}
