//! Glyph catalog
//!
//! The ordered symbol set exported into every table. A symbol's position
//! here is its runtime index on the device, so entries may only ever be
//! appended.

use crate::{BmpFontError, Result};

/// The exported symbols, in table order
pub const GLYPH_CATALOG: GlyphCatalog = GlyphCatalog::new(&[
    " ", "!", "\"", "#", "$", "%", "&", "'", "(", ")", "*", "+", ",", "-", ".", "/",
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ":", ";", "<", "=", ">", "?",
    "@", "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O",
    "P", "Q", "R", "S", "T", "U", "V", "W", "X", "Y", "Z", "[", "\\", "]", "^", "_",
    "`", "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o",
    "p", "q", "r", "s", "t", "u", "v", "w", "x", "y", "z", "{", "|", "}", "~", "ᴇ",
    "∞", "×", "÷", "±", "°", "∀", "∅", "∈", "∉", "∙", "∫", "≈", "≤", "≥", "⋂", "⋃",
    "←", "↑", "→", "↓", "↵", "⬏", "α", "β", "Γ", "γ", "Δ", "δ", "ϵ", "ϝ", "ζ", "η",
    "Θ", "θ", "ι", "κ", "Λ", "λ", "μ", "ν", "Ξ", "ξ", "Π", "π", "ρ", "Σ", "σ", "τ",
    "υ", "Φ", "ϕ", "χ", "Ψ", "ψ", "Ω", "ω", "…", "▪", "◂", "▴", "▸", "▾", "≠", "≷",
    "∡", "²", "³", "ˣ", "₂", "ℹ", "⟪", "⟫", "⦗", "⦘",
]);

/// An ordered, read-only list of symbols
#[derive(Debug, Clone, Copy)]
pub struct GlyphCatalog {
    entries: &'static [&'static str],
}

impl GlyphCatalog {
    pub const fn new(entries: &'static [&'static str]) -> Self {
        Self { entries }
    }

    /// Number of symbols
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw entry at `index`
    pub fn get(&self, index: usize) -> Option<&'static str> {
        self.entries.get(index).copied()
    }

    /// Iterate raw entries in index order
    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().copied()
    }

    /// Resolve every entry to its code point.
    ///
    /// Fails on the first entry that is empty or holds more than one code
    /// point; nothing downstream may run against a catalog that would shift
    /// indices.
    pub fn symbols(&self) -> Result<Vec<char>> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let mut chars = entry.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(BmpFontError::CatalogInvalid {
                        index,
                        symbol: entry.to_string(),
                    }),
                }
            })
            .collect()
    }

    /// Catalog index of `symbol`, if exported
    pub fn index_of(&self, symbol: char) -> Option<usize> {
        let mut buf = [0u8; 4];
        let needle: &str = symbol.encode_utf8(&mut buf);
        self.entries.iter().position(|entry| *entry == needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_resolves() {
        let symbols = GLYPH_CATALOG.symbols().unwrap();
        assert_eq!(symbols.len(), GLYPH_CATALOG.len());
        assert_eq!(symbols[0], ' ');
        assert_eq!(symbols[0x7e - 0x20], '~');
    }

    #[test]
    fn test_ascii_block_is_contiguous() {
        // The device maps printable ASCII by subtracting 0x20
        for (index, code) in (0x20u8..=0x7e).enumerate() {
            assert_eq!(GLYPH_CATALOG.index_of(code as char), Some(index));
        }
    }

    #[test]
    fn test_rejects_multi_code_point_entry() {
        static BAD: &[&str] = &["a", "ab", "c"];
        let err = GlyphCatalog::new(BAD).symbols().unwrap_err();
        assert!(matches!(err, BmpFontError::CatalogInvalid { index: 1, .. }));
    }

    #[test]
    fn test_rejects_empty_entry() {
        static BAD: &[&str] = &[""];
        assert!(GlyphCatalog::new(BAD).symbols().is_err());
    }

    #[test]
    fn test_no_duplicates() {
        let symbols = GLYPH_CATALOG.symbols().unwrap();
        for (i, c) in symbols.iter().enumerate() {
            assert_eq!(GLYPH_CATALOG.index_of(*c), Some(i), "duplicate {c:?}");
        }
    }
}
