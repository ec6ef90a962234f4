//! Font hinting
//!
//! Outlines are never hinted by instruction; "full" hinting here means the
//! vertical metrics are snapped to whole pixels so every glyph shares one
//! pixel-aligned baseline.

/// Font hinting mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HintingMode {
    /// No hinting (baseline may fall between pixel rows)
    None,
    /// Full hinting (baseline snapped to the pixel grid)
    #[default]
    Full,
}

impl HintingMode {
    /// Apply this mode to a vertical metric in pixels
    pub fn snap(&self, value: f32) -> f32 {
        match self {
            Self::None => value,
            Self::Full => value.round(),
        }
    }
}
