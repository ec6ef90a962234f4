//! Font database for loading and resolving fonts

use std::path::Path;
use std::sync::Arc;

use fontdb::{Database, FaceInfo, Source};

use super::FontSelection;
use crate::{BmpFontError, Result};

/// Font database for loading and matching fonts
pub struct FontDatabase {
    db: Database,
}

impl FontDatabase {
    /// Create a new empty font database
    pub fn new() -> Self {
        Self {
            db: Database::new(),
        }
    }

    /// Create a font database with system fonts loaded
    pub fn with_system_fonts() -> Self {
        let mut db = Self::new();
        db.load_system_fonts();
        db
    }

    /// Load system fonts into the database
    pub fn load_system_fonts(&mut self) {
        self.db.load_system_fonts();
    }

    /// Load a font from file
    pub fn load_font_file(&mut self, path: &Path) -> Result<()> {
        self.db
            .load_font_file(path)
            .map_err(|e| BmpFontError::FontParsing(format!("{}: {e}", path.display())))
    }

    /// Load every font found under a directory
    pub fn load_fonts_dir(&mut self, path: &Path) {
        self.db.load_fonts_dir(path);
    }

    /// Load a font from memory
    pub fn load_font_data(&mut self, data: Arc<dyn AsRef<[u8]> + Send + Sync>) {
        self.db.load_font_source(Source::Binary(data));
    }

    /// Find the face best matching `selection`
    pub fn resolve(&self, selection: &FontSelection) -> Result<fontdb::ID> {
        let families = [selection.fontdb_family()];
        self.db
            .query(&fontdb::Query {
                families: &families,
                weight: fontdb::Weight(selection.weight.0),
                stretch: fontdb::Stretch::Normal,
                style: selection.style.into(),
            })
            .ok_or_else(|| {
                BmpFontError::FontUnavailable(format!(
                    "no face for family '{}' ({:?}, weight {})",
                    selection.family, selection.style, selection.weight.0
                ))
            })
    }

    /// Get font info by ID
    pub fn face_info(&self, id: fontdb::ID) -> Option<&FaceInfo> {
        self.db.face(id)
    }

    /// Borrow the raw data and collection index of a face
    pub fn with_face_data<R>(&self, id: fontdb::ID, f: impl FnOnce(&[u8], u32) -> R) -> Option<R> {
        self.db.with_face_data(id, f)
    }

    /// All loaded family names, sorted and deduplicated
    pub fn families(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .db
            .faces()
            .filter_map(|f| f.families.first().map(|(name, _)| name.clone()))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Number of loaded faces
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Check if database is empty
    pub fn is_empty(&self) -> bool {
        self.db.len() == 0
    }
}

impl Default for FontDatabase {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_database_resolves_nothing() {
        let db = FontDatabase::new();
        assert!(db.is_empty());
        let err = db.resolve(&FontSelection::new("Nonexistent Sans", 16.0)).unwrap_err();
        assert!(matches!(err, BmpFontError::FontUnavailable(_)));
    }

    #[test]
    fn test_missing_file() {
        let mut db = FontDatabase::new();
        assert!(db.load_font_file(Path::new("/nonexistent/font.ttf")).is_err());
    }

    #[test]
    fn test_load_system_fonts_matches_constructor() {
        let mut db = FontDatabase::new();
        db.load_system_fonts();
        assert_eq!(db.len(), FontDatabase::with_system_fonts().len());
    }

    #[test]
    fn test_query_system_monospace() {
        let db = FontDatabase::with_system_fonts();
        if db.is_empty() {
            // Skip on systems without fonts
            return;
        }
        // Result depends on installed fonts, only check it doesn't panic
        let _ = db.resolve(&FontSelection::new("monospace", 16.0));
    }
}
