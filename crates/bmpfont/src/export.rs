//! Export pipeline: catalog -> rasterize -> measure -> pack -> serialize

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::catalog::{GLYPH_CATALOG, GlyphCatalog};
use crate::font::{FontDatabase, FontSelection, OutlineFace};
use crate::metrics::GlyphMetrics;
use crate::pack::pack_bitmap;
use crate::render::{HintingMode, Rasterizer};
use crate::source::GlyphSource;
use crate::table::{PackedFont, TableFormat};
use crate::{BmpFontError, Result};

/// Mode requested for newly published files, before the umask applies
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// A compiled table plus the symbols the font could not draw
#[derive(Debug, Clone)]
pub struct CompiledFont {
    pub font: PackedFont,
    /// Catalog index and symbol of every glyph exported blank
    pub missing: Vec<(usize, char)>,
}

/// How an export is rendered and written
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub format: TableFormat,
    pub hinting: HintingMode,
}

/// What an export produced
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub line_height: u32,
    pub glyphs: usize,
    /// Packed bitmap bytes across all glyphs
    pub bytes: usize,
    pub missing: Vec<(usize, char)>,
}

/// Compile the standard glyph catalog from `source`
pub fn compile<S: GlyphSource + ?Sized>(source: &S) -> Result<CompiledFont> {
    compile_catalog(source, &GLYPH_CATALOG)
}

/// Compile an arbitrary catalog from `source`.
///
/// The catalog is validated before anything is rendered. Glyphs come out
/// in catalog order; symbols the font lacks become blank zero-width cells
/// with zero metrics.
pub fn compile_catalog<S: GlyphSource + ?Sized>(
    source: &S,
    catalog: &GlyphCatalog,
) -> Result<CompiledFont> {
    let symbols = catalog.symbols()?;
    let mut rasterizer = Rasterizer::new(source.line_height())?;
    let mut font = PackedFont::new(rasterizer.line_height());
    let mut missing = Vec::new();

    for (index, symbol) in symbols.into_iter().enumerate() {
        let glyph = rasterizer.rasterize(source, symbol)?;
        let metrics = if glyph.missing {
            tracing::warn!("No glyph for {:?} (U+{:04X}) at index {}", symbol, symbol as u32, index);
            missing.push((index, symbol));
            GlyphMetrics::ZERO
        } else {
            GlyphMetrics::measure(source, symbol)
        };

        let bytes = pack_bitmap(&glyph.bitmap);
        tracing::debug!(
            index,
            symbol = %symbol,
            width = metrics.width,
            advance = metrics.advance,
            bytes = bytes.len(),
            "Packed glyph"
        );
        font.push(bytes, metrics);
    }

    Ok(CompiledFont { font, missing })
}

/// Resolve `selection`, compile the glyph catalog with it and publish the
/// table at `destination`.
///
/// Nothing is written unless every step succeeds; an existing file at
/// `destination` is only replaced by a complete table.
pub fn export_font(
    db: &FontDatabase,
    selection: &FontSelection,
    destination: &Path,
    options: &ExportOptions,
) -> Result<ExportSummary> {
    let id = db.resolve(selection)?;
    if let Some(info) = db.face_info(id) {
        let family = info.families.first().map_or("?", |(name, _)| name.as_str());
        tracing::info!(
            "Exporting '{}' ({}) at {}px",
            family,
            info.post_script_name,
            selection.size
        );
    }

    let compiled = db
        .with_face_data(id, |data, index| {
            let face = OutlineFace::parse(data, index, selection.size)?.with_hinting(options.hinting);
            compile(&face)
        })
        .ok_or_else(|| {
            BmpFontError::FontUnavailable(format!("face data for '{}' is unavailable", selection.family))
        })??;

    export_compiled(&compiled, destination, &options.format)
}

/// Compile from any source and publish the table at `destination`
pub fn export_source<S: GlyphSource + ?Sized>(
    source: &S,
    destination: &Path,
    format: &TableFormat,
) -> Result<ExportSummary> {
    let compiled = compile(source)?;
    export_compiled(&compiled, destination, format)
}

fn export_compiled(
    compiled: &CompiledFont,
    destination: &Path,
    format: &TableFormat,
) -> Result<ExportSummary> {
    let contents = compiled.font.render(format)?;
    write_atomic(destination, contents.as_bytes())?;

    let summary = ExportSummary {
        path: destination.to_path_buf(),
        line_height: compiled.font.line_height,
        glyphs: compiled.font.len(),
        bytes: compiled.font.byte_len(),
        missing: compiled.missing.clone(),
    };
    tracing::info!(
        "Wrote {} glyphs ({} bytes, line height {}) to {}",
        summary.glyphs,
        summary.bytes,
        summary.line_height,
        destination.display()
    );
    Ok(summary)
}

/// Write `contents` to a temporary file beside `path`, then rename it over
/// `path`. On failure the destination is left untouched.
///
/// A replaced file keeps its permissions; a new one gets the usual
/// `0o644` minus the process umask.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let unwritable = |source: std::io::Error| BmpFontError::DestinationUnwritable {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".bmpfont");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(NEW_FILE_MODE));
    }
    let mut tmp = builder.tempfile_in(dir).map_err(unwritable)?;

    let existing = std::fs::metadata(path).ok().filter(|m| m.is_file());
    if let Some(meta) = existing {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(unwritable)?;
    }

    tmp.write_all(contents).map_err(unwritable)?;
    tmp.as_file().sync_all().map_err(unwritable)?;
    tmp.persist(path).map_err(|e| unwritable(e.error))?;
    Ok(())
}
