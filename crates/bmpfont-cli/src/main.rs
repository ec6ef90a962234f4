//! bmpfont - Command-line entry point

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use bmpfont::{
    ExportOptions, FontDatabase, FontSelection, FontStyle, FontWeight, GLYPH_CATALOG, HintingMode,
    PackedFont, TableFormat,
};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bmpfont", version, about = "Compile outline fonts into packed bitmap tables")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the glyph catalog with a font and write the packed table
    Export(ExportArgs),
    /// List the font families that can be selected
    Families(FontSources),
    /// Parse and validate a table written in the canonical format
    Check {
        /// Table file
        file: PathBuf,
    },
    /// Print the glyph catalog in index order
    Catalog,
}

#[derive(Args)]
struct FontSources {
    /// Extra font file to load (repeatable)
    #[arg(long = "font-file", value_name = "PATH")]
    font_files: Vec<PathBuf>,
    /// Extra directory to scan for fonts (repeatable)
    #[arg(long = "font-dir", value_name = "DIR")]
    font_dirs: Vec<PathBuf>,
    /// Do not load the fonts installed on this system
    #[arg(long)]
    no_system_fonts: bool,
}

impl FontSources {
    fn load(&self) -> Result<FontDatabase> {
        let mut db = if self.no_system_fonts {
            FontDatabase::new()
        } else {
            FontDatabase::with_system_fonts()
        };
        for path in &self.font_files {
            db.load_font_file(path)
                .with_context(|| format!("loading font file {}", path.display()))?;
        }
        for dir in &self.font_dirs {
            db.load_fonts_dir(dir);
        }
        tracing::debug!("{} font faces available", db.len());
        Ok(db)
    }
}

#[derive(Args)]
struct ExportArgs {
    #[command(flatten)]
    sources: FontSources,
    /// JSON file holding a font selection; flags below override it
    #[arg(long, value_name = "FILE")]
    selection: Option<PathBuf>,
    /// Font family, or serif / sans-serif / monospace
    #[arg(long)]
    family: Option<String>,
    /// Pixel size
    #[arg(long)]
    size: Option<f32>,
    /// Weight, 100-900
    #[arg(long)]
    weight: Option<u16>,
    /// normal, italic or oblique
    #[arg(long)]
    style: Option<FontStyle>,
    /// Output format: table, rust or json
    #[arg(long, default_value = "table")]
    format: TableFormat,
    /// Type path of the constant in Rust output
    #[arg(long, value_name = "PATH")]
    rust_type: Option<String>,
    /// Keep fractional vertical metrics instead of snapping to pixels
    #[arg(long)]
    no_hinting: bool,
    /// Destination file
    #[arg(short, long)]
    output: PathBuf,
}

impl ExportArgs {
    fn selection(&self) -> Result<FontSelection> {
        let base = match &self.selection {
            Some(path) => Some(read_selection(path)?),
            None => None,
        };

        let family = self
            .family
            .clone()
            .or_else(|| base.as_ref().map(|s| s.family.clone()));
        let size = self.size.or_else(|| base.as_ref().map(|s| s.size));
        let (Some(family), Some(size)) = (family, size) else {
            bail!("a font family and size are required (--family/--size or --selection)");
        };

        let mut selection = FontSelection::new(family, size);
        if let Some(base) = &base {
            selection = selection.weight(base.weight).style(base.style);
        }
        if let Some(weight) = self.weight {
            selection = selection.weight(FontWeight::from(weight));
        }
        if let Some(style) = self.style {
            selection = selection.style(style);
        }
        Ok(selection)
    }

    fn options(&self) -> ExportOptions {
        let format = match (&self.format, &self.rust_type) {
            (TableFormat::Rust { .. }, Some(type_path)) => TableFormat::Rust {
                type_path: type_path.clone(),
            },
            (format, _) => format.clone(),
        };
        ExportOptions {
            format,
            hinting: if self.no_hinting {
                HintingMode::None
            } else {
                HintingMode::Full
            },
        }
    }
}

fn read_selection(path: &Path) -> Result<FontSelection> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading selection {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing selection {}", path.display()))
}

fn main() -> Result<()> {
    // Logs go to stderr so listings on stdout stay pipeable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Export(args) => export(&args),
        Command::Families(sources) => {
            for family in sources.load()?.families() {
                println!("{family}");
            }
            Ok(())
        }
        Command::Check { file } => check(&file),
        Command::Catalog => {
            for (index, symbol) in GLYPH_CATALOG.symbols()?.into_iter().enumerate() {
                println!("{index:3}  U+{:04X}  {symbol}", symbol as u32);
            }
            Ok(())
        }
    }
}

fn export(args: &ExportArgs) -> Result<()> {
    let selection = args.selection()?;
    let db = args.sources.load()?;
    let summary = bmpfont::export_font(&db, &selection, &args.output, &args.options())
        .with_context(|| format!("exporting '{}' to {}", selection.family, args.output.display()))?;

    if !summary.missing.is_empty() {
        let symbols: String = summary.missing.iter().map(|(_, c)| *c).collect();
        tracing::warn!(
            "{} of {} glyphs missing from '{}', exported blank: {}",
            summary.missing.len(),
            summary.glyphs,
            selection.family,
            symbols
        );
    }
    Ok(())
}

fn check(path: &Path) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let font = PackedFont::parse_table(&text)
        .with_context(|| format!("checking {}", path.display()))?;

    if font.len() != GLYPH_CATALOG.len() {
        tracing::warn!(
            "table has {} glyphs, catalog has {}",
            font.len(),
            GLYPH_CATALOG.len()
        );
    }
    println!(
        "{}: {} glyphs, line height {}, {} bitmap bytes, widest {}px",
        path.display(),
        font.len(),
        font.line_height,
        font.byte_len(),
        font.widths.iter().max().copied().unwrap_or(0)
    );
    Ok(())
}
