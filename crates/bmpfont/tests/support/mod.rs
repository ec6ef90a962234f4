//! Shared test fixtures: a minimal in-memory TrueType font and a scripted
//! glyph source.

#![allow(dead_code)]

use bmpfont::{Canvas, GlyphSource, InkBox};

// ============================================================================
// TRUETYPE BUILDER
// ============================================================================

/// One glyph of a generated test font
pub struct TestGlyph {
    pub ch: char,
    pub advance: u16,
    /// Closed polygons of on-curve points, in font units
    pub contours: Vec<Vec<(i16, i16)>>,
}

impl TestGlyph {
    pub fn empty(ch: char, advance: u16) -> Self {
        Self { ch, advance, contours: vec![] }
    }

    /// Glyph made of axis-aligned rectangles `(x0, y0, x1, y1)`
    pub fn rects(ch: char, advance: u16, rects: &[(i16, i16, i16, i16)]) -> Self {
        let contours = rects
            .iter()
            .map(|&(x0, y0, x1, y1)| vec![(x0, y0), (x0, y1), (x1, y1), (x1, y0)])
            .collect();
        Self { ch, advance, contours }
    }
}

/// Family name written into the generated font's `name` table
pub const TEST_FAMILY: &str = "Bmp Test";

/// Build a TrueType font with 16 units per em, ascender 12 and descender -4,
/// so at 16px one unit is one pixel and the line height is 16.
pub fn build_test_font(glyphs: &[TestGlyph]) -> Vec<u8> {
    build_font(16, 12, -4, glyphs)
}

/// The font used throughout the integration tests
pub fn standard_font() -> Vec<u8> {
    build_test_font(&[
        // Solid block filling the whole 8x16 cell
        TestGlyph::rects('A', 10, &[(0, -4, 8, 12)]),
        TestGlyph::empty(' ', 4),
        // One-pixel bar with a one-pixel left bearing
        TestGlyph::rects('!', 3, &[(1, -4, 2, 12)]),
        // Stem and dot
        TestGlyph::rects('i', 4, &[(1, 0, 2, 7), (1, 9, 2, 10)]),
        // Twelve pixels wide, one row on the baseline
        TestGlyph::rects('_', 12, &[(0, 0, 12, 1)]),
        // Overhangs the pen to the left
        TestGlyph::rects('j', 3, &[(-2, -4, 2, 0)]),
    ])
}

pub fn build_font(upem: u16, ascender: i16, descender: i16, glyphs: &[TestGlyph]) -> Vec<u8> {
    let num_glyphs = glyphs.len() as u16 + 1; // plus .notdef

    // glyf + loca (long offsets)
    let mut glyf = Vec::new();
    let mut loca = Vec::new();
    put_u32(&mut loca, 0);
    put_u32(&mut loca, 0); // .notdef is empty
    for glyph in glyphs {
        glyf.extend(encode_glyph(&glyph.contours));
        put_u32(&mut loca, glyf.len() as u32);
    }

    // hmtx
    let mut hmtx = Vec::new();
    put_u16(&mut hmtx, 0);
    put_u16(&mut hmtx, 0);
    for glyph in glyphs {
        put_u16(&mut hmtx, glyph.advance);
        put_u16(&mut hmtx, 0);
    }

    // head
    let mut head = Vec::new();
    put_u32(&mut head, 0x0001_0000); // version
    put_u32(&mut head, 0x0001_0000); // font revision
    put_u32(&mut head, 0); // checksum adjustment
    put_u32(&mut head, 0x5F0F_3CF5); // magic
    put_u16(&mut head, 0); // flags
    put_u16(&mut head, upem);
    head.extend([0u8; 16]); // created, modified
    for v in [0i16, descender, upem as i16, ascender] {
        put_u16(&mut head, v as u16);
    }
    put_u16(&mut head, 0); // mac style
    put_u16(&mut head, 8); // lowest rec ppem
    put_u16(&mut head, 2); // direction hint
    put_u16(&mut head, 1); // long loca
    put_u16(&mut head, 0); // glyph data format
    assert_eq!(head.len(), 54);

    // hhea
    let mut hhea = Vec::new();
    put_u32(&mut hhea, 0x0001_0000);
    put_u16(&mut hhea, ascender as u16);
    put_u16(&mut hhea, descender as u16);
    put_u16(&mut hhea, 0); // line gap
    put_u16(&mut hhea, glyphs.iter().map(|g| g.advance).max().unwrap_or(0));
    hhea.extend([0u8; 6]); // min lsb, min rsb, x max extent
    put_u16(&mut hhea, 1); // caret slope rise
    hhea.extend([0u8; 4]); // caret slope run, caret offset
    hhea.extend([0u8; 8]); // reserved
    put_u16(&mut hhea, 0); // metric data format
    put_u16(&mut hhea, num_glyphs);
    assert_eq!(hhea.len(), 36);

    // maxp 0.5
    let mut maxp = Vec::new();
    put_u32(&mut maxp, 0x0000_5000);
    put_u16(&mut maxp, num_glyphs);

    // cmap: a single Windows full-repertoire format 12 subtable
    let mut mapping: Vec<(u32, u32)> = glyphs
        .iter()
        .enumerate()
        .map(|(i, g)| (g.ch as u32, i as u32 + 1))
        .collect();
    mapping.sort();
    let mut cmap = Vec::new();
    put_u16(&mut cmap, 0);
    put_u16(&mut cmap, 1);
    put_u16(&mut cmap, 3);
    put_u16(&mut cmap, 10);
    put_u32(&mut cmap, 12);
    put_u16(&mut cmap, 12);
    put_u16(&mut cmap, 0);
    put_u32(&mut cmap, 16 + 12 * mapping.len() as u32);
    put_u32(&mut cmap, 0);
    put_u32(&mut cmap, mapping.len() as u32);
    for (code, gid) in &mapping {
        put_u32(&mut cmap, *code);
        put_u32(&mut cmap, *code);
        put_u32(&mut cmap, *gid);
    }

    // name: family, subfamily and PostScript name as Windows UTF-16BE
    let names = [
        (1u16, TEST_FAMILY),
        (2, "Regular"),
        (4, "Bmp Test Regular"),
        (6, "BmpTest-Regular"),
    ];
    let mut name = Vec::new();
    let mut storage = Vec::new();
    put_u16(&mut name, 0);
    put_u16(&mut name, names.len() as u16);
    put_u16(&mut name, 6 + 12 * names.len() as u16);
    for (id, text) in names {
        let encoded: Vec<u8> = text.encode_utf16().flat_map(u16::to_be_bytes).collect();
        put_u16(&mut name, 3);
        put_u16(&mut name, 1);
        put_u16(&mut name, 0x0409);
        put_u16(&mut name, id);
        put_u16(&mut name, encoded.len() as u16);
        put_u16(&mut name, storage.len() as u16);
        storage.extend(encoded);
    }
    name.extend(storage);

    // Table records must be sorted by tag
    let tables: [(&[u8; 4], Vec<u8>); 8] = [
        (b"cmap", cmap),
        (b"glyf", glyf),
        (b"head", head),
        (b"hhea", hhea),
        (b"hmtx", hmtx),
        (b"loca", loca),
        (b"maxp", maxp),
        (b"name", name),
    ];

    let mut font = Vec::new();
    put_u32(&mut font, 0x0001_0000);
    put_u16(&mut font, tables.len() as u16);
    put_u16(&mut font, 128); // search range
    put_u16(&mut font, 3); // entry selector
    put_u16(&mut font, 0); // range shift

    let mut offset = 12 + 16 * tables.len();
    let mut body = Vec::new();
    for (tag, data) in &tables {
        font.extend_from_slice(*tag);
        put_u32(&mut font, 0); // checksum
        put_u32(&mut font, offset as u32);
        put_u32(&mut font, data.len() as u32);

        body.extend_from_slice(data);
        while body.len() % 4 != 0 {
            body.push(0);
        }
        offset = 12 + 16 * tables.len() + body.len();
    }
    font.extend(body);
    font
}

fn encode_glyph(contours: &[Vec<(i16, i16)>]) -> Vec<u8> {
    if contours.is_empty() {
        return Vec::new();
    }
    let points: Vec<(i16, i16)> = contours.iter().flatten().copied().collect();
    let x_min = points.iter().map(|p| p.0).min().unwrap_or(0);
    let x_max = points.iter().map(|p| p.0).max().unwrap_or(0);
    let y_min = points.iter().map(|p| p.1).min().unwrap_or(0);
    let y_max = points.iter().map(|p| p.1).max().unwrap_or(0);

    let mut out = Vec::new();
    put_u16(&mut out, contours.len() as u16);
    for v in [x_min, y_min, x_max, y_max] {
        put_u16(&mut out, v as u16);
    }
    let mut end = 0u16;
    for contour in contours {
        end += contour.len() as u16;
        put_u16(&mut out, end - 1);
    }
    put_u16(&mut out, 0); // no instructions

    // On-curve points, 16-bit deltas for both axes
    out.extend(std::iter::repeat_n(0x01u8, points.len()));
    let mut prev = 0i16;
    for p in &points {
        put_u16(&mut out, (p.0 - prev) as u16);
        prev = p.0;
    }
    prev = 0;
    for p in &points {
        put_u16(&mut out, (p.1 - prev) as u16);
        prev = p.1;
    }
    while out.len() % 4 != 0 {
        out.push(0);
    }
    out
}

fn put_u16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_be_bytes());
}

fn put_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_be_bytes());
}

// ============================================================================
// SCRIPTED SOURCE
// ============================================================================

/// A glyph drawn from explicit rectangles in pixel space
pub struct ScriptedGlyph {
    pub ch: char,
    pub ink: InkBox,
    pub advance: u32,
    /// `(x, y, width, height)` in canvas pixels
    pub rects: Vec<(f32, f32, f32, f32)>,
}

/// Monospaced fake font: every known symbol has a fixed cell
pub struct ScriptedSource {
    pub line_height: u32,
    pub glyphs: Vec<ScriptedGlyph>,
}

impl ScriptedSource {
    fn find(&self, symbol: char) -> Option<&ScriptedGlyph> {
        self.glyphs.iter().find(|g| g.ch == symbol)
    }
}

impl GlyphSource for ScriptedSource {
    fn line_height(&self) -> u32 {
        self.line_height
    }

    fn bounding_box(&self, symbol: char) -> Option<InkBox> {
        self.find(symbol).map(|g| g.ink)
    }

    fn advance(&self, symbol: char) -> Option<u32> {
        self.find(symbol).map(|g| g.advance)
    }

    fn render(&self, symbol: char, canvas: &mut Canvas) {
        if let Some(glyph) = self.find(symbol) {
            for &(x, y, w, h) in &glyph.rects {
                canvas.fill_rect(x, y, w, h);
            }
        }
    }
}

/// 8x16 monospaced font with advance 10: solid "A", a centred one-pixel
/// "!" in a 3-pixel box, and a blank space
pub fn monospace_fixture() -> ScriptedSource {
    ScriptedSource {
        line_height: 16,
        glyphs: vec![
            ScriptedGlyph {
                ch: 'A',
                ink: InkBox::new(0, 8),
                advance: 10,
                rects: vec![(0.0, 0.0, 8.0, 16.0)],
            },
            ScriptedGlyph {
                ch: '!',
                ink: InkBox::new(0, 3),
                advance: 10,
                rects: vec![(1.0, 0.0, 1.0, 16.0)],
            },
            ScriptedGlyph {
                ch: ' ',
                ink: InkBox::EMPTY,
                advance: 10,
                rects: vec![],
            },
        ],
    }
}
