//! Rust source output
//!
//! Emits a module defining `pub const FONT`, ready to be dropped into
//! firmware next to a struct shaped like
//!
//! ```ignore
//! pub struct Font {
//!     pub height: i32,
//!     pub chars: &'static [&'static [u8]],
//!     pub width: &'static [u8],
//!     pub advance: &'static [u8],
//! }
//! ```

use std::fmt::Write;

use super::PackedFont;
use crate::{BmpFontError, Result};

const WRAP: usize = 32;

pub(super) fn write(font: &PackedFont, type_path: &str) -> Result<String> {
    if i32::try_from(font.line_height).is_err() {
        return Err(BmpFontError::ValueOutOfRange {
            field: "height",
            index: 0,
            value: font.line_height,
        });
    }
    check_u8("width", &font.widths)?;
    check_u8("advance", &font.advances)?;

    let mut out = String::new();
    out.push_str("#[allow(dead_code)]\n");
    let _ = writeln!(out, "pub const FONT: {type_path} = {type_path} {{");
    let _ = writeln!(out, "    height: {},", font.line_height);

    out.push_str("    chars: &[\n");
    for bytes in &font.glyphs {
        out.push_str("        &[");
        for b in bytes {
            let _ = write!(out, "0x{b:x},");
        }
        out.push_str("],\n");
    }
    out.push_str("    ],\n");

    write_array(&mut out, "width", &font.widths);
    write_array(&mut out, "advance", &font.advances);
    out.push_str("};\n");
    Ok(out)
}

fn check_u8(field: &'static str, values: &[u32]) -> Result<()> {
    match values.iter().position(|v| *v > u8::MAX as u32) {
        Some(index) => Err(BmpFontError::ValueOutOfRange {
            field,
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}

fn write_array(out: &mut String, name: &str, values: &[u32]) {
    let _ = write!(out, "    {name}: &[\n        ");
    for (i, v) in values.iter().enumerate() {
        if i > 0 && i % WRAP == 0 {
            out.push_str("\n        ");
        }
        let _ = write!(out, "{v},");
    }
    out.push_str("\n    ],\n");
}
