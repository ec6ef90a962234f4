//! Monochrome bit packing
//!
//! Each row is split into 8-pixel groups, left to right. The leftmost
//! pixel of a group is the most significant bit; unused low bits of a
//! row's last byte stay clear. Rows start on a byte boundary and are
//! stored top to bottom with no length prefix, so a consumer needs the
//! glyph width to walk them.

use crate::render::MonoBitmap;

/// Bytes per packed row for a glyph `width` pixels wide
pub fn row_bytes(width: u32) -> usize {
    (width as usize).div_ceil(8)
}

/// Packed length of a glyph
pub fn packed_len(width: u32, height: u32) -> usize {
    row_bytes(width) * height as usize
}

/// Pack a bitmap into row-aligned, MSB-first bytes
pub fn pack_bitmap(bitmap: &MonoBitmap) -> Vec<u8> {
    let mut out = Vec::with_capacity(packed_len(bitmap.width(), bitmap.height()));
    for row in bitmap.rows() {
        for group in row.chunks(8) {
            let mut byte = 0u8;
            for (i, ink) in group.iter().enumerate() {
                if *ink {
                    byte |= 0x80 >> i;
                }
            }
            out.push(byte);
        }
    }
    out
}

/// Reverse of [`pack_bitmap`]. Returns `None` when `bytes` is not exactly
/// `height` rows of `width` pixels.
pub fn unpack_bitmap(bytes: &[u8], width: u32, height: u32) -> Option<MonoBitmap> {
    if bytes.len() != packed_len(width, height) {
        return None;
    }
    let stride = row_bytes(width);
    let mut bitmap = MonoBitmap::new(width, height);
    for y in 0..height {
        let row = &bytes[y as usize * stride..(y as usize + 1) * stride];
        for x in 0..width {
            let byte = row[x as usize / 8];
            if byte & (0x80 >> (x % 8)) != 0 {
                bitmap.set(x, y, true);
            }
        }
    }
    Some(bitmap)
}
