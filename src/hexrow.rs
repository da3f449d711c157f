//! Packed rows to hex text.

use crate::bitmap::Bitmap;

/// Letter case of the hex digits `a`-`f`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HexCase {
    Lower,
    Upper,
}

impl Default for HexCase {
    fn default() -> Self {
        HexCase::Lower
    }
}

/// Two hex digits per byte, high nibble first.
pub fn encode_row(row: &[u8], case: HexCase) -> String {
    match case {
        HexCase::Lower => hex::encode(row),
        HexCase::Upper => hex::encode_upper(row),
    }
}

/// Every row of `bitmap` as hex, one line per row.
pub fn encode_rows(bitmap: &Bitmap, case: HexCase) -> String {
    let mut out = String::with_capacity((bitmap.row_bytes() * 2 + 1) * bitmap.height() as usize);
    for row in bitmap.rows() {
        out.push_str(&encode_row(row, case));
        out.push('\n');
    }
    out
}
