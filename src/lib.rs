//! ZPL Graphic Field Codec
//!
//! This crate converts 1-bit bitmaps into Zebra ZPL `^GFA` graphic fields
//! and parses such fields back into bitmaps. The field body can be plain hex
//! or use the ZPL run length compression (multiplier letters, `,` `!` and `:`
//! shortcuts).
//!
//! # Example
//!
//! ```rust
//! use zpl_graphic::{convert, parse, Bitmap, Config};
//!
//! let bitmap = Bitmap::new(16, 2, vec![0xFF; 4]).unwrap();
//! let result = convert(&bitmap, &Config::new()).unwrap();
//! assert_eq!(result.zpl, "^GFA,2,4,2,!:^FS");
//! assert_eq!(parse(&result.zpl).unwrap(), bitmap);
//! ```

pub mod alphabet;
mod bitmap;
mod compress;
mod converter;
mod decompress;
mod error;
mod field;
mod hexrow;

pub use crate::{
    bitmap::{row_bytes_for, Bitmap, Threshold},
    compress::compress,
    converter::{convert, convert_for_upload, parse, Config, Conversion},
    decompress::{decompress, MAX_TOTAL_BYTES},
    error::Error,
    field::{target_with_drive, wrap_label, DownloadGraphic, GraphicField, Position},
    hexrow::{encode_row, encode_rows, HexCase},
};

/// Type alias for 1-bit bitmap rows.
///
/// Each inner `Vec<u8>` represents a single row of pixels, with 8 pixels
/// packed into each byte. The outer Vec represents multiple rows.
pub type Matrix = Vec<Vec<u8>>;
