//! Error types for ZPL graphic field conversion.
//!
//! This module defines all possible errors that can occur while encoding a
//! bitmap into a `^GFA` field or decoding a field back into a bitmap.

use thiserror::Error;

/// Main error type for graphic field operations.
///
/// A conversion either succeeds with verified geometry or fails with exactly
/// one of these variants. Partial output is never returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Bitmap geometry is unusable.
    ///
    /// Width or height is zero, the pixel buffer does not match the declared
    /// size, or rows of a matrix have different byte lengths.
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    /// Black pixel threshold outside of `0..=255`.
    #[error("Black threshold must be between 0 and 255 ({0} given)")]
    InvalidThreshold(i32),

    /// The text is not a well formed graphic field.
    ///
    /// Raised when no `^GFA,...^FS` (or `~DG`) command is found, a header
    /// number can not be parsed, or the body holds a token that is not valid
    /// at its position, such as `:` on the first row.
    #[error("Malformed graphic field: {0}")]
    MalformedField(String),

    /// Decoded data does not agree with the declared geometry.
    #[error("Geometry mismatch in {what}: expected {expected}, found {actual}")]
    GeometryMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A run length that does not fit in one multiplier token.
    ///
    /// The compressor splits long runs itself, so seeing this from
    /// [`crate::compress`] means an internal invariant was broken.
    #[error("Run length {0} can not be encoded in a single token (1..=400)")]
    AlphabetOverflow(usize),
}
