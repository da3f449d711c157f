//! Field body to packed pixel bytes.
//!
//! Reverses [`crate::compress`]: multiplier letters accumulate a count that
//! applies to the next hex digit, `,` and `!` fill the rest of the row with
//! white or black, and `:` repeats the previous row. Plain uncompressed
//! bodies (hex digits with line breaks) decode through the same path.

use log::trace;

use crate::{alphabet, error::Error};

/// Largest decoded size accepted from a field header (1 GiB, over eight
/// gigapixels).
pub const MAX_TOTAL_BYTES: usize = 1 << 30;

/// Nibble used to fill a row after `,`.
const WHITE: u8 = 0x0;
/// Nibble used to fill a row after `!`.
const BLACK: u8 = 0xF;

/// Decode a field body into `total_bytes` packed bytes.
///
/// The geometry is verified: the body must produce exactly
/// `total_bytes / row_bytes` complete rows.
pub fn decompress(body: &str, row_bytes: usize, total_bytes: usize) -> Result<Vec<u8>, Error> {
    if row_bytes == 0 || total_bytes == 0 {
        return Err(Error::InvalidDimension(format!(
            "Field declares {} total bytes with {} bytes per row",
            total_bytes, row_bytes
        )));
    }
    if total_bytes > MAX_TOTAL_BYTES {
        return Err(Error::InvalidDimension(format!(
            "Field declares {} total bytes, at most {} are supported",
            total_bytes, MAX_TOTAL_BYTES
        )));
    }
    if total_bytes % row_bytes != 0 {
        return Err(Error::GeometryMismatch {
            what: "total byte count",
            expected: total_bytes - total_bytes % row_bytes,
            actual: total_bytes,
        });
    }

    let mut decoder = Decoder::new(row_bytes, total_bytes / row_bytes);
    for (pos, ch) in body.char_indices() {
        decoder.feed(pos, ch)?;
    }
    decoder.finish(total_bytes)
}

struct Decoder {
    row_bytes: usize,
    row_nibbles: usize,
    height: usize,
    /// Sum of multiplier letters since the last data character.
    counter: usize,
    /// Nibbles of the row being decoded.
    row: Vec<u8>,
    rows: usize,
    result: Vec<u8>,
}

impl Decoder {
    /// Buffers grow with the decoded data, not with the declared size.
    fn new(row_bytes: usize, height: usize) -> Self {
        Decoder {
            row_bytes,
            row_nibbles: row_bytes * 2,
            height,
            counter: 0,
            row: Vec::new(),
            rows: 0,
            result: Vec::new(),
        }
    }

    fn feed(&mut self, pos: usize, ch: char) -> Result<(), Error> {
        if ch.is_ascii_whitespace() {
            return Ok(());
        }

        if let Some(count) = alphabet::decode_token(ch) {
            self.counter = self.counter.saturating_add(count);
            return Ok(());
        }

        match ch {
            ',' => self.fill(pos, ch, WHITE),
            '!' => self.fill(pos, ch, BLACK),
            ':' => self.repeat(pos),
            _ => match ch.to_digit(16) {
                Some(nibble) => self.data(nibble as u8),
                None => Err(Error::MalformedField(format!(
                    "Unexpected character {:?} at offset {}",
                    ch, pos
                ))),
            },
        }
    }

    fn data(&mut self, nibble: u8) -> Result<(), Error> {
        let count = self.counter.max(1);
        self.counter = 0;

        let room = self.row_nibbles - self.row.len();
        if count > room {
            return Err(Error::GeometryMismatch {
                what: "hex digits in row",
                expected: self.row_nibbles,
                actual: self.row.len().saturating_add(count),
            });
        }

        self.row.resize(self.row.len() + count, nibble);
        if self.row.len() == self.row_nibbles {
            self.complete_row()?;
        }
        Ok(())
    }

    fn fill(&mut self, pos: usize, ch: char, nibble: u8) -> Result<(), Error> {
        self.check_no_counter(pos, ch)?;
        let len = self.row_nibbles;
        self.row.resize(len, nibble);
        self.complete_row()
    }

    fn repeat(&mut self, pos: usize) -> Result<(), Error> {
        self.check_no_counter(pos, ':')?;
        if self.rows == 0 {
            return Err(Error::MalformedField(format!(
                "Row repeat at offset {} without a previous row",
                pos
            )));
        }
        if !self.row.is_empty() {
            return Err(Error::MalformedField(format!(
                "Row repeat at offset {} inside a partially decoded row",
                pos
            )));
        }
        self.check_room()?;

        let start = self.result.len() - self.row_bytes;
        self.result.extend_from_within(start..);
        self.rows += 1;
        trace!("row {} repeats previous row", self.rows);
        Ok(())
    }

    fn check_no_counter(&self, pos: usize, ch: char) -> Result<(), Error> {
        if self.counter != 0 {
            return Err(Error::MalformedField(format!(
                "Multiplier {} is followed by {:?} at offset {}",
                self.counter, ch, pos
            )));
        }
        Ok(())
    }

    fn check_room(&self) -> Result<(), Error> {
        if self.rows == self.height {
            return Err(Error::GeometryMismatch {
                what: "row count",
                expected: self.height,
                actual: self.rows + 1,
            });
        }
        Ok(())
    }

    fn complete_row(&mut self) -> Result<(), Error> {
        self.check_room()?;
        for pair in self.row.chunks_exact(2) {
            self.result.push(pair[0] << 4 | pair[1]);
        }
        self.row.clear();
        self.rows += 1;
        Ok(())
    }

    fn finish(self, total_bytes: usize) -> Result<Vec<u8>, Error> {
        if self.counter != 0 {
            return Err(Error::MalformedField(format!(
                "Body ends with a dangling multiplier {}",
                self.counter
            )));
        }
        if !self.row.is_empty() {
            return Err(Error::GeometryMismatch {
                what: "hex digits in last row",
                expected: self.row_nibbles,
                actual: self.row.len(),
            });
        }
        if self.rows != self.height {
            return Err(Error::GeometryMismatch {
                what: "row count",
                expected: self.height,
                actual: self.rows,
            });
        }
        if self.result.len() != total_bytes {
            return Err(Error::GeometryMismatch {
                what: "byte count",
                expected: total_bytes,
                actual: self.result.len(),
            });
        }
        Ok(self.result)
    }
}
