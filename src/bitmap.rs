//! 1-bit bitmaps and the conversion from grayscale pixels.

use std::convert::TryFrom;

use crate::{error::Error, Matrix};

/// Monochrome pixel plane, 8 pixels packed per byte.
///
/// Rows are stored top to bottom, each padded to a whole byte. The most
/// significant bit is the leftmost pixel and a set bit is a black dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

/// Number of bytes one packed row of `width` pixels occupies.
pub fn row_bytes_for(width: u32) -> usize {
    (width as usize + 7) / 8
}

impl Bitmap {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, Error> {
        check_size(width, height)?;
        let expected = row_bytes_for(width) * height as usize;
        if data.len() != expected {
            return Err(Error::InvalidDimension(format!(
                "{}x{} bitmap needs {} bytes, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }
        Ok(Bitmap {
            width,
            height,
            data,
        })
    }

    /// All white bitmap.
    pub fn blank(width: u32, height: u32) -> Result<Self, Error> {
        check_size(width, height)?;
        let data = vec![0u8; row_bytes_for(width) * height as usize];
        Ok(Bitmap {
            width,
            height,
            data,
        })
    }

    /// Build a bitmap from packed rows.
    ///
    /// Every row must be exactly `ceil(width / 8)` bytes long.
    pub fn from_rows(width: u32, rows: Matrix) -> Result<Self, Error> {
        let row_bytes = row_bytes_for(width);
        let mut data = Vec::with_capacity(row_bytes * rows.len());
        for (i, row) in rows.iter().enumerate() {
            if row.len() != row_bytes {
                return Err(Error::InvalidDimension(format!(
                    "Row {} has {} bytes, expected {}",
                    i,
                    row.len(),
                    row_bytes
                )));
            }
            data.extend_from_slice(row);
        }
        let height = u32::try_from(rows.len()).map_err(|_| {
            Error::InvalidDimension(format!("{} rows do not fit a bitmap", rows.len()))
        })?;
        Bitmap::new(width, height, data)
    }

    /// Threshold one-byte-per-pixel grayscale data.
    ///
    /// Pixels darker than `threshold` become black.
    pub fn from_luma(
        width: u32,
        height: u32,
        luma: &[u8],
        threshold: Threshold,
    ) -> Result<Self, Error> {
        check_size(width, height)?;
        let (w, h) = (width as usize, height as usize);
        if luma.len() != w * h {
            return Err(Error::InvalidDimension(format!(
                "{}x{} grayscale image needs {} bytes, got {}",
                width,
                height,
                w * h,
                luma.len()
            )));
        }

        let row_bytes = row_bytes_for(width);
        let mut data = vec![0u8; row_bytes * h];
        for (y, line) in luma.chunks_exact(w).enumerate() {
            let row = &mut data[y * row_bytes..(y + 1) * row_bytes];
            for (x, &pixel) in line.iter().enumerate() {
                if pixel < threshold.value() {
                    row[x / 8] |= 0x80 >> (x % 8);
                }
            }
        }
        Ok(Bitmap {
            width,
            height,
            data,
        })
    }

    /// One byte per pixel, `0x00` for black and `0xFF` for white.
    pub fn to_luma(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.width as usize * self.height as usize);
        for row in self.rows() {
            for x in 0..self.width as usize {
                let black = row[x / 8] & (0x80 >> (x % 8)) != 0;
                out.push(if black { 0x00 } else { 0xFF });
            }
        }
        out
    }

    /// Narrow (or widen) the logical width without touching the data.
    ///
    /// Only widths with the same row byte count are accepted. Decoded fields
    /// only know their row byte count, so this restores the original width.
    pub fn with_width(self, width: u32) -> Result<Self, Error> {
        if width == 0 || row_bytes_for(width) != self.row_bytes() {
            return Err(Error::InvalidDimension(format!(
                "Width {} does not fit rows of {} bytes",
                width,
                self.row_bytes()
            )));
        }
        Ok(Bitmap { width, ..self })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn row_bytes(&self) -> usize {
        row_bytes_for(self.width)
    }

    pub fn total_bytes(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn row(&self, y: u32) -> Option<&[u8]> {
        self.rows().nth(y as usize)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(self.row_bytes())
    }

    /// `true` when the pixel is black, `None` outside of the bitmap.
    pub fn pixel(&self, x: u32, y: u32) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let byte = self.data[y as usize * self.row_bytes() + x as usize / 8];
        Some(byte & (0x80 >> (x % 8)) != 0)
    }

    /// Set a pixel, ignoring coordinates outside of the bitmap.
    pub fn set_pixel(&mut self, x: u32, y: u32, black: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y as usize * self.row_bytes() + x as usize / 8;
        let mask = 0x80 >> (x % 8);
        if black {
            self.data[index] |= mask;
        } else {
            self.data[index] &= !mask;
        }
    }
}

fn check_size(width: u32, height: u32) -> Result<(), Error> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension(format!(
            "Bitmap must not be empty ({}x{} given)",
            width, height
        )));
    }
    Ok(())
}

/// Black pixel threshold for grayscale conversion.
///
/// The higher the threshold, the more of the image is considered black.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threshold(u8);

impl Threshold {
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Threshold(128)
    }
}

impl From<u8> for Threshold {
    fn from(value: u8) -> Self {
        Threshold(value)
    }
}

impl TryFrom<i32> for Threshold {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map(Threshold)
            .map_err(|_| Error::InvalidThreshold(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_size() {
        assert!(Bitmap::new(8, 1, vec![0]).is_ok());
        assert!(Bitmap::new(9, 2, vec![0; 4]).is_ok());
        assert!(matches!(
            Bitmap::new(9, 2, vec![0; 3]),
            Err(Error::InvalidDimension(_))
        ));
        assert!(matches!(
            Bitmap::new(0, 2, vec![]),
            Err(Error::InvalidDimension(_))
        ));
        assert!(matches!(
            Bitmap::blank(4, 0),
            Err(Error::InvalidDimension(_))
        ));
    }

    #[test]
    fn test_from_rows() {
        let bitmap = Bitmap::from_rows(16, vec![vec![0xFF, 0x00], vec![0x0F, 0xF0]]).unwrap();
        assert_eq!(bitmap.height(), 2);
        assert_eq!(bitmap.row(1), Some(&[0x0F, 0xF0][..]));
        assert_eq!(bitmap.row(2), None);

        let err = Bitmap::from_rows(16, vec![vec![0xFF, 0x00], vec![0x0F]]).unwrap_err();
        assert!(matches!(err, Error::InvalidDimension(_)));

        let err = Bitmap::from_rows(16, Vec::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidDimension(_)));
    }

    #[test]
    fn test_pixels() {
        let mut bitmap = Bitmap::blank(10, 3).unwrap();
        bitmap.set_pixel(0, 0, true);
        bitmap.set_pixel(9, 2, true);
        bitmap.set_pixel(10, 2, true);
        assert_eq!(bitmap.data(), &[0x80, 0x00, 0x00, 0x00, 0x00, 0x40]);
        assert_eq!(bitmap.pixel(9, 2), Some(true));
        assert_eq!(bitmap.pixel(8, 2), Some(false));
        assert_eq!(bitmap.pixel(10, 2), None);
        bitmap.set_pixel(0, 0, false);
        assert_eq!(bitmap.pixel(0, 0), Some(false));
    }

    #[test]
    fn test_threshold() {
        assert_eq!(Threshold::default().value(), 128);
        assert_eq!(Threshold::try_from(255i32).unwrap().value(), 255);
        assert_eq!(Threshold::try_from(0i32).unwrap().value(), 0);
        assert_eq!(Threshold::try_from(256i32), Err(Error::InvalidThreshold(256)));
        assert_eq!(Threshold::try_from(-1i32), Err(Error::InvalidThreshold(-1)));
    }

    #[test]
    fn test_luma_round_trip() {
        let luma = [0, 127, 128, 255, 10, 200, 30, 250, 0, 255];
        let bitmap = Bitmap::from_luma(5, 2, &luma, Threshold::default()).unwrap();
        assert_eq!(bitmap.data(), &[0b1100_1000, 0b0101_0000]);
        assert_eq!(
            bitmap.to_luma(),
            vec![0x00, 0x00, 0xFF, 0xFF, 0x00, 0xFF, 0x00, 0xFF, 0x00, 0xFF]
        );
    }

    #[test]
    fn test_luma_size_mismatch() {
        let err = Bitmap::from_luma(5, 2, &[0; 9], Threshold::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidDimension(_)));
    }

    #[test]
    fn test_with_width() {
        let bitmap = Bitmap::new(16, 1, vec![0xAB, 0xC0]).unwrap();
        let narrowed = bitmap.clone().with_width(10).unwrap();
        assert_eq!(narrowed.width(), 10);
        assert_eq!(narrowed.data(), bitmap.data());
        assert!(bitmap.clone().with_width(8).is_err());
        assert!(bitmap.with_width(0).is_err());
    }
}
