use log::debug;

use crate::{
    bitmap::Bitmap,
    compress::compress,
    decompress::decompress,
    error::Error,
    field::{wrap_label, DownloadGraphic, GraphicField, Position},
    hexrow::{encode_rows, HexCase},
};

/// Config
///
#[derive(Debug, Clone)]
pub struct Config {
    compress: bool,
    hex_case: HexCase,
    label: bool,
    position: Option<Position>,
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Initialize configuration data with default values.
    ///
    /// Compression is enabled, hex digits are lowercase and the field is
    /// emitted on its own, without position or label wrapper.
    ///
    /// # Example
    ///
    /// ```
    /// use zpl_graphic::{Config, Position};
    ///
    /// let config = Config::new().label(true).position(Position::new(10, 10));
    /// ```
    ///
    pub fn new() -> Config {
        Config {
            compress: true,
            hex_case: HexCase::Lower,
            label: false,
            position: None,
        }
    }

    pub fn compress(self, flag: bool) -> Self {
        Config {
            compress: flag,
            ..self
        }
    }

    pub fn hex_case(self, hex_case: HexCase) -> Self {
        Config { hex_case, ..self }
    }

    /// Wrap the field in `^XA` ... `^XZ`.
    pub fn label(self, flag: bool) -> Self {
        Config {
            label: flag,
            ..self
        }
    }

    /// Place the field with `^FO<x>,<y>`.
    pub fn position(self, position: Position) -> Self {
        Config {
            position: Some(position),
            ..self
        }
    }

    fn body(&self, bitmap: &Bitmap) -> Result<String, Error> {
        let hex_rows = encode_rows(bitmap, self.hex_case);
        if self.compress {
            compress(&hex_rows)
        } else {
            Ok(hex_rows)
        }
    }
}

/// Result of a conversion, with the geometry written into the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub zpl: String,
    pub total_bytes: usize,
    pub row_bytes: usize,
}

/// Convert a bitmap to a `^GFA` field.
pub fn convert(bitmap: &Bitmap, config: &Config) -> Result<Conversion, Error> {
    let total_bytes = bitmap.total_bytes();
    let row_bytes = bitmap.row_bytes();
    debug!(
        "Converting {}x{} bitmap: total {} bytes, {} bytes per row",
        bitmap.width(),
        bitmap.height(),
        total_bytes,
        row_bytes
    );

    let body = config.body(bitmap)?;
    debug!("Body is {} bytes, compress {}", body.len(), config.compress);

    let mut field = GraphicField::new(total_bytes, row_bytes, body);
    if let Some(position) = config.position {
        field = field.at(position);
    }

    let mut zpl = field.to_zpl();
    if config.label {
        zpl = wrap_label(&zpl);
    }

    Ok(Conversion {
        zpl,
        total_bytes,
        row_bytes,
    })
}

/// Convert a bitmap to a `~DG` command storing it as `target`.
///
/// Position and label settings do not apply to downloads.
pub fn convert_for_upload(
    bitmap: &Bitmap,
    target: &str,
    config: &Config,
) -> Result<Conversion, Error> {
    let total_bytes = bitmap.total_bytes();
    let row_bytes = bitmap.row_bytes();
    let command = DownloadGraphic::new(target, total_bytes, row_bytes, config.body(bitmap)?);
    debug!(
        "Download {} : total {} bytes, {} bytes per row",
        command.target, total_bytes, row_bytes
    );

    Ok(Conversion {
        zpl: command.to_zpl(),
        total_bytes,
        row_bytes,
    })
}

/// Decode the first graphic in `zpl` back into a bitmap.
///
/// A `^GFA` field is preferred, a `~DG` command is used otherwise. The
/// bitmap is `row_bytes * 8` pixels wide, see [`Bitmap::with_width`].
pub fn parse(zpl: &str) -> Result<Bitmap, Error> {
    let (total_bytes, row_bytes, body) = match GraphicField::parse(zpl) {
        Ok(field) => (field.total_bytes, field.row_bytes, field.body),
        Err(gfa_err) => match DownloadGraphic::parse(zpl) {
            Ok(command) => (command.total_bytes, command.row_bytes, command.body),
            Err(_) => return Err(gfa_err),
        },
    };

    let data = decompress(&body, row_bytes, total_bytes)?;
    let height = total_bytes / row_bytes;
    debug!(
        "Calculated image size: {} x {}, {} bytes",
        row_bytes * 8,
        height,
        data.len()
    );

    let width = dimension(row_bytes * 8)?;
    Bitmap::new(width, dimension(height)?, data)
}

fn dimension(value: usize) -> Result<u32, Error> {
    use std::convert::TryFrom;

    u32::try_from(value)
        .map_err(|_| Error::InvalidDimension(format!("Dimension {} is too large", value)))
}
