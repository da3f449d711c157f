//! `^GFA` field and `~DG` download command framing.

use std::fmt;

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Error;

static GFA_MATCHER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\^FO(\d+),(\d+))?\^GFA,(\d+),(\d+),(\d+),([^\^]*)\^FS")
        .expect("valid ^GFA pattern")
});

static DG_MATCHER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"~DG([^,]+),(\d+),(\d+),([^\^~]*)").expect("valid ~DG pattern"));

/// Field origin, rendered as `^FO<x>,<y>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub fn new(x: u32, y: u32) -> Self {
        Position { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "^FO{},{}", self.x, self.y)
    }
}

/// One `^GFA` graphic field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphicField {
    pub position: Option<Position>,
    pub total_bytes: usize,
    pub row_bytes: usize,
    pub body: String,
}

impl GraphicField {
    pub fn new(total_bytes: usize, row_bytes: usize, body: String) -> Self {
        GraphicField {
            position: None,
            total_bytes,
            row_bytes,
            body,
        }
    }

    pub fn at(self, position: Position) -> Self {
        GraphicField {
            position: Some(position),
            ..self
        }
    }

    /// `[^FO<x>,<y>]^GFA,<body length>,<total>,<row bytes>,<body>^FS`
    pub fn to_zpl(&self) -> String {
        let pos = self.position.map(|p| p.to_string()).unwrap_or_default();
        format!(
            "{}^GFA,{},{},{},{}^FS",
            pos,
            self.body.len(),
            self.total_bytes,
            self.row_bytes,
            self.body
        )
    }

    /// Find the first graphic field in `text`.
    ///
    /// Anything around the field, such as a `^XA`/`^XZ` label wrapper, is
    /// ignored. The first header number is only cross-checked: it should be
    /// the body length, but some producers write the total byte count there.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let caps = GFA_MATCHER
            .captures(text)
            .ok_or_else(|| Error::MalformedField("Could not find a ^GFA field".to_string()))?;

        let position = match (caps.get(1), caps.get(2)) {
            (Some(x), Some(y)) => Some(Position::new(
                parse_number(x.as_str(), "^FO x")?,
                parse_number(y.as_str(), "^FO y")?,
            )),
            _ => None,
        };
        let declared: usize = parse_number(&caps[3], "body length")?;
        let total_bytes = parse_number(&caps[4], "total byte count")?;
        let row_bytes = parse_number(&caps[5], "row byte count")?;
        let body = caps[6].to_string();

        if declared != body.len() && declared != total_bytes {
            warn!(
                "^GFA declares {} body bytes but the body has {}",
                declared,
                body.len()
            );
        }
        debug!(
            "Parsed ^GFA field: total {} bytes, {} bytes per row",
            total_bytes, row_bytes
        );

        Ok(GraphicField {
            position,
            total_bytes,
            row_bytes,
            body,
        })
    }
}

impl fmt::Display for GraphicField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_zpl())
    }
}

/// Wrap a field in `^XA` ... `^XZ` to make a complete label.
pub fn wrap_label(field: &str) -> String {
    format!("^XA\n{}\n^XZ\n", field)
}

/// Prefix a printer file name with the RAM drive when it has no drive.
pub fn target_with_drive(target: &str) -> String {
    if target.contains(':') {
        target.to_string()
    } else {
        format!("R:{}", target)
    }
}

/// `~DG` command storing a graphic in printer memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadGraphic {
    pub target: String,
    pub total_bytes: usize,
    pub row_bytes: usize,
    pub body: String,
}

impl DownloadGraphic {
    pub fn new(target: &str, total_bytes: usize, row_bytes: usize, body: String) -> Self {
        DownloadGraphic {
            target: target_with_drive(target),
            total_bytes,
            row_bytes,
            body,
        }
    }

    /// `~DG<target>,<total>,<row bytes>,<body>`
    pub fn to_zpl(&self) -> String {
        format!(
            "~DG{},{},{},{}",
            self.target, self.total_bytes, self.row_bytes, self.body
        )
    }

    /// Find the first `~DG` command in `text`.
    ///
    /// The body runs until the next `^` or `~` command, or the end of text.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let caps = DG_MATCHER
            .captures(text)
            .ok_or_else(|| Error::MalformedField("Could not find a ~DG command".to_string()))?;

        let total_bytes = parse_number(&caps[2], "total byte count")?;
        let row_bytes = parse_number(&caps[3], "row byte count")?;
        debug!(
            "Parsed ~DG {}: total {} bytes, {} bytes per row",
            &caps[1], total_bytes, row_bytes
        );

        Ok(DownloadGraphic {
            target: caps[1].to_string(),
            total_bytes,
            row_bytes,
            body: caps[4].to_string(),
        })
    }
}

impl fmt::Display for DownloadGraphic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_zpl())
    }
}

fn parse_number<T: std::str::FromStr>(value: &str, name: &str) -> Result<T, Error> {
    value
        .parse()
        .map_err(|_| Error::MalformedField(format!("Invalid {}: {:?}", name, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_zpl() {
        let field = GraphicField::new(1, 1, ",".to_string());
        assert_eq!(field.to_zpl(), "^GFA,1,1,1,,^FS");
        assert_eq!(
            field.at(Position::new(10, 20)).to_string(),
            "^FO10,20^GFA,1,1,1,,^FS"
        );
    }

    #[test]
    fn test_parse_round_trip() {
        let field = GraphicField::new(4, 2, "!:".to_string()).at(Position::new(5, 7));
        assert_eq!(GraphicField::parse(&field.to_zpl()).unwrap(), field);

        let field = GraphicField::new(4, 2, "ffff\nffff\n".to_string());
        assert_eq!(GraphicField::parse(&field.to_zpl()).unwrap(), field);
    }

    #[test]
    fn test_parse_inside_label() {
        let text = wrap_label("^FO0,0^GFA,2,4,2,!:^FS");
        assert_eq!(text, "^XA\n^FO0,0^GFA,2,4,2,!:^FS\n^XZ\n");
        let field = GraphicField::parse(&text).unwrap();
        assert_eq!(field.position, Some(Position::new(0, 0)));
        assert_eq!(field.total_bytes, 4);
        assert_eq!(field.row_bytes, 2);
        assert_eq!(field.body, "!:");
    }

    #[test]
    fn test_parse_legacy_length() {
        // Older output repeats the total byte count in the first number.
        let field = GraphicField::parse("^GFA,4,4,2,!:^FS").unwrap();
        assert_eq!(field.body, "!:");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            GraphicField::parse("^XA^FDhello^FS^XZ"),
            Err(Error::MalformedField(_))
        ));
        assert!(matches!(
            GraphicField::parse("^GFA,1,99999999999999999999999,1,,^FS"),
            Err(Error::MalformedField(_))
        ));
        assert!(matches!(
            GraphicField::parse("^GFA,1,1,1,,"),
            Err(Error::MalformedField(_))
        ));
    }

    #[test]
    fn test_parse_keeps_large_numbers() {
        // Geometry limits are enforced by the decoder, not by the framing.
        let field =
            GraphicField::parse("^GFA,1,4611686018427387904,4611686018427387904,,^FS").unwrap();
        assert_eq!(field.total_bytes, 1 << 62);
        assert_eq!(field.row_bytes, 1 << 62);
        assert_eq!(field.body, ",");
    }

    #[test]
    fn test_target_with_drive() {
        assert_eq!(target_with_drive("LOGO.GRF"), "R:LOGO.GRF");
        assert_eq!(target_with_drive("E:LOGO.GRF"), "E:LOGO.GRF");
    }

    #[test]
    fn test_download_graphic() {
        let command = DownloadGraphic::new("LOGO.GRF", 4, 2, "!:".to_string());
        assert_eq!(command.to_zpl(), "~DGR:LOGO.GRF,4,2,!:");
        assert_eq!(DownloadGraphic::parse(&command.to_zpl()).unwrap(), command);

        let parsed = DownloadGraphic::parse("~DGE:A.GRF,2,1,ff\n00\n^XA^XGE:A.GRF^FS^XZ").unwrap();
        assert_eq!(parsed.target, "E:A.GRF");
        assert_eq!(parsed.body, "ff\n00\n");
        assert!(matches!(
            DownloadGraphic::parse("^GFA,1,1,1,,^FS"),
            Err(Error::MalformedField(_))
        ));
    }
}
