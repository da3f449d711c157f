//! Run length compression of hex rows.
//!
//! Each row is folded on its own:
//!
//! - runs of one or two digits are written as is, longer runs get a
//!   multiplier from [`crate::alphabet`] (`55555` is written `K5`),
//! - a run of `0` reaching the end of the row becomes `,`,
//! - a run of `f` reaching the end of the row becomes `!`,
//! - a folded row equal to the previous folded row becomes `:`.
//!
//! Rows are concatenated without separators; the decoder finds row
//! boundaries from the row width.

use log::trace;

use crate::{alphabet, error::Error};

/// Compress newline separated hex rows into a field body.
pub fn compress(hex_rows: &str) -> Result<String, Error> {
    let mut result = String::with_capacity(hex_rows.len() / 4);
    let mut last_line: Option<String> = None;

    for row in hex_rows.lines().filter(|row| !row.is_empty()) {
        let line = fold_row(row)?;
        trace!("{} -> {}", row, line);
        if last_line.as_deref() == Some(line.as_str()) {
            result.push(':');
        } else {
            result.push_str(&line);
            last_line = Some(line);
        }
    }

    Ok(result)
}

fn fold_row(row: &str) -> Result<String, Error> {
    let mut line = String::new();
    let mut chars = row.chars();
    let mut prev = match chars.next() {
        Some(ch) => ch,
        None => return Ok(line),
    };
    let mut counter = 1;

    for ch in chars {
        if ch == prev {
            counter += 1;
        } else {
            alphabet::push_run(&mut line, counter, prev)?;
            prev = ch;
            counter = 1;
        }
    }

    match prev {
        '0' => line.push(','),
        'f' | 'F' => line.push('!'),
        _ => alphabet::push_run(&mut line, counter, prev)?,
    }
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_shortcuts() {
        assert_eq!(compress("00\n").unwrap(), ",");
        assert_eq!(compress("ff\n").unwrap(), "!");
        assert_eq!(compress("FFFF\n").unwrap(), "!");
        assert_eq!(compress("a0\n").unwrap(), "a,");
        assert_eq!(compress("0f\n").unwrap(), "0!");
    }

    #[test]
    fn test_row_repeat() {
        assert_eq!(compress("ffff\nffff\n").unwrap(), "!:");
        assert_eq!(compress("1234\n1234\n1234\n0000\n").unwrap(), "1234::,");
    }

    #[test]
    fn test_repeat_compares_folded_rows() {
        // Different rows that fold the same way.
        assert_eq!(compress("a000\na0\n").unwrap(), "a,:");
    }

    #[test]
    fn test_runs() {
        assert_eq!(compress("aabbbc\n").unwrap(), "aaIbc");
        let mut row = "0".repeat(21);
        row.push_str("123");
        assert_eq!(compress(&row).unwrap(), "gG0123");
    }

    #[test]
    fn test_long_runs_are_split() {
        let mut row = "5".repeat(805);
        row.push('1');
        assert_eq!(compress(&row).unwrap(), "z5z5K51");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(compress("").unwrap(), "");
        assert_eq!(compress("\n\n").unwrap(), "");
    }
}
