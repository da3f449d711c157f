//! Run length multiplier alphabet.
//!
//! ZPL expresses repeat counts with letters placed in front of the repeated
//! hex digit:
//!
//! ```text
//!  G H I ... Y      1, 2, 3 ... 19
//!  g h i ... z     20, 40, 60 ... 400
//! ```
//!
//! Counts above 20 that are not a multiple of 20 use two letters, the
//! multiple of 20 first (`21` is `gG`). Letters that follow each other are
//! summed by the decoder.

use std::fmt;

use crate::error::Error;

/// Largest count a single token can carry.
pub const MAX_COUNT: usize = 400;

const fn build_encode_table() -> [u8; MAX_COUNT + 1] {
    let mut table = [0u8; MAX_COUNT + 1];
    let mut i = 1;
    while i < 20 {
        table[i] = b'F' + i as u8;
        i += 1;
    }
    let mut k = 1;
    while k <= 20 {
        table[k * 20] = b'f' + k as u8;
        k += 1;
    }
    table
}

const fn build_decode_table() -> [u16; 128] {
    let mut table = [0u16; 128];
    let mut i = 1;
    while i < 20 {
        table[(b'F' + i as u8) as usize] = i as u16;
        i += 1;
    }
    let mut k = 1;
    while k <= 20 {
        table[(b'f' + k as u8) as usize] = (k * 20) as u16;
        k += 1;
    }
    table
}

/// count -> letter, `0` where the count has no letter of its own.
static ENCODE: [u8; MAX_COUNT + 1] = build_encode_table();

/// ASCII -> count, `0` for characters outside of the alphabet.
static DECODE: [u16; 128] = build_decode_table();

/// Multiplier token of one or two letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Multiplier {
    codes: [u8; 2],
    len: usize,
}

impl Multiplier {
    pub fn as_str(&self) -> &str {
        // Table entries are ASCII letters.
        std::str::from_utf8(&self.codes[..self.len]).unwrap_or_default()
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Multiplier letters for `count`.
///
/// Fails with [`Error::AlphabetOverflow`] outside of `1..=400`.
pub fn encode_count(count: usize) -> Result<Multiplier, Error> {
    if count == 0 || count > MAX_COUNT {
        return Err(Error::AlphabetOverflow(count));
    }

    let single = ENCODE[count];
    if single != 0 {
        return Ok(Multiplier {
            codes: [single, 0],
            len: 1,
        });
    }

    let rest = count % 20;
    Ok(Multiplier {
        codes: [ENCODE[count - rest], ENCODE[rest]],
        len: 2,
    })
}

/// Count carried by a single multiplier letter.
pub fn decode_token(ch: char) -> Option<usize> {
    if !ch.is_ascii() {
        return None;
    }
    match DECODE[ch as usize] {
        0 => None,
        n => Some(n as usize),
    }
}

/// Sum of a sequence of multiplier letters, `None` if any character is not
/// a multiplier or the sequence is empty.
pub fn decode_multiplier(token: &str) -> Option<usize> {
    if token.is_empty() {
        return None;
    }
    token.chars().map(decode_token).sum()
}

/// Append the tokens for a run of `count` copies of `ch`.
///
/// A single character is written as is, two as a pair. Longer runs get a
/// multiplier; runs over [`MAX_COUNT`] are written as several tokens.
pub fn push_run(out: &mut String, count: usize, ch: char) -> Result<(), Error> {
    let mut left = count;
    while left > 0 {
        let chunk = left.min(MAX_COUNT);
        match chunk {
            1 => out.push(ch),
            2 => {
                out.push(ch);
                out.push(ch);
            }
            n => {
                out.push_str(encode_count(n)?.as_str());
                out.push(ch);
            }
        }
        left -= chunk;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_letters() {
        assert_eq!(encode_count(1).unwrap().as_str(), "G");
        assert_eq!(encode_count(19).unwrap().as_str(), "Y");
        assert_eq!(encode_count(20).unwrap().as_str(), "g");
        assert_eq!(encode_count(400).unwrap().as_str(), "z");
    }

    #[test]
    fn test_split_letters() {
        assert_eq!(encode_count(21).unwrap().as_str(), "gG");
        assert_eq!(encode_count(399).unwrap().to_string(), "yY");
        assert_eq!(encode_count(45).unwrap().as_str(), "hK");
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(encode_count(0), Err(Error::AlphabetOverflow(0)));
        assert_eq!(encode_count(401), Err(Error::AlphabetOverflow(401)));
    }

    #[test]
    fn test_bijection() {
        for count in 1..=MAX_COUNT {
            let token = encode_count(count).unwrap();
            assert_eq!(decode_multiplier(token.as_str()), Some(count), "{}", token);
        }
    }

    #[test]
    fn test_decode_rejects_data() {
        for ch in "0123456789abcdefABCDEF,!:".chars() {
            assert_eq!(decode_token(ch), None, "{}", ch);
        }
        assert_eq!(decode_token('é'), None);
        assert_eq!(decode_multiplier(""), None);
        assert_eq!(decode_multiplier("g0"), None);
    }

    #[test]
    fn test_push_run() {
        let mut out = String::new();
        push_run(&mut out, 1, 'a').unwrap();
        push_run(&mut out, 2, 'b').unwrap();
        push_run(&mut out, 3, 'c').unwrap();
        assert_eq!(out, "abbIc");

        let mut out = String::new();
        push_run(&mut out, 401, '0').unwrap();
        assert_eq!(out, "z00");

        let mut out = String::new();
        push_run(&mut out, 845, '1').unwrap();
        assert_eq!(out, "z1z1hK1");
    }
}
