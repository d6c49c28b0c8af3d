//! Reading frames from a textual capture.
use std::fmt;

/// A line of the capture that is not a hex encoded frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// A character other than a hex digit, whitespace or colon.
    BadDigit { line: usize, column: usize },
    /// The line ended in the middle of an octet.
    OddDigits { line: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::BadDigit { line, column } =>
                write!(f, "line {}, column {}: not a hex digit", line, column),
            Error::OddDigits { line } =>
                write!(f, "line {}: odd number of hex digits", line),
        }
    }
}

impl std::error::Error for Error { }

/// Decode every frame of a hex capture.
///
/// Lines and columns are numbered from 1, columns count characters of the line as written.
pub fn parse_hex(text: &str) -> Result<Vec<Vec<u8>>, Error> {
    let mut frames = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let content = line.trim();
        if content.is_empty() || content.starts_with('#') {
            continue;
        }

        frames.push(parse_line(idx + 1, line)?);
    }

    Ok(frames)
}

fn parse_line(line: usize, text: &str) -> Result<Vec<u8>, Error> {
    let mut digits = String::with_capacity(text.len());
    let mut columns = Vec::with_capacity(text.len());

    for (column, ch) in text.chars().enumerate() {
        if ch.is_whitespace() || ch == ':' {
            continue;
        }

        // Only ascii reaches the decoder, so its byte index is a digit index.
        if !ch.is_ascii() {
            return Err(Error::BadDigit { line, column: column + 1 });
        }

        digits.push(ch);
        columns.push(column + 1);
    }

    hex::decode(&digits).map_err(|err| match err {
        hex::FromHexError::InvalidHexCharacter { index, .. } =>
            Error::BadDigit { line, column: columns[index] },
        hex::FromHexError::OddLength
        | hex::FromHexError::InvalidStringLength => Error::OddDigits { line },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_per_line() {
        let text = "# captured\n00 01 02\n\n  ff:FE:0a  \n";
        let frames = parse_hex(text).unwrap();
        assert_eq!(frames, vec![vec![0x00, 0x01, 0x02], vec![0xff, 0xfe, 0x0a]]);
    }

    #[test]
    fn bad_input() {
        assert_eq!(parse_hex("0011\n00g1"), Err(Error::BadDigit { line: 2, column: 3 }));
        assert_eq!(parse_hex("001"), Err(Error::OddDigits { line: 1 }));
    }

    #[test]
    fn columns_count_characters() {
        // A no-break space is two octets in utf-8 but a single column.
        assert_eq!(parse_hex("00\u{a0}0g"), Err(Error::BadDigit { line: 1, column: 5 }));
        assert_eq!(parse_hex("00 00\n  0g"), Err(Error::BadDigit { line: 2, column: 4 }));
        assert_eq!(parse_hex("0\u{e9}"), Err(Error::BadDigit { line: 1, column: 2 }));
        assert_eq!(parse_hex("\u{a0}de:ad"), Ok(vec![vec![0xde, 0xad]]));
    }

    #[test]
    fn payload_encoding() {
        let frames = parse_hex("DE AD 01").unwrap();
        assert_eq!(hex::encode(&frames[0]), "dead01");
    }
}
