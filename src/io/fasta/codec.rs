//! Record codec: one marker-to-marker byte span into a [`FastaRecord`]
//!
//! # Format
//!
//! A span starts at its '>' marker and runs up to the next marker or the end
//! of the source:
//!
//! ```text
//! >seq1 desc one
//! ACGT
//! ac
//! ```
//!
//! - Header: everything before the first `\n` or `\r`, marker stripped and
//!   trimmed, becomes the description. Its first whitespace-delimited token
//!   is the id.
//! - Body: everything after that terminator. Every byte outside
//!   `[A-Za-z0-9_]` is dropped (line breaks, spaces, but also `-` and `*`),
//!   and the rest is upper-cased.
//!
//! The codec never buffers more than the span it is handed.

use crate::error::{FastaError, Result};
use crate::types::FastaRecord;
use memchr::memchr2;
use std::fmt;
use std::str::FromStr;

/// Record marker byte
pub const MARKER: u8 = b'>';

/// Text encoding applied to every record of a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// 7-bit ASCII (default)
    #[default]
    Ascii,
    /// UTF-8
    Utf8,
    /// ISO-8859-1; every byte maps to the code point of the same value
    Latin1,
}

impl TextEncoding {
    /// Canonical label
    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Ascii => "ascii",
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "latin-1",
        }
    }

    /// Decode `bytes`, or `None` if they are not valid under this encoding
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Ascii => {
                if bytes.is_ascii() {
                    Some(bytes.iter().map(|&b| b as char).collect())
                } else {
                    None
                }
            }
            TextEncoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
            TextEncoding::Latin1 => Some(bytes.iter().map(|&b| b as char).collect()),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextEncoding {
    type Err = FastaError;

    fn from_str(label: &str) -> Result<Self> {
        match label.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "ascii" | "us-ascii" => Ok(TextEncoding::Ascii),
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" => Ok(TextEncoding::Latin1),
            _ => Err(FastaError::UnknownEncoding(label.to_string())),
        }
    }
}

/// Parse one record span
///
/// `offset` is the position of the span within its source and is only used
/// to locate errors.
///
/// # Errors
///
/// - [`FastaError::MalformedRecord`] if the span does not start with '>' or
///   has no line terminator after its header
/// - [`FastaError::Encoding`] if the header is not valid under `encoding`
///
/// # Example
///
/// ```
/// use fastaview::io::fasta::{parse_record, TextEncoding};
///
/// let record = parse_record(b">seq1 desc one\nACGT\nac\n", 0, TextEncoding::Ascii)?;
/// assert_eq!(record.id, "seq1");
/// assert_eq!(record.description, "seq1 desc one");
/// assert_eq!(record.sequence, "ACGTAC");
/// # Ok::<(), fastaview::FastaError>(())
/// ```
pub fn parse_record(bytes: &[u8], offset: usize, encoding: TextEncoding) -> Result<FastaRecord> {
    if bytes.first() != Some(&MARKER) {
        return Err(FastaError::MalformedRecord {
            offset,
            msg: "record does not start with '>'".to_string(),
        });
    }

    let eol = memchr2(b'\n', b'\r', bytes).ok_or_else(|| FastaError::MalformedRecord {
        offset,
        msg: "header has no line terminator".to_string(),
    })?;

    let header = encoding
        .decode(&bytes[1..eol])
        .ok_or(FastaError::Encoding {
            encoding: encoding.name(),
            offset,
        })?;

    // ASCII whitespace only: NBSP and NEL are header text under utf-8/latin-1
    let description = header.trim_matches(|c: char| c.is_ascii_whitespace());
    let id = description
        .split(|c: char| c.is_ascii_whitespace())
        .next()
        .unwrap_or(description)
        .to_string();

    Ok(FastaRecord::new(
        id,
        description.to_string(),
        normalize_sequence(&bytes[eol + 1..]),
    ))
}

/// Drop every non-word byte and upper-case the remainder
///
/// Word bytes are `[A-Za-z0-9_]`; anything else, including non-ASCII bytes,
/// is removed. The result is therefore always ASCII and valid under every
/// [`TextEncoding`].
pub fn normalize_sequence(body: &[u8]) -> String {
    body.iter()
        .copied()
        .filter(|&b| is_word_byte(b))
        .map(|b| b.to_ascii_uppercase() as char)
        .collect()
}

#[inline]
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
