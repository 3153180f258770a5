#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]

mod error;
mod parser;
mod section;
mod util;

use std::char;
use std::io::Read;

pub use crate::error::DecodeError;
pub use crate::parser::Parser;
pub use crate::section::{Config, DEFAULT_SECTION, Section};

/// Byte Order Mark (BOM) is used to signal the endianness of an encoding. The order `0xFF 0xFE`
/// strongly suggests that the encoding is using little-endian byte order.
///
/// <https://en.wikipedia.org/wiki/Byte_order_mark>
const BOM_UTF16_LE: &[u8] = &[0xFF, 0xFE];
const BOM_UTF8: &[u8] = &[0xEF, 0xBB, 0xBF];
const BOM_CHAR: char = '\u{feff}';

/// Decode INI text.
///
/// Returns `Ok(None)` when the text holds no sections and no keys at all (e.g. it is empty or
/// only contains comments), which is distinct from a config with an empty default section.
///
/// # Errors
///
/// Fails on the first section header that is missing its closing `]` or has anything other than
/// a comment after it.
pub fn decode(text: &str) -> Result<Option<Config>, DecodeError> {
    // A UTF-8 BOM survives `fs::read_to_string`; it is not part of the first key.
    let text = text.strip_prefix(BOM_CHAR).unwrap_or(text);
    Parser::new(text).into_config()
}

/// Decode raw bytes, detecting UTF-16 LE or UTF-8 from the byte order mark.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_bytes(buffer: &[u8]) -> Result<Option<Config>, DecodeError> {
    let text = decode_data(buffer);
    decode(&text)
}

/// Read everything from `reader`, then decode it as [`decode_bytes`] does.
///
/// # Errors
///
/// Returns [`DecodeError::ReadFailure`] if reading fails, otherwise see [`decode`].
pub fn from_reader<R: Read>(mut reader: R) -> Result<Option<Config>, DecodeError> {
    let mut buffer = Vec::with_capacity(4096);
    reader
        .read_to_end(&mut buffer)
        .map_err(|source| DecodeError::ReadFailure { source })?;

    decode_bytes(&buffer)
}

fn decode_data(data: &[u8]) -> String {
    if let Some(data) = data.strip_prefix(BOM_UTF16_LE) {
        // Likely UTF-16 LE
        let chunks = data.chunks_exact(2);
        let truncated = !chunks.remainder().is_empty();
        let utf16 = chunks
            .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
            .collect::<Vec<u16>>();

        let mut text = char::decode_utf16(utf16)
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect::<String>();

        // A dangling odd byte is half a code unit.
        if truncated {
            text.push(char::REPLACEMENT_CHARACTER);
        }

        text
    } else {
        let data = data.strip_prefix(BOM_UTF8).unwrap_or(data);
        String::from_utf8_lossy(data).into_owned()
    }
}
