//! Reading a chat export into memory as text.
//!
//! Exports are UTF-8 in practice, sometimes with a leading byte-order mark.
//! Older desktop tools occasionally save them as UTF-16 with a BOM, which is
//! the only retry made when UTF-8 decoding fails.

use std::fs;
use std::path::Path;

use crate::error::{ChatlensError, DecodeErrorKind, Result};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Reads a whole file and decodes it to a `String`.
///
/// # Errors
///
/// Returns [`ChatlensError::Io`] if the file cannot be read and
/// [`ChatlensError::Decode`] if its content is neither UTF-8 nor
/// BOM-marked UTF-16.
pub fn read_chat_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    decode_bytes(&bytes).map_err(|kind| ChatlensError::decode(kind, Some(path.to_path_buf())))
}

/// Decodes raw bytes: UTF-8 first, then UTF-16 if the input starts with a UTF-16 BOM.
///
/// A leading BOM is never part of the returned text.
pub fn decode_bytes(bytes: &[u8]) -> std::result::Result<String, DecodeErrorKind> {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(body) {
        Ok(text) => Ok(text.to_owned()),
        Err(utf8_err) => {
            if let Some(rest) = bytes.strip_prefix(UTF16_LE_BOM) {
                tracing::warn!("input is not UTF-8, decoding as UTF-16LE");
                decode_utf16(rest, u16::from_le_bytes)
            } else if let Some(rest) = bytes.strip_prefix(UTF16_BE_BOM) {
                tracing::warn!("input is not UTF-8, decoding as UTF-16BE");
                decode_utf16(rest, u16::from_be_bytes)
            } else {
                Err(DecodeErrorKind::Utf8(utf8_err))
            }
        }
    }
}

fn decode_utf16(
    bytes: &[u8],
    to_unit: fn([u8; 2]) -> u16,
) -> std::result::Result<String, DecodeErrorKind> {
    if bytes.len() % 2 != 0 {
        return Err(DecodeErrorKind::TruncatedUtf16 {
            len: bytes.len() + 2,
        });
    }

    let units = bytes.chunks_exact(2).map(|pair| to_unit([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(DecodeErrorKind::from)
}
