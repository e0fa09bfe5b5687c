//! UTF-16LE to UTF-8 conversion for property strings.

use byteorder::{ByteOrder, LittleEndian};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf16Error {
    #[error("UTF-16 string ends in an unpaired high surrogate {0:#06x}")]
    TruncatedSurrogatePair(u16),
}

fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

/// Decodes little-endian UTF-16 from `bytes` up to the first zero unit or
/// the end of the slice (an odd trailing byte is ignored).
///
/// Surrogate pairs combine into one code point. A high surrogate as the very
/// last unit fails the whole string: it is the signature of a string cut
/// short. Any other unpaired surrogate becomes U+FFFD.
pub fn try_decode_utf16z(bytes: &[u8]) -> Result<String, Utf16Error> {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(LittleEndian::read_u16)
        .take_while(|&unit| unit != 0)
        .collect();

    if let Some(&last) = units.last() {
        if is_high_surrogate(last) {
            return Err(Utf16Error::TruncatedSurrogatePair(last));
        }
    }

    let mut out = String::with_capacity(units.len() * 4);
    out.extend(
        char::decode_utf16(units.iter().copied())
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER)),
    );
    Ok(out)
}

/// Like [`try_decode_utf16z`], but a failed conversion yields an empty string
/// rather than a partial one.
pub fn decode_utf16z(bytes: &[u8]) -> String {
    try_decode_utf16z(bytes).unwrap_or_else(|e| {
        debug!("Discarding property string: {}", e);
        String::new()
    })
}
