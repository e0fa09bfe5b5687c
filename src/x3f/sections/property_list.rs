//! Property list (PROP) section decoding.
//!
//! Layout: a 24 byte header, `count` pairs of (name offset, value offset),
//! then the character data. Offsets count UTF-16 code units from the start
//! of the character data and need not be in any order.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, warn};

use crate::x3f::common::{ByteReader, Result, X3fError};
use crate::x3f::config::ParserConfig;
use crate::x3f::directory::DirectoryEntry;
use crate::x3f::sections::utf16::decode_utf16z;
use crate::x3f::tags::{self, Tag, Version};

pub const PROPERTY_HEADER_SIZE: usize = 24;
pub const PROPERTY_ENTRY_SIZE: usize = 8;

/// Character format code for 16-bit Unicode, the only one defined.
pub const CHAR_FORMAT_UTF16: u32 = 0;

/// Name/value pairs collected from every property list in a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyCollection {
    entries: HashMap<String, String>,
}

impl PropertyCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a property, replacing and returning any earlier value.
    pub fn insert(&mut self, name: String, value: String) -> Option<String> {
        self.entries.insert(name, value)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PropertyListHeader {
    pub signature: Tag,
    pub version: Version,
    pub count: u32,
    pub format: u32,
    pub reserved: u32,
    /// Total length of the character data, in UTF-16 code units.
    pub length: u32,
}

/// Why a single property entry was dropped.
#[derive(Error, Debug)]
enum PropertyEntryError {
    #[error("{field} offset {offset} points outside the character data")]
    OffsetOutOfBounds { field: &'static str, offset: u32 },
    #[error(transparent)]
    Read(#[from] X3fError),
}

fn read_header(reader: &mut ByteReader<'_>) -> Result<PropertyListHeader> {
    Ok(PropertyListHeader {
        signature: Tag(reader.read_u32()?),
        version: Version(reader.read_u32()?),
        count: reader.read_u32()?,
        format: reader.read_u32()?,
        reserved: reader.read_u32()?,
        length: reader.read_u32()?,
    })
}

/// Decodes the property list referenced by `entry` into `properties`.
/// Returns how many properties were stored.
pub fn decode_property_list(
    reader: &mut ByteReader<'_>,
    entry: &DirectoryEntry,
    config: &ParserConfig,
    properties: &mut PropertyCollection,
) -> Result<usize> {
    reader.seek(entry.offset as usize)?;
    let header = read_header(reader)?;

    if header.signature != tags::SECP {
        return Err(X3fError::UnknownPropertySignature {
            found: header.signature,
            offset: entry.offset,
        });
    }
    if header.version < tags::VERSION_2_0 {
        return Err(X3fError::PropertyVersionTooOld(header.version));
    }
    if header.format != CHAR_FORMAT_UTF16 {
        return Err(X3fError::UnsupportedPropertyEncoding(header.format));
    }
    if header.count == 0 {
        debug!("Empty property list at {:#x}", entry.offset);
        return Ok(0);
    }
    if header.count > config.max_property_count {
        return Err(X3fError::UnreasonablePropertyCount {
            count: header.count,
            limit: config.max_property_count,
        });
    }

    let data_start = reader.position() + header.count as usize * PROPERTY_ENTRY_SIZE;
    let data_end = data_start
        .saturating_add((header.length as usize).saturating_mul(2))
        .min(reader.len());

    let mut stored = 0;
    for index in 0..header.count {
        let name_offset = reader.read_u32()?;
        let value_offset = reader.read_u32()?;

        match decode_entry(reader, data_start, data_end, name_offset, value_offset) {
            Ok((name, value)) => {
                properties.insert(name, value);
                stored += 1;
            }
            Err(e) => warn!("Skipping property entry {}: {}", index, e),
        }
    }

    debug!(
        "Property list at {:#x}: {} of {} entries stored",
        entry.offset, stored, header.count
    );
    Ok(stored)
}

fn decode_entry(
    reader: &mut ByteReader<'_>,
    data_start: usize,
    data_end: usize,
    name_offset: u32,
    value_offset: u32,
) -> std::result::Result<(String, String), PropertyEntryError> {
    let name_at = char_position(data_start, data_end, "name", name_offset)?;
    let value_at = char_position(data_start, data_end, "value", value_offset)?;

    let mut cursor = reader.save();
    cursor.seek(name_at)?;
    let name = decode_utf16z(cursor.read_bytes(data_end - name_at)?);
    cursor.seek(value_at)?;
    let value = decode_utf16z(cursor.read_bytes(data_end - value_at)?);

    Ok((name, value))
}

/// Absolute position of a string, provided at least one code unit fits.
fn char_position(
    data_start: usize,
    data_end: usize,
    field: &'static str,
    offset: u32,
) -> std::result::Result<usize, PropertyEntryError> {
    (offset as usize)
        .checked_mul(2)
        .and_then(|bytes| data_start.checked_add(bytes))
        .filter(|&at| at.checked_add(2).is_some_and(|end| end <= data_end))
        .ok_or(PropertyEntryError::OffsetOutOfBounds { field, offset })
}
