//! Directory location and directory section decoding.
//!
//! The last four bytes of the file hold the absolute offset of the directory
//! section. The directory lists every section as (offset, length, type).

use std::ops::Range;

use tracing::debug;

use crate::x3f::common::{ByteReader, Result, X3fError};
use crate::x3f::config::ParserConfig;
use crate::x3f::tags::{self, Tag, Version};

/// Size of one directory entry record.
pub const DIRECTORY_ENTRY_SIZE: usize = 12;

/// Header of the directory section.
#[derive(Debug, Clone, Copy)]
pub struct DirectorySection {
    pub signature: Tag,
    pub version: Version,
    pub entry_count: u32,
}

/// What the directory says a section contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Image,
    PropertyList,
    Calibration,
    Other,
}

impl From<Tag> for SectionKind {
    fn from(tag: Tag) -> Self {
        match tag {
            tags::IMAG | tags::IMA2 => SectionKind::Image,
            tags::PROP => SectionKind::PropertyList,
            tags::CAMF => SectionKind::Calibration,
            _ => SectionKind::Other,
        }
    }
}

/// One directory entry plus the identifier found at its target offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Absolute offset of the section data. Should be 4-byte aligned.
    pub offset: u32,
    pub length: u32,
    pub tag: Tag,
    /// First four bytes of the section itself (e.g. "SECi"). Only used for
    /// per-section validation, never for dispatch.
    pub section_signature: Tag,
}

impl DirectoryEntry {
    pub fn kind(&self) -> SectionKind {
        SectionKind::from(self.tag)
    }

    /// Section byte range, clamped to a buffer of `len` bytes.
    pub fn byte_range(&self, len: usize) -> Range<usize> {
        let start = (self.offset as usize).min(len);
        let end = (self.offset as usize)
            .saturating_add(self.length as usize)
            .min(len);
        start..end
    }
}

/// Reads the trailing directory pointer and moves the reader onto it.
pub fn locate_directory(reader: &mut ByteReader<'_>) -> Result<u32> {
    let len = reader.len();
    reader.seek(len.saturating_sub(4))?;
    let offset = reader.read_u32()?;
    if offset as usize >= len {
        return Err(X3fError::BadDirectoryPointer { offset, len });
    }
    reader.seek(offset as usize)?;
    debug!("Located X3F directory at {:#x}", offset);
    Ok(offset)
}

/// Reads and validates the directory section header at the cursor.
pub fn read_directory_section(
    reader: &mut ByteReader<'_>,
    config: &ParserConfig,
) -> Result<DirectorySection> {
    let signature = Tag(reader.read_u32()?);
    if !config.accepts_directory_signature(signature) {
        return Err(X3fError::UnknownDirectorySignature { found: signature });
    }

    let version = Version(reader.read_u32()?);
    if version < tags::VERSION_2_0 {
        return Err(X3fError::UnsupportedDirectoryVersion(version));
    }

    let entry_count = reader.read_u32()?;
    if entry_count < 1 {
        return Err(X3fError::EmptyDirectory);
    }

    Ok(DirectorySection {
        signature,
        version,
        entry_count,
    })
}

/// Reads one entry record at the cursor, peeking at the section signature it
/// points to. The cursor ends up just past the record.
pub fn read_entry(reader: &mut ByteReader<'_>) -> Result<DirectoryEntry> {
    let offset = reader.read_u32()?;
    let length = reader.read_u32()?;
    let tag = Tag(reader.read_u32()?);

    let mut target = reader.save();
    target.seek(offset as usize)?;
    let section_signature = Tag(target.read_u32()?);

    Ok(DirectoryEntry {
        offset,
        length,
        tag,
        section_signature,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn put(out: &mut Vec<u8>, v: u32) {
        out.extend_from_slice(&v.to_le_bytes());
    }

    #[test]
    fn locate_follows_trailing_pointer() {
        let mut data = vec![0u8; 64];
        data[60..].copy_from_slice(&16u32.to_le_bytes());
        let mut reader = ByteReader::new(&data);
        assert_eq!(locate_directory(&mut reader).unwrap(), 16);
        assert_eq!(reader.position(), 16);
    }

    #[test]
    fn locate_rejects_pointer_past_end() {
        let mut data = vec![0u8; 64];
        data[60..].copy_from_slice(&64u32.to_le_bytes());
        let mut reader = ByteReader::new(&data);
        assert!(matches!(
            locate_directory(&mut reader),
            Err(X3fError::BadDirectoryPointer { offset: 64, len: 64 })
        ));
    }

    #[test]
    fn directory_header_checks_run_in_order() {
        let config = ParserConfig::default();

        let mut data = Vec::new();
        put(&mut data, tags::SECC.0);
        put(&mut data, tags::VERSION_2_0.0);
        put(&mut data, 1);
        let err = read_directory_section(&mut ByteReader::new(&data), &config).unwrap_err();
        assert!(matches!(err, X3fError::UnknownDirectorySignature { found } if found == tags::SECC));

        let mut data = Vec::new();
        put(&mut data, tags::SECD.0);
        put(&mut data, Version::new(1, 9).0);
        put(&mut data, 1);
        let err = read_directory_section(&mut ByteReader::new(&data), &config).unwrap_err();
        assert!(matches!(err, X3fError::UnsupportedDirectoryVersion(_)));

        let mut data = Vec::new();
        put(&mut data, tags::SECD.0);
        put(&mut data, tags::VERSION_2_0.0);
        put(&mut data, 0);
        let err = read_directory_section(&mut ByteReader::new(&data), &config).unwrap_err();
        assert!(matches!(err, X3fError::EmptyDirectory));
    }

    #[test]
    fn secc_directory_accepted_when_configured() {
        let config = ParserConfig::builder()
            .accept_directory_signature(tags::SECC)
            .build();
        let mut data = Vec::new();
        put(&mut data, tags::SECC.0);
        put(&mut data, tags::VERSION_2_0.0);
        put(&mut data, 3);
        let section = read_directory_section(&mut ByteReader::new(&data), &config).unwrap();
        assert_eq!(section.entry_count, 3);
    }

    #[test]
    fn read_entry_peeks_signature_and_keeps_cursor() {
        let mut data = Vec::new();
        put(&mut data, 12);
        put(&mut data, 4);
        put(&mut data, tags::PROP.0);
        put(&mut data, tags::SECP.0);

        let mut reader = ByteReader::new(&data);
        let entry = read_entry(&mut reader).unwrap();
        assert_eq!(reader.position(), DIRECTORY_ENTRY_SIZE);
        assert_eq!(entry.offset, 12);
        assert_eq!(entry.kind(), SectionKind::PropertyList);
        assert_eq!(entry.section_signature, tags::SECP);
        assert_eq!(entry.byte_range(data.len()), 12..16);
    }

    #[test]
    fn entry_pointing_past_end_fails() {
        let mut data = Vec::new();
        put(&mut data, 1000);
        put(&mut data, 4);
        put(&mut data, tags::IMAG.0);
        let mut reader = ByteReader::new(&data);
        assert!(matches!(
            read_entry(&mut reader),
            Err(X3fError::OutOfBoundsRead { .. })
        ));
    }

    #[test]
    fn section_kinds() {
        assert_eq!(SectionKind::from(tags::IMA2), SectionKind::Image);
        assert_eq!(SectionKind::from(tags::CAMF), SectionKind::Calibration);
        assert_eq!(SectionKind::from(tags::SPPA), SectionKind::Other);
    }
}
