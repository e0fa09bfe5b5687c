use crate::x3f::common::{ByteReader, Result};
use crate::x3f::directory::DirectoryEntry;
use crate::x3f::tags::{Tag, Version};

/// Signature, version, CAMF type and four header words.
pub const CALIBRATION_HEADER_SIZE: usize = 28;

/// Fixed header of the calibration (CAMF) section. The meaning of `values`
/// depends on `camf_type`; interpreting them, and the payload that follows,
/// is up to the consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalibrationHeader {
    pub signature: Tag,
    pub version: Version,
    pub camf_type: u32,
    pub values: [u32; 4],
    pub section_offset: u32,
    pub section_length: u32,
}

impl CalibrationHeader {
    pub fn payload<'a>(&self, data: &'a [u8]) -> Option<&'a [u8]> {
        let start = (self.section_offset as usize).checked_add(CALIBRATION_HEADER_SIZE)?;
        let end = (self.section_offset as usize)
            .saturating_add(self.section_length as usize)
            .min(data.len());
        data.get(start..end)
    }
}

pub fn decode_calibration(
    reader: &mut ByteReader<'_>,
    entry: &DirectoryEntry,
) -> Result<CalibrationHeader> {
    reader.seek(entry.offset as usize)?;

    let signature = Tag(reader.read_u32()?);
    let version = Version(reader.read_u32()?);
    let camf_type = reader.read_u32()?;
    let mut values = [0u32; 4];
    for value in values.iter_mut() {
        *value = reader.read_u32()?;
    }

    Ok(CalibrationHeader {
        signature,
        version,
        camf_type,
        values,
        section_offset: entry.offset,
        section_length: entry.length,
    })
}
