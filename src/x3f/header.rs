//! File header decoding.
//!
//! The header layout grew over the format's lifetime:
//!
//! | version | fields after signature/version                              |
//! |---------|-------------------------------------------------------------|
//! | 2.0     | unique id, mark bits, columns, rows, rotation                |
//! | 2.1-2.2 | + white balance label, 32 extended types/values            |
//! | 2.3     | + color mode label                                          |
//! | 3.0     | extended arrays grow to 64 entries                           |
//! | 4.x     | layout unknown, nothing past the version is read            |

use tracing::debug;

use crate::x3f::common::{ByteReader, Result, X3fError};
use crate::x3f::tags::{self, Tag, Version};

/// Smallest file accepted: the 104-byte fixed header plus 128 bytes of
/// extended data.
pub const MIN_FILE_SIZE: usize = 104 + 128;

pub const SIZE_UNIQUE_IDENTIFIER: usize = 16;
pub const SIZE_WHITE_BALANCE: usize = 32;
pub const SIZE_COLOR_MODE: usize = 32;
pub const NUM_EXT_DATA_2_1: usize = 32;
pub const NUM_EXT_DATA_3_0: usize = 64;

/// Decoded file header.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerHeader {
    pub signature: Tag,
    pub version: Version,
    /// Everything past the version. `None` for 4.x files.
    pub fields: Option<HeaderFields>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderFields {
    /// Built by the camera from serial number and timestamps. Not a UUID.
    pub unique_identifier: [u8; SIZE_UNIQUE_IDENTIFIER],
    pub mark_bits: u32,
    /// Output size the user expects, before rotation.
    pub columns: u32,
    pub rows: u32,
    /// Degrees clockwise from normal camera orientation.
    pub rotation: u32,
    pub white_balance: Option<[u8; SIZE_WHITE_BALANCE]>,
    pub color_mode: Option<[u8; SIZE_COLOR_MODE]>,
    pub extended: Option<ExtendedData>,
}

/// Extended header data, one type byte per value.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtendedData {
    pub types: Vec<u8>,
    pub values: Vec<f32>,
}

impl ContainerHeader {
    pub fn columns(&self) -> Option<u32> {
        self.fields.as_ref().map(|f| f.columns)
    }

    pub fn rows(&self) -> Option<u32> {
        self.fields.as_ref().map(|f| f.rows)
    }

    pub fn rotation_degrees(&self) -> Option<u32> {
        self.fields.as_ref().map(|f| f.rotation)
    }

    pub fn white_balance(&self) -> Option<String> {
        self.fields
            .as_ref()
            .and_then(|f| f.white_balance.as_ref())
            .map(|label| ascii_label(label))
    }

    pub fn color_mode(&self) -> Option<String> {
        self.fields
            .as_ref()
            .and_then(|f| f.color_mode.as_ref())
            .map(|label| ascii_label(label))
    }

    pub fn extended(&self) -> Option<&ExtendedData> {
        self.fields.as_ref().and_then(|f| f.extended.as_ref())
    }
}

/// Quick check for the "FOVb" magic, without parsing anything else.
pub fn is_x3f(data: &[u8]) -> bool {
    data.get(..4)
        .is_some_and(|magic| magic == tags::FOVB.to_bytes().as_slice())
}

/// Decodes the header from the start of the buffer, leaving the reader just
/// past the last field that exists for the file's version.
pub fn decode_header(reader: &mut ByteReader<'_>) -> Result<ContainerHeader> {
    if reader.len() < MIN_FILE_SIZE {
        return Err(X3fError::FileTooSmall {
            len: reader.len(),
            min: MIN_FILE_SIZE,
        });
    }
    reader.seek(0)?;

    let signature = Tag(reader.read_u32()?);
    if signature != tags::FOVB {
        return Err(X3fError::BadSignature { found: signature });
    }
    let version = Version(reader.read_u32()?);
    debug!(%version, "X3F header");

    if version >= tags::VERSION_4_0 {
        return Ok(ContainerHeader {
            signature,
            version,
            fields: None,
        });
    }

    let unique_identifier = reader.read_array::<SIZE_UNIQUE_IDENTIFIER>()?;
    let mark_bits = reader.read_u32()?;
    let columns = reader.read_u32()?;
    let rows = reader.read_u32()?;
    let rotation = reader.read_u32()?;

    let mut fields = HeaderFields {
        unique_identifier,
        mark_bits,
        columns,
        rows,
        rotation,
        white_balance: None,
        color_mode: None,
        extended: None,
    };

    if version >= tags::VERSION_2_1 {
        fields.white_balance = Some(reader.read_array::<SIZE_WHITE_BALANCE>()?);
        if version >= tags::VERSION_2_3 {
            fields.color_mode = Some(reader.read_array::<SIZE_COLOR_MODE>()?);
        }

        let num_ext_data = if version >= tags::VERSION_3_0 {
            NUM_EXT_DATA_3_0
        } else {
            NUM_EXT_DATA_2_1
        };
        let types = reader.read_bytes(num_ext_data)?.to_vec();
        let values = (0..num_ext_data)
            .map(|_| reader.read_f32())
            .collect::<Result<Vec<f32>>>()?;
        fields.extended = Some(ExtendedData { types, values });
    }

    Ok(ContainerHeader {
        signature,
        version,
        fields: Some(fields),
    })
}

fn ascii_label(raw: &[u8]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).into_owned()
}
