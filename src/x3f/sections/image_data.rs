use tracing::warn;

use crate::x3f::common::{ByteReader, Result};
use crate::x3f::directory::DirectoryEntry;
use crate::x3f::tags::{self, Tag, Version};

/// Size of the fixed image section header.
pub const IMAGE_HEADER_SIZE: usize = 28;

/// How much processing the camera applied to an image section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    ProcessedForPreview,
    Other(u32),
}

impl From<u32> for ImageKind {
    fn from(value: u32) -> Self {
        match value {
            2 => ImageKind::ProcessedForPreview,
            other => ImageKind::Other(other),
        }
    }
}

/// Pixel encoding of an image section payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelEncoding {
    /// Uncompressed 8/8/8 RGB
    UncompressedRgb24,
    /// Huffman-encoded DPCM 8/8/8 RGB
    HuffmanDpcmRgb24,
    /// JPEG-compressed 8/8/8 RGB
    JpegRgb24,
    Reserved(u32),
}

impl From<u32> for PixelEncoding {
    fn from(value: u32) -> Self {
        match value {
            3 => PixelEncoding::UncompressedRgb24,
            11 => PixelEncoding::HuffmanDpcmRgb24,
            18 => PixelEncoding::JpegRgb24,
            other => PixelEncoding::Reserved(other),
        }
    }
}

/// Header of one image section. The pixel payload stays in the file buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDataDescriptor {
    pub signature: Tag,
    pub version: Version,
    pub kind: ImageKind,
    pub encoding: PixelEncoding,
    pub width: u32,
    pub height: u32,
    /// Declared payload size, a multiple of 4. Zero means variable-length
    /// rows and the size is only known after decompression.
    pub data_size: u32,
    pub section_offset: u32,
    pub section_length: u32,
}

impl ImageDataDescriptor {
    pub fn has_variable_length_rows(&self) -> bool {
        self.data_size == 0
    }

    /// Bytes following the header, up to the end of the section as listed in
    /// the directory (clamped to `data`).
    pub fn payload<'a>(&self, data: &'a [u8]) -> Option<&'a [u8]> {
        let start = (self.section_offset as usize).checked_add(IMAGE_HEADER_SIZE)?;
        let end = (self.section_offset as usize)
            .saturating_add(self.section_length as usize)
            .min(data.len());
        data.get(start..end)
    }
}

pub fn decode_image_data(
    reader: &mut ByteReader<'_>,
    entry: &DirectoryEntry,
) -> Result<ImageDataDescriptor> {
    reader.seek(entry.offset as usize)?;

    let signature = Tag(reader.read_u32()?);
    let version = Version(reader.read_u32()?);
    if signature != tags::SECI {
        warn!(
            "Image section at {:#x} has identifier {}, expected {}",
            entry.offset,
            signature,
            tags::SECI
        );
    }

    let kind = ImageKind::from(reader.read_u32()?);
    let encoding = PixelEncoding::from(reader.read_u32()?);
    let width = reader.read_u32()?;
    let height = reader.read_u32()?;
    let data_size = reader.read_u32()?;

    Ok(ImageDataDescriptor {
        signature,
        version,
        kind,
        encoding,
        width,
        height,
        data_size,
        section_offset: entry.offset,
        section_length: entry.length,
    })
}
