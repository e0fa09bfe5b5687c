//! Type tags and format versions used by X3F containers.
//!
//! Every identifier in the format is four ASCII characters stored as a
//! little-endian `u32`, so "FOVb" on disk reads back as `0x62564f46`.

use std::fmt;

/// A four character section or entry identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag(pub u32);

impl Tag {
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Tag(u32::from_le_bytes(bytes))
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.to_bytes() {
            if b.is_ascii_graphic() {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{:02x}", b)?;
            }
        }
        Ok(())
    }
}

/// File type identifier at offset 0.
pub const FOVB: Tag = Tag::from_bytes(*b"FOVb");

/// Directory section identifier.
pub const SECD: Tag = Tag::from_bytes(*b"SECd");

/// Property directory entry type and property section identifier.
pub const PROP: Tag = Tag::from_bytes(*b"PROP");
pub const SECP: Tag = Tag::from_bytes(*b"SECp");

/// Image directory entry types and image section identifier.
/// Readers treat IMA2 exactly like IMAG.
pub const IMAG: Tag = Tag::from_bytes(*b"IMAG");
pub const IMA2: Tag = Tag::from_bytes(*b"IMA2");
pub const SECI: Tag = Tag::from_bytes(*b"SECi");

/// Calibration directory entry type and calibration section identifier.
pub const CAMF: Tag = Tag::from_bytes(*b"CAMF");
pub const SECC: Tag = Tag::from_bytes(*b"SECc");

/// Entry identifiers inside a calibration payload.
pub const CMBP: Tag = Tag::from_bytes(*b"CMbP");
pub const CMBT: Tag = Tag::from_bytes(*b"CMbT");
pub const CMBM: Tag = Tag::from_bytes(*b"CMbM");
pub const CMB: Tag = Tag::from_bytes(*b"CMb\0");

/// Sections written by later bodies. Recognized, never decoded.
pub const SPPA: Tag = Tag::from_bytes(*b"SPPA");
pub const SECS: Tag = Tag::from_bytes(*b"SECs");

/// A packed `major << 16 | minor` format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(pub u32);

impl Version {
    pub const fn new(major: u16, minor: u16) -> Self {
        Version(((major as u32) << 16) | minor as u32)
    }

    pub const fn major(self) -> u16 {
        (self.0 >> 16) as u16
    }

    pub const fn minor(self) -> u16 {
        (self.0 & 0xFFFF) as u16
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major(), self.minor())
    }
}

pub const VERSION_2_0: Version = Version::new(2, 0);
pub const VERSION_2_1: Version = Version::new(2, 1);
pub const VERSION_2_2: Version = Version::new(2, 2);
pub const VERSION_2_3: Version = Version::new(2, 3);
pub const VERSION_3_0: Version = Version::new(3, 0);
pub const VERSION_4_0: Version = Version::new(4, 0);
pub const VERSION_4_1: Version = Version::new(4, 1);
