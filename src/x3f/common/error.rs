use thiserror::Error;

use crate::x3f::tags::{Tag, Version};

#[derive(Error, Debug)]
pub enum X3fError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("X3F file too small: {len} bytes, need at least {min}")]
    FileTooSmall { len: usize, min: usize },

    #[error("Not an X3F file: signature {found} is not FOVb")]
    BadSignature { found: Tag },

    #[error("Directory pointer {offset:#x} lies outside the {len} byte file")]
    BadDirectoryPointer { offset: u32, len: usize },

    #[error("Unknown X3F directory identifier {found}")]
    UnknownDirectorySignature { found: Tag },

    #[error("X3F directory version {0} older than 2.0 is not supported")]
    UnsupportedDirectoryVersion(Version),

    #[error("X3F directory is empty")]
    EmptyDirectory,

    #[error("Unknown property list identifier {found} at {offset:#x}")]
    UnknownPropertySignature { found: Tag, offset: u32 },

    #[error("Property list version {0} older than 2.0 is not supported")]
    PropertyVersionTooOld(Version),

    #[error("Unsupported property character format {0}, only UTF-16 (0) is known")]
    UnsupportedPropertyEncoding(u32),

    #[error("Unreasonable property count {count}, limit is {limit}")]
    UnreasonablePropertyCount { count: u32, limit: u32 },

    #[error("Read of {len} bytes at {offset:#x} runs past the end of a {size} byte buffer")]
    OutOfBoundsRead { offset: usize, len: usize, size: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, X3fError>;
