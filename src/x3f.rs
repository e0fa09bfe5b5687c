//! X3F container decoding
//!
//! This module parses the container layer of X3F raw files: the versioned
//! file header, the footer-indexed section directory, image section headers,
//! the UTF-16 property table and the calibration section header. Pixel
//! decompression and color processing are left to downstream consumers,
//! which receive byte ranges into the original buffer.

pub mod common;
pub mod config;
pub mod decoder;
pub mod directory;
pub mod header;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod sections;
pub mod tags;

#[cfg(test)]
mod test_support;

pub use common::{
    Result,
    X3fError,
};

pub use config::{
    ParserConfig,
    ParserConfigBuilder,
};

pub use decoder::ContainerDecoder;

pub use directory::{
    DirectoryEntry,
    SectionKind,
};

pub use header::{
    is_x3f,
    ContainerHeader,
};

pub use model::DecodedModel;

pub use parser::{
    parse,
    X3fParser,
};

pub use pipeline::{
    LoadedContainer,
    X3fPipeline,
};

pub use sections::{
    CalibrationHeader,
    ImageDataDescriptor,
    ImageKind,
    PixelEncoding,
    PropertyCollection,
};

pub use tags::{
    Tag,
    Version,
};
