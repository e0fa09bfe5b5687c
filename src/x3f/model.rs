//! Decoded container model

use crate::x3f::directory::DirectoryEntry;
use crate::x3f::header::ContainerHeader;
use crate::x3f::sections::{CalibrationHeader, ImageDataDescriptor, ImageKind, PropertyCollection};

/// Everything the parser extracts from one file. Byte payloads are not
/// copied; descriptors carry offsets into the original buffer.
#[derive(Debug, Clone)]
pub struct DecodedModel {
    header: ContainerHeader,
    directory: Vec<DirectoryEntry>,
    images: Vec<ImageDataDescriptor>,
    properties: PropertyCollection,
    calibration: Option<CalibrationHeader>,
}

impl DecodedModel {
    pub(crate) fn new(header: ContainerHeader) -> Self {
        Self {
            header,
            directory: Vec::new(),
            images: Vec::new(),
            properties: PropertyCollection::new(),
            calibration: None,
        }
    }

    pub(crate) fn push_entry(&mut self, entry: DirectoryEntry) {
        self.directory.push(entry);
    }

    pub(crate) fn push_image(&mut self, image: ImageDataDescriptor) {
        self.images.push(image);
    }

    pub(crate) fn properties_mut(&mut self) -> &mut PropertyCollection {
        &mut self.properties
    }

    /// Stores the calibration header, returning the one it replaces.
    pub(crate) fn set_calibration(
        &mut self,
        calibration: CalibrationHeader,
    ) -> Option<CalibrationHeader> {
        self.calibration.replace(calibration)
    }

    pub fn header(&self) -> &ContainerHeader {
        &self.header
    }

    /// Every directory entry in file order, including ignored section types.
    pub fn directory(&self) -> &[DirectoryEntry] {
        &self.directory
    }

    /// Image sections in directory order.
    pub fn images(&self) -> &[ImageDataDescriptor] {
        &self.images
    }

    pub fn first_image_of_kind(&self, kind: ImageKind) -> Option<&ImageDataDescriptor> {
        self.images.iter().find(|image| image.kind == kind)
    }

    pub fn properties(&self) -> &PropertyCollection {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name)
    }

    pub fn calibration(&self) -> Option<&CalibrationHeader> {
        self.calibration.as_ref()
    }
}
