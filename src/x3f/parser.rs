use tracing::{debug, info, instrument, warn};

use crate::x3f::common::{ByteReader, Result};
use crate::x3f::config::ParserConfig;
use crate::x3f::directory::{self, DirectoryEntry, SectionKind};
use crate::x3f::header::decode_header;
use crate::x3f::model::DecodedModel;
use crate::x3f::sections::{decode_calibration, decode_image_data, decode_property_list};

/// X3F container parser.
///
/// Walks header, directory and the image, property and calibration sections
/// of an in-memory file. Parsing is all or nothing: any fatal error aborts and
/// no partial model is returned.
#[derive(Debug, Clone, Default)]
pub struct X3fParser {
    config: ParserConfig,
}

impl X3fParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    #[instrument(skip(self, data), fields(input_size = data.len()))]
    pub fn parse(&self, data: &[u8]) -> Result<DecodedModel> {
        let mut reader = ByteReader::new(data);

        let header = decode_header(&mut reader)?;
        let mut model = DecodedModel::new(header);

        directory::locate_directory(&mut reader)?;
        let section = directory::read_directory_section(&mut reader, &self.config)?;
        debug!(
            "Directory {} v{} with {} entries",
            section.signature, section.version, section.entry_count
        );

        for _ in 0..section.entry_count {
            let entry = directory::read_entry(&mut reader)?;
            {
                let mut cursor = reader.save();
                self.decode_section(&mut cursor, &entry, &mut model)?;
            }
            model.push_entry(entry);
        }

        info!(
            version = %model.header().version,
            images = model.images().len(),
            properties = model.properties().len(),
            calibration = model.calibration().is_some(),
            "Parsed X3F container"
        );
        Ok(model)
    }

    fn decode_section(
        &self,
        reader: &mut ByteReader<'_>,
        entry: &DirectoryEntry,
        model: &mut DecodedModel,
    ) -> Result<()> {
        match entry.kind() {
            SectionKind::Image => {
                let image = decode_image_data(reader, entry)?;
                debug!(
                    "{} section at {:#x}: {}x{} {:?}",
                    entry.tag, entry.offset, image.width, image.height, image.encoding
                );
                model.push_image(image);
            }
            SectionKind::PropertyList => {
                decode_property_list(reader, entry, &self.config, model.properties_mut())?;
            }
            SectionKind::Calibration => {
                let calibration = decode_calibration(reader, entry)?;
                if let Some(previous) = model.set_calibration(calibration) {
                    warn!(
                        "Calibration section at {:#x} replaces the one at {:#x}",
                        entry.offset, previous.section_offset
                    );
                }
            }
            SectionKind::Other => {
                debug!("Ignoring {} section at {:#x}", entry.tag, entry.offset);
            }
        }
        Ok(())
    }
}

/// Parses a whole X3F file held in memory with the default configuration.
pub fn parse(data: &[u8]) -> Result<DecodedModel> {
    X3fParser::default().parse(data)
}
