use std::path::Path;

use tracing::{info, instrument};

use crate::x3f::{
    common::error::{Result, X3fError},
    config::ParserConfig,
    decoder::ContainerDecoder,
    model::DecodedModel,
    parser::X3fParser,
};

/// A container read from disk together with its decoded model. Section
/// payloads are served as slices of the owned bytes.
#[derive(Debug)]
pub struct LoadedContainer {
    data: Vec<u8>,
    model: DecodedModel,
}

impl LoadedContainer {
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn model(&self) -> &DecodedModel {
        &self.model
    }

    pub fn image_payload(&self, index: usize) -> Option<&[u8]> {
        self.model.images().get(index)?.payload(&self.data)
    }

    pub fn calibration_payload(&self) -> Option<&[u8]> {
        self.model.calibration()?.payload(&self.data)
    }

    pub fn into_parts(self) -> (Vec<u8>, DecodedModel) {
        (self.data, self.model)
    }
}

pub struct X3fPipeline<D: ContainerDecoder> {
    decoder: D,
}

impl X3fPipeline<X3fParser> {
    pub fn new(config: ParserConfig) -> Self {
        Self {
            decoder: X3fParser::new(config),
        }
    }
}

impl<D: ContainerDecoder> X3fPipeline<D> {
    pub fn with_custom(decoder: D) -> Self {
        Self { decoder }
    }

    #[instrument(skip(self, input_data), fields(input_size = input_data.len()))]
    pub fn decode(&self, input_data: &[u8]) -> Result<DecodedModel> {
        let model = {
            let _span = tracing::info_span!("decode_container").entered();
            self.decoder.decode(input_data)?
        };

        info!(
            images = model.images().len(),
            properties = model.properties().len(),
            "Decode complete"
        );
        Ok(model)
    }

    #[instrument(skip(self, input_path))]
    pub fn decode_file<P: AsRef<Path>>(&self, input_path: P) -> Result<LoadedContainer> {
        let input_path = input_path.as_ref();

        info!(input = %input_path.display(), "Decoding file");

        let data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                X3fError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        let model = self.decode(&data)?;
        Ok(LoadedContainer { data, model })
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    pub fn set_decoder(&mut self, decoder: D) {
        self.decoder = decoder;
    }
}
