use crate::x3f::common::error::Result;
use crate::x3f::model::DecodedModel;
use crate::x3f::parser::X3fParser;

pub trait ContainerDecoder {
    fn decode(&self, data: &[u8]) -> Result<DecodedModel>;
}

impl ContainerDecoder for X3fParser {
    fn decode(&self, data: &[u8]) -> Result<DecodedModel> {
        self.parse(data)
    }
}
