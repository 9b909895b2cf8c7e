use tracing::debug;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::msq3::{DecodedMosaicSet, decode};

/// Source of decoded mosaic sets. The pipeline is generic over this so tests can inject data.
pub trait MosaicSetReader {
    fn read_mosaics(&self, data: &[u8]) -> Result<DecodedMosaicSet>;
}

/// Reads MSQ3 containers with the built-in decoder.
pub struct Msq3Reader;

impl MosaicSetReader for Msq3Reader {
    fn read_mosaics(&self, data: &[u8]) -> Result<DecodedMosaicSet> {
        debug!("Decoding MSQ3 container, {} bytes", data.len());
        Ok(decode(data)?)
    }
}
