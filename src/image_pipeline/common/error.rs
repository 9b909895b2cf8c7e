use thiserror::Error;

use crate::image_pipeline::debayer::DemosaicError;
use crate::image_pipeline::msq3::{DecodeError, MosaicChannel};

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode MSQ3 container: {0}")]
    DecodeError(#[from] DecodeError),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("Invalid mosaic: {0}")]
    MosaicError(#[from] DemosaicError),

    #[error("{channel} channel holds {got} bytes, a {width}x{height} mosaic needs {expected}")]
    ChannelSizeMismatch {
        channel: MosaicChannel,
        width: u32,
        height: u32,
        expected: usize,
        got: usize,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
