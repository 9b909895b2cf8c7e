use thiserror::Error;

use super::types::MosaicChannel;

/// Reasons an MSQ3 container is rejected. All of them are terminal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("MSQ3 data too small: {len} bytes, header needs 14")]
    TooSmall { len: usize },

    #[error("invalid MSQ3 magic bytes: {found:?}")]
    BadMagic { found: [u8; 4] },

    #[error("unsupported MSQ3 version {0}, expected 1")]
    UnsupportedVersion(u8),

    #[error("invalid MSQ3 dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("unexpected end of data reading {channel} channel length at offset {offset}")]
    TruncatedChannelHeader { channel: MosaicChannel, offset: usize },

    #[error("{channel} channel declares {declared} bytes but only {remaining} remain")]
    TruncatedChannelData {
        channel: MosaicChannel,
        declared: u32,
        remaining: usize,
    },

    #[error("{0} channel is empty")]
    EmptyChannel(MosaicChannel),
}

pub type Result<T> = std::result::Result<T, DecodeError>;
