use thiserror::Error;

use crate::image_pipeline::msq3::MosaicChannel;

/// Problems building a [`MosaicView`](super::MosaicView). Demosaicing a valid view cannot fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DemosaicError {
    #[error("mosaic buffer holds {got} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, got: usize },

    #[error("mosaic dimensions {width}x{height} are empty or overflow")]
    EmptyImage { width: usize, height: usize },

    #[error("{components} components per pixel cannot hold the {channel} channel")]
    InvalidComponents {
        components: usize,
        channel: MosaicChannel,
    },
}

pub type Result<T> = std::result::Result<T, DemosaicError>;
