//! Image processing pipeline module
//!
//! Separate modules for the MSQ3 container, demosaicing, TIFF output and the bake
//! orchestration that ties them together.

pub mod common;
pub mod conversions;
pub mod debayer;
pub mod metrics;
pub mod mosaicing;
pub mod msq3;
pub mod tiff;

pub use common::{
    ConversionError,
    Result,
};

pub use msq3::{
    DecodeError,
    DecodedMosaicSet,
    MosaicChannel,
    MosaicSetReader,
    Msq3Header,
    Msq3Reader,
};

pub use debayer::{
    Algorithm,
    CpuDebayer,
    DemosaicError,
    MosaicView,
    RgbImage,
};

pub use self::tiff::{
    TiffCompression,
    BakeConfig,
    BakeConfigBuilder,
    RgbImageWriter,
    StandardTiffWriter,
};

pub use conversions::{
    BakeReport,
    BakedImages,
    Msq3BakePipeline,
    PipelineTimings,
};
