//! TIFF writing module
//!
//! Writes reconstructed images with the configured compression, and reads 8-bit mosaic
//! planes for packing.

mod writer;
mod standard_tiff_writer;
pub mod types;

pub use writer::RgbImageWriter;
pub use standard_tiff_writer::{StandardTiffWriter, read_gray8_tiff, read_rgb8_tiff};
pub use types::{TiffCompression, BakeConfig, BakeConfigBuilder};
