//! Decoding of MSQ3 containers and Bayer CFA demosaicing.
//!
//! An MSQ3 file stores three independent Bayer mosaics. [`image_pipeline::msq3`] turns the
//! container bytes into a [`image_pipeline::DecodedMosaicSet`], and
//! [`image_pipeline::debayer`] reconstructs a full RGBA image from each mosaic.

pub mod image_pipeline;
pub mod logger;
