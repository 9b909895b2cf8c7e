//! MSQ3 container format
//!
//! A 14-byte header followed by three length-prefixed raw Bayer mosaics.

mod decoder;
mod encoder;
mod error;
mod reader;
pub mod types;

pub use decoder::{decode, is_container, read_header};
pub use encoder::encode;
pub use error::DecodeError;
pub use reader::{MosaicSetReader, Msq3Reader};
pub use types::{DecodedMosaicSet, MAX_DIMENSION, MosaicChannel, Msq3Header};
