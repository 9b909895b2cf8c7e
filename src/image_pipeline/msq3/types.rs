//! MSQ3 container types

use std::fmt;

/// Magic identifier at offset 0.
pub const MAGIC: [u8; 4] = *b"MSQ3";
/// The only container version this crate reads and writes.
pub const CURRENT_VERSION: u8 = 1;
/// Fixed header length: magic, version, width, height, quality.
pub const HEADER_SIZE: usize = 14;
/// Hard cap on either dimension.
pub const MAX_DIMENSION: u32 = 16384;
/// Size of each channel block's little-endian length prefix.
pub const CHANNEL_LENGTH_SIZE: usize = 4;

/// Which of the three stored mosaics a buffer is.
///
/// This names the container slot, not an output colour: every mosaic is reconstructed to a
/// full RGB image on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MosaicChannel {
    R,
    G,
    B,
}

impl MosaicChannel {
    /// Storage order inside the container.
    pub const ALL: [MosaicChannel; 3] = [MosaicChannel::R, MosaicChannel::G, MosaicChannel::B];

    /// Component offset of this channel inside an interleaved RGB(A) pixel.
    pub fn offset(self) -> usize {
        match self {
            MosaicChannel::R => 0,
            MosaicChannel::G => 1,
            MosaicChannel::B => 2,
        }
    }

    /// 1-based image number used for baked output names (`_Image1` is the R mosaic).
    pub fn image_number(self) -> usize {
        self.offset() + 1
    }
}

impl fmt::Display for MosaicChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MosaicChannel::R => f.write_str("R"),
            MosaicChannel::G => f.write_str("G"),
            MosaicChannel::B => f.write_str("B"),
        }
    }
}

/// Fixed-size header fields, available without reading the channel blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Msq3Header {
    pub version: u8,
    pub width: u32,
    pub height: u32,
    /// Encoder quality, 0-100 by convention. Not range checked.
    pub quality: u8,
}

/// A fully decoded MSQ3 container.
///
/// Only [`decode`](super::decode) hands these out for untrusted input, so a value obtained
/// from it always has non-zero dimensions within [`MAX_DIMENSION`] and three non-empty
/// channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMosaicSet {
    pub width: u32,
    pub height: u32,
    pub quality: u8,
    pub channel_r: Vec<u8>,
    pub channel_g: Vec<u8>,
    pub channel_b: Vec<u8>,
}

impl DecodedMosaicSet {
    pub fn channel(&self, channel: MosaicChannel) -> &[u8] {
        match channel {
            MosaicChannel::R => &self.channel_r,
            MosaicChannel::G => &self.channel_g,
            MosaicChannel::B => &self.channel_b,
        }
    }

    /// Number of pixels a raw one-byte-per-pixel mosaic of this size holds.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn header(&self) -> Msq3Header {
        Msq3Header {
            version: CURRENT_VERSION,
            width: self.width,
            height: self.height,
            quality: self.quality,
        }
    }
}
