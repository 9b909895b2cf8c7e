//! Types for debayering operations

use std::fmt;
use std::str::FromStr;

use crate::image_pipeline::debayer::error::{DemosaicError, Result};
use crate::image_pipeline::msq3::MosaicChannel;

/// Reconstruction kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// 3x3 neighbour averaging, clamp-to-edge borders.
    #[default]
    Bilinear,
    /// Malvar-He-Cutler 5x5 gradient-corrected interpolation, mirrored borders.
    Mhc,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bilinear => f.pad("bilinear"),
            Self::Mhc => f.pad("mhc"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bilinear" => Ok(Self::Bilinear),
            "mhc" | "malvar-he-cutler" | "malvar_he_cutler" => Ok(Self::Mhc),
            other => Err(format!("'{}' is not a valid demosaic algorithm", other)),
        }
    }
}

/// Role of a sensel in the 2x2 Bayer tile, derived from coordinate parity only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BayerPhase {
    /// Even row, even column.
    Red,
    /// Even row, odd column.
    GreenOnRedRow,
    /// Odd row, even column.
    GreenOnBlueRow,
    /// Odd row, odd column.
    Blue,
}

impl BayerPhase {
    #[inline]
    pub fn at(x: usize, y: usize) -> Self {
        match (y & 1 == 0, x & 1 == 0) {
            (true, true) => Self::Red,
            (true, false) => Self::GreenOnRedRow,
            (false, true) => Self::GreenOnBlueRow,
            (false, false) => Self::Blue,
        }
    }
}

/// Read-only view of one Bayer mosaic.
///
/// The samples are either a dense single-channel plane or one component of an
/// interleaved RGB/RGBA texture holding all three mosaics.
#[derive(Debug, Clone, Copy)]
pub struct MosaicView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
    offset: usize,
    channel: MosaicChannel,
}

impl<'a> MosaicView<'a> {
    /// Dense plane, one byte per pixel, row-major.
    pub fn plane(data: &'a [u8], width: usize, height: usize, channel: MosaicChannel) -> Result<Self> {
        Self::build(data, width, height, 1, 0, channel)
    }

    /// One channel of an interleaved texture with `components` bytes per pixel.
    pub fn combined(
        data: &'a [u8],
        width: usize,
        height: usize,
        components: usize,
        channel: MosaicChannel,
    ) -> Result<Self> {
        if components <= channel.offset() {
            return Err(DemosaicError::InvalidComponents { components, channel });
        }
        Self::build(data, width, height, components, channel.offset(), channel)
    }

    fn build(
        data: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
        offset: usize,
        channel: MosaicChannel,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(DemosaicError::EmptyImage { width, height });
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(stride))
            .ok_or(DemosaicError::EmptyImage { width, height })?;
        if data.len() != expected {
            return Err(DemosaicError::BufferSizeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
            offset,
            channel,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channel(&self) -> MosaicChannel {
        self.channel
    }

    /// Raw sample. Coordinates must be in bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[(y * self.width + x) * self.stride + self.offset]
    }

    /// Sample scaled to [0, 1].
    #[inline]
    pub fn normalized(&self, x: usize, y: usize) -> f32 {
        self.get(x, y) as f32 / 255.0
    }
}

/// Reconstructed image, RGBA8 interleaved with alpha always 255.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    pub width: usize,
    pub height: usize,
    /// `[R, G, B, A, R, G, B, A, ...]`, row-major.
    pub data: Vec<u8>,
}

impl RgbImage {
    pub const CHANNELS: usize = 4;

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * Self::CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Drops alpha.
    pub fn to_rgb(&self) -> Vec<u8> {
        self.data
            .chunks_exact(Self::CHANNELS)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect()
    }
}

/// Scales a normalized value back to a byte, rounding half away from zero.
#[inline]
pub(crate) fn to_byte(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}
