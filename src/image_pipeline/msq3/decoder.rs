//! MSQ3 container decoding.
//!
//! Layout (little-endian throughout):
//!
//! ```text
//! 0   4  magic "MSQ3"
//! 4   1  version (1)
//! 5   4  width
//! 9   4  height
//! 13  1  quality
//! 14  .. three channel blocks, R then G then B: u32 length + that many bytes
//! ```
//!
//! Bytes after the B block are ignored.

use tracing::{debug, warn};

use super::error::{DecodeError, Result};
use super::types::{
    CHANNEL_LENGTH_SIZE, CURRENT_VERSION, DecodedMosaicSet, HEADER_SIZE, MAGIC, MAX_DIMENSION,
    Msq3Header, MosaicChannel,
};

/// Cheap format sniff: long enough for a header and starts with the magic.
///
/// Version and dimensions are not looked at.
pub fn is_container(data: &[u8]) -> bool {
    data.len() >= HEADER_SIZE && data[..4] == MAGIC
}

/// Parses and validates the 14-byte header only.
pub fn read_header(data: &[u8]) -> Result<Msq3Header> {
    if data.len() < HEADER_SIZE {
        warn!(len = data.len(), "MSQ3 data too small");
        return Err(DecodeError::TooSmall { len: data.len() });
    }

    let found = [data[0], data[1], data[2], data[3]];
    if found != MAGIC {
        warn!(?found, "MSQ3 magic bytes not found");
        return Err(DecodeError::BadMagic { found });
    }

    let version = data[4];
    if version != CURRENT_VERSION {
        warn!(version, expected = CURRENT_VERSION, "Unsupported MSQ3 version");
        return Err(DecodeError::UnsupportedVersion(version));
    }

    let width = read_u32_le(data, 5);
    let height = read_u32_le(data, 9);
    let quality = data[13];

    validate_dimensions(width, height)?;

    Ok(Msq3Header {
        version,
        width,
        height,
        quality,
    })
}

/// Decodes a complete container into its three raw mosaics.
///
/// Validation fails fast in header order, then per channel block. Nothing is returned
/// unless every check passes.
pub fn decode(data: &[u8]) -> Result<DecodedMosaicSet> {
    let header = read_header(data)?;

    let mut offset = HEADER_SIZE;
    let channel_r = read_channel(data, &mut offset, MosaicChannel::R)?;
    let channel_g = read_channel(data, &mut offset, MosaicChannel::G)?;
    let channel_b = read_channel(data, &mut offset, MosaicChannel::B)?;

    for (channel, bytes) in [
        (MosaicChannel::R, &channel_r),
        (MosaicChannel::G, &channel_g),
        (MosaicChannel::B, &channel_b),
    ] {
        if bytes.is_empty() {
            warn!(%channel, "MSQ3 channel is empty");
            return Err(DecodeError::EmptyChannel(channel));
        }
    }

    debug!(
        width = header.width,
        height = header.height,
        quality = header.quality,
        r = channel_r.len(),
        g = channel_g.len(),
        b = channel_b.len(),
        trailing = data.len() - offset,
        "Decoded MSQ3 container"
    );

    Ok(DecodedMosaicSet {
        width: header.width,
        height: header.height,
        quality: header.quality,
        channel_r,
        channel_g,
        channel_b,
    })
}

pub(crate) fn validate_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        warn!(width, height, "Invalid MSQ3 dimensions");
        return Err(DecodeError::InvalidDimensions { width, height });
    }
    Ok(())
}

fn read_channel(data: &[u8], offset: &mut usize, channel: MosaicChannel) -> Result<Vec<u8>> {
    let remaining = data.len() - *offset;
    if remaining < CHANNEL_LENGTH_SIZE {
        warn!(%channel, offset = *offset, "Unexpected end of data reading channel length");
        return Err(DecodeError::TruncatedChannelHeader {
            channel,
            offset: *offset,
        });
    }

    let declared = read_u32_le(data, *offset);
    let start = *offset + CHANNEL_LENGTH_SIZE;
    let remaining = data.len() - start;
    if declared as usize > remaining {
        warn!(%channel, declared, remaining, "Channel data truncated");
        return Err(DecodeError::TruncatedChannelData {
            channel,
            declared,
            remaining,
        });
    }

    let end = start + declared as usize;
    *offset = end;
    Ok(data[start..end].to_vec())
}

/// Caller guarantees `offset + 4 <= data.len()`.
fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}
