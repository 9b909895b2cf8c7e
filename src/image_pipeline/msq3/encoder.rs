use tracing::debug;

use super::decoder::validate_dimensions;
use super::error::{DecodeError, Result};
use super::types::{
    CHANNEL_LENGTH_SIZE, DecodedMosaicSet, HEADER_SIZE, MAGIC, MosaicChannel,
};

/// Serialises a mosaic set into MSQ3 bytes.
///
/// Refuses anything [`decode`](super::decode) would reject, so the output always
/// decodes back to an identical set. A channel longer than `u32::MAX` bytes cannot be
/// framed and is reported as truncated.
pub fn encode(set: &DecodedMosaicSet) -> Result<Vec<u8>> {
    validate_dimensions(set.width, set.height)?;

    let channels = [
        (MosaicChannel::R, &set.channel_r),
        (MosaicChannel::G, &set.channel_g),
        (MosaicChannel::B, &set.channel_b),
    ];

    let mut total = HEADER_SIZE;
    for (channel, bytes) in channels {
        if bytes.is_empty() {
            return Err(DecodeError::EmptyChannel(channel));
        }
        if u32::try_from(bytes.len()).is_err() {
            return Err(DecodeError::TruncatedChannelData {
                channel,
                declared: u32::MAX,
                remaining: bytes.len(),
            });
        }
        total += CHANNEL_LENGTH_SIZE + bytes.len();
    }

    let header = set.header();
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&MAGIC);
    out.push(header.version);
    out.extend_from_slice(&header.width.to_le_bytes());
    out.extend_from_slice(&header.height.to_le_bytes());
    out.push(header.quality);
    for (_, bytes) in channels {
        out.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
        out.extend_from_slice(bytes);
    }

    debug!(width = set.width, height = set.height, bytes = out.len(), "Encoded MSQ3 container");
    Ok(out)
}
