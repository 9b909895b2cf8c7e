//! Producing mosaics: sampling an RGB image through the Bayer filter, and packing the
//! three mosaics of a container into one interleaved texture.

use crate::image_pipeline::debayer::error::{DemosaicError, Result};
use crate::image_pipeline::debayer::{BayerPhase, RgbImage};
use crate::image_pipeline::msq3::DecodedMosaicSet;

fn buffer_len(width: usize, height: usize, components: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(components))
        .ok_or(DemosaicError::EmptyImage { width, height })
}

/// Samples an interleaved RGB8 image with the same phase layout the demosaic engine reads.
pub fn apply_bayer_mosaic(rgb: &[u8], width: usize, height: usize) -> Result<Vec<u8>> {
    let expected = buffer_len(width, height, 3)?;
    if rgb.len() != expected {
        return Err(DemosaicError::BufferSizeMismatch {
            expected,
            got: rgb.len(),
        });
    }

    let mut cfa = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let px = &rgb[(y * width + x) * 3..][..3];
            cfa.push(match BayerPhase::at(x, y) {
                BayerPhase::Red => px[0],
                BayerPhase::GreenOnRedRow | BayerPhase::GreenOnBlueRow => px[1],
                BayerPhase::Blue => px[2],
            });
        }
    }
    Ok(cfa)
}

/// Shows a mosaic in colour: each sample lands in the component its Bayer site measures,
/// the other two stay black.
pub fn colorized_view(cfa: &[u8], width: usize, height: usize) -> Result<RgbImage> {
    let expected = buffer_len(width, height, 1)?;
    if cfa.len() != expected {
        return Err(DemosaicError::BufferSizeMismatch {
            expected,
            got: cfa.len(),
        });
    }

    let mut data = vec![0u8; expected * RgbImage::CHANNELS];
    for (i, (&value, px)) in cfa.iter().zip(data.chunks_exact_mut(RgbImage::CHANNELS)).enumerate() {
        let component = match BayerPhase::at(i % width, i / width) {
            BayerPhase::Red => 0,
            BayerPhase::GreenOnRedRow | BayerPhase::GreenOnBlueRow => 1,
            BayerPhase::Blue => 2,
        };
        px[component] = value;
        px[3] = 255;
    }
    Ok(RgbImage { width, height, data })
}

/// Interleaves the R, G and B mosaics into an RGBA texture with opaque alpha.
///
/// Every channel must hold exactly one byte per pixel.
pub fn combine_channels(set: &DecodedMosaicSet) -> Result<Vec<u8>> {
    let pixels = set.pixel_count();
    for channel in [&set.channel_r, &set.channel_g, &set.channel_b] {
        if channel.len() != pixels {
            return Err(DemosaicError::BufferSizeMismatch {
                expected: pixels,
                got: channel.len(),
            });
        }
    }

    Ok(set
        .channel_r
        .iter()
        .zip(&set.channel_g)
        .zip(&set.channel_b)
        .flat_map(|((&r, &g), &b)| [r, g, b, 255])
        .collect())
}
