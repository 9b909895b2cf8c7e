use std::io::Write;
use tracing::debug;
use crate::image_pipeline::common::error::{Result, ConversionError};
use crate::image_pipeline::debayer::RgbImage;
use crate::image_pipeline::tiff::types::{BakeConfig, TiffCompression};
use crate::image_pipeline::tiff::writer::RgbImageWriter;

/// Writes reconstructed images as 8-bit RGBA TIFF.
pub struct StandardTiffWriter;

impl RgbImageWriter for StandardTiffWriter {
    fn write_rgb(&self, image: &RgbImage, output: &mut dyn Write, config: &BakeConfig) -> Result<()> {
        debug!("Encoding TIFF image: {}x{}", image.width, image.height);

        let mut buffer = Vec::new();

        let compression = match config.compression {
            TiffCompression::None => tiff::encoder::Compression::Uncompressed,
            TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
            TiffCompression::DeflateFast => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Balanced),
            TiffCompression::DeflateBest => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Best),
        };

        let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| ConversionError::EncodeError(e.to_string()))?
            .with_compression(compression);

        if let Some(predictor_val) = config.predictor {
            let predictor = match predictor_val {
                2 => tiff::tags::Predictor::Horizontal,
                _ => tiff::tags::Predictor::None,
            };
            encoder = encoder.with_predictor(predictor);
        }

        encoder.write_image::<tiff::encoder::colortype::RGBA8>(
            image.width as u32,
            image.height as u32,
            &image.data,
        ).map_err(|e| ConversionError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete");
        Ok(())
    }
}

/// Reads an 8-bit single-channel TIFF, as written by mosaic capture tools, into a plane.
pub fn read_gray8_tiff(data: &[u8]) -> Result<(u32, u32, Vec<u8>)> {
    let mut decoder = tiff::decoder::Decoder::new(std::io::Cursor::new(data))
        .map_err(|e| ConversionError::UnsupportedFormat(e.to_string()))?;

    let color_type = decoder
        .colortype()
        .map_err(|e| ConversionError::UnsupportedFormat(e.to_string()))?;
    if color_type != tiff::ColorType::Gray(8) {
        return Err(ConversionError::UnsupportedFormat(format!(
            "expected 8-bit grayscale mosaic, found {:?}",
            color_type
        )));
    }

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| ConversionError::UnsupportedFormat(e.to_string()))?;

    match decoder
        .read_image()
        .map_err(|e| ConversionError::UnsupportedFormat(e.to_string()))?
    {
        tiff::decoder::DecodingResult::U8(pixels) => Ok((width, height, pixels)),
        _ => Err(ConversionError::UnsupportedFormat(
            "expected 8-bit grayscale mosaic".to_string(),
        )),
    }
}

/// Reads an 8-bit RGB or RGBA TIFF as a reference image. Alpha is replaced by 255.
pub fn read_rgb8_tiff(data: &[u8]) -> Result<RgbImage> {
    let mut decoder = tiff::decoder::Decoder::new(std::io::Cursor::new(data))
        .map_err(|e| ConversionError::UnsupportedFormat(e.to_string()))?;

    let components = match decoder
        .colortype()
        .map_err(|e| ConversionError::UnsupportedFormat(e.to_string()))?
    {
        tiff::ColorType::RGB(8) => 3,
        tiff::ColorType::RGBA(8) => 4,
        other => {
            return Err(ConversionError::UnsupportedFormat(format!(
                "expected 8-bit RGB image, found {:?}",
                other
            )));
        }
    };

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| ConversionError::UnsupportedFormat(e.to_string()))?;

    let pixels = match decoder
        .read_image()
        .map_err(|e| ConversionError::UnsupportedFormat(e.to_string()))?
    {
        tiff::decoder::DecodingResult::U8(pixels) => pixels,
        _ => {
            return Err(ConversionError::UnsupportedFormat(
                "expected 8-bit RGB image".to_string(),
            ));
        }
    };

    Ok(RgbImage {
        width: width as usize,
        height: height as usize,
        data: pixels
            .chunks_exact(components)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
    })
}
