use std::io::Write;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::debayer::RgbImage;
use crate::image_pipeline::tiff::types::BakeConfig;

pub trait RgbImageWriter {
    fn write_rgb(&self, image: &RgbImage, output: &mut dyn Write, config: &BakeConfig) -> Result<()>;
}
