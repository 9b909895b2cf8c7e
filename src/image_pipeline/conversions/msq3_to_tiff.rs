use tracing::{info, instrument};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::image_pipeline::{
    common::error::{ConversionError, Result},
    conversions::timing::{PipelineTimings, Timer},
    debayer::{CpuDebayer, MosaicView, RgbImage},
    msq3::{DecodedMosaicSet, MosaicChannel, MosaicSetReader, Msq3Reader},
    tiff::{BakeConfig, RgbImageWriter, StandardTiffWriter},
};

/// The three reconstructed images of one container, in R, G, B mosaic order.
#[derive(Debug, Clone)]
pub struct BakedImages {
    pub images: [RgbImage; 3],
    pub quality: u8,
    pub timings: PipelineTimings,
}

impl BakedImages {
    pub fn get(&self, channel: MosaicChannel) -> &RgbImage {
        &self.images[channel.offset()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (MosaicChannel, &RgbImage)> {
        MosaicChannel::ALL.into_iter().zip(self.images.iter())
    }
}

/// Files produced by [`Msq3BakePipeline::bake_file`].
#[derive(Debug, Clone)]
pub struct BakeReport {
    pub outputs: Vec<PathBuf>,
    pub timings: PipelineTimings,
}

/// `<stem>_Image1.tiff` for the R mosaic, `_Image2` for G, `_Image3` for B.
pub fn output_file_name(stem: &str, channel: MosaicChannel) -> String {
    format!("{}_Image{}.tiff", stem, channel.image_number())
}

pub struct Msq3BakePipeline<R: MosaicSetReader, W: RgbImageWriter> {
    reader: R,
    writer: W,
    config: BakeConfig,
}

impl Msq3BakePipeline<Msq3Reader, StandardTiffWriter> {
    pub fn new(config: BakeConfig) -> Self {
        Self {
            reader: Msq3Reader,
            writer: StandardTiffWriter,
            config,
        }
    }
}

impl<R: MosaicSetReader, W: RgbImageWriter> Msq3BakePipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: BakeConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    /// Each channel must be a raw one-byte-per-pixel mosaic of the declared size.
    fn validate_channel_sizes(&self, set: &DecodedMosaicSet) -> Result<()> {
        let expected = set.pixel_count();
        for channel in MosaicChannel::ALL {
            let got = set.channel(channel).len();
            if got != expected {
                return Err(ConversionError::ChannelSizeMismatch {
                    channel,
                    width: set.width,
                    height: set.height,
                    expected,
                    got,
                });
            }
        }
        Ok(())
    }

    /// Decodes a container and reconstructs all three mosaics.
    #[instrument(skip(self, input_data), fields(input_size = input_data.len(), algorithm = %self.config.algorithm))]
    pub fn bake(&self, input_data: &[u8]) -> Result<BakedImages> {
        info!("Starting MSQ3 bake");
        let mut timings = PipelineTimings::new();

        let set = {
            let _span = tracing::info_span!("decode_msq3").entered();
            let timer = Timer::start("decode");
            let set = self.reader.read_mosaics(input_data)?;
            timings.record(timer);
            set
        };

        {
            let _span = tracing::info_span!("validate_channels",
                width = set.width,
                height = set.height
            ).entered();
            self.validate_channel_sizes(&set)?;
        }

        let debayer = CpuDebayer::with_parallel(self.config.parallel);
        let (width, height) = (set.width as usize, set.height as usize);

        let mut demosaic_channel = |channel: MosaicChannel| -> Result<RgbImage> {
            let _span = tracing::info_span!("demosaic", %channel).entered();
            let timer = Timer::start(format!("demosaic {}", channel));
            let view = MosaicView::plane(set.channel(channel), width, height, channel)?;
            let image = debayer.process(&view, self.config.algorithm);
            timings.record(timer);
            Ok(image)
        };
        let images = [
            demosaic_channel(MosaicChannel::R)?,
            demosaic_channel(MosaicChannel::G)?,
            demosaic_channel(MosaicChannel::B)?,
        ];

        info!(
            width = set.width,
            height = set.height,
            quality = set.quality,
            "Bake complete"
        );
        Ok(BakedImages {
            images,
            quality: set.quality,
            timings,
        })
    }

    /// Encodes each baked image to its own output, in R, G, B order.
    pub fn write_images(&self, baked: &BakedImages, outputs: [&mut dyn Write; 3]) -> Result<()> {
        for ((channel, image), output) in baked.iter().zip(outputs) {
            let _span = tracing::info_span!("encode_tiff", %channel).entered();
            self.writer.write_rgb(image, output, &self.config)?;
        }
        Ok(())
    }

    /// Bakes `input_path` into three TIFF files inside `output_dir`, creating it if needed.
    #[instrument(skip(self, input_path, output_dir))]
    pub fn bake_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_dir: Q,
    ) -> Result<BakeReport> {
        let input_path = input_path.as_ref();
        let output_dir = output_dir.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_dir.display(),
            "Baking file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                ConversionError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        let baked = self.bake(&input_data)?;
        let mut timings = baked.timings.clone();

        std::fs::create_dir_all(output_dir).map_err(|e| {
            ConversionError::OutputWriteError(format!("{}: {}", output_dir.display(), e))
        })?;

        let stem = input_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "msq3".to_string());

        let mut outputs = Vec::with_capacity(3);
        for (channel, image) in baked.iter() {
            let path = output_dir.join(output_file_name(&stem, channel));
            let timer = Timer::start(format!("write {}", channel));
            let mut file = std::fs::File::create(&path).map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", path.display(), e))
            })?;
            self.writer.write_rgb(image, &mut file, &self.config)?;
            timings.record(timer);
            info!(path = %path.display(), "Saved baked image");
            outputs.push(path);
        }

        Ok(BakeReport { outputs, timings })
    }

    pub fn config(&self) -> &BakeConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: BakeConfig) {
        self.config = config;
    }
}
