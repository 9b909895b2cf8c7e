use std::ops::Range;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::image_pipeline::debayer::types::{Algorithm, MosaicView, RgbImage};
use crate::image_pipeline::debayer::{bilinear, mhc};

/// Reconstructs one pixel. Reads only the mosaic, never previously computed output.
#[inline]
pub fn demosaic_pixel(view: &MosaicView<'_>, x: usize, y: usize, algorithm: Algorithm) -> [u8; 4] {
    match algorithm {
        Algorithm::Bilinear => bilinear::demosaic_pixel(view, x, y),
        Algorithm::Mhc => mhc::demosaic_pixel(view, x, y),
    }
}

/// Reconstructs a full RGBA image from one mosaic using all available cores.
pub fn demosaic(view: &MosaicView<'_>, algorithm: Algorithm) -> RgbImage {
    CpuDebayer::new().process(view, algorithm)
}

/// Row-parallel demosaicing on the CPU.
#[derive(Debug, Clone, Copy)]
pub struct CpuDebayer {
    parallel: bool,
}

impl Default for CpuDebayer {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuDebayer {
    pub fn new() -> Self {
        Self { parallel: true }
    }

    /// Single-threaded variant; produces the same bytes as the parallel one.
    pub fn sequential() -> Self {
        Self { parallel: false }
    }

    pub fn with_parallel(parallel: bool) -> Self {
        Self { parallel }
    }

    pub fn process(&self, view: &MosaicView<'_>, algorithm: Algorithm) -> RgbImage {
        let width = view.width();
        let height = view.height();
        info!(
            channel = %view.channel(),
            %algorithm,
            parallel = self.parallel,
            "Demosaicing {}x{} mosaic", width, height
        );

        let row_len = width * RgbImage::CHANNELS;
        let mut data = vec![0u8; row_len * height];

        if self.parallel {
            data.par_chunks_exact_mut(row_len)
                .enumerate()
                .for_each(|(y, row)| fill_row(view, y, row, algorithm));
        } else {
            data.chunks_exact_mut(row_len)
                .enumerate()
                .for_each(|(y, row)| fill_row(view, y, row, algorithm));
        }

        debug!(bytes = data.len(), "Demosaic complete");
        RgbImage { width, height, data }
    }

    /// RGBA bytes for a band of rows, for callers that tile the work themselves.
    ///
    /// Concatenating the bands of any row partition gives the same bytes as [`process`](Self::process).
    pub fn process_rows(&self, view: &MosaicView<'_>, algorithm: Algorithm, rows: Range<usize>) -> Vec<u8> {
        let rows = rows.start.min(view.height())..rows.end.min(view.height());
        let row_len = view.width() * RgbImage::CHANNELS;
        let mut data = vec![0u8; row_len * rows.len()];
        for (row, y) in data.chunks_exact_mut(row_len).zip(rows) {
            fill_row(view, y, row, algorithm);
        }
        data
    }
}

fn fill_row(view: &MosaicView<'_>, y: usize, row: &mut [u8], algorithm: Algorithm) {
    for (x, px) in row.chunks_exact_mut(RgbImage::CHANNELS).enumerate() {
        px.copy_from_slice(&demosaic_pixel(view, x, y, algorithm));
    }
}
