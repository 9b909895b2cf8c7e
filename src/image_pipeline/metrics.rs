//! Reconstruction quality metrics.

use crate::image_pipeline::debayer::RgbImage;

/// PSNR and SSIM of one reconstruction against its source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityMetrics {
    pub psnr: f64,
    pub ssim: f64,
}

/// Both metrics at once. `None` when either is undefined for the pair.
pub fn evaluate(original: &RgbImage, reconstructed: &RgbImage) -> Option<QualityMetrics> {
    Some(QualityMetrics {
        psnr: psnr(original, reconstructed)?,
        ssim: ssim(original, reconstructed)?,
    })
}

/// Peak signal-to-noise ratio in dB over the R, G and B components, rounded to two decimals.
///
/// Returns `None` when the images differ in size and `f64::INFINITY` when they are identical.
pub fn psnr(original: &RgbImage, reconstructed: &RgbImage) -> Option<f64> {
    if original.width != reconstructed.width || original.height != reconstructed.height {
        return None;
    }

    let (sum, count) = original
        .data
        .chunks_exact(RgbImage::CHANNELS)
        .zip(reconstructed.data.chunks_exact(RgbImage::CHANNELS))
        .flat_map(|(a, b)| a[..3].iter().zip(&b[..3]))
        .fold((0.0f64, 0usize), |(sum, count), (&a, &b)| {
            let d = a as f64 - b as f64;
            (sum + d * d, count + 1)
        });

    if count == 0 {
        return None;
    }
    let mse = sum / count as f64;
    if mse == 0.0 {
        return Some(f64::INFINITY);
    }

    let value = 20.0 * (255.0 / mse.sqrt()).log10();
    Some((value * 100.0).round() / 100.0)
}

/// Side of the square SSIM window: the smallest dimension rounded down to odd, capped at 7,
/// and never below 3.
pub fn ssim_window(width: usize, height: usize) -> usize {
    let min_dim = width.min(height);
    let odd = if min_dim % 2 == 1 { min_dim } else { min_dim.saturating_sub(1) };
    odd.min(7).max(3)
}

/// Mean structural similarity over the R, G and B components, rounded to four decimals.
///
/// Uses a uniform window of [`ssim_window`] with sample covariance and a data range of 255.
/// Only windows that lie fully inside the image contribute. Returns `None` when the images
/// differ in size or are smaller than the window.
pub fn ssim(original: &RgbImage, reconstructed: &RgbImage) -> Option<f64> {
    let (width, height) = (original.width, original.height);
    if width != reconstructed.width || height != reconstructed.height {
        return None;
    }
    let win = ssim_window(width, height);
    if width < win || height < win {
        return None;
    }

    let total: f64 = (0..3)
        .map(|c| channel_ssim(original, reconstructed, c, win))
        .sum();
    let value = total / 3.0;
    Some((value * 10_000.0).round() / 10_000.0)
}

const C1: f64 = (0.01 * 255.0) * (0.01 * 255.0);
const C2: f64 = (0.03 * 255.0) * (0.03 * 255.0);

fn channel_ssim(a: &RgbImage, b: &RgbImage, component: usize, win: usize) -> f64 {
    let (width, height) = (a.width, a.height);
    let sample = |image: &RgbImage, i: usize| image.data[i * RgbImage::CHANNELS + component] as u64;

    let sx = SummedArea::new(width, height, |i| sample(a, i));
    let sy = SummedArea::new(width, height, |i| sample(b, i));
    let sxx = SummedArea::new(width, height, |i| sample(a, i) * sample(a, i));
    let syy = SummedArea::new(width, height, |i| sample(b, i) * sample(b, i));
    let sxy = SummedArea::new(width, height, |i| sample(a, i) * sample(b, i));

    let np = (win * win) as f64;
    let cov_norm = np / (np - 1.0);
    let mut sum = 0.0;
    let mut count = 0usize;
    for y in 0..=height - win {
        for x in 0..=width - win {
            let ux = sx.window(x, y, win) as f64 / np;
            let uy = sy.window(x, y, win) as f64 / np;
            let uxx = sxx.window(x, y, win) as f64 / np;
            let uyy = syy.window(x, y, win) as f64 / np;
            let uxy = sxy.window(x, y, win) as f64 / np;

            let vx = cov_norm * (uxx - ux * ux);
            let vy = cov_norm * (uyy - uy * uy);
            let vxy = cov_norm * (uxy - ux * uy);

            let numerator = (2.0 * ux * uy + C1) * (2.0 * vxy + C2);
            let denominator = (ux * ux + uy * uy + C1) * (vx + vy + C2);
            sum += numerator / denominator;
            count += 1;
        }
    }
    sum / count as f64
}

/// Integer summed-area table, so window sums are exact.
struct SummedArea {
    stride: usize,
    table: Vec<u64>,
}

impl SummedArea {
    fn new(width: usize, height: usize, value: impl Fn(usize) -> u64) -> Self {
        let stride = width + 1;
        let mut table = vec![0u64; stride * (height + 1)];
        for y in 0..height {
            let mut row = 0u64;
            for x in 0..width {
                row += value(y * width + x);
                table[(y + 1) * stride + x + 1] = table[y * stride + x + 1] + row;
            }
        }
        Self { stride, table }
    }

    fn window(&self, x: usize, y: usize, size: usize) -> u64 {
        let s = self.stride;
        let (top, bottom) = (y * s, (y + size) * s);
        (self.table[bottom + x + size] + self.table[top + x])
            - (self.table[top + x + size] + self.table[bottom + x])
    }
}
