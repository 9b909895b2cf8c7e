//! Bake configuration types

use crate::image_pipeline::debayer::Algorithm;

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - fast level (good speed/size balance)
    DeflateFast,
    /// Deflate compression - best compression (slower)
    DeflateBest,
    /// Deflate compression - balanced
    DeflateBalanced,
}

impl std::str::FromStr for TiffCompression {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "lzw" => Ok(Self::Lzw),
            "deflate-fast" => Ok(Self::DeflateFast),
            "deflate" => Ok(Self::DeflateBalanced),
            "deflate-best" => Ok(Self::DeflateBest),
            other => Err(format!("'{}' is not a valid compression method", other)),
        }
    }
}

/// Configuration for MSQ3 baking
#[derive(Debug, Clone)]
pub struct BakeConfig {
    /// Demosaic kernel applied to all three mosaics
    pub algorithm: Algorithm,
    /// Compression method to use
    pub compression: TiffCompression,
    /// Predictor value for compression (typically 2 for horizontal differencing)
    /// Note: Predictor adds processing time, set to None for maximum speed
    pub predictor: Option<u16>,
    /// Whether rows are demosaiced on the rayon thread pool
    pub parallel: bool,
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Bilinear,
            compression: TiffCompression::None,
            predictor: None,
            parallel: true,
        }
    }
}

impl BakeConfig {
    pub fn builder() -> BakeConfigBuilder {
        BakeConfigBuilder::default()
    }
}

/// Builder for BakeConfig
#[derive(Default)]
pub struct BakeConfigBuilder {
    algorithm: Option<Algorithm>,
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
    parallel: Option<bool>,
}

impl BakeConfigBuilder {
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn parallel(mut self, enable: bool) -> Self {
        self.parallel = Some(enable);
        self
    }

    pub fn build(self) -> BakeConfig {
        let default = BakeConfig::default();
        BakeConfig {
            algorithm: self.algorithm.unwrap_or(default.algorithm),
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
            parallel: self.parallel.unwrap_or(default.parallel),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = BakeConfig::builder()
            .algorithm(Algorithm::Mhc)
            .compression(TiffCompression::DeflateFast)
            .predictor(Some(2))
            .parallel(false)
            .build();

        assert_eq!(config.algorithm, Algorithm::Mhc);
        assert_eq!(config.compression, TiffCompression::DeflateFast);
        assert_eq!(config.predictor, Some(2));
        assert!(!config.parallel);
    }

    #[test]
    fn test_builder_defaults() {
        let config = BakeConfig::builder().build();
        assert_eq!(config.algorithm, Algorithm::Bilinear);
        assert_eq!(config.compression, TiffCompression::None);
        assert_eq!(config.predictor, None);
        assert!(config.parallel);
    }

    #[test]
    fn test_compression_parse() {
        assert_eq!("deflate".parse::<TiffCompression>(), Ok(TiffCompression::DeflateBalanced));
        assert_eq!("lzw".parse::<TiffCompression>(), Ok(TiffCompression::Lzw));
        assert!("zip".parse::<TiffCompression>().is_err());
    }
}
