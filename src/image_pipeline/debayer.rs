//! Bayer demosaicing: reconstructs a full RGBA image from one raw mosaic.
//!
//! The phase layout is fixed: R at (even row, even column), G at the two mixed-parity
//! sites, B at (odd row, odd column).

mod bilinear;
mod mhc;
pub mod cpu_debayer;
pub mod error;
pub mod sampler;
pub mod types;

pub use cpu_debayer::{CpuDebayer, demosaic, demosaic_pixel};
pub use error::DemosaicError;
pub use sampler::{EdgePolicy, sample};
pub use types::{Algorithm, BayerPhase, MosaicView, RgbImage};
