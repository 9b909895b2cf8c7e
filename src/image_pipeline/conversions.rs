//! Pipeline conversions module
//!
//! Orchestrates decoding, demosaicing and writing of MSQ3 containers.

mod msq3_to_tiff;
pub mod timing;


pub use msq3_to_tiff::{BakeReport, BakedImages, Msq3BakePipeline, output_file_name};
pub use timing::{PipelineTimings, StepTiming, Timer};
