//! Detector image correction module
//!
//! In-place kernels for masking, calibration correction and NaN-aware
//! averaging of single images and image arrays, plus a pipeline chaining them
//! per train of frames.

pub mod averaging;
pub mod common;
pub mod correction;
pub mod masking;
pub mod pipeline;

pub use common::{FrameDim, ProcError, Result, Sample};

pub use masking::{mask_image_data, MaskOptions, MaskOptionsBuilder, MaskPolicy, Threshold};

pub use averaging::{moving_average, nanmean_image_array, nanmean_images, MovingAverage};

pub use correction::{
    correct_gain_offset, correct_image_data, correct_with, Calibration, CorrectionPolicy,
    GainPolicy, OffsetPolicy,
};

pub use pipeline::{CalibrationSet, CorrectionPipeline, PipelineConfig, PipelineConfigBuilder, PipelineTimings};
