//! Correction pipeline module
//!
//! Chains calibration, masking and averaging for trains of frames, timing
//! each step.

mod processor;
mod timing;
pub mod types;

#[cfg(test)]
mod tests;

pub use processor::CorrectionPipeline;
pub use timing::{PipelineTimings, StepTiming, Timer};
pub use types::{CalibrationSet, PipelineConfig, PipelineConfigBuilder};
