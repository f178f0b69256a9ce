//! Calibration correction module
//!
//! Per-pixel offset and gain correction of images and image arrays.

mod kernel;
pub mod policy;


pub use kernel::{correct_gain_offset, correct_image_data, correct_with, Calibration};
pub use policy::{CorrectionPolicy, GainPolicy, OffsetPolicy};
