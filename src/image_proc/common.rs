//! Common utilities module
//!
//! Errors, sample types, shape validation and the parallel execution switch
//! shared by every kernel.

pub mod error;
pub mod parallel;
pub mod sample;
pub mod shape;

pub use error::{ProcError, Result};
pub use sample::Sample;
pub use shape::FrameDim;
