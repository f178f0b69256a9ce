//! In-place correction kernels for high-frame-rate detector images.
//!
//! Frames are plain `ndarray` buffers owned by the caller: a single image is
//! `(rows, cols)` and an image array is `(frames, rows, cols)`. Every kernel
//! validates its inputs up front and then mutates in place.

pub mod image_proc;
pub mod logger;
