//! Shape validation shared by all kernels

use ndarray::{Dimension, Ix2, Ix3};

use crate::image_proc::common::error::{ProcError, Result};

mod sealed {
    pub trait Sealed {}
    impl Sealed for ndarray::Ix2 {}
    impl Sealed for ndarray::Ix3 {}
}

/// Dimensionality of a frame buffer: a single image `(rows, cols)` or an
/// image array `(frames, rows, cols)`.
pub trait FrameDim: Dimension + sealed::Sealed {
    /// Whether the buffer is a stack of frames.
    const STACKED: bool;
}

impl FrameDim for Ix2 {
    const STACKED: bool = false;
}

impl FrameDim for Ix3 {
    const STACKED: bool = true;
}

/// Fails unless `actual` equals `expected` in every dimension.
pub fn check_shape(expected: &[usize], actual: &[usize], context: &'static str) -> Result<()> {
    if expected != actual {
        return Err(ProcError::shape_mismatch(context, expected, actual));
    }
    Ok(())
}

/// Fails unless `frame` equals the trailing `(rows, cols)` of `shape`.
pub fn check_frame_shape(shape: &[usize], frame: &[usize], context: &'static str) -> Result<()> {
    let offset = shape.len().saturating_sub(2);
    check_shape(&shape[offset..], frame, context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_shape() {
        assert!(check_shape(&[2, 3], &[2, 3], "same").is_ok());
        let err = check_shape(&[2, 3], &[3, 2], "swapped").unwrap_err();
        assert_eq!(
            err,
            ProcError::ShapeMismatch {
                context: "swapped",
                expected: vec![2, 3],
                actual: vec![3, 2],
            }
        );
    }

    #[test]
    fn test_check_frame_shape_ignores_frame_axis() {
        assert!(check_frame_shape(&[5, 4, 3], &[4, 3], "stack").is_ok());
        assert!(check_frame_shape(&[4, 3], &[4, 3], "image").is_ok());
        assert!(check_frame_shape(&[5, 4, 3], &[3, 4], "stack").is_err());
        assert!(check_frame_shape(&[5, 4, 3], &[5, 4, 3], "stack").is_err());
    }
}
