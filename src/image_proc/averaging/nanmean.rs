use ndarray::{Array, Array2, ArrayView, ArrayView1, ArrayView3, Axis, Zip};
use num_traits::Float;
use tracing::instrument;

use crate::image_proc::common::error::{ProcError, Result};
use crate::image_proc::common::parallel::{self, zip_for_each};
use crate::image_proc::common::shape::check_shape;
use crate::image_proc::common::FrameDim;

/// Mean of the non-NaN values, or NaN when there are none.
#[inline]
fn nan_mean<T: Float>(values: impl Iterator<Item = T>) -> T {
    let (sum, count) = values
        .filter(|v| !v.is_nan())
        .fold((T::zero(), T::zero()), |(sum, count), v| (sum + v, count + T::one()));
    if count == T::zero() {
        T::nan()
    } else {
        sum / count
    }
}

/// Validates a frame subset against a stack of `frames` frames.
pub(crate) fn check_keep(keep: Option<&[usize]>, frames: usize) -> Result<()> {
    let Some(keep) = keep else {
        return Ok(());
    };
    if keep.is_empty() {
        return Err(ProcError::invalid_argument("keep cannot be empty"));
    }
    if let Some(&idx) = keep.iter().find(|&&idx| idx >= frames) {
        return Err(ProcError::invalid_argument(format!(
            "frame index {idx} is out of range for {frames} frames"
        )));
    }
    Ok(())
}

/// Computes the NaN-mean over the frame axis of an image array.
///
/// # Arguments
///
/// * `src` - image data, shape `(frames, rows, cols)`
/// * `keep` - frames to average; `None` averages all of them
///
/// # Returns
///
/// The mean image, shape `(rows, cols)`. A pixel that is NaN in every
/// selected frame is NaN.
///
/// # Errors
///
/// * `InvalidArgument` - `keep` is empty or holds an index past the last frame
#[instrument(level = "trace", skip_all, fields(shape = ?src.shape(), keep = ?keep.map(<[usize]>::len)))]
pub fn nanmean_image_array<T>(src: ArrayView3<'_, T>, keep: Option<&[usize]>) -> Result<Array2<T>>
where
    T: Float + Send + Sync,
{
    let (frames, rows, cols) = src.dim();
    check_keep(keep, frames)?;

    let mut mean = Array2::zeros((rows, cols));
    zip_for_each!(
        parallel::reduction(src.len()),
        Zip::from(&mut mean).and(src.lanes(Axis(0))),
        |m: &mut T, lane: ArrayView1<'_, T>| {
            *m = match keep {
                Some(keep) => nan_mean(keep.iter().map(|&i| lane[i])),
                None => nan_mean(lane.iter().copied()),
            };
        }
    );
    Ok(mean)
}

/// Computes the pointwise NaN-mean of two images (or two image arrays).
///
/// Both NaN gives NaN, one NaN gives the other value, otherwise the average.
#[instrument(level = "trace", skip_all, fields(shape = ?src1.shape()))]
pub fn nanmean_images<T, D>(src1: ArrayView<'_, T, D>, src2: ArrayView<'_, T, D>) -> Result<Array<T, D>>
where
    T: Float + Send + Sync,
    D: FrameDim,
{
    check_shape(src1.shape(), src2.shape(), "Images have different shapes")?;

    let half = T::one() / (T::one() + T::one());
    let mut mean = Array::zeros(src1.raw_dim());
    zip_for_each!(
        parallel::reduction(src1.len()),
        Zip::from(&mut mean).and(&src1).and(&src2),
        |m: &mut T, &x: &T, &y: &T| {
            *m = match (x.is_nan(), y.is_nan()) {
                (true, true) => T::nan(),
                (true, false) => y,
                (false, true) => x,
                (false, false) => half * (x + y),
            };
        }
    );
    Ok(mean)
}
