use ndarray::{ArrayView, ArrayViewMut, Zip};
use num_traits::Float;
use tracing::instrument;

use crate::image_proc::common::error::Result;
use crate::image_proc::common::parallel::{self, zip_for_each};
use crate::image_proc::common::shape::check_shape;
use crate::image_proc::common::FrameDim;
use crate::image_proc::correction::policy::{CorrectionPolicy, GainPolicy, OffsetPolicy};

/// Calibration constants for one correction call.
///
/// Every constants buffer has the full shape of the data it corrects; nothing
/// is broadcast across frames.
#[derive(Debug, Clone)]
pub enum Calibration<'a, T, D: FrameDim> {
    /// `value - offset`
    Offset(ArrayView<'a, T, D>),
    /// `value * gain`
    Gain(ArrayView<'a, T, D>),
    /// `gain * (value - offset)` in a single pass
    GainOffset {
        gain: ArrayView<'a, T, D>,
        offset: ArrayView<'a, T, D>,
    },
}

/// Applies `P` with per-pixel `constants` to `src` in place.
///
/// # Errors
///
/// * `ShapeMismatch` - `constants` differs from `src`
#[instrument(level = "trace", skip_all, fields(shape = ?src.shape(), policy = std::any::type_name::<P>()))]
pub fn correct_with<P, T, D>(src: ArrayViewMut<'_, T, D>, constants: ArrayView<'_, T, D>) -> Result<()>
where
    P: CorrectionPolicy,
    T: Float + Send + Sync,
    D: FrameDim,
{
    check_shape(src.shape(), constants.shape(), "data and constants have different shapes")?;

    zip_for_each!(
        parallel::in_place::<D>(src.len()),
        Zip::from(src).and(constants),
        |v: &mut T, &c: &T| {
            *v = P::correct(*v, c);
        }
    );
    Ok(())
}

/// Applies `gain * (value - offset)` to `src` in place.
///
/// # Errors
///
/// * `ShapeMismatch` - `gain` or `offset` differs from `src`
#[instrument(level = "trace", skip_all, fields(shape = ?src.shape()))]
pub fn correct_gain_offset<T, D>(
    src: ArrayViewMut<'_, T, D>,
    gain: ArrayView<'_, T, D>,
    offset: ArrayView<'_, T, D>,
) -> Result<()>
where
    T: Float + Send + Sync,
    D: FrameDim,
{
    check_shape(src.shape(), gain.shape(), "data and gain constants have different shapes")?;
    check_shape(src.shape(), offset.shape(), "data and offset constants have different shapes")?;

    zip_for_each!(
        parallel::in_place::<D>(src.len()),
        Zip::from(src).and(gain).and(offset),
        |v: &mut T, &g: &T, &o: &T| {
            *v = g * (*v - o);
        }
    );
    Ok(())
}

/// Corrects an image or an image array in place.
pub fn correct_image_data<T, D>(src: ArrayViewMut<'_, T, D>, calibration: Calibration<'_, T, D>) -> Result<()>
where
    T: Float + Send + Sync,
    D: FrameDim,
{
    match calibration {
        Calibration::Offset(offset) => correct_with::<OffsetPolicy, _, _>(src, offset),
        Calibration::Gain(gain) => correct_with::<GainPolicy, _, _>(src, gain),
        Calibration::GainOffset { gain, offset } => correct_gain_offset(src, gain, offset),
    }
}
