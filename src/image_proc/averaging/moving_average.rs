use ndarray::{Array, ArrayView, ArrayViewMut, Zip};
use num_traits::{Float, NumCast};
use tracing::instrument;

use crate::image_proc::common::error::{ProcError, Result};
use crate::image_proc::common::parallel::{self, zip_for_each};
use crate::image_proc::common::shape::check_shape;
use crate::image_proc::common::FrameDim;

/// Updates a running mean in place: `acc += (data - acc) / count`.
///
/// # Arguments
///
/// * `acc` - moving average so far, updated in place
/// * `data` - new sample, same shape as `acc`
/// * `count` - number of samples averaged after this update (1 for the first)
///
/// # Errors
///
/// * `InvalidArgument` - `count` is zero
/// * `ShapeMismatch` - `data` differs from `acc`
#[instrument(level = "trace", skip_all, fields(shape = ?acc.shape(), count = count))]
pub fn moving_average<T, D>(acc: ArrayViewMut<'_, T, D>, data: ArrayView<'_, T, D>, count: usize) -> Result<()>
where
    T: Float + Send + Sync,
    D: FrameDim,
{
    if count == 0 {
        return Err(ProcError::invalid_argument("'count' cannot be zero"));
    }
    check_shape(acc.shape(), data.shape(), "Inconsistent data shapes")?;
    let n = <T as NumCast>::from(count)
        .ok_or_else(|| ProcError::invalid_argument(format!("'count' {count} is not representable")))?;

    zip_for_each!(
        parallel::in_place::<D>(acc.len()),
        Zip::from(acc).and(data),
        |a: &mut T, &v: &T| {
            *a = *a + (v - *a) / n;
        }
    );
    Ok(())
}

/// Windowed moving average of images or image arrays.
///
/// The first sample is copied in. Later samples of the same shape are folded
/// in with [`moving_average`], the count growing until it reaches the window;
/// from then on each new sample weighs `1 / window`. A sample of a different
/// shape restarts the average.
#[derive(Debug, Clone)]
pub struct MovingAverage<T, D: FrameDim> {
    data: Option<Array<T, D>>,
    count: usize,
    window: usize,
}

impl<T, D> MovingAverage<T, D>
where
    T: Float + Send + Sync,
    D: FrameDim,
{
    pub fn new(window: usize) -> Result<Self> {
        Self::validate_window(window)?;
        Ok(Self {
            data: None,
            count: 0,
            window,
        })
    }

    fn validate_window(window: usize) -> Result<()> {
        if window == 0 {
            return Err(ProcError::invalid_argument("moving average window must be positive"));
        }
        Ok(())
    }

    pub fn update(&mut self, sample: ArrayView<'_, T, D>) -> Result<()> {
        let accumulate = self.window > 1
            && self.count <= self.window
            && self
                .data
                .as_ref()
                .is_some_and(|acc| acc.shape() == sample.shape());

        match self.data.as_mut() {
            Some(acc) if accumulate => {
                let count = (self.count + 1).min(self.window);
                moving_average(acc.view_mut(), sample, count)?;
                self.count = count;
            }
            _ => {
                self.data = Some(sample.to_owned());
                self.count = 1;
            }
        }
        Ok(())
    }

    /// A window smaller than the current count restarts the average on the
    /// next update.
    pub fn set_window(&mut self, window: usize) -> Result<()> {
        Self::validate_window(window)?;
        self.window = window;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.data = None;
        self.count = 0;
    }

    pub fn value(&self) -> Option<ArrayView<'_, T, D>> {
        self.data.as_ref().map(|acc| acc.view())
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn window(&self) -> usize {
        self.window
    }
}
