use ndarray::{Array2, ArrayView2, ArrayViewMut3, Ix2};
use num_traits::Float;
use tracing::{debug, debug_span, instrument};

use crate::image_proc::averaging::{check_keep, nanmean_image_array, MovingAverage};
use crate::image_proc::common::error::Result;
use crate::image_proc::common::shape::{check_frame_shape, check_shape};
use crate::image_proc::common::Sample;
use crate::image_proc::correction::correct_image_data;
use crate::image_proc::masking::{mask_image_data, MaskOptions};
use crate::image_proc::pipeline::timing::PipelineTimings;
use crate::image_proc::pipeline::types::{CalibrationSet, PipelineConfig};

/// Calibrates, masks and averages trains of detector frames.
///
/// Each call to [`CorrectionPipeline::process`] corrects the train in place,
/// reduces it to a NaN-mean image and folds that image into a moving average.
pub struct CorrectionPipeline<T: Float + Sample> {
    config: PipelineConfig<T>,
    calibration: Option<CalibrationSet<T>>,
    bad_pixels: Option<Array2<bool>>,
    average: MovingAverage<T, Ix2>,
    timings: PipelineTimings,
}

impl<T: Float + Sample> CorrectionPipeline<T> {
    pub fn new(config: PipelineConfig<T>) -> Result<Self> {
        Ok(Self {
            average: MovingAverage::new(config.moving_average_window)?,
            config,
            calibration: None,
            bad_pixels: None,
            timings: PipelineTimings::new(),
        })
    }

    pub fn with_calibration(mut self, calibration: CalibrationSet<T>) -> Self {
        self.calibration = Some(calibration);
        self
    }

    pub fn with_bad_pixels(mut self, bad_pixels: Array2<bool>) -> Self {
        self.bad_pixels = Some(bad_pixels);
        self
    }

    fn validate(
        &self,
        shape: &[usize],
        keep: Option<&[usize]>,
        flags: Option<&ArrayViewMut3<'_, bool>>,
    ) -> Result<()> {
        if let Some(calibration) = &self.calibration {
            calibration.check(shape)?;
        }
        if let Some(bad_pixels) = &self.bad_pixels {
            check_frame_shape(shape, bad_pixels.shape(), "Image and mask have different shapes")?;
        }
        if let Some(flags) = flags {
            check_shape(shape, flags.shape(), "Image and output array have different shapes")?;
        }
        check_keep(keep, shape[0])
    }

    /// Processes one train of frames, shape `(frames, rows, cols)`.
    ///
    /// `frames` is calibrated and masked in place; `flags`, when given,
    /// receives the masked pixels. Returns the NaN-mean over the `keep` frames
    /// (all when `None`). Inputs are validated before any step runs, so on error
    /// nothing has been modified.
    #[instrument(level = "debug", skip_all, fields(shape = ?frames.shape()))]
    pub fn process(
        &mut self,
        mut frames: ArrayViewMut3<'_, T>,
        keep: Option<&[usize]>,
        flags: Option<ArrayViewMut3<'_, bool>>,
    ) -> Result<Array2<T>> {
        self.validate(frames.shape(), keep, flags.as_ref())?;

        let mut timings = PipelineTimings::new();

        if let Some(calibration) = &self.calibration {
            let _span = debug_span!("correct").entered();
            timings.time("correct", || {
                correct_image_data(frames.view_mut(), calibration.as_calibration())
            })?;
        }

        {
            let _span = debug_span!("mask", policy = ?self.config.policy).entered();
            let options = MaskOptions {
                policy: self.config.policy,
                threshold: self.config.threshold,
                bad_pixels: self.bad_pixels.as_ref().map(|m| m.view()),
            };
            timings.time("mask", || mask_image_data(frames.view_mut(), &options, flags))?;
        }

        let mean = {
            let _span = debug_span!("nanmean").entered();
            timings.time("nanmean", || nanmean_image_array(frames.view(), keep))?
        };

        {
            let _span = debug_span!("moving_average").entered();
            timings.time("moving_average", || self.average.update(mean.view()))?;
        }

        debug!(
            count = self.average.count(),
            elapsed_ms = timings.total_duration().as_secs_f64() * 1000.0,
            "Train processed"
        );
        self.timings = timings;
        Ok(mean)
    }

    /// Moving average of the train means, `None` before the first train.
    pub fn average(&self) -> Option<ArrayView2<'_, T>> {
        self.average.value()
    }

    pub fn average_count(&self) -> usize {
        self.average.count()
    }

    pub fn reset_average(&mut self) {
        self.average.reset();
    }

    pub fn last_timings(&self) -> &PipelineTimings {
        &self.timings
    }

    pub fn config(&self) -> &PipelineConfig<T> {
        &self.config
    }

    /// A new moving-average window takes effect on the next train.
    pub fn set_config(&mut self, config: PipelineConfig<T>) -> Result<()> {
        self.average.set_window(config.moving_average_window)?;
        self.config = config;
        Ok(())
    }
}
