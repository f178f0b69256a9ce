//! Correction pipeline configuration types

use ndarray::{Array3, Ix3};

use crate::image_proc::common::error::{ProcError, Result};
use crate::image_proc::common::shape::check_shape;
use crate::image_proc::common::Sample;
use crate::image_proc::correction::Calibration;
use crate::image_proc::masking::{MaskPolicy, Threshold};

/// Configuration for a correction pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig<T> {
    /// Representation of masked pixels. NaN keeps them out of the train mean.
    pub policy: MaskPolicy,
    /// Accepted sample range after calibration
    pub threshold: Option<Threshold<T>>,
    /// Number of trains in the moving average
    pub moving_average_window: usize,
}

impl<T> Default for PipelineConfig<T> {
    fn default() -> Self {
        Self {
            policy: MaskPolicy::Nan,
            threshold: None,
            moving_average_window: 1,
        }
    }
}

impl<T: Sample> PipelineConfig<T> {
    pub fn builder() -> PipelineConfigBuilder<T> {
        PipelineConfigBuilder::default()
    }
}

/// Builder for PipelineConfig
pub struct PipelineConfigBuilder<T> {
    policy: Option<MaskPolicy>,
    threshold: Option<(T, T)>,
    moving_average_window: Option<usize>,
}

impl<T> Default for PipelineConfigBuilder<T> {
    fn default() -> Self {
        Self {
            policy: None,
            threshold: None,
            moving_average_window: None,
        }
    }
}

impl<T: Sample> PipelineConfigBuilder<T> {
    pub fn policy(mut self, policy: MaskPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn threshold(mut self, lb: T, ub: T) -> Self {
        self.threshold = Some((lb, ub));
        self
    }

    pub fn moving_average_window(mut self, window: usize) -> Self {
        self.moving_average_window = Some(window);
        self
    }

    pub fn build(self) -> Result<PipelineConfig<T>> {
        let default = PipelineConfig::<T>::default();
        let window = self.moving_average_window.unwrap_or(default.moving_average_window);
        if window == 0 {
            return Err(ProcError::invalid_argument("moving average window must be positive"));
        }
        Ok(PipelineConfig {
            policy: self.policy.unwrap_or(default.policy),
            threshold: self
                .threshold
                .map(|(lb, ub)| Threshold::new(lb, ub))
                .transpose()?,
            moving_average_window: window,
        })
    }
}

/// Calibration constants owned by a pipeline, shape `(frames, rows, cols)`
#[derive(Debug, Clone)]
pub enum CalibrationSet<T> {
    Offset(Array3<T>),
    Gain(Array3<T>),
    GainOffset { gain: Array3<T>, offset: Array3<T> },
}

impl<T> CalibrationSet<T> {
    /// Fails unless every constants buffer has exactly `shape`.
    pub fn check(&self, shape: &[usize]) -> Result<()> {
        match self {
            CalibrationSet::Offset(offset) => {
                check_shape(shape, offset.shape(), "data and constants have different shapes")
            }
            CalibrationSet::Gain(gain) => {
                check_shape(shape, gain.shape(), "data and constants have different shapes")
            }
            CalibrationSet::GainOffset { gain, offset } => {
                check_shape(shape, gain.shape(), "data and gain constants have different shapes")?;
                check_shape(shape, offset.shape(), "data and offset constants have different shapes")
            }
        }
    }

    pub fn as_calibration(&self) -> Calibration<'_, T, Ix3> {
        match self {
            CalibrationSet::Offset(offset) => Calibration::Offset(offset.view()),
            CalibrationSet::Gain(gain) => Calibration::Gain(gain.view()),
            CalibrationSet::GainOffset { gain, offset } => Calibration::GainOffset {
                gain: gain.view(),
                offset: offset.view(),
            },
        }
    }
}
