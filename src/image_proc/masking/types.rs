//! Masking configuration types

use ndarray::ArrayView2;

use crate::image_proc::common::{ProcError, Result, Sample};

/// How an excluded pixel is represented after masking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaskPolicy {
    /// Excluded pixels become zero; NaN pixels are always excluded
    #[default]
    Zero,
    /// Excluded pixels become NaN; NaN input is kept and only flagged
    Nan,
}

/// Inclusive range of accepted sample values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold<T> {
    lb: T,
    ub: T,
}

impl<T: Sample> Threshold<T> {
    pub fn new(lb: T, ub: T) -> Result<Self> {
        if lb.is_nan() || ub.is_nan() {
            return Err(ProcError::invalid_argument("threshold bounds cannot be NaN"));
        }
        if lb > ub {
            return Err(ProcError::invalid_argument(format!(
                "lower threshold {lb:?} is greater than upper threshold {ub:?}"
            )));
        }
        Ok(Self { lb, ub })
    }

    pub fn lower(&self) -> T {
        self.lb
    }

    pub fn upper(&self) -> T {
        self.ub
    }

    /// NaN is never contained.
    #[inline]
    pub fn contains(&self, v: T) -> bool {
        v >= self.lb && v <= self.ub
    }
}

/// Criteria and policy for one masking call
#[derive(Debug, Clone)]
pub struct MaskOptions<'a, T> {
    /// Representation of excluded pixels
    pub policy: MaskPolicy,
    /// Values outside this range are excluded
    pub threshold: Option<Threshold<T>>,
    /// Per-pixel exclusion map of shape `(rows, cols)`, shared by every frame
    pub bad_pixels: Option<ArrayView2<'a, bool>>,
}

impl<T> Default for MaskOptions<'_, T> {
    fn default() -> Self {
        Self {
            policy: MaskPolicy::default(),
            threshold: None,
            bad_pixels: None,
        }
    }
}

impl<'a, T: Sample> MaskOptions<'a, T> {
    pub fn builder() -> MaskOptionsBuilder<'a, T> {
        MaskOptionsBuilder::default()
    }
}

/// Builder for MaskOptions
pub struct MaskOptionsBuilder<'a, T> {
    policy: Option<MaskPolicy>,
    threshold: Option<(T, T)>,
    bad_pixels: Option<ArrayView2<'a, bool>>,
}

impl<T> Default for MaskOptionsBuilder<'_, T> {
    fn default() -> Self {
        Self {
            policy: None,
            threshold: None,
            bad_pixels: None,
        }
    }
}

impl<'a, T: Sample> MaskOptionsBuilder<'a, T> {
    pub fn policy(mut self, policy: MaskPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn threshold(mut self, lb: T, ub: T) -> Self {
        self.threshold = Some((lb, ub));
        self
    }

    pub fn bad_pixels(mut self, mask: ArrayView2<'a, bool>) -> Self {
        self.bad_pixels = Some(mask);
        self
    }

    /// Fails when the threshold bounds are NaN or inverted.
    pub fn build(self) -> Result<MaskOptions<'a, T>> {
        let threshold = self
            .threshold
            .map(|(lb, ub)| Threshold::new(lb, ub))
            .transpose()?;
        Ok(MaskOptions {
            policy: self.policy.unwrap_or_default(),
            threshold,
            bad_pixels: self.bad_pixels,
        })
    }
}
