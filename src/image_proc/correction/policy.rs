//! Per-pixel correction rules

use num_traits::Float;

/// A correction applied to one sample with its calibration constant.
pub trait CorrectionPolicy {
    fn correct<T: Float>(value: T, constant: T) -> T;
}

/// `value - constant`
#[derive(Debug, Clone, Copy)]
pub struct OffsetPolicy;

impl CorrectionPolicy for OffsetPolicy {
    #[inline]
    fn correct<T: Float>(value: T, constant: T) -> T {
        value - constant
    }
}

/// `value * constant`
#[derive(Debug, Clone, Copy)]
pub struct GainPolicy;

impl CorrectionPolicy for GainPolicy {
    #[inline]
    fn correct<T: Float>(value: T, constant: T) -> T {
        value * constant
    }
}
