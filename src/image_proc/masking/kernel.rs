use ndarray::{aview0, ArrayViewMut, Zip};
use tracing::instrument;

use crate::image_proc::common::error::{ProcError, Result};
use crate::image_proc::common::parallel::{self, zip_for_each};
use crate::image_proc::common::shape::{check_frame_shape, check_shape};
use crate::image_proc::common::{FrameDim, Sample};
use crate::image_proc::masking::types::{MaskOptions, MaskPolicy, Threshold};

/// Per-pixel exclusion rule resolved once per call.
#[derive(Debug, Clone, Copy)]
struct PixelRule<T> {
    replacement: T,
    rewrite_nan: bool,
    threshold: Option<Threshold<T>>,
}

impl<T: Sample> PixelRule<T> {
    fn new(policy: MaskPolicy, threshold: Option<Threshold<T>>) -> Result<Self> {
        let replacement = match policy {
            MaskPolicy::Zero => T::zero(),
            MaskPolicy::Nan => T::nan().ok_or_else(|| {
                ProcError::invalid_argument(format!(
                    "NaN masking requires a floating-point sample type, got {}",
                    std::any::type_name::<T>()
                ))
            })?,
        };
        Ok(Self {
            replacement,
            rewrite_nan: policy == MaskPolicy::Zero,
            threshold,
        })
    }

    /// Returns true when the pixel is excluded.
    ///
    /// Order matters for the flag pattern: bad pixel, then NaN, then range.
    #[inline]
    fn apply(&self, v: &mut T, bad: bool) -> bool {
        if bad {
            *v = self.replacement;
            return true;
        }
        if v.is_nan() {
            if self.rewrite_nan {
                *v = self.replacement;
            }
            return true;
        }
        match self.threshold {
            Some(t) if !t.contains(*v) => {
                *v = self.replacement;
                true
            }
            _ => false,
        }
    }
}

/// Masks an image or an image array in place.
///
/// Every excluded pixel is rewritten according to `options.policy` and, when
/// `out` is given, flagged `true` there. Pixels that are kept are left alone in
/// both buffers, so flags accumulate across calls.
///
/// # Errors
///
/// * `ShapeMismatch` - `out` differs from `src`, or the bad-pixel mask differs
///   from the frame shape
/// * `InvalidArgument` - NaN policy requested for an integer sample type
///
/// Nothing is modified when an error is returned.
#[instrument(level = "trace", skip_all, fields(shape = ?src.shape(), policy = ?options.policy))]
pub fn mask_image_data<T: Sample, D: FrameDim>(
    src: ArrayViewMut<'_, T, D>,
    options: &MaskOptions<'_, T>,
    out: Option<ArrayViewMut<'_, bool, D>>,
) -> Result<()> {
    if let Some(out) = &out {
        check_shape(src.shape(), out.shape(), "Image and output array have different shapes")?;
    }
    if let Some(mask) = &options.bad_pixels {
        check_frame_shape(src.shape(), mask.shape(), "Image and mask have different shapes")?;
    }
    let rule = PixelRule::new(options.policy, options.threshold)?;

    let no_bad_pixels = false;
    let unmasked = aview0(&no_bad_pixels);
    let bad = match &options.bad_pixels {
        Some(mask) => mask.broadcast(src.raw_dim()),
        None => unmasked.broadcast(src.raw_dim()),
    }
    .ok_or_else(|| {
        ProcError::shape_mismatch("Mask cannot be broadcast over the image", src.shape(), &[])
    })?;

    let parallel = parallel::in_place::<D>(src.len());
    match out {
        Some(out) => zip_for_each!(
            parallel,
            Zip::from(src).and(bad).and(out),
            |v: &mut T, &b: &bool, flag: &mut bool| {
                if rule.apply(v, b) {
                    *flag = true;
                }
            }
        ),
        None => zip_for_each!(parallel, Zip::from(src).and(bad), |v: &mut T, &b: &bool| {
            rule.apply(v, b);
        }),
    }
    Ok(())
}
