//! Element types accepted by the kernels

use std::fmt::Debug;

/// A detector sample value.
///
/// Integer samples never hold NaN, so [`Sample::nan`] returns `None` for them
/// and NaN-based masking is rejected up front.
pub trait Sample: Copy + PartialOrd + Debug + Send + Sync + 'static {
    fn zero() -> Self;

    fn nan() -> Option<Self>;

    #[inline]
    fn is_nan(self) -> bool {
        false
    }
}

macro_rules! impl_float_sample {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                #[inline]
                fn zero() -> Self {
                    0.0
                }

                #[inline]
                fn nan() -> Option<Self> {
                    Some(<$t>::NAN)
                }

                #[inline]
                fn is_nan(self) -> bool {
                    <$t>::is_nan(self)
                }
            }
        )*
    };
}

macro_rules! impl_integer_sample {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                #[inline]
                fn zero() -> Self {
                    0
                }

                #[inline]
                fn nan() -> Option<Self> {
                    None
                }
            }
        )*
    };
}

impl_float_sample!(f32, f64);
impl_integer_sample!(u8, u16, u32, u64);
