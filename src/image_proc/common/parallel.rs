//! Sequential or parallel execution of per-pixel loops.
//!
//! `ndarray::Zip::par_for_each` splits the grid into disjoint blocks on the
//! rayon pool, so each pixel is written by exactly one worker.

use crate::image_proc::common::shape::FrameDim;

/// Below this many elements the rayon split costs more than it saves.
pub const PARALLEL_MIN_ELEMENTS: usize = 1 << 16;

/// Whether an in-place kernel over a buffer of `len` elements runs in parallel.
///
/// Single images always run on the calling thread.
#[inline]
pub fn in_place<D: FrameDim>(len: usize) -> bool {
    D::STACKED && reduction(len)
}

/// Whether a reduction reading `len` input elements runs in parallel.
#[inline]
pub fn reduction(len: usize) -> bool {
    len >= PARALLEL_MIN_ELEMENTS && rayon::current_num_threads() > 1
}

/// Runs a `Zip` with `f`, in parallel when `$parallel` is true.
macro_rules! zip_for_each {
    ($parallel:expr, $zip:expr, $f:expr) => {
        if $parallel {
            $zip.par_for_each($f)
        } else {
            $zip.for_each($f)
        }
    };
}

pub(crate) use zip_for_each;

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Ix2, Ix3};

    #[test]
    fn test_single_images_stay_sequential() {
        assert!(!in_place::<Ix2>(PARALLEL_MIN_ELEMENTS * 16));
    }

    #[test]
    fn test_stacks_split_by_size() {
        let multi_threaded = rayon::current_num_threads() > 1;
        assert!(!in_place::<Ix3>(PARALLEL_MIN_ELEMENTS - 1));
        assert_eq!(in_place::<Ix3>(PARALLEL_MIN_ELEMENTS), multi_threaded);
        assert!(!reduction(16));
        assert_eq!(reduction(PARALLEL_MIN_ELEMENTS), multi_threaded);
    }
}
