//! Averaging module
//!
//! NaN-aware means over stacks and image pairs, and the running mean used to
//! accumulate corrected frames across trains.

mod moving_average;
mod nanmean;


pub use moving_average::{moving_average, MovingAverage};
pub use nanmean::{nanmean_image_array, nanmean_images};

pub(crate) use nanmean::check_keep;
