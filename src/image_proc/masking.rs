//! Masking module
//!
//! Suppresses pixels that fail a data-quality criterion: a bad-pixel map,
//! NaN, or a `[lb, ub]` range, replacing them with zero or NaN.

mod kernel;
pub mod types;


pub use kernel::mask_image_data;
pub use types::{MaskOptions, MaskOptionsBuilder, MaskPolicy, Threshold};
