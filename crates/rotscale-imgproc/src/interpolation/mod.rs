//! Pixel interpolation used when resampling images during geometric
//! transformations.
//!
//! Only bilinear reconstruction is provided. Each channel is blended as an
//! independent scalar.

mod bilinear;

pub use bilinear::{bilinear_sample, in_sample_domain};
