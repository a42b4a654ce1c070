#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// 2D affine matrices in homogeneous coordinates.
pub mod affine;

/// Error types for the resampling engine.
pub mod error;

/// utilities for interpolation.
pub mod interpolation;

/// module containing parallelization utilities.
pub mod parallel;

/// operation parameters, bounding boxes and inverse maps.
pub mod transform;

/// image geometric transformations module.
pub mod warp;

pub use crate::affine::{AffineMatrix, Point2d};
pub use crate::error::WarpError;
pub use crate::parallel::ExecutionStrategy;
pub use crate::transform::{BoundingBox, InverseMap, TransformSpec, WarpPlan};
