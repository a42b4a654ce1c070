use rotscale_image::ImageError;

use crate::parallel::ParallelError;

/// An error type for the resampling engine.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WarpError {
    /// A scale factor is zero, negative or not finite.
    #[error("Invalid scale factors ({0}, {1}): both must be finite and greater than zero")]
    InvalidScale(f64, f64),

    /// The rotation angle or center is not finite.
    #[error("Invalid rotation: angle {angle} about ({cx}, {cy}) must be finite")]
    InvalidRotation {
        /// rotation angle in degrees.
        angle: f64,
        /// x coordinate of the rotation center.
        cx: f64,
        /// y coordinate of the rotation center.
        cy: f64,
    },

    /// The computed output canvas has no pixels.
    #[error("The output canvas {0}x{1} is empty")]
    EmptyOutput(usize, usize),

    /// The computed output canvas has more pixels than a buffer can hold.
    #[error("The output canvas {0}x{1} is too large to allocate")]
    OutputTooLarge(usize, usize),

    /// Error creating or accessing an image.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error while running the parallel loop.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
