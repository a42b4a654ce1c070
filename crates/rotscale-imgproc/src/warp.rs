//! Geometric image transformations by inverse mapping.
//!
//! Every destination pixel is mapped back into the source image and
//! reconstructed with [`bilinear_sample`]. Destination pixels that map
//! outside the sampling domain keep the background value of the canvas,
//! which is black for the canvases allocated here.
//!
//! # Examples
//!
//! Rotating an image by 45 degrees about its center:
//!
//! ```
//! use rotscale_image::{Image, ImageSize};
//! use rotscale_imgproc::{warp, ExecutionStrategy};
//!
//! let src = Image::<u8, 3>::from_size_val(ImageSize { width: 10, height: 10 }, 255).unwrap();
//! let dst = warp::rotate_by_ratio(&src, 0.5, 0.5, 45.0, ExecutionStrategy::Serial).unwrap();
//!
//! assert_eq!(dst.size(), ImageSize { width: 14, height: 14 });
//! assert_eq!(dst.pixel(0, 0).unwrap(), &[0, 0, 0]);
//! ```

use rotscale_image::Image;

use crate::affine::{AffineMatrix, Point2d};
use crate::error::WarpError;
use crate::interpolation::bilinear_sample;
use crate::parallel::{self, ExecutionStrategy};
use crate::transform::{InverseMap, TransformSpec, WarpPlan};

/// Fills `dst` by sampling `src` at `inverse(x, y)` for every destination pixel.
///
/// Pixels whose source coordinate falls outside the sampling domain are left
/// untouched.
///
/// # Arguments
///
/// * `src` - The source image, borrowed for the whole call.
/// * `dst` - The destination image; its current content is the background.
/// * `inverse` - Maps a destination pixel coordinate to a source coordinate.
/// * `strategy` - How to distribute rows across threads.
pub fn resample<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    inverse: impl Fn(Point2d) -> Point2d + Send + Sync,
    strategy: ExecutionStrategy,
) -> Result<(), WarpError> {
    parallel::par_iter_rows_resample(dst, strategy, |x, y, dst_pixel| {
        let p = inverse(Point2d::new(x as f64, y as f64));
        if let Some(pixel) = bilinear_sample(src, p.x, p.y) {
            dst_pixel.copy_from_slice(&pixel);
        }
    })?;

    Ok(())
}

/// Applies an affine transformation to an image.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `dst` - The output image, which also sets the output size.
/// * `m_inv` - The destination to source transform.
/// * `strategy` - How to distribute rows across threads.
///
/// # Example
///
/// ```
/// use rotscale_image::{Image, ImageSize};
/// use rotscale_imgproc::{warp::warp_affine, AffineMatrix, ExecutionStrategy};
///
/// let src = Image::<u8, 1>::new(ImageSize { width: 3, height: 2 }, vec![0, 1, 2, 3, 4, 5]).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(ImageSize { width: 2, height: 1 }, 9).unwrap();
///
/// // destination x = 0 reads source x = 1
/// let m_inv = AffineMatrix::from_translation(1.0, 0.0);
/// warp_affine(&src, &mut dst, &m_inv, ExecutionStrategy::Serial).unwrap();
///
/// assert_eq!(dst.as_slice(), &[1, 9]);
/// ```
pub fn warp_affine<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    m_inv: &AffineMatrix,
    strategy: ExecutionStrategy,
) -> Result<(), WarpError> {
    resample(src, dst, |p| m_inv.apply(p), strategy)
}

/// Runs a whole operation: plans the canvas, allocates it black and resamples.
///
/// # Errors
///
/// Any error of [`TransformSpec::plan`], or a failing execution strategy.
pub fn warp<const C: usize>(
    src: &Image<u8, C>,
    spec: &TransformSpec,
    strategy: ExecutionStrategy,
) -> Result<Image<u8, C>, WarpError> {
    let plan = spec.plan(src.size())?;
    warp_with_plan(src, &plan, strategy)
}

/// Allocates the black canvas of an existing `plan` and resamples `src` into it.
///
/// Lets a caller that needs the canvas geometry, e.g. to run a second
/// implementation on the same canvas, plan once and reuse the result.
pub fn warp_with_plan<const C: usize>(
    src: &Image<u8, C>,
    plan: &WarpPlan,
    strategy: ExecutionStrategy,
) -> Result<Image<u8, C>, WarpError> {
    let mut dst = Image::from_size_val(plan.bbox.size, 0u8)?;

    match plan.inverse {
        InverseMap::Affine(m_inv) => warp_affine(src, &mut dst, &m_inv, strategy)?,
        inverse @ InverseMap::Scale { .. } => {
            resample(src, &mut dst, |p| inverse.apply(p), strategy)?
        }
    }

    log::debug!("resampled {} into {}", src.size(), dst.size());

    Ok(dst)
}

/// Rotates an image about `center` by `angle_deg` degrees (counter-clockwise
/// on screen) onto a canvas that contains the whole rotated source.
pub fn rotate<const C: usize>(
    src: &Image<u8, C>,
    center: Point2d,
    angle_deg: f64,
    strategy: ExecutionStrategy,
) -> Result<Image<u8, C>, WarpError> {
    warp(src, &TransformSpec::Rotate { center, angle_deg }, strategy)
}

/// Like [`rotate`], with the center given as fractions of the source size.
pub fn rotate_by_ratio<const C: usize>(
    src: &Image<u8, C>,
    ratio_x: f64,
    ratio_y: f64,
    angle_deg: f64,
    strategy: ExecutionStrategy,
) -> Result<Image<u8, C>, WarpError> {
    let spec = TransformSpec::rotate_by_ratio(src.size(), ratio_x, ratio_y, angle_deg);
    warp(src, &spec, strategy)
}

/// Scales an image by independent horizontal and vertical factors.
///
/// # Errors
///
/// [`WarpError::InvalidScale`] unless both factors are finite and positive.
pub fn scale<const C: usize>(
    src: &Image<u8, C>,
    scale_x: f64,
    scale_y: f64,
    strategy: ExecutionStrategy,
) -> Result<Image<u8, C>, WarpError> {
    warp(src, &TransformSpec::Scale { scale_x, scale_y }, strategy)
}
