use rotscale_image::ImageSize;

use crate::affine::{AffineMatrix, Point2d};
use crate::error::WarpError;

/// The parameters of a single resampling operation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformSpec {
    /// Rotation about `center` (source pixel coordinates) by `angle_deg` degrees.
    ///
    /// Positive angles turn the content counter-clockwise on screen.
    Rotate {
        /// rotation center in source coordinates.
        center: Point2d,
        /// signed rotation angle in degrees.
        angle_deg: f64,
    },
    /// Independent scaling along x and y.
    Scale {
        /// horizontal scale factor.
        scale_x: f64,
        /// vertical scale factor.
        scale_y: f64,
    },
}

/// The output canvas of an operation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// Size of the canvas in pixels.
    pub size: ImageSize,
    /// Position of the canvas pixel `(0, 0)` in the transformed space.
    pub origin: Point2d,
}

/// Maps a destination pixel back into source coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InverseMap {
    /// A general affine inverse.
    Affine(AffineMatrix),
    /// Axis-aligned division by the scale factors.
    Scale {
        /// horizontal scale factor.
        scale_x: f64,
        /// vertical scale factor.
        scale_y: f64,
    },
}

impl InverseMap {
    /// Returns the source coordinate of the destination point `p`.
    #[inline]
    pub fn apply(&self, p: Point2d) -> Point2d {
        match self {
            InverseMap::Affine(m) => m.apply(p),
            InverseMap::Scale { scale_x, scale_y } => Point2d {
                x: p.x / scale_x,
                y: p.y / scale_y,
            },
        }
    }
}

/// Everything the resampler needs for one operation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WarpPlan {
    /// The output canvas.
    pub bbox: BoundingBox,
    /// The destination to source mapping.
    pub inverse: InverseMap,
}

impl TransformSpec {
    /// Rotation about a center expressed as fractions of the source size.
    ///
    /// A ratio of `(0.5, 0.5)` rotates about the middle of the image. The
    /// ratios are not validated here; the command line rejects values outside
    /// `[0, 1]` before reaching the engine.
    pub fn rotate_by_ratio(size: ImageSize, ratio_x: f64, ratio_y: f64, angle_deg: f64) -> Self {
        TransformSpec::Rotate {
            center: Point2d::new(size.width as f64 * ratio_x, size.height as f64 * ratio_y),
            angle_deg,
        }
    }

    /// Computes the canvas and inverse mapping for a source of size `src_size`.
    ///
    /// # Errors
    ///
    /// * [`WarpError::InvalidScale`] if a scale factor is zero, negative or not finite.
    /// * [`WarpError::InvalidRotation`] if the angle or center is not finite.
    /// * [`WarpError::EmptyOutput`] if the canvas would have no pixels.
    /// * [`WarpError::OutputTooLarge`] if the canvas pixel count cannot be addressed.
    pub fn plan(&self, src_size: ImageSize) -> Result<WarpPlan, WarpError> {
        let plan = match *self {
            TransformSpec::Rotate { center, angle_deg } => {
                if !(angle_deg.is_finite() && center.x.is_finite() && center.y.is_finite()) {
                    return Err(WarpError::InvalidRotation {
                        angle: angle_deg,
                        cx: center.x,
                        cy: center.y,
                    });
                }

                let forward = rotation_forward(center, angle_deg);
                let bbox = rotated_bounding_box(src_size, &forward);
                let inverse = rotation_inverse(center, angle_deg, bbox.origin);

                WarpPlan {
                    bbox,
                    inverse: InverseMap::Affine(inverse),
                }
            }
            TransformSpec::Scale { scale_x, scale_y } => {
                let valid = |s: f64| s.is_finite() && s > 0.0;
                if !(valid(scale_x) && valid(scale_y)) {
                    return Err(WarpError::InvalidScale(scale_x, scale_y));
                }

                WarpPlan {
                    bbox: scaled_bounding_box(src_size, scale_x, scale_y),
                    inverse: InverseMap::Scale { scale_x, scale_y },
                }
            }
        };

        let size = plan.bbox.size;
        if size.is_empty() {
            return Err(WarpError::EmptyOutput(size.width, size.height));
        }
        // extents beyond usize saturate in the cast and land here
        if size.num_elements(1).is_none() {
            return Err(WarpError::OutputTooLarge(size.width, size.height));
        }

        log::debug!(
            "planned {:?} on {} source: canvas {} with origin ({:.3}, {:.3})",
            self,
            src_size,
            size,
            plan.bbox.origin.x,
            plan.bbox.origin.y
        );

        Ok(plan)
    }
}

/// Source to rotated space: move `center` to the origin, then rotate.
pub fn rotation_forward(center: Point2d, angle_deg: f64) -> AffineMatrix {
    AffineMatrix::from_translation(-center.x, -center.y)
        * AffineMatrix::from_rotation(angle_deg)
}

/// Canvas to source: shift by the canvas `origin`, rotate back, then move the
/// origin back to `center`.
pub fn rotation_inverse(center: Point2d, angle_deg: f64, origin: Point2d) -> AffineMatrix {
    AffineMatrix::from_translation(origin.x, origin.y)
        * AffineMatrix::from_rotation(-angle_deg)
        * AffineMatrix::from_translation(center.x, center.y)
}

/// Bounds the four forward-transformed corners of a `size` source.
///
/// The canvas size is the rounded extent (half away from zero) and the origin
/// the minimum corner.
pub fn rotated_bounding_box(size: ImageSize, forward: &AffineMatrix) -> BoundingBox {
    let (w, h) = (size.width as f64, size.height as f64);
    let corners = [
        Point2d::new(0.0, 0.0),
        Point2d::new(w, 0.0),
        Point2d::new(0.0, h),
        Point2d::new(w, h),
    ]
    .map(|p| forward.apply(p));

    let (mut min, mut max) = (corners[0], corners[0]);
    for p in &corners[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }

    BoundingBox {
        size: ImageSize {
            width: (max.x - min.x).round() as usize,
            height: (max.y - min.y).round() as usize,
        },
        origin: min,
    }
}

/// The canvas of an axis-aligned scaling: `round(w * sx) x round(h * sy)`.
pub fn scaled_bounding_box(size: ImageSize, scale_x: f64, scale_y: f64) -> BoundingBox {
    BoundingBox {
        size: ImageSize {
            width: (size.width as f64 * scale_x).round() as usize,
            height: (size.height as f64 * scale_y).round() as usize,
        },
        origin: Point2d::default(),
    }
}
