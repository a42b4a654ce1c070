use image::{Rgb, RgbImage};
use imageproc::geometric_transformations::{warp_into, Interpolation, Projection};
use rotscale_image::{Image, ImageSize};

use crate::error::IoError;
use crate::functional::{from_rgb_image, to_rgb_image};

/// Rotates `src` with imageproc onto a canvas of size `canvas`.
///
/// The arguments mirror the engine's rotation plan: `center` is the rotation
/// center in source pixels, `angle_deg` is counter-clockwise on screen and
/// `origin` is where the canvas pixel `(0, 0)` sits in the rotated frame.
/// Pixels without source data are black.
///
/// The output is not expected to match the engine bit for bit: the two differ
/// in pixel center convention, rounding and edge handling.
pub fn rotate_reference(
    src: &Image<u8, 3>,
    center: (f64, f64),
    angle_deg: f64,
    canvas: ImageSize,
    origin: (f64, f64),
) -> Result<Image<u8, 3>, IoError> {
    // imageproc turns clockwise on screen for positive angles
    let projection = Projection::translate(-origin.0 as f32, -origin.1 as f32)
        * Projection::rotate(-angle_deg.to_radians() as f32)
        * Projection::translate(-center.0 as f32, -center.1 as f32);

    warp_reference(src, &projection, canvas)
}

/// Scales `src` with imageproc onto a canvas of size `canvas`.
///
/// The canvas comes from the engine's scaling plan so both outputs share it.
pub fn scale_reference(
    src: &Image<u8, 3>,
    scale_x: f64,
    scale_y: f64,
    canvas: ImageSize,
) -> Result<Image<u8, 3>, IoError> {
    let projection = Projection::scale(scale_x as f32, scale_y as f32);

    warp_reference(src, &projection, canvas)
}

fn warp_reference(
    src: &Image<u8, 3>,
    projection: &Projection,
    canvas: ImageSize,
) -> Result<Image<u8, 3>, IoError> {
    let src = to_rgb_image(src)?;
    let mut out = RgbImage::new(canvas.width as u32, canvas.height as u32);
    warp_into(
        &src,
        projection,
        Interpolation::Bilinear,
        Rgb([0, 0, 0]),
        &mut out,
    );

    log::debug!("reference warp into {}", canvas);

    from_rgb_image(out)
}

#[cfg(test)]
mod tests {
    use super::{rotate_reference, scale_reference};
    use crate::error::IoError;
    use rotscale_image::{Image, ImageError, ImageSize};
    use rotscale_imgproc::{warp, ExecutionStrategy, Point2d, TransformSpec};

    /// Largest per-channel difference tolerated between the engine and the
    /// reference on a ramp with a slope of 3 per pixel.
    const TOLERANCE: u8 = 8;

    fn ramp(width: usize, height: usize) -> Result<Image<u8, 3>, ImageError> {
        Image::from_fn(ImageSize { width, height }, |x, y| {
            [(3 * x + 20) as u8, (3 * y + 20) as u8, 100]
        })
    }

    // compares the pixels whose source position lies at least `margin` pixels
    // inside the source
    fn assert_close(
        engine: &Image<u8, 3>,
        reference: &Image<u8, 3>,
        src_size: ImageSize,
        to_source: impl Fn(Point2d) -> Point2d,
        margin: f64,
    ) -> Result<usize, IoError> {
        assert_eq!(engine.size(), reference.size());
        let (w, h) = (src_size.width as f64, src_size.height as f64);
        let mut compared = 0;
        for y in 0..engine.height() {
            for x in 0..engine.width() {
                let p = to_source(Point2d::new(x as f64, y as f64));
                if p.x < margin || p.x > w - margin || p.y < margin || p.y > h - margin {
                    continue;
                }
                for (a, b) in engine.pixel(x, y)?.iter().zip(reference.pixel(x, y)?) {
                    assert!(a.abs_diff(*b) <= TOLERANCE, "({x}, {y}): {a} vs {b}");
                }
                compared += 1;
            }
        }
        Ok(compared)
    }

    #[test]
    fn rotation_matches_reference() -> Result<(), Box<dyn std::error::Error>> {
        let src = ramp(40, 30)?;
        for angle in [0.0, 30.0, -45.0, 90.0] {
            let center = Point2d::new(20.0, 15.0);
            let spec = TransformSpec::Rotate {
                center,
                angle_deg: angle,
            };
            let plan = spec.plan(src.size())?;
            let engine = warp::warp(&src, &spec, ExecutionStrategy::Serial)?;

            let origin = plan.bbox.origin;
            let reference = rotate_reference(
                &src,
                (center.x, center.y),
                angle,
                plan.bbox.size,
                (origin.x, origin.y),
            )?;

            let compared = assert_close(
                &engine,
                &reference,
                src.size(),
                |p| plan.inverse.apply(p),
                3.0,
            )?;
            assert!(compared > 100, "angle {angle}: only {compared} pixels compared");
        }
        Ok(())
    }

    #[test]
    fn scaling_matches_reference() -> Result<(), Box<dyn std::error::Error>> {
        let src = ramp(40, 30)?;
        for (sx, sy) in [(2.0, 2.0), (0.5, 1.5), (1.0, 1.0)] {
            let engine = warp::scale(&src, sx, sy, ExecutionStrategy::Serial)?;
            let reference = scale_reference(&src, sx, sy, engine.size())?;
            let compared = assert_close(
                &engine,
                &reference,
                src.size(),
                |p| Point2d::new(p.x / sx, p.y / sy),
                3.0,
            )?;
            assert!(compared > 100, "({sx}, {sy}): only {compared} pixels compared");
        }
        Ok(())
    }
}
