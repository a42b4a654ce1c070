use rotscale_image::Image;

/// Returns true if `(u, v)` can be sampled with all four neighbours present.
///
/// The domain is `0 <= u < cols - 1` and `0 <= v < rows - 1`. The last column
/// and row are excluded, so coordinates landing there are out of range even
/// though the pixel itself exists.
#[inline]
pub fn in_sample_domain(cols: usize, rows: usize, u: f64, v: f64) -> bool {
    u >= 0.0 && u < cols as f64 - 1.0 && v >= 0.0 && v < rows as f64 - 1.0
}

/// Kernel for bilinear interpolation
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
///
/// # Returns
///
/// The interpolated pixel, or `None` if `(u, v)` is outside [`in_sample_domain`].
/// Channel values are truncated towards zero.
///
/// # Example
///
/// ```
/// use rotscale_image::{Image, ImageSize};
/// use rotscale_imgproc::interpolation::bilinear_sample;
///
/// let image = Image::<u8, 1>::new(ImageSize { width: 2, height: 2 }, vec![0, 100, 100, 200]).unwrap();
///
/// assert_eq!(bilinear_sample(&image, 0.5, 0.5), Some([100]));
/// assert_eq!(bilinear_sample(&image, 1.0, 0.0), None);
/// ```
pub fn bilinear_sample<const C: usize>(image: &Image<u8, C>, u: f64, v: f64) -> Option<[u8; C]> {
    let (rows, cols) = (image.rows(), image.cols());
    if !in_sample_domain(cols, rows, u, v) {
        return None;
    }

    // non-negative, so truncation is the floor
    let iu = u as usize;
    let iv = v as usize;

    let frac_u = u - iu as f64;
    let frac_v = v - iv as f64;

    let base00 = (iv * cols + iu) * C;
    let base01 = base00 + C;
    let base10 = ((iv + 1) * cols + iu) * C;
    let base11 = base10 + C;

    let data = image.as_slice();
    let p00 = &data[base00..base00 + C];
    let p01 = &data[base01..base01 + C];
    let p10 = &data[base10..base10 + C];
    let p11 = &data[base11..base11 + C];

    let mut pixel = [0u8; C];
    for k in 0..C {
        let top = p00[k] as f64 * (1.0 - frac_u) + p01[k] as f64 * frac_u;
        let bottom = p10[k] as f64 * (1.0 - frac_u) + p11[k] as f64 * frac_u;
        pixel[k] = (top * (1.0 - frac_v) + bottom * frac_v) as u8;
    }

    Some(pixel)
}

#[cfg(test)]
mod tests {
    use super::{bilinear_sample, in_sample_domain};
    use rotscale_image::{Image, ImageError, ImageSize};

    fn ramp(width: usize, height: usize) -> Result<Image<u8, 3>, ImageError> {
        Image::from_fn(ImageSize { width, height }, |x, y| {
            [(10 * x) as u8, (10 * y) as u8, 200]
        })
    }

    #[test]
    fn integer_coordinates_return_the_pixel() -> Result<(), ImageError> {
        let image = ramp(4, 3)?;
        for y in 0..2 {
            for x in 0..3 {
                let pixel = bilinear_sample(&image, x as f64, y as f64);
                assert_eq!(pixel.as_ref().map(|p| &p[..]), Some(image.pixel(x, y)?));
            }
        }
        Ok(())
    }

    #[test]
    fn blends_four_neighbours() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0, 100, 50, 250],
        )?;
        // top = 0 * 0.75 + 100 * 0.25 = 25, bottom = 50 * 0.75 + 250 * 0.25 = 100
        // result = 25 * 0.5 + 100 * 0.5 = 62.5
        assert_eq!(bilinear_sample(&image, 0.25, 0.5), Some([62]));
        Ok(())
    }

    #[test]
    fn truncates_towards_zero() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0, 3, 0, 3],
        )?;
        // 3 * 0.5 = 1.5
        assert_eq!(bilinear_sample(&image, 0.5, 0.0), Some([1]));
        Ok(())
    }

    #[test]
    fn last_column_and_row_are_out_of_range() -> Result<(), ImageError> {
        let image = ramp(5, 4)?;
        for y in 0..4 {
            assert_eq!(bilinear_sample(&image, 4.0, y as f64), None);
        }
        for x in 0..5 {
            assert_eq!(bilinear_sample(&image, x as f64, 3.0), None);
        }
        assert!(bilinear_sample(&image, 3.999, 2.999).is_some());
        Ok(())
    }

    #[test]
    fn negative_and_nan_are_out_of_range() -> Result<(), ImageError> {
        let image = ramp(5, 4)?;
        assert_eq!(bilinear_sample(&image, -0.001, 1.0), None);
        assert_eq!(bilinear_sample(&image, 1.0, -1.0), None);
        assert_eq!(bilinear_sample(&image, f64::NAN, 1.0), None);
        assert_eq!(bilinear_sample(&image, 1.0, f64::INFINITY), None);
        Ok(())
    }

    #[test]
    fn degenerate_images_have_no_domain() {
        assert!(!in_sample_domain(1, 10, 0.0, 0.0));
        assert!(!in_sample_domain(10, 1, 0.0, 0.0));
        assert!(!in_sample_domain(0, 0, 0.0, 0.0));
        assert!(in_sample_domain(2, 2, 0.0, 0.0));
    }
}
