use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use rotscale_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Returns true if the size covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of values in a buffer with `channels` values per pixel.
    ///
    /// Returns `None` if the count overflows or exceeds `isize::MAX`, the
    /// largest buffer an allocation can address.
    pub fn num_elements(&self, channels: usize) -> Option<usize> {
        self.width
            .checked_mul(self.height)?
            .checked_mul(channels)
            .filter(|&n| n <= isize::MAX as usize)
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Represents an image with pixel data.
///
/// The pixels are stored row-major with the channels of a pixel next to each
/// other, i.e. the element `(x, y, c)` lives at `(y * width + x) * CHANNELS + c`.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    /// A size whose buffer cannot be addressed returns [`ImageError::SizeOverflow`].
    ///
    /// # Examples
    ///
    /// ```
    /// use rotscale_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::new(
    ///    ImageSize {
    ///       width: 10,
    ///       height: 20,
    ///    },
    ///    vec![0u8; 10 * 20 * 3],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        let expected = Self::buffer_len(size)?;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size and every element set to `val`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotscale_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::from_size_val(
    ///   ImageSize {
    ///     width: 10,
    ///     height: 20,
    ///   }, 0u8).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.as_slice().len(), 10 * 20 * 3);
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let data = vec![val; Self::buffer_len(size)?];
        Image::new(size, data)
    }

    /// Create a new image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(
        size: ImageSize,
        f: impl Fn(usize, usize) -> [T; CHANNELS],
    ) -> Result<Self, ImageError>
    where
        T: Copy,
    {
        let mut data = Vec::with_capacity(Self::buffer_len(size)?);
        for y in 0..size.height {
            for x in 0..size.width {
                data.extend_from_slice(&f(x, y));
            }
        }

        Ok(Self { size, data })
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Get the raw pixel data.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the raw pixel data mutably.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Get the channels of the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::PixelIndexOutOfBounds`] outside `[0, width) x [0, height)`.
    pub fn pixel(&self, x: usize, y: usize) -> Result<&[T], ImageError> {
        let base = self.offset(x, y)?;
        Ok(&self.data[base..base + CHANNELS])
    }

    /// Overwrite the channels of the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::PixelIndexOutOfBounds`] outside `[0, width) x [0, height)`.
    pub fn set_pixel(
        &mut self,
        x: usize,
        y: usize,
        value: [T; CHANNELS],
    ) -> Result<(), ImageError>
    where
        T: Copy,
    {
        let base = self.offset(x, y)?;
        self.data[base..base + CHANNELS].copy_from_slice(&value);
        Ok(())
    }

    // the element count of a `size` buffer, bounded so `Vec<T>` can hold it
    fn buffer_len(size: ImageSize) -> Result<usize, ImageError> {
        let max_len = isize::MAX as usize / std::mem::size_of::<T>().max(1);
        size.num_elements(CHANNELS)
            .filter(|&n| n <= max_len)
            .ok_or(ImageError::SizeOverflow(size.width, size.height, CHANNELS))
    }

    fn offset(&self, x: usize, y: usize) -> Result<usize, ImageError> {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }
        Ok((y * self.width() + x) * CHANNELS)
    }
}

#[cfg(test)]
mod tests {
    use crate::image::{Image, ImageError, ImageSize};

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
        assert!(!image_size.is_empty());
        assert!(ImageSize::from([0, 3]).is_empty());
        assert_eq!(image_size.to_string(), "10x20");
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            vec![0u8; 10 * 20 * 3],
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.num_channels(), 3);

        Ok(())
    }

    #[test]
    fn image_invalid_length() {
        let image = Image::<u8, 3>::new([2, 2].into(), vec![0u8; 11]);
        assert_eq!(image, Err(ImageError::InvalidChannelShape(11, 12)));
    }

    #[test]
    fn image_empty() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new([0, 0].into(), vec![])?;
        assert!(image.size().is_empty());
        assert!(image.pixel(0, 0).is_err());
        Ok(())
    }

    #[test]
    fn image_pixel_layout() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_fn([3, 2].into(), |x, y| [x as u8, y as u8, 7])?;
        assert_eq!(image.pixel(2, 1)?, &[2, 1, 7]);
        assert_eq!(&image.as_slice()[(3 + 2) * 3..][..3], &[2, 1, 7]);
        Ok(())
    }

    #[test]
    fn image_size_overflow() {
        let huge = ImageSize {
            width: usize::MAX,
            height: 10,
        };
        assert_eq!(huge.num_elements(1), None);
        assert_eq!(ImageSize::from([4, 3]).num_elements(3), Some(36));
        assert_eq!(
            ImageSize::from([usize::MAX, 1]).num_elements(1),
            None,
            "beyond isize::MAX"
        );

        let res = Image::<u8, 3>::from_size_val(huge, 0);
        assert_eq!(res, Err(ImageError::SizeOverflow(usize::MAX, 10, 3)));

        let res = Image::<u8, 3>::from_fn(huge, |_, _| [0, 0, 0]);
        assert_eq!(res, Err(ImageError::SizeOverflow(usize::MAX, 10, 3)));

        let res = Image::<u8, 3>::new(huge, vec![]);
        assert_eq!(res, Err(ImageError::SizeOverflow(usize::MAX, 10, 3)));

        // fits as a byte count but not as a count of u64 values
        let wide = ImageSize {
            width: isize::MAX as usize / 4,
            height: 1,
        };
        let res = Image::<u64, 1>::from_size_val(wide, 0);
        assert_eq!(res, Err(ImageError::SizeOverflow(wide.width, 1, 1)));
    }

    #[test]
    fn image_set_pixel() -> Result<(), ImageError> {
        let mut image = Image::<u8, 3>::from_size_val([2, 2].into(), 0)?;
        image.set_pixel(1, 0, [1, 2, 3])?;
        assert_eq!(image.as_slice(), &[0, 0, 0, 1, 2, 3, 0, 0, 0, 0, 0, 0]);
        assert_eq!(
            image.set_pixel(2, 0, [0, 0, 0]),
            Err(ImageError::PixelIndexOutOfBounds(2, 0, 2, 2))
        );
        Ok(())
    }
}
