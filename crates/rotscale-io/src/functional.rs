use std::path::{Path, PathBuf};

use image::RgbImage;
use rotscale_image::{Image, ImageSize};

use crate::error::IoError;

/// Reads an image from the given file path as 8-bit RGB.
///
/// The method tries to read from any image format supported by the image crate,
/// guessing the format from the file content. Gray or alpha images are
/// converted to three channels.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Errors
///
/// * [`IoError::FileDoesNotExist`] if there is no file at `file_path`.
/// * [`IoError::ImageDecodeError`] if the content cannot be decoded.
/// * [`IoError::EmptyImage`] if the decoded image has no pixels.
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref().to_owned();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path));
    }

    let img = image::ImageReader::open(&file_path)?
        .with_guessed_format()?
        .decode()
        .map_err(IoError::ImageDecodeError)?;

    if img.width() == 0 || img.height() == 0 {
        return Err(IoError::EmptyImage(file_path));
    }

    let image = from_rgb_image(img.into_rgb8())?;
    log::info!("read {} image from {}", image.size(), file_path.display());

    Ok(image)
}

/// Writes an 8-bit RGB image to the given file path.
///
/// The encoding is chosen from the file extension.
///
/// # Errors
///
/// [`IoError::ImageEncodeError`] if the extension is not supported or the
/// destination cannot be written.
pub fn write_image_any_rgb8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 3>,
) -> Result<(), IoError> {
    let file_path = file_path.as_ref();

    to_rgb_image(image)?
        .save(file_path)
        .map_err(IoError::ImageEncodeError)?;

    log::info!("wrote {} image to {}", image.size(), file_path.display());

    Ok(())
}

/// Path of the verification image written next to `output_path`.
///
/// `out/rotated.png` becomes `out/rotated_verify.png`; a path without an
/// extension just gets the `_verify` suffix.
pub fn verify_output_path(output_path: impl AsRef<Path>) -> PathBuf {
    let output_path = output_path.as_ref();
    let stem = output_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file_name = match output_path.extension() {
        Some(ext) => format!("{stem}_verify.{}", ext.to_string_lossy()),
        None => format!("{stem}_verify"),
    };

    output_path.with_file_name(file_name)
}

pub(crate) fn to_rgb_image(image: &Image<u8, 3>) -> Result<RgbImage, IoError> {
    let (width, height) = (image.width() as u32, image.height() as u32);
    RgbImage::from_raw(width, height, image.as_slice().to_vec())
        .ok_or(IoError::InvalidImageBuffer(width, height))
}

pub(crate) fn from_rgb_image(img: RgbImage) -> Result<Image<u8, 3>, IoError> {
    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };
    Ok(Image::new(size, img.into_raw())?)
}
