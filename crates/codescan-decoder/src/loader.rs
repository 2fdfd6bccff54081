//! Raw bytes to colour raster image

use image::{DynamicImage, ImageError, ImageReader};
use std::io::Cursor;

/// Decode an uploaded blob (PNG, JPEG, GIF, WebP, BMP, ...) into an RGB image.
///
/// The format is sniffed from the content, never from a filename or content type.
pub fn load_image(data: &[u8]) -> Result<DynamicImage, ImageError> {
    let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;
    let img = reader.decode()?;

    Ok(match img {
        DynamicImage::ImageRgb8(_) => img,
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    })
}
