//! Logo image format detection.
//!
//! The DOCX header embeds the logo as-is, so only the container format and
//! the pixel dimensions are needed: the format picks the part extension and
//! content type, the dimensions give the aspect ratio for the drawing extent.
//! The data is fully decoded first, so a file with a valid header but a
//! broken body is rejected instead of embedded.

use crate::error::{Error, Result};
use std::fmt;

/// Image formats that can be embedded as a header logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Portable Network Graphics
    Png,
    /// JPEG/JFIF
    Jpeg,
    /// Graphics Interchange Format
    Gif,
    /// Windows bitmap
    Bmp,
}

impl ImageFormat {
    /// MIME type of the format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Bmp => "image/bmp",
        }
    }

    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Gif => "gif",
            ImageFormat::Bmp => "bmp",
        }
    }

    fn from_guessed(format: ::image::ImageFormat) -> Option<Self> {
        match format {
            ::image::ImageFormat::Png => Some(ImageFormat::Png),
            ::image::ImageFormat::Jpeg => Some(ImageFormat::Jpeg),
            ::image::ImageFormat::Gif => Some(ImageFormat::Gif),
            ::image::ImageFormat::Bmp => Some(ImageFormat::Bmp),
            _ => None,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime_type())
    }
}

/// Detected format and pixel size of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    /// Container format
    pub format: ImageFormat,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl ImageInfo {
    /// Height matching `width` at this image's aspect ratio.
    ///
    /// Fails when the intermediate product does not fit in a `u64`.
    pub fn scaled_height(&self, width: u64) -> Result<u64> {
        width
            .checked_mul(u64::from(self.height))
            .map(|product| product / u64::from(self.width))
            .ok_or_else(|| Error::Renderer(format!("logo width {} EMU is too large", width)))
    }
}

/// Detect the format and dimensions of an image.
///
/// # Returns
/// * `Ok(ImageInfo)` for PNG, JPEG, GIF and BMP data that decodes cleanly
/// * `Err(Error::UnsupportedImage)` for anything else
pub fn detect_image(data: &[u8]) -> Result<ImageInfo> {
    let guessed = ::image::guess_format(data).map_err(|_| {
        Error::UnsupportedImage("unrecognized image data (expected PNG, JPEG, GIF or BMP)".into())
    })?;
    let format = ImageFormat::from_guessed(guessed).ok_or_else(|| {
        Error::UnsupportedImage(format!("{:?} images cannot be embedded", guessed))
    })?;

    let decoded = ::image::load_from_memory_with_format(data, guessed)
        .map_err(|e| Error::UnsupportedImage(format!("{} could not be decoded: {}", format, e)))?;

    let (width, height) = (decoded.width(), decoded.height());
    if width == 0 || height == 0 {
        return Err(Error::UnsupportedImage(format!("{} has zero size", format)));
    }

    Ok(ImageInfo {
        format,
        width,
        height,
    })
}

/// Check if bytes are an embeddable image.
pub fn is_supported_image(data: &[u8]) -> bool {
    detect_image(data).is_ok()
}
