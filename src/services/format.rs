//! Output format handling service
//!
//! This module separates output format conversion and encoding logic from
//! the pixel pipeline, making the system more testable and maintainable.

use crate::{
    config::OutputFormat,
    error::{MockupError, Result},
};
use image::{DynamicImage, ImageBuffer, RgbaImage};

/// Service for handling output format conversions and encoding
pub struct MockupFormatHandler;

impl MockupFormatHandler {
    /// Convert an RGBA image to the specified output format's color model
    ///
    /// # Errors
    ///
    /// Currently infallible; kept fallible for parity with the encoders.
    pub fn convert_format(rgba_image: RgbaImage, format: OutputFormat) -> Result<DynamicImage> {
        match format {
            OutputFormat::Png | OutputFormat::Rgba8 | OutputFormat::Tiff | OutputFormat::WebP => {
                Ok(DynamicImage::ImageRgba8(rgba_image))
            },
            OutputFormat::Jpeg => {
                // Convert RGBA to RGB by dropping the alpha channel
                let (width, height) = rgba_image.dimensions();
                let mut rgb_image = ImageBuffer::new(width, height);

                for (x, y, pixel) in rgba_image.enumerate_pixels() {
                    rgb_image.put_pixel(x, y, image::Rgb([pixel[0], pixel[1], pixel[2]]));
                }

                Ok(DynamicImage::ImageRgb8(rgb_image))
            },
        }
    }

    /// Encode an RGBA image to bytes in the specified format
    ///
    /// # Errors
    ///
    /// Returns `MockupError::Encode` when the underlying encoder fails
    /// (unsupported size, disabled format feature).
    pub fn encode(image: &RgbaImage, format: OutputFormat, quality: u8) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);

        match format {
            OutputFormat::Png => {
                DynamicImage::ImageRgba8(image.clone())
                    .write_to(&mut cursor, image::ImageFormat::Png)
                    .map_err(|e| MockupError::encode_stage_error("PNG", &e.to_string()))?;
            },
            OutputFormat::Jpeg => {
                let rgb = Self::convert_format(image.clone(), OutputFormat::Jpeg)?.to_rgb8();
                let mut encoder =
                    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, quality);
                encoder
                    .encode_image(&rgb)
                    .map_err(|e| MockupError::encode_stage_error("JPEG", &e.to_string()))?;
            },
            OutputFormat::WebP => {
                DynamicImage::ImageRgba8(image.clone())
                    .write_to(&mut cursor, image::ImageFormat::WebP)
                    .map_err(|e| MockupError::encode_stage_error("WebP", &e.to_string()))?;
            },
            OutputFormat::Tiff => {
                DynamicImage::ImageRgba8(image.clone())
                    .write_to(&mut cursor, image::ImageFormat::Tiff)
                    .map_err(|e| MockupError::encode_stage_error("TIFF", &e.to_string()))?;
            },
            OutputFormat::Rgba8 => {
                return Ok(image.as_raw().clone());
            },
        }

        Ok(buffer)
    }

    /// Get the appropriate file extension for a given output format
    #[must_use]
    pub fn get_extension(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::WebP => "webp",
            OutputFormat::Tiff => "tiff",
            OutputFormat::Rgba8 => "raw",
        }
    }

    /// Check if a format supports transparency (alpha channel)
    #[must_use]
    pub fn supports_transparency(format: OutputFormat) -> bool {
        match format {
            OutputFormat::Png | OutputFormat::WebP | OutputFormat::Tiff | OutputFormat::Rgba8 => {
                true
            },
            OutputFormat::Jpeg => false,
        }
    }

    /// Warn when a mockup with transparent backdrop is about to lose its
    /// alpha channel.
    pub fn validate_for_mockup_export(format: OutputFormat) {
        if !Self::supports_transparency(format) {
            log::warn!(
                "Output format {:?} does not support transparency. The removed backdrop will appear as a solid background.",
                format
            );
        }
    }

    /// Get the recommended quality settings for a format
    ///
    /// Returns `(default, min, max)` where applicable, `None` for lossless
    /// formats that ignore quality.
    #[must_use]
    pub fn get_quality_range(format: OutputFormat) -> Option<(u8, u8, u8)> {
        match format {
            OutputFormat::Jpeg => Some((90, 0, 100)),
            OutputFormat::WebP => Some((85, 0, 100)),
            OutputFormat::Png | OutputFormat::Tiff | OutputFormat::Rgba8 => None,
        }
    }
}
