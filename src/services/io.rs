//! Image I/O operations service
//!
//! This module separates file I/O operations from the pixel pipeline,
//! making the system more testable and maintainable.

use crate::{
    config::OutputFormat,
    error::{MockupError, Result},
    services::format::MockupFormatHandler,
};
use image::RgbaImage;
use std::path::Path;

/// Service for handling image file input/output operations
pub struct ImageIoService;

impl ImageIoService {
    /// Load an image from a file path
    ///
    /// # Errors
    ///
    /// - `MockupError::Load` when the file does not exist
    /// - `MockupError::Decode` when the contents cannot be decoded
    pub fn load_image<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(MockupError::load_error(
                &path_ref.display().to_string(),
                "file does not exist",
            ));
        }

        // First try extension-based format detection
        match image::open(path_ref) {
            Ok(img) => Ok(img.to_rgba8()),
            Err(e) => {
                // If extension-based loading fails, try content-based detection
                log::debug!(
                    "Extension-based loading failed for {}: {}. Attempting content-based detection.",
                    path_ref.display(),
                    e
                );

                let data = std::fs::read(path_ref).map_err(|io_err| {
                    MockupError::file_io_error("read image data", path_ref, &io_err)
                })?;

                image::load_from_memory(&data)
                    .map(|img| img.to_rgba8())
                    .map_err(|content_err| {
                        MockupError::decode(format!(
                            "Failed to load image '{}' with both extension-based ({}) and content-based detection ({})",
                            path_ref.display(),
                            e,
                            content_err
                        ))
                    })
            },
        }
    }

    /// Decode an image from in-memory bytes
    ///
    /// # Errors
    ///
    /// Returns `MockupError::Decode` when the bytes are not a supported
    /// raster format.
    pub fn load_from_memory(bytes: &[u8]) -> Result<RgbaImage> {
        image::load_from_memory(bytes)
            .map(|img| img.to_rgba8())
            .map_err(|e| MockupError::decode(format!("Failed to decode image from bytes: {}", e)))
    }

    /// Save an image to a file with the specified format
    ///
    /// # Errors
    ///
    /// - `MockupError::Io` when the output directory cannot be created or
    ///   the file cannot be written
    /// - `MockupError::Encode` when encoding fails
    pub fn save_image<P: AsRef<Path>>(
        image: &RgbaImage,
        path: P,
        format: OutputFormat,
        quality: u8,
    ) -> Result<()> {
        let path_ref = path.as_ref();

        if let Some(parent) = path_ref.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    MockupError::file_io_error("create output directory", parent, &e)
                })?;
            }
        }

        MockupFormatHandler::validate_for_mockup_export(format);

        let bytes = MockupFormatHandler::encode(image, format, quality)?;
        std::fs::write(path_ref, bytes)
            .map_err(|e| MockupError::file_io_error("write image file", path_ref, &e))?;

        Ok(())
    }
}
