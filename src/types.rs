//! Core types for mockup rendering operations

use crate::{
    config::OutputFormat,
    error::{MockupError, Result},
};
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Rectangular print area on a garment, expressed as percentages (0-100)
/// of the garment image's width and height.
///
/// Values outside 0-100 are permitted; the composer clips the design
/// against the canvas bounds instead of rejecting the rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrintArea {
    /// Offset from the top edge, percent of image height
    pub top: f32,
    /// Offset from the left edge, percent of image width
    pub left: f32,
    /// Rectangle width, percent of image width
    pub width: f32,
    /// Rectangle height, percent of image height
    pub height: f32,
}

/// Pixel-space print rectangle derived from a [`PrintArea`].
///
/// The origin is signed: a print area hanging off the left or top edge maps
/// to negative coordinates and is clipped during composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl PrintArea {
    #[must_use]
    pub fn new(top: f32, left: f32, width: f32, height: f32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Map the normalized rectangle onto an image of the given dimensions.
    ///
    /// Rounding rule: every percentage-to-pixel mapping rounds half away
    /// from zero (`f32::round`). This is the single rounding rule used
    /// wherever a print area becomes pixels.
    #[must_use]
    pub fn pixel_rect(&self, image_width: u32, image_height: u32) -> PixelRect {
        // Multiply before dividing so exact half values (12.75% of 200 =
        // 25.5) survive f32 arithmetic and round deterministically.
        let x = (self.left * image_width as f32 / 100.0).round() as i64;
        let y = (self.top * image_height as f32 / 100.0).round() as i64;
        let width = (self.width * image_width as f32 / 100.0).round().max(0.0) as u32;
        let height = (self.height * image_height as f32 / 100.0).round().max(0.0) as u32;

        PixelRect {
            x,
            y,
            width,
            height,
        }
    }
}

/// An RGB color parsed from a 6-hex-digit string (`#RRGGBB`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorRgb {
    /// Plain white, the identity color for recoloring
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
    };

    #[must_use]
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Whether this color is the recolor identity (`#ffffff`)
    #[must_use]
    pub fn is_white(&self) -> bool {
        *self == Self::WHITE
    }
}

impl FromStr for ColorRgb {
    type Err = MockupError;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);

        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(MockupError::invalid_color(format!(
                "'{}' is not a 6-hex-digit color (expected #RRGGBB)",
                s
            )));
        }

        let parse_channel = |range: std::ops::Range<usize>| -> Result<u8> {
            hex.get(range)
                .and_then(|chunk| u8::from_str_radix(chunk, 16).ok())
                .ok_or_else(|| {
                    MockupError::invalid_color(format!("'{}' has a malformed channel", s))
                })
        };

        Ok(Self {
            r: parse_channel(0..2)?,
            g: parse_channel(2..4)?,
            b: parse_channel(4..6)?,
        })
    }
}

impl std::fmt::Display for ColorRgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Detailed timing breakdown for mockup rendering
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageTimings {
    /// Image loading and decoding
    pub decode_ms: u64,

    /// Chroma-key background removal
    pub background_removal_ms: u64,

    /// Garment recoloring
    pub recolor_ms: u64,

    /// Design placement and composition
    pub compose_ms: u64,

    /// Final image encoding (if saving to file)
    pub encode_ms: Option<u64>,

    /// Total end-to-end processing time
    pub total_ms: u64,
}

impl StageTimings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get timing summary for display
    #[must_use]
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Total: {}ms | Decode: {}ms | Background removal: {}ms | Recolor: {}ms | Compose: {}ms",
            self.total_ms,
            self.decode_ms,
            self.background_removal_ms,
            self.recolor_ms,
            self.compose_ms
        );

        if let Some(encode_ms) = self.encode_ms {
            summary.push_str(&format!(" | Encode: {}ms", encode_ms));
        }

        summary
    }
}

/// Result of a mockup rendering operation
#[derive(Debug, Clone)]
pub struct MockupResult {
    /// The flattened mockup image (garment plus design)
    pub image: RgbaImage,

    /// Original garment image dimensions
    pub garment_dimensions: (u32, u32),

    /// Detailed timing breakdown
    pub timings: StageTimings,

    /// Stable identifier of the garment source, when known (for logging)
    pub garment_key: Option<String>,
}

impl MockupResult {
    #[must_use]
    pub fn new(image: RgbaImage, garment_dimensions: (u32, u32), timings: StageTimings) -> Self {
        Self {
            image,
            garment_dimensions,
            timings,
            garment_key: None,
        }
    }

    #[must_use]
    pub fn with_garment_key(
        image: RgbaImage,
        garment_dimensions: (u32, u32),
        timings: StageTimings,
        garment_key: String,
    ) -> Self {
        Self {
            image,
            garment_dimensions,
            timings,
            garment_key: Some(garment_key),
        }
    }

    /// Get image dimensions
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Save the result as PNG with alpha channel
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.save(path, OutputFormat::Png, 100)
    }

    /// Save in the specified format
    pub fn save<P: AsRef<Path>>(&self, path: P, format: OutputFormat, quality: u8) -> Result<()> {
        let bytes = self.to_bytes(format, quality)?;
        std::fs::write(path.as_ref(), bytes)
            .map_err(|e| MockupError::file_io_error("write mockup", path.as_ref(), &e))?;
        Ok(())
    }

    /// Get the image as raw RGBA bytes
    #[must_use]
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.image.as_raw().clone()
    }

    /// Get the image as encoded bytes in the specified format
    pub fn to_bytes(&self, format: OutputFormat, quality: u8) -> Result<Vec<u8>> {
        crate::services::MockupFormatHandler::encode(&self.image, format, quality)
    }
}
