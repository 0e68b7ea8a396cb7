//! Configuration types for mockup rendering operations

use crate::error::{MockupError, Result};
use serde::{Deserialize, Serialize};

/// Output image format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// PNG with alpha channel transparency
    Png,
    /// JPEG (no transparency, alpha dropped)
    Jpeg,
    /// WebP with alpha channel transparency
    WebP,
    /// TIFF with alpha channel transparency and lossless compression
    Tiff,
    /// Raw RGBA8 pixel data (4 bytes per pixel)
    Rgba8,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Png
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = MockupError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "webp" => Ok(Self::WebP),
            "tiff" => Ok(Self::Tiff),
            "rgba8" | "raw" => Ok(Self::Rgba8),
            other => Err(MockupError::invalid_config(format!(
                "Unknown output format '{}'. Supported: png, jpeg, webp, tiff, rgba8",
                other
            ))),
        }
    }
}

/// Thresholds driving chroma-key pixel classification.
///
/// The defaults are the empirically tuned values the removal algorithm was
/// calibrated with. They are exposed as plain fields so callers shooting
/// against a different backdrop (brighter studio light, blue-leaning greens)
/// can adjust them without forking the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChromaKeyConfig {
    /// Minimum green channel value for a pixel to count as backdrop
    pub green_threshold: u8,

    /// How strongly green must dominate red and blue for backdrop pixels
    /// (`g > r * green_ratio && g > b * green_ratio`)
    pub green_ratio: f32,

    /// Red/blue ceiling for backdrop pixels
    pub backdrop_red_blue_max: u8,

    /// Minimum green channel value for a pixel to count as a soft edge
    pub edge_green_min: u8,

    /// Red/blue ceiling for edge pixels
    pub edge_red_blue_max: u8,

    /// Channel floor above which a pixel is near-white and never an edge
    pub white_cutoff: u8,

    /// Channel ceiling below which a pixel is near-black and never an edge
    pub black_cutoff: u8,

    /// How much of the measured greenness is subtracted from the green
    /// channel of edge pixels (0.0 = leave tint, 1.0 = remove fully)
    pub green_damping: f32,
}

impl Default for ChromaKeyConfig {
    fn default() -> Self {
        Self {
            green_threshold: 100,
            green_ratio: 1.2,
            backdrop_red_blue_max: 180,
            edge_green_min: 80,
            edge_red_blue_max: 200,
            white_cutoff: 200,
            black_cutoff: 40,
            green_damping: 0.5,
        }
    }
}

impl ChromaKeyConfig {
    /// Validate threshold relationships
    ///
    /// # Errors
    ///
    /// Returns `MockupError::InvalidConfig` when a ratio or damping factor
    /// is outside its meaningful range.
    pub fn validate(&self) -> Result<()> {
        if self.green_ratio < 1.0 {
            return Err(MockupError::config_value_error(
                "green_ratio",
                self.green_ratio,
                ">= 1.0",
            ));
        }
        if !(0.0..=1.0).contains(&self.green_damping) {
            return Err(MockupError::config_value_error(
                "green_damping",
                self.green_damping,
                "0.0-1.0",
            ));
        }
        if self.edge_green_min > self.green_threshold {
            return Err(MockupError::invalid_config(format!(
                "edge_green_min ({}) must not exceed green_threshold ({})",
                self.edge_green_min, self.green_threshold
            )));
        }
        Ok(())
    }
}

/// Configuration for the mockup renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Chroma-key classification thresholds
    pub chroma_key: ChromaKeyConfig,

    /// Output format
    pub output_format: OutputFormat,

    /// JPEG quality (0-100, only used for JPEG output)
    pub jpeg_quality: u8,

    /// WebP quality (0-100, only used for WebP output)
    pub webp_quality: u8,

    /// Enable debug mode (additional logging and validation)
    pub debug: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            chroma_key: ChromaKeyConfig::default(),
            output_format: OutputFormat::default(),
            jpeg_quality: 90,
            webp_quality: 85,
            debug: false,
        }
    }
}

impl RendererConfig {
    /// Create a new renderer configuration builder
    #[must_use]
    pub fn builder() -> RendererConfigBuilder {
        RendererConfigBuilder::new()
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `MockupError::InvalidConfig` for out-of-range quality values
    /// or inconsistent chroma-key thresholds.
    pub fn validate(&self) -> Result<()> {
        if self.jpeg_quality > 100 {
            return Err(MockupError::config_value_error(
                "jpeg_quality",
                self.jpeg_quality,
                "0-100",
            ));
        }
        if self.webp_quality > 100 {
            return Err(MockupError::config_value_error(
                "webp_quality",
                self.webp_quality,
                "0-100",
            ));
        }
        self.chroma_key.validate()
    }
}

/// Builder for `RendererConfig`
pub struct RendererConfigBuilder {
    config: RendererConfig,
}

impl RendererConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: RendererConfig::default(),
        }
    }

    #[must_use]
    pub fn chroma_key(mut self, chroma_key: ChromaKeyConfig) -> Self {
        self.config.chroma_key = chroma_key;
        self
    }

    #[must_use]
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    #[must_use]
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.config.jpeg_quality = quality.clamp(0, 100);
        self
    }

    #[must_use]
    pub fn webp_quality(mut self, quality: u8) -> Self {
        self.config.webp_quality = quality.clamp(0, 100);
        self
    }

    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Build the renderer configuration
    ///
    /// # Errors
    ///
    /// Returns `MockupError::InvalidConfig` when validation fails.
    pub fn build(self) -> Result<RendererConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for RendererConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds_match_calibration() {
        let config = ChromaKeyConfig::default();
        assert_eq!(config.green_threshold, 100);
        assert!((config.green_ratio - 1.2).abs() < f32::EPSILON);
        assert_eq!(config.backdrop_red_blue_max, 180);
        assert_eq!(config.edge_green_min, 80);
        assert_eq!(config.edge_red_blue_max, 200);
        assert_eq!(config.white_cutoff, 200);
        assert_eq!(config.black_cutoff, 40);
        assert!((config.green_damping - 0.5).abs() < f32::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_chroma_key_validation() {
        let config = ChromaKeyConfig {
            green_ratio: 0.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ChromaKeyConfig {
            green_damping: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ChromaKeyConfig {
            edge_green_min: 120,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder_clamps_quality() {
        let config = RendererConfig::builder()
            .jpeg_quality(150)
            .webp_quality(200)
            .build()
            .unwrap();
        assert_eq!(config.jpeg_quality, 100);
        assert_eq!(config.webp_quality, 100);
    }

    #[test]
    fn test_validate_rejects_manual_out_of_range() {
        let mut config = RendererConfig::default();
        config.jpeg_quality = 101;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("jpeg_quality"));
        assert!(err.to_string().contains("101"));
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("png".parse::<OutputFormat>().unwrap(), OutputFormat::Png);
        assert_eq!("JPG".parse::<OutputFormat>().unwrap(), OutputFormat::Jpeg);
        assert_eq!("webp".parse::<OutputFormat>().unwrap(), OutputFormat::WebP);
        assert!("gif".parse::<OutputFormat>().is_err());
    }
}
