//! Error types for mockup rendering operations

use thiserror::Error;

/// Result type alias for mockup rendering operations
pub type Result<T> = std::result::Result<T, MockupError>;

/// Comprehensive error types for mockup rendering operations
#[derive(Error, Debug)]
pub enum MockupError {
    /// Input/output errors (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input bytes could not be decoded as a raster image
    #[error("Decode error: {0}")]
    Decode(String),

    /// Image source could not be reached (missing file, failed fetch)
    #[error("Load error: {0}")]
    Load(String),

    /// Malformed color string passed to recoloring
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Final image could not be serialized to the requested format
    #[error("Encode error: {0}")]
    Encode(String),

    /// Invalid configuration or parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl MockupError {
    /// Create a new decode error
    pub fn decode<S: Into<String>>(msg: S) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a new load error
    pub fn load<S: Into<String>>(msg: S) -> Self {
        Self::Load(msg.into())
    }

    /// Create a new invalid color error
    pub fn invalid_color<S: Into<String>>(msg: S) -> Self {
        Self::InvalidColor(msg.into())
    }

    /// Create a new encode error
    pub fn encode<S: Into<String>>(msg: S) -> Self {
        Self::Encode(msg.into())
    }

    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    // Contextual error creators

    /// Create file I/O error with operation context
    pub fn file_io_error<P: AsRef<std::path::Path>>(
        operation: &str,
        path: P,
        error: &std::io::Error,
    ) -> Self {
        let path_display = path.as_ref().display();
        Self::Io(std::io::Error::new(
            error.kind(),
            format!("Failed to {} '{}': {}", operation, path_display, error),
        ))
    }

    /// Create decode error with source context
    pub fn decode_error<P: AsRef<std::path::Path>>(path: P, error: &image::ImageError) -> Self {
        let path_display = path.as_ref().display();
        let extension = path
            .as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown");

        Self::Decode(format!(
            "Failed to decode image '{}' (format: {}): {}. Supported formats: PNG, JPEG, WebP, TIFF, BMP",
            path_display, extension, error
        ))
    }

    /// Create load error with source and reason context
    pub fn load_error(source: &str, reason: &str) -> Self {
        Self::Load(format!(
            "Failed to load image source '{}': {}",
            source, reason
        ))
    }

    /// Create configuration error with valid ranges
    pub fn config_value_error<T: std::fmt::Display>(
        parameter: &str,
        value: T,
        valid_range: &str,
    ) -> Self {
        Self::InvalidConfig(format!(
            "Invalid {}: {} (valid range: {})",
            parameter, value, valid_range
        ))
    }

    /// Create encode error with format context
    pub fn encode_stage_error(format_name: &str, details: &str) -> Self {
        Self::Encode(format!("Failed to encode as {}: {}", format_name, details))
    }
}
