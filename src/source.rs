//! Garment image sources
//!
//! A garment raster can come from the local filesystem, an HTTP(S) catalog
//! URL, or bytes already in memory. Loading is async and returns a decoded
//! RGBA image or a failure reason; the suspension point is fetch and
//! decode, never pixel processing.

use crate::error::{MockupError, Result};
use async_trait::async_trait;
use image::RgbaImage;
use sha2::{Digest, Sha256};
use std::path::PathBuf;

/// Where a garment (or design) image comes from
#[derive(Debug, Clone)]
pub enum GarmentSource {
    /// Local file path
    Path(PathBuf),
    /// HTTP(S) URL, fetched with the bundled client
    Url(String),
    /// Raw encoded image bytes already in memory
    Bytes(Vec<u8>),
}

impl GarmentSource {
    /// Interpret a CLI-style string: URLs stay URLs, everything else is a
    /// filesystem path.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            Self::Url(value.to_string())
        } else {
            Self::Path(PathBuf::from(value))
        }
    }

    /// Stable identifier for memoization.
    ///
    /// Paths and URLs identify themselves; in-memory bytes are identified
    /// by content hash so identical uploads share a cache entry.
    #[must_use]
    pub fn cache_key(&self) -> String {
        match self {
            Self::Path(path) => format!("file:{}", path.display()),
            Self::Url(url) => url.clone(),
            Self::Bytes(bytes) => {
                let mut hasher = Sha256::new();
                hasher.update(bytes);
                format!("bytes:{:x}", hasher.finalize())
            },
        }
    }

    /// Load and decode the source into an RGBA image.
    ///
    /// # Errors
    ///
    /// - `MockupError::Load` when the source is unreachable (missing file,
    ///   failed fetch, non-success HTTP status)
    /// - `MockupError::Decode` when the fetched bytes are not a decodable
    ///   raster image
    pub async fn load(&self) -> Result<RgbaImage> {
        let bytes = match self {
            Self::Path(path) => tokio::fs::read(path).await.map_err(|e| {
                MockupError::load_error(&path.display().to_string(), &e.to_string())
            })?,
            Self::Url(url) => fetch_url(url).await?,
            Self::Bytes(bytes) => bytes.clone(),
        };

        decode_rgba(&bytes, &self.cache_key())
    }
}

async fn fetch_url(url: &str) -> Result<Vec<u8>> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| MockupError::load_error(url, &e.to_string()))?;

    let response = response
        .error_for_status()
        .map_err(|e| MockupError::load_error(url, &e.to_string()))?;

    let bytes = response
        .bytes()
        .await
        .map_err(|e| MockupError::load_error(url, &e.to_string()))?;

    Ok(bytes.to_vec())
}

fn decode_rgba(bytes: &[u8], source: &str) -> Result<RgbaImage> {
    let image = image::load_from_memory(bytes).map_err(|e| {
        MockupError::decode(format!("Failed to decode image from '{}': {}", source, e))
    })?;
    Ok(image.to_rgba8())
}

/// Seam for resolving garment sources into decoded images.
///
/// The default implementation delegates to [`GarmentSource::load`]; tests
/// and embedders can substitute their own resolution (pre-decoded assets,
/// instrumented fetch counting, alternative transports).
#[async_trait]
pub trait GarmentFetcher: Send + Sync {
    /// Resolve a source into a decoded RGBA image
    async fn fetch(&self, source: &GarmentSource) -> Result<RgbaImage>;
}

/// Default fetcher backed by the filesystem and the bundled HTTP client
pub struct DefaultGarmentFetcher;

#[async_trait]
impl GarmentFetcher for DefaultGarmentFetcher {
    async fn fetch(&self, source: &GarmentSource) -> Result<RgbaImage> {
        source.load().await
    }
}
