#![allow(clippy::too_many_lines)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::unused_async)]

//! # Printmock
//!
//! A garment-mockup rendering library for custom-apparel storefronts. Takes
//! catalog photos of garments shot against a green chroma-key backdrop and
//! turns them into composed product mockups: the backdrop is removed, the
//! garment is tinted to the selected color with its shading preserved, and
//! the customer's design is placed into the garment's print area.
//!
//! The pipeline is three pure stages over in-memory RGBA rasters, each
//! producing a new image:
//!
//! 1. **Background removal** ([`chroma_key`]) — per-pixel classification of
//!    backdrop, soft edge, and garment content; backdrop becomes
//!    transparent, edges fade out with their green tint damped.
//! 2. **Recoloring** ([`recolor`]) — multiply blend against the selected
//!    color with the silhouette mask reapplied; white is the identity.
//! 3. **Composition** ([`compose`]) — the design layer is stretched into
//!    the garment's print area and source-over composited.
//!
//! ## Features
//!
//! - **Garment sources**: filesystem paths, HTTP(S) URLs, or in-memory
//!   bytes, resolved asynchronously
//! - **Memoization**: an injectable [`cache::GarmentCache`] that coalesces
//!   concurrent removal passes per garment
//! - **Catalog model**: JSON garment catalogs with per-side photos, print
//!   areas, and color palettes
//! - **Format support**: PNG, JPEG, WebP, TIFF output
//! - **CLI integration**: optional command-line interface (enable with the
//!   `cli` feature)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use printmock::{
//!     GarmentSource, GarmentCache, MockupRenderer, RendererConfig,
//!     ColorRgb, PrintArea,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let cache = Arc::new(GarmentCache::new());
//! let renderer = MockupRenderer::with_cache(RendererConfig::default(), cache)?;
//!
//! let garment = GarmentSource::parse("https://shop.example/garments/tshirt.png");
//! let design = GarmentSource::parse("my-design.png");
//! let color: ColorRgb = "#2980b9".parse()?;
//! let print_area = PrintArea::new(25.0, 30.0, 40.0, 45.0);
//!
//! let result = renderer
//!     .render_from_sources(&garment, color, &print_area, &design)
//!     .await?;
//! result.save_png("mockup.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Library vs CLI Usage
//!
//! All core functionality is available by default; enable the `cli` feature
//! for the command-line interface. To use only as a library:
//!
//! ```toml
//! [dependencies]
//! printmock = { version = "0.2", default-features = false }
//! ```

pub mod cache;
pub mod catalog;
pub mod chroma_key;
#[cfg(feature = "cli")]
pub mod cli;
pub mod compose;
pub mod config;
pub mod error;
pub mod recolor;
pub mod renderer;
pub mod services;
pub mod source;
#[cfg(feature = "cli")]
pub mod tracing_config;
pub mod types;

// Public API exports
pub use cache::{CacheStats, GarmentCache};
pub use catalog::{GarmentCatalog, GarmentSide, GarmentSpec, DEFAULT_GARMENT_COLORS};
pub use chroma_key::{classify_pixel, greenness, remove_background, PixelClass};
pub use compose::compose;
pub use config::{ChromaKeyConfig, OutputFormat, RendererConfig, RendererConfigBuilder};
pub use error::{MockupError, Result};
pub use recolor::recolor;
pub use renderer::MockupRenderer;
pub use services::{ImageIoService, MockupFormatHandler};
pub use source::{DefaultGarmentFetcher, GarmentFetcher, GarmentSource};
pub use types::{ColorRgb, MockupResult, PixelRect, PrintArea, StageTimings};

#[cfg(feature = "cli")]
pub use tracing_config::{init_cli_tracing, init_library_tracing, TracingConfig, TracingFormat};

use image::RgbaImage;

/// Render a mockup from encoded image bytes
///
/// This is a convenience API for web servers and memory-based processing:
/// both images are decoded, the garment goes through background removal and
/// recoloring, and the design is composed into the print area.
///
/// # Errors
///
/// Returns `MockupError::Decode` for undecodable bytes and configuration
/// errors from the renderer.
pub async fn render_mockup_from_bytes(
    garment_bytes: &[u8],
    design_bytes: &[u8],
    color: ColorRgb,
    print_area: &PrintArea,
    config: &RendererConfig,
) -> Result<MockupResult> {
    let garment = ImageIoService::load_from_memory(garment_bytes)?;
    let design = ImageIoService::load_from_memory(design_bytes)?;

    render_mockup_from_image(&garment, &design, color, print_area, config)
}

/// Render a mockup from already-decoded images
///
/// The most flexible API for in-memory processing; no I/O is performed.
///
/// # Errors
///
/// Returns `MockupError::InvalidConfig` when the configuration fails
/// validation.
pub fn render_mockup_from_image(
    garment: &RgbaImage,
    design: &RgbaImage,
    color: ColorRgb,
    print_area: &PrintArea,
    config: &RendererConfig,
) -> Result<MockupResult> {
    let renderer = MockupRenderer::new(config.clone())?;
    renderer.render(garment, color, print_area, design)
}
