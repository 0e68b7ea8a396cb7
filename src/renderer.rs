//! Unified mockup renderer
//!
//! This module provides the main `MockupRenderer` that consolidates the
//! rendering pipeline: chroma-key background removal, garment recoloring,
//! and print-area composition. The same renderer is used by the CLI and by
//! library embedders to ensure consistent behavior.

use crate::{
    cache::GarmentCache,
    chroma_key, compose,
    config::RendererConfig,
    error::Result,
    recolor,
    source::{DefaultGarmentFetcher, GarmentFetcher, GarmentSource},
    types::{ColorRgb, MockupResult, PrintArea, StageTimings},
};
use image::RgbaImage;
use instant::Instant;
use std::sync::Arc;
use tracing::{debug, info, instrument, span, Level};

/// Unified mockup renderer
///
/// Stateless between invocations apart from the optional injected garment
/// cache; every render call is independent and safe to issue concurrently
/// for different garments.
pub struct MockupRenderer {
    config: RendererConfig,
    cache: Option<Arc<GarmentCache>>,
    fetcher: Box<dyn GarmentFetcher>,
}

impl MockupRenderer {
    /// Create a new renderer without a garment cache
    ///
    /// # Errors
    ///
    /// Returns `MockupError::InvalidConfig` when the configuration fails
    /// validation.
    pub fn new(config: RendererConfig) -> Result<Self> {
        config.validate()?;
        debug!(output_format = ?config.output_format, "Mockup renderer configured");
        Ok(Self {
            config,
            cache: None,
            fetcher: Box::new(DefaultGarmentFetcher),
        })
    }

    /// Create a new renderer with an injected garment cache
    ///
    /// # Errors
    ///
    /// Returns `MockupError::InvalidConfig` when the configuration fails
    /// validation.
    pub fn with_cache(config: RendererConfig, cache: Arc<GarmentCache>) -> Result<Self> {
        let mut renderer = Self::new(config)?;
        renderer.cache = Some(cache);
        Ok(renderer)
    }

    /// Replace the source fetcher (tests, alternative transports)
    #[must_use]
    pub fn with_fetcher(mut self, fetcher: Box<dyn GarmentFetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Get the injected cache, if any
    #[must_use]
    pub fn cache(&self) -> Option<&Arc<GarmentCache>> {
        self.cache.as_ref()
    }

    /// Render a mockup from decoded images.
    ///
    /// Runs the full synchronous pipeline: background removal on the
    /// garment photo, recoloring, then design composition into the print
    /// area.
    ///
    /// # Errors
    ///
    /// The pixel stages themselves are total; the `Result` carries the
    /// same error surface as the source-based API.
    #[instrument(
        skip(self, garment, design),
        fields(
            dimensions = %format!("{}x{}", garment.width(), garment.height()),
            color = %color
        )
    )]
    pub fn render(
        &self,
        garment: &RgbaImage,
        color: ColorRgb,
        print_area: &PrintArea,
        design: &RgbaImage,
    ) -> Result<MockupResult> {
        let total_start = Instant::now();
        let mut timings = StageTimings::new();
        let garment_dimensions = garment.dimensions();

        info!(color = %color, "Starting mockup render");

        let masked = {
            let _span = span!(
                Level::DEBUG,
                "background_removal",
                width = %garment_dimensions.0,
                height = %garment_dimensions.1
            )
            .entered();
            let stage_start = Instant::now();
            let masked = chroma_key::remove_background(garment, &self.config.chroma_key);
            timings.background_removal_ms = stage_start.elapsed().as_millis() as u64;
            masked
        };

        let image = self.recolor_and_compose(&masked, color, print_area, design, &mut timings);

        timings.total_ms = total_start.elapsed().as_millis() as u64;
        Ok(MockupResult::new(image, garment_dimensions, timings))
    }

    /// Render a mockup by resolving garment and design sources first.
    ///
    /// When a cache is injected, the background-removed garment is memoized
    /// by the source's cache key and concurrent renders of the same garment
    /// share one removal pass.
    ///
    /// # Errors
    ///
    /// Returns `MockupError::Load` / `MockupError::Decode` from source
    /// resolution, in addition to the synchronous pipeline errors.
    pub async fn render_from_sources(
        &self,
        garment: &GarmentSource,
        color: ColorRgb,
        print_area: &PrintArea,
        design: &GarmentSource,
    ) -> Result<MockupResult> {
        let total_start = Instant::now();
        let mut timings = StageTimings::new();
        let garment_key = garment.cache_key();

        // Garment fetch and removal are one unit here: a cache hit skips
        // both, so the stage time reflects what was actually done.
        let removal_start = Instant::now();
        let masked = match &self.cache {
            Some(cache) => {
                cache
                    .remove_background_cached(
                        garment,
                        self.fetcher.as_ref(),
                        &self.config.chroma_key,
                    )
                    .await?
            },
            None => {
                let image = self.fetcher.fetch(garment).await?;
                Arc::new(chroma_key::remove_background(&image, &self.config.chroma_key))
            },
        };
        timings.background_removal_ms = removal_start.elapsed().as_millis() as u64;

        let decode_start = Instant::now();
        let design_image = self.fetcher.fetch(design).await?;
        timings.decode_ms = decode_start.elapsed().as_millis() as u64;

        let garment_dimensions = masked.dimensions();

        let image =
            self.recolor_and_compose(&masked, color, print_area, &design_image, &mut timings);

        timings.total_ms = total_start.elapsed().as_millis() as u64;
        Ok(MockupResult::with_garment_key(
            image,
            garment_dimensions,
            timings,
            garment_key,
        ))
    }

    fn recolor_and_compose(
        &self,
        masked: &RgbaImage,
        color: ColorRgb,
        print_area: &PrintArea,
        design: &RgbaImage,
        timings: &mut StageTimings,
    ) -> RgbaImage {
        let recolored = {
            let _span = span!(Level::DEBUG, "recolor", color = %color).entered();
            let stage_start = Instant::now();
            let recolored = recolor::recolor(masked, color);
            timings.recolor_ms = stage_start.elapsed().as_millis() as u64;
            recolored
        };

        let composed = {
            let _span = span!(
                Level::DEBUG,
                "compose",
                print_area = ?print_area
            )
            .entered();
            let stage_start = Instant::now();
            let composed = compose::compose(&recolored, print_area, design);
            timings.compose_ms = stage_start.elapsed().as_millis() as u64;
            composed
        };

        if self.config.debug {
            debug!(timings = %timings.summary(), "Pipeline stages complete");
        }

        composed
    }
}
