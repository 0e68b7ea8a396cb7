//! Library usage example: catalog-driven rendering with a shared cache
//!
//! Loads a garment catalog, preloads the background-removed photos, then
//! renders the same garment in several colors. The cache guarantees the
//! expensive removal pass runs once per garment photo no matter how many
//! colors are rendered.

use anyhow::Result;
use printmock::{
    ChromaKeyConfig, DefaultGarmentFetcher, GarmentCache, GarmentCatalog, GarmentSide,
    GarmentSource, MockupRenderer, RendererConfig,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    printmock::init_library_tracing()?;

    let catalog = GarmentCatalog::load_from_file("garments.json")?;
    let cache = Arc::new(GarmentCache::new());

    // Warm the cache for every garment in the catalog up front, the way a
    // storefront does when the editor opens.
    let outcomes = cache
        .preload_all(
            &catalog.front_sources(),
            &DefaultGarmentFetcher,
            &ChromaKeyConfig::default(),
        )
        .await;
    for (key, outcome) in &outcomes {
        if let Err(e) = outcome {
            eprintln!("Skipping {}: {}", key, e);
        }
    }

    let renderer = MockupRenderer::with_cache(RendererConfig::default(), cache.clone())?;

    let tshirt = catalog
        .get("tshirt")
        .ok_or_else(|| anyhow::anyhow!("catalog has no 'tshirt'"))?;
    let garment = tshirt.source(GarmentSide::Front)?;
    let print_area = tshirt.print_area(GarmentSide::Front);
    let design = GarmentSource::parse("design.png");

    for color in tshirt.parsed_colors()? {
        let result = renderer
            .render_from_sources(&garment, color, &print_area, &design)
            .await?;
        let filename = format!("mockup-tshirt-{}.png", color.to_string().trim_start_matches('#'));
        result.save_png(&filename)?;
        println!("{} ({})", filename, result.timings.summary());
    }

    let stats = cache.stats();
    println!(
        "Cache: {} entries, {} hits, {} misses",
        stats.entries, stats.hits, stats.misses
    );

    Ok(())
}
