//! Printmock CLI implementation
//!
//! Renders a garment mockup from the command line: a garment photo (direct
//! or looked up in a catalog), a color, and a design image in, one composed
//! mockup file out.

use crate::cli::config::{parse_print_area, CliConfigBuilder};
use crate::{
    cache::GarmentCache,
    catalog::{GarmentCatalog, GarmentSide},
    renderer::MockupRenderer,
    services::MockupFormatHandler,
    source::GarmentSource,
    tracing_config,
    types::{ColorRgb, PrintArea},
};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use instant::Instant;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Output format options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliOutputFormat {
    Png,
    Jpeg,
    Webp,
    Tiff,
    Rgba8,
}

/// Render garment mockups: chroma-key background removal, recoloring, and
/// print-area design composition.
#[derive(Debug, Parser)]
#[command(name = "printmock", version, about)]
pub struct Cli {
    /// Garment photo (path or URL); requires --print-area
    #[arg(long, value_name = "PATH|URL", conflicts_with = "catalog")]
    pub garment_image: Option<String>,

    /// Design image to place in the print area (path or URL).
    /// When omitted, the mockup shows the blank garment.
    #[arg(long, value_name = "PATH|URL")]
    pub design: Option<String>,

    /// Garment color as a hex string
    #[arg(long, default_value = "#ffffff")]
    pub color: String,

    /// Print area as 'top,left,width,height' percentages of the garment
    #[arg(long, value_name = "T,L,W,H")]
    pub print_area: Option<String>,

    /// Garment catalog JSON file; requires --garment
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Garment slug to look up in the catalog
    #[arg(long, value_name = "SLUG")]
    pub garment: Option<String>,

    /// Render the garment's back side (catalog mode only)
    #[arg(long)]
    pub back: bool,

    /// Output file (defaults to mockup-<garment>-<timestamp>.<ext>)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "png")]
    pub format: CliOutputFormat,

    /// JPEG quality (0-100)
    #[arg(long, default_value_t = 90)]
    pub jpeg_quality: u8,

    /// WebP quality (0-100)
    #[arg(long, default_value_t = 85)]
    pub webp_quality: u8,

    /// Print per-stage timings after rendering
    #[arg(long)]
    pub timings: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// CLI entry point
///
/// # Errors
///
/// Returns an error for invalid arguments, unreachable or undecodable
/// sources, and output encoding failures.
pub async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_config::init_cli_tracing(cli.verbose)?;

    CliConfigBuilder::validate_cli(&cli)?;
    let config = CliConfigBuilder::from_cli(&cli)?;

    let (garment_source, print_area, garment_label) = resolve_garment(&cli)?;
    let design_source = resolve_design(&cli)?;
    let color: ColorRgb = cli.color.parse()?;

    let output_format = config.output_format;
    let quality = match output_format {
        crate::config::OutputFormat::Jpeg => cli.jpeg_quality,
        crate::config::OutputFormat::WebP => cli.webp_quality,
        _ => 100,
    };

    let renderer = MockupRenderer::with_cache(config, Arc::new(GarmentCache::new()))?;
    let mut result = renderer
        .render_from_sources(&garment_source, color, &print_area, &design_source)
        .await?;

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&garment_label, output_format));

    let encode_start = Instant::now();
    result.save(&output_path, output_format, quality)?;
    result.timings.encode_ms = Some(encode_start.elapsed().as_millis() as u64);

    info!(
        garment = %garment_label,
        color = %color,
        output = %output_path.display(),
        "Mockup exported"
    );
    println!("Exported mockup to {}", output_path.display());

    if cli.timings {
        println!("{}", result.timings.summary());
    }

    Ok(())
}

/// Resolve the garment source and print area from direct flags or catalog
fn resolve_garment(cli: &Cli) -> Result<(GarmentSource, PrintArea, String)> {
    if let Some(catalog_path) = &cli.catalog {
        let slug = cli
            .garment
            .as_deref()
            .ok_or_else(|| anyhow!("--garment <SLUG> is required with --catalog"))?;

        let catalog = GarmentCatalog::load_from_file(catalog_path)
            .with_context(|| format!("Failed to load catalog {}", catalog_path.display()))?;
        let spec = catalog
            .get(slug)
            .ok_or_else(|| anyhow!("Garment '{}' not found in catalog", slug))?;

        let side = if cli.back {
            GarmentSide::Back
        } else {
            GarmentSide::Front
        };

        let source = spec.source(side)?;
        let print_area = spec.print_area(side);
        Ok((source, print_area, slug.to_string()))
    } else {
        let image = cli
            .garment_image
            .as_deref()
            .ok_or_else(|| anyhow!("Either --garment-image or --catalog must be provided"))?;
        let print_area_arg = cli
            .print_area
            .as_deref()
            .ok_or_else(|| anyhow!("--print-area is required with --garment-image"))?;

        let source = GarmentSource::parse(image);
        let print_area = parse_print_area(print_area_arg)?;
        let label = PathBuf::from(image)
            .file_stem()
            .map_or_else(|| "garment".to_string(), |s| s.to_string_lossy().into_owned());
        Ok((source, print_area, label))
    }
}

/// Resolve the design source; an omitted design becomes a fully transparent
/// placeholder so the export shows the blank garment.
fn resolve_design(cli: &Cli) -> Result<GarmentSource> {
    match cli.design.as_deref() {
        Some(design) => Ok(GarmentSource::parse(design)),
        None => {
            let placeholder = image::RgbaImage::new(1, 1);
            let bytes = MockupFormatHandler::encode(
                &placeholder,
                crate::config::OutputFormat::Png,
                100,
            )?;
            Ok(GarmentSource::Bytes(bytes))
        },
    }
}

/// Default export filename: `mockup-<garment>-<timestamp>.<ext>`
fn default_output_path(garment_label: &str, format: crate::config::OutputFormat) -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M");
    PathBuf::from(format!(
        "mockup-{}-{}.{}",
        garment_label,
        timestamp,
        MockupFormatHandler::get_extension(format)
    ))
}
