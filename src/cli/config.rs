//! Configuration conversion utilities for CLI arguments

use crate::cli::main_impl::{Cli, CliOutputFormat};
use crate::{
    config::{OutputFormat, RendererConfig},
    types::{ColorRgb, PrintArea},
};
use anyhow::{bail, Context, Result};

/// Convert CLI arguments to a renderer configuration
pub(crate) struct CliConfigBuilder;

impl CliConfigBuilder {
    /// Build `RendererConfig` from CLI arguments
    pub(crate) fn from_cli(cli: &Cli) -> Result<RendererConfig> {
        let output_format = match cli.format {
            CliOutputFormat::Png => OutputFormat::Png,
            CliOutputFormat::Jpeg => OutputFormat::Jpeg,
            CliOutputFormat::Webp => OutputFormat::WebP,
            CliOutputFormat::Tiff => OutputFormat::Tiff,
            CliOutputFormat::Rgba8 => OutputFormat::Rgba8,
        };

        let config = RendererConfig::builder()
            .output_format(output_format)
            .jpeg_quality(cli.jpeg_quality)
            .webp_quality(cli.webp_quality)
            .debug(cli.verbose >= 2)
            .build()
            .context("Invalid configuration")?;

        Ok(config)
    }

    /// Validate CLI arguments for consistency
    pub(crate) fn validate_cli(cli: &Cli) -> Result<()> {
        match (&cli.garment_image, &cli.catalog) {
            (Some(_), Some(_)) => {
                bail!("--garment-image and --catalog are mutually exclusive")
            },
            (None, None) => {
                bail!("Either --garment-image or --catalog must be provided")
            },
            (Some(_), None) => {
                if cli.print_area.is_none() {
                    bail!("--print-area is required with --garment-image");
                }
                if cli.garment.is_some() {
                    bail!("--garment requires --catalog");
                }
            },
            (None, Some(_)) => {
                if cli.garment.is_none() {
                    bail!("--garment <SLUG> is required with --catalog");
                }
                if cli.print_area.is_some() {
                    bail!("--print-area conflicts with --catalog (the catalog defines it)");
                }
            },
        }

        cli.color
            .parse::<ColorRgb>()
            .context("Invalid --color value")?;

        if let Some(print_area) = &cli.print_area {
            parse_print_area(print_area).context("Invalid --print-area value")?;
        }

        Ok(())
    }
}

/// Parse a `top,left,width,height` percentage quadruple
pub(crate) fn parse_print_area(value: &str) -> Result<PrintArea> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        bail!(
            "Expected 'top,left,width,height' percentages, got '{}'",
            value
        );
    }

    let mut numbers = [0.0f32; 4];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        *slot = part
            .parse::<f32>()
            .with_context(|| format!("'{}' is not a number", part))?;
    }

    Ok(PrintArea::new(numbers[0], numbers[1], numbers[2], numbers[3]))
}
