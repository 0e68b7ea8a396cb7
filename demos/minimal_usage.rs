//! Minimal example showing the shortest possible way to render a mockup
//!
//! This demonstrates the simplest usage: load two images, pick a color and
//! a print area, get a composed mockup back.

use anyhow::Result;
use printmock::{render_mockup_from_image, ColorRgb, ImageIoService, PrintArea, RendererConfig};

fn main() -> Result<()> {
    let garment = ImageIoService::load_image("garment.png")?;
    let design = ImageIoService::load_image("design.png")?;

    let result = render_mockup_from_image(
        &garment,
        &design,
        ColorRgb::new(0x29, 0x80, 0xb9),
        &PrintArea::new(25.0, 30.0, 40.0, 45.0),
        &RendererConfig::default(),
    )?;

    result.save_png("mockup.png")?;
    println!("Mockup rendered! Saved to mockup.png");

    Ok(())
}
