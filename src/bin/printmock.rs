//! Printmock CLI Tool
//!
//! Command-line interface for rendering garment mockups with the printmock
//! library: chroma-key background removal, recoloring, and print-area
//! design composition.

#[cfg(feature = "cli")]
use printmock::cli;

#[cfg(feature = "cli")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::main().await
}

#[cfg(not(feature = "cli"))]
fn main() {
    panic!("CLI feature not enabled. Please rebuild with --features cli");
}
