//! Chroma-key background removal
//!
//! Classifies every pixel of a garment photo shot against a green backdrop
//! as backdrop, soft edge, or foreground, and rewrites the alpha channel so
//! the backdrop becomes transparent and edges fade out smoothly. Edge pixels
//! also get their green tint damped so the fade does not halo green.

use crate::config::ChromaKeyConfig;
use image::RgbaImage;

/// Per-pixel classification produced during background removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelClass {
    /// Chroma-key backdrop, made fully transparent
    Background,
    /// Soft boundary between backdrop and garment, faded proportionally
    Edge,
    /// Garment content, left untouched
    Foreground,
}

/// Classify a single opaque pixel against the chroma-key thresholds.
///
/// The backdrop predicate wins over the edge predicate: a pixel green
/// enough to be backdrop is never treated as a soft edge.
#[must_use]
pub fn classify_pixel(r: u8, g: u8, b: u8, config: &ChromaKeyConfig) -> PixelClass {
    if is_backdrop(r, g, b, config) {
        PixelClass::Background
    } else if is_edge(r, g, b, config) {
        PixelClass::Edge
    } else {
        PixelClass::Foreground
    }
}

/// Bright chroma-key green: the green channel dominates red and blue by the
/// configured ratio while red and blue stay low.
fn is_backdrop(r: u8, g: u8, b: u8, config: &ChromaKeyConfig) -> bool {
    g > config.green_threshold
        && f32::from(g) > f32::from(r) * config.green_ratio
        && f32::from(g) > f32::from(b) * config.green_ratio
        && r < config.backdrop_red_blue_max
        && b < config.backdrop_red_blue_max
}

/// Softer green near the garment silhouette. Near-white and near-black
/// pixels are excluded so highlights and shadows keep their color.
fn is_edge(r: u8, g: u8, b: u8, config: &ChromaKeyConfig) -> bool {
    let near_white = r > config.white_cutoff && g > config.white_cutoff && b > config.white_cutoff;
    let near_black = r < config.black_cutoff && g < config.black_cutoff && b < config.black_cutoff;

    g > config.edge_green_min
        && g >= r
        && g >= b
        && r < config.edge_red_blue_max
        && b < config.edge_red_blue_max
        && !near_white
        && !near_black
}

/// How green a pixel is, from 0.0 (not green) to 1.0 (pure chroma green).
///
/// Measured as the green channel against the red/blue average; a ratio of
/// 3 or more saturates to 1.0. The `+1` keeps the division defined for
/// black reds and blues.
#[must_use]
pub fn greenness(r: u8, g: u8, b: u8) -> f32 {
    if g == 0 {
        return 0.0;
    }
    let avg_rb = (f32::from(r) + f32::from(b)) / 2.0;
    let ratio = f32::from(g) / (avg_rb + 1.0);
    ((ratio - 1.0) / 2.0).clamp(0.0, 1.0)
}

/// Remove the chroma-key backdrop from a garment photo.
///
/// Returns a new image of the same dimensions. Backdrop pixels get alpha 0
/// with RGB left intact; edge pixels fade out by their measured greenness
/// and get their green channel damped; foreground pixels are byte-for-byte
/// unchanged.
///
/// Pixels that are already non-opaque are passed through untouched, which
/// makes the operation idempotent on its own output: a second pass leaves
/// backdrop pixels transparent and does not re-darken faded edges.
#[must_use]
pub fn remove_background(image: &RgbaImage, config: &ChromaKeyConfig) -> RgbaImage {
    let mut output = image.clone();

    for pixel in output.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        if a != u8::MAX {
            continue;
        }

        match classify_pixel(r, g, b, config) {
            PixelClass::Background => {
                pixel.0[3] = 0;
            },
            PixelClass::Edge => {
                let greenness = greenness(r, g, b);
                pixel.0[1] = (f32::from(g) * (1.0 - greenness * config.green_damping)).round() as u8;
                pixel.0[3] = (255.0 * (1.0 - greenness)).round() as u8;
            },
            PixelClass::Foreground => {},
        }
    }

    output
}
