//! Garment recoloring
//!
//! Tints a background-removed garment photo with a target color using a
//! multiply blend, then reapplies the garment's own alpha mask so the
//! silhouette produced by background removal is preserved exactly. Multiply
//! darkens photographic shading (folds, seams, shadows) under the new color
//! instead of overpainting it flat.

use crate::types::ColorRgb;
use image::RgbaImage;

/// Recolor a background-removed garment image.
///
/// White is the identity: the input is returned as an exact copy, skipping
/// the per-pixel pass entirely. For any other color each RGB channel is
/// multiply-blended against the solid fill (`channel * fill / 255`) and the
/// pixel's original alpha is kept verbatim.
#[must_use]
pub fn recolor(masked: &RgbaImage, color: ColorRgb) -> RgbaImage {
    if color.is_white() {
        return masked.clone();
    }

    let mut output = masked.clone();
    for pixel in output.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        pixel.0 = [
            multiply(r, color.r),
            multiply(g, color.g),
            multiply(b, color.b),
            a,
        ];
    }

    output
}

/// Multiply blend of two 8-bit channels with round-to-nearest.
#[inline]
fn multiply(channel: u8, fill: u8) -> u8 {
    ((u32::from(channel) * u32::from(fill) + 127) / 255) as u8
}
