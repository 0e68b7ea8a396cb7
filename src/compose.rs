//! Mockup composition
//!
//! Flattens a recolored garment image and a rendered design layer into a
//! single raster: the design is stretched to the garment's print area and
//! source-over composited on top. Print areas reaching past the image
//! bounds are clipped against the canvas, never rejected.

use crate::types::{PixelRect, PrintArea};
use image::{imageops, RgbaImage};

/// Compose a design onto a garment's print area.
///
/// The output has the garment's dimensions. The design is scaled
/// non-uniformly (stretch-to-fill) to the pixel print rectangle computed
/// from `print_area`, then alpha-composited over the garment; fully
/// transparent design pixels leave the garment visible underneath. An empty
/// or fully transparent design yields the garment image unchanged.
#[must_use]
pub fn compose(garment: &RgbaImage, print_area: &PrintArea, design: &RgbaImage) -> RgbaImage {
    // A transparent canvas with the garment drawn at (0,0) full size is
    // exactly the garment's own pixels.
    let mut canvas = garment.clone();

    let (width, height) = garment.dimensions();
    let rect = print_area.pixel_rect(width, height);

    if rect.width == 0 || rect.height == 0 || design.width() == 0 || design.height() == 0 {
        return canvas;
    }

    let scaled = imageops::resize(design, rect.width, rect.height, imageops::FilterType::Triangle);
    draw_over(&mut canvas, &scaled, rect);

    canvas
}

/// Source-over draw of `src` onto `dst` with its top-left corner at the
/// rectangle origin, clipping anything outside the destination bounds.
fn draw_over(dst: &mut RgbaImage, src: &RgbaImage, rect: PixelRect) {
    let (dst_width, dst_height) = dst.dimensions();

    for (sx, sy, pixel) in src.enumerate_pixels() {
        let dx = rect.x + i64::from(sx);
        let dy = rect.y + i64::from(sy);

        if dx < 0 || dy < 0 || dx >= i64::from(dst_width) || dy >= i64::from(dst_height) {
            continue;
        }

        let dest = dst.get_pixel_mut(dx as u32, dy as u32);
        dest.0 = source_over(dest.0, pixel.0);
    }
}

/// Standard source-over compositing of straight (non-premultiplied) RGBA.
#[inline]
fn source_over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let sa = f32::from(src[3]) / 255.0;
    let da = f32::from(dst[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);

    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let sc = f32::from(src[i]);
        let dc = f32::from(dst[i]);
        out[i] = ((sc * sa + dc * da * (1.0 - sa)) / out_a).round() as u8;
    }
    out[3] = (out_a * 255.0).round() as u8;
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn garment(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([200, 200, 200, 255]))
    }

    #[test]
    fn test_transparent_design_leaves_garment_untouched() {
        let garment = garment(50, 50);
        let design = RgbaImage::new(10, 10);
        let area = PrintArea::new(10.0, 10.0, 50.0, 50.0);

        let output = compose(&garment, &area, &design);
        assert_eq!(garment.as_raw(), output.as_raw());
    }

    #[test]
    fn test_zero_sized_design_leaves_garment_untouched() {
        let garment = garment(50, 50);
        let design = RgbaImage::new(0, 0);
        let area = PrintArea::new(10.0, 10.0, 50.0, 50.0);

        let output = compose(&garment, &area, &design);
        assert_eq!(garment.as_raw(), output.as_raw());
    }

    #[test]
    fn test_design_lands_at_rounded_origin() {
        let garment = garment(200, 200);
        let design = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 255, 255]));
        let area = PrintArea::new(10.0, 10.0, 50.0, 50.0);

        let output = compose(&garment, &area, &design);

        // Print rect is x=20, y=20, w=100, h=100
        assert_eq!(output.get_pixel(20, 20).0, [0, 0, 255, 255]);
        assert_eq!(output.get_pixel(119, 119).0, [0, 0, 255, 255]);
        // Just outside the rectangle the garment shows through
        assert_eq!(output.get_pixel(19, 20).0, [200, 200, 200, 255]);
        assert_eq!(output.get_pixel(20, 19).0, [200, 200, 200, 255]);
        assert_eq!(output.get_pixel(120, 120).0, [200, 200, 200, 255]);
    }

    #[test]
    fn test_oversized_print_area_clips_at_bounds() {
        let garment = garment(100, 100);
        let design = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
        let area = PrintArea::new(50.0, 50.0, 100.0, 100.0);

        let output = compose(&garment, &area, &design);
        assert_eq!(output.dimensions(), (100, 100));
        assert_eq!(output.get_pixel(50, 50).0, [255, 0, 0, 255]);
        assert_eq!(output.get_pixel(99, 99).0, [255, 0, 0, 255]);
        assert_eq!(output.get_pixel(49, 49).0, [200, 200, 200, 255]);
    }

    #[test]
    fn test_negative_print_area_origin_clips_at_zero() {
        let garment = garment(100, 100);
        let design = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
        let area = PrintArea::new(-20.0, -20.0, 40.0, 40.0);

        let output = compose(&garment, &area, &design);
        // Visible part of the design covers [0, 20) in both axes
        assert_eq!(output.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(output.get_pixel(19, 19).0, [255, 0, 0, 255]);
        assert_eq!(output.get_pixel(20, 20).0, [200, 200, 200, 255]);
    }

    #[test]
    fn test_source_over_blends_semi_transparent_design() {
        let garment = garment(10, 10);
        // Half-transparent black over light gray
        let design = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 128]));
        let area = PrintArea::new(0.0, 0.0, 100.0, 100.0);

        let output = compose(&garment, &area, &design);
        let [r, g, b, a] = output.get_pixel(5, 5).0;
        assert_eq!(a, 255);
        assert!(r < 200 && g < 200 && b < 200);
        assert!(r > 0, "blend must mix, not replace");
    }

    #[test]
    fn test_source_over_unit_behavior() {
        let dst = [200, 200, 200, 255];
        assert_eq!(source_over(dst, [9, 9, 9, 0]), dst);
        assert_eq!(source_over(dst, [1, 2, 3, 255]), [1, 2, 3, 255]);
        assert_eq!(source_over([0, 0, 0, 0], [10, 20, 30, 0]), [0, 0, 0, 0]);

        // Opaque over transparent keeps the source exactly
        assert_eq!(source_over([0, 0, 0, 0], [10, 20, 30, 255]), [10, 20, 30, 255]);
    }

    #[test]
    fn test_design_respects_garment_transparency_outside_silhouette() {
        // Garment with a transparent region (removed backdrop) keeps the
        // design visible there: composition does not re-mask the design.
        let mut garment = RgbaImage::from_pixel(10, 10, Rgba([200, 200, 200, 255]));
        garment.put_pixel(5, 5, Rgba([0, 255, 0, 0]));

        let design = RgbaImage::from_pixel(1, 1, Rgba([255, 0, 0, 255]));
        let area = PrintArea::new(0.0, 0.0, 100.0, 100.0);

        let output = compose(&garment, &area, &design);
        assert_eq!(output.get_pixel(5, 5).0, [255, 0, 0, 255]);
    }
}
