//! Pipeline property and end-to-end scenario tests
//!
//! Exercises the documented guarantees of the three pixel stages: backdrop
//! pixels become fully transparent with RGB intact, foreground survives
//! byte-for-byte, white recoloring is the identity, composition respects
//! the print-area rounding rule, and the full pipeline behaves on small
//! synthetic garments.

use image::{Rgba, RgbaImage};
use printmock::{
    compose, recolor, remove_background, ChromaKeyConfig, ColorRgb, PixelClass, PrintArea,
    RendererConfig,
};

fn default_config() -> ChromaKeyConfig {
    ChromaKeyConfig::default()
}

#[test]
fn backdrop_pixels_get_alpha_zero_with_rgb_intact() {
    let backdrop_samples = [
        [0u8, 255, 0],
        [30, 200, 20],
        [80, 180, 60],
        [100, 150, 90],
    ];

    for [r, g, b] in backdrop_samples {
        assert_eq!(
            printmock::classify_pixel(r, g, b, &default_config()),
            PixelClass::Background,
            "({}, {}, {}) must classify as backdrop",
            r,
            g,
            b
        );

        let image = RgbaImage::from_pixel(1, 1, Rgba([r, g, b, 255]));
        let output = remove_background(&image, &default_config());
        assert_eq!(output.get_pixel(0, 0).0, [r, g, b, 0]);
    }
}

#[test]
fn foreground_pixels_survive_byte_for_byte() {
    let foreground_samples = [
        [255u8, 255, 255],
        [0, 0, 0],
        [220, 40, 40],
        [40, 60, 220],
        [250, 210, 230],
    ];

    for [r, g, b] in foreground_samples {
        assert_eq!(
            printmock::classify_pixel(r, g, b, &default_config()),
            PixelClass::Foreground,
            "({}, {}, {}) must classify as foreground",
            r,
            g,
            b
        );

        let image = RgbaImage::from_pixel(1, 1, Rgba([r, g, b, 255]));
        let output = remove_background(&image, &default_config());
        assert_eq!(output.get_pixel(0, 0).0, [r, g, b, 255]);
    }
}

#[test]
fn removal_is_idempotent_on_its_own_output() {
    let mut image = RgbaImage::new(4, 1);
    image.put_pixel(0, 0, Rgba([0, 255, 0, 255])); // backdrop
    image.put_pixel(1, 0, Rgba([150, 160, 150, 255])); // soft edge
    image.put_pixel(2, 0, Rgba([140, 120, 130, 255])); // garment
    image.put_pixel(3, 0, Rgba([255, 255, 255, 255])); // highlight

    let once = remove_background(&image, &default_config());
    let twice = remove_background(&once, &default_config());

    assert_eq!(once.as_raw(), twice.as_raw());
}

#[test]
fn recoloring_with_white_is_the_identity() {
    let mut image = RgbaImage::new(3, 3);
    for (i, pixel) in image.pixels_mut().enumerate() {
        let v = (i * 29 % 256) as u8;
        *pixel = Rgba([v, v.wrapping_add(40), v.wrapping_add(90), 255 - v]);
    }

    let output = recolor(&image, ColorRgb::WHITE);
    assert_eq!(image.as_raw(), output.as_raw());
}

#[test]
fn recoloring_preserves_the_alpha_channel_exactly() {
    let mut image = RgbaImage::new(16, 1);
    for (i, pixel) in image.pixels_mut().enumerate() {
        *pixel = Rgba([200, 180, 160, (i * 17) as u8]);
    }

    let color: ColorRgb = "#8e44ad".parse().unwrap();
    let output = recolor(&image, color);

    for (input, result) in image.pixels().zip(output.pixels()) {
        assert_eq!(input.0[3], result.0[3]);
    }
}

#[test]
fn composing_a_transparent_design_returns_the_garment() {
    let mut garment = RgbaImage::new(40, 40);
    for (i, pixel) in garment.pixels_mut().enumerate() {
        let v = (i % 251) as u8;
        *pixel = Rgba([v, 255 - v, 128, if i % 3 == 0 { 0 } else { 255 }]);
    }
    let design = RgbaImage::new(8, 8);
    let area = PrintArea::new(20.0, 20.0, 60.0, 60.0);

    let output = compose(&garment, &area, &design);
    assert_eq!(garment.as_raw(), output.as_raw());
}

#[test]
fn composition_places_the_design_at_the_rounded_origin() {
    // 33.333% of 150 = 50.0, 16.5% of 150 = 24.75 -> 25
    let garment = RgbaImage::from_pixel(150, 150, Rgba([10, 10, 10, 255]));
    let design = RgbaImage::from_pixel(5, 5, Rgba([255, 255, 0, 255]));
    let area = PrintArea::new(16.5, 33.333, 10.0, 10.0);

    let rect = area.pixel_rect(150, 150);
    assert_eq!((rect.x, rect.y), (50, 25));
    assert_eq!((rect.width, rect.height), (15, 15));

    let output = compose(&garment, &area, &design);
    assert_eq!(output.get_pixel(50, 25).0, [255, 255, 0, 255]);
    assert_eq!(output.get_pixel(49, 25).0, [10, 10, 10, 255]);
    assert_eq!(output.get_pixel(50, 24).0, [10, 10, 10, 255]);
}

// End-to-end scenarios

#[test]
fn scenario_pure_green_image_becomes_fully_transparent() {
    let image = RgbaImage::from_pixel(100, 100, Rgba([0, 255, 0, 255]));
    let output = remove_background(&image, &default_config());

    assert!(output.pixels().all(|p| p.0[3] == 0));
}

#[test]
fn scenario_mixed_two_by_two_keeps_everything_but_green() {
    let mut image = RgbaImage::new(2, 2);
    image.put_pixel(0, 0, Rgba([255, 255, 255, 255])); // white
    image.put_pixel(1, 0, Rgba([0, 0, 0, 255])); // black
    image.put_pixel(0, 1, Rgba([0, 255, 0, 255])); // chroma green
    image.put_pixel(1, 1, Rgba([128, 128, 128, 255])); // mid gray

    let output = remove_background(&image, &default_config());

    assert_eq!(output.get_pixel(0, 0).0, [255, 255, 255, 255]);
    assert_eq!(output.get_pixel(1, 0).0, [0, 0, 0, 255]);
    assert_eq!(output.get_pixel(0, 1).0, [0, 255, 0, 0]);
    assert_eq!(output.get_pixel(1, 1).0, [128, 128, 128, 255]);
}

#[test]
fn scenario_white_square_recolored_red_is_solid_red() {
    let image = RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 255]));
    let red: ColorRgb = "#ff0000".parse().unwrap();

    let output = recolor(&image, red);
    assert!(output.pixels().all(|p| p.0 == [255, 0, 0, 255]));
}

#[test]
fn scenario_composed_design_covers_print_area_only() {
    let garment = RgbaImage::from_pixel(200, 200, Rgba([180, 180, 180, 255]));
    let design = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 255, 255]));
    let area = PrintArea::new(10.0, 10.0, 50.0, 50.0);

    let output = compose(&garment, &area, &design);

    // Print rect spans [20, 120) in both axes
    assert_eq!(output.get_pixel(110, 110).0, [0, 0, 255, 255]);
    assert_eq!(output.get_pixel(5, 5).0, [180, 180, 180, 255]);
}

#[test]
fn scenario_full_pipeline_over_synthetic_garment_photo() {
    // A "garment photo": green backdrop, white shirt body with a gray
    // shadow stripe.
    let mut garment = RgbaImage::from_pixel(60, 60, Rgba([0, 255, 0, 255]));
    for y in 10..50 {
        for x in 15..45 {
            garment.put_pixel(x, y, Rgba([255, 255, 255, 255]));
        }
    }
    for y in 30..34 {
        for x in 15..45 {
            garment.put_pixel(x, y, Rgba([170, 170, 170, 255]));
        }
    }

    let design = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]));
    let area = PrintArea::new(33.333, 33.333, 16.0, 10.0);
    let navy: ColorRgb = "#1a1a2e".parse().unwrap();

    let result = printmock::render_mockup_from_image(
        &garment,
        &design,
        navy,
        &area,
        &RendererConfig::default(),
    )
    .unwrap();

    // Backdrop transparent
    assert_eq!(result.image.get_pixel(0, 0).0[3], 0);
    assert_eq!(result.image.get_pixel(59, 59).0[3], 0);

    // Shirt body tinted navy: multiply(255, 0x1a) = 26
    assert_eq!(result.image.get_pixel(16, 11).0, [26, 26, 46, 255]);

    // Shadow stripe stays darker than the lit body
    let lit = result.image.get_pixel(16, 11).0;
    let shadow = result.image.get_pixel(16, 31).0;
    assert!(shadow[0] < lit[0] && shadow[1] < lit[1] && shadow[2] < lit[2]);

    // Design sits inside its print rect (x=20, y=20, w=10, h=6)
    assert_eq!(result.image.get_pixel(20, 20).0, [0, 0, 255, 255]);
    assert_eq!(result.image.get_pixel(29, 25).0, [0, 0, 255, 255]);
    assert_ne!(result.image.get_pixel(19, 20).0, [0, 0, 255, 255]);
}
