//! Criterion benchmarks for the three pixel stages
//!
//! Sizes approximate real catalog photos (square, up to ~1k). Background
//! removal dominates in practice, which is why the renderer memoizes it.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgba, RgbaImage};
use printmock::{compose, recolor, remove_background, ChromaKeyConfig, ColorRgb, PrintArea};

/// Synthetic garment photo: green backdrop with a centered white body and
/// a band of soft-green edge pixels around it.
fn synthetic_garment(size: u32) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(size, size, Rgba([0, 255, 0, 255]));
    let quarter = size / 4;

    for y in quarter..size - quarter {
        for x in quarter..size - quarter {
            image.put_pixel(x, y, Rgba([235, 235, 235, 255]));
        }
    }
    for x in quarter..size - quarter {
        image.put_pixel(x, quarter, Rgba([150, 165, 150, 255]));
        image.put_pixel(x, size - quarter - 1, Rgba([150, 165, 150, 255]));
    }

    image
}

fn bench_background_removal(c: &mut Criterion) {
    let config = ChromaKeyConfig::default();

    for size in [256u32, 512, 1024] {
        let image = synthetic_garment(size);
        c.bench_function(&format!("remove_background_{}", size), |b| {
            b.iter(|| remove_background(black_box(&image), &config));
        });
    }
}

fn bench_recolor(c: &mut Criterion) {
    let config = ChromaKeyConfig::default();
    let masked = remove_background(&synthetic_garment(512), &config);
    let navy = ColorRgb::new(0x1a, 0x1a, 0x2e);

    c.bench_function("recolor_512", |b| {
        b.iter(|| recolor(black_box(&masked), navy));
    });

    // The identity path should be dramatically cheaper
    c.bench_function("recolor_512_white_identity", |b| {
        b.iter(|| recolor(black_box(&masked), ColorRgb::WHITE));
    });
}

fn bench_compose(c: &mut Criterion) {
    let config = ChromaKeyConfig::default();
    let garment = remove_background(&synthetic_garment(512), &config);
    let design = RgbaImage::from_pixel(300, 300, Rgba([40, 60, 200, 255]));
    let area = PrintArea::new(30.0, 35.0, 30.0, 30.0);

    c.bench_function("compose_512", |b| {
        b.iter(|| compose(black_box(&garment), &area, black_box(&design)));
    });
}

criterion_group!(
    benches,
    bench_background_removal,
    bench_recolor,
    bench_compose
);
criterion_main!(benches);
