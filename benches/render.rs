use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use grid_overlay::{cell_to_pixel, draw_grid, pixel_to_cell, render_grid, GridOverlayConfig};
use image::{Rgba, RgbaImage};
use std::hint::black_box;
use std::num::NonZeroU32;

// Gradient background like a typical photo: nothing compresses trivially.
fn create_test_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 255 / width) as u8, (y * 255 / height) as u8, 128, 255])
    })
}

// Benchmark compositing alone across image sizes
fn bench_image_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("image_sizes");
    let sizes = [(600, 400), (1920, 1080), (4000, 3000)];

    for (width, height) in sizes {
        let img = create_test_image(width, height);
        let config = GridOverlayConfig::default();

        group.bench_with_input(
            BenchmarkId::new("draw", format!("{}x{}", width, height)),
            &img,
            |b, img| {
                b.iter(|| black_box(draw_grid(img, &config)));
            },
        );
    }
    group.finish();
}

// Benchmark label density: small cells mean many labels
fn bench_cell_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("cell_sizes");
    let img = create_test_image(1920, 1080);

    for cell_size in [25, 50, 100, 200] {
        let config = GridOverlayConfig::with_cell_size(cell_size)
            .unwrap()
            .with_number_scale(if cell_size < 50 { 1 } else { 3 })
            .unwrap();

        group.bench_with_input(BenchmarkId::new("cell_size", cell_size), &img, |b, img| {
            b.iter(|| black_box(draw_grid(img, &config)));
        });
    }
    group.finish();
}

// Benchmark the full pipeline including PNG encoding
fn bench_render(c: &mut Criterion) {
    let img = create_test_image(1920, 1080);
    let config = GridOverlayConfig::default();
    c.bench_function("render_png_1920x1080", |b| {
        b.iter(|| black_box(render_grid(&img, &config).unwrap()));
    });
}

fn bench_mapping(c: &mut Criterion) {
    let cell_size = NonZeroU32::new(100).unwrap();
    c.bench_function("cell_to_pixel_to_cell", |b| {
        b.iter(|| {
            for cell in 0..1_000i64 {
                let (x, y) = cell_to_pixel(black_box(cell), 1920, cell_size).unwrap();
                black_box(pixel_to_cell(x, y, 1920, cell_size));
            }
        });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(20); // Reduced sample size for faster runs
    targets = bench_image_sizes, bench_cell_sizes, bench_render, bench_mapping
}
criterion_main!(benches);
