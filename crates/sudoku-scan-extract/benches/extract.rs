use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, GrayImage, Luma};
use sudoku_scan_core::Quadrilateral;
use sudoku_scan_extract::GridExtractor;

fn synthetic_grid_photo() -> DynamicImage {
    let side = 450u32;
    let mut img = GrayImage::from_pixel(side, side, Luma([230]));
    for row in 0..9u32 {
        for col in 0..9u32 {
            if (row + col) % 3 == 0 {
                let cx = col * 50 + 25;
                let cy = row * 50 + 25;
                for y in (cy - 10)..(cy + 10) {
                    for x in (cx - 10)..(cx + 10) {
                        img.put_pixel(x, y, Luma([10]));
                    }
                }
            }
        }
    }
    DynamicImage::ImageLuma8(img)
}

fn bench_extract(c: &mut Criterion) {
    let extractor = GridExtractor::with_defaults();
    let photo = synthetic_grid_photo();
    let quad = Quadrilateral::full_image(450.0, 450.0);
    c.bench_function("extract_synthetic_grid", |b| {
        b.iter(|| extractor.extract(black_box(&photo), black_box(&quad)).unwrap())
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
