use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, GrayImage, Luma};
use sudoku_scan_detector::GridDetector;

fn synthetic_photo() -> DynamicImage {
    let size = 900u32;
    let mut img = GrayImage::from_pixel(size, size, Luma([225]));
    let (margin, thickness) = (90i64, 5i64);
    let (lo, hi) = (margin, size as i64 - margin);
    for i in 0..=9 {
        let pos = lo + i * (hi - lo) / 9;
        for t in -thickness..=thickness {
            for c in lo..hi {
                img.put_pixel(c as u32, (pos + t) as u32, Luma([15]));
                img.put_pixel((pos + t) as u32, c as u32, Luma([15]));
            }
        }
    }
    DynamicImage::ImageLuma8(img)
}

fn bench_detect(c: &mut Criterion) {
    let detector = GridDetector::with_defaults();
    let image = synthetic_photo();
    c.bench_function("detect_on_synthetic_grid", |b| {
        b.iter(|| detector.detect(black_box(&image)).unwrap())
    });
}

criterion_group!(benches, bench_detect);
criterion_main!(benches);
