use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mandelbrot_explorer::adapters::pixel_format::copy_rgb_to_rgba;

fn bench_copy_rgb_to_rgba(c: &mut Criterion) {
    let mut group = c.benchmark_group("copy_rgb_to_rgba");

    for &(width, height) in &[(800usize, 600usize), (1920, 1080), (3840, 2160)] {
        let pixels = width * height;
        let src: Vec<u8> = (0..pixels * 3).map(|i| (i % 251) as u8).collect();
        let mut dst = vec![0u8; pixels * 4];

        group.throughput(Throughput::Elements(pixels as u64));
        group.bench_function(BenchmarkId::from_parameter(format!("{width}x{height}")), |b| {
            b.iter(|| copy_rgb_to_rgba(black_box(&src), black_box(&mut dst)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_copy_rgb_to_rgba);
criterion_main!(benches);
