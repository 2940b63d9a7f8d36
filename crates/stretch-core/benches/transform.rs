//! Benchmarks for the stretch transform.
//!
//! Run with: `cargo bench -p stretch-core`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use stretch_core::{Breakpoints, IntensityImage, StretchCurve};

fn gradient(width: usize, height: usize) -> Vec<u8> {
    (0..width * height).map(|i| (i % 256) as u8).collect()
}

/// Float path against the lookup table path.
fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");
    let curve = StretchCurve::new(Breakpoints::default()).unwrap();

    for (w, h) in [(256, 256), (1920, 1080), (4096, 2160)] {
        let raw = gradient(w, h);
        let image = IntensityImage::from_u8(w, h, &raw).unwrap();
        let label = format!("{w}x{h}");

        group.throughput(Throughput::Elements((w * h) as u64));

        group.bench_with_input(BenchmarkId::new("float", &label), &image, |b, img| {
            b.iter(|| curve.apply(black_box(img)).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("lut", &label), &raw, |b, data| {
            b.iter(|| curve.apply_u8(w, h, black_box(data)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_transform);
criterion_main!(benches);
