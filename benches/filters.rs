use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use imagefilters::{Filter, FilterSession, RasterImage};

fn create_bench_image(width: usize, height: usize) -> RasterImage {
    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            pixels.push([(x % 255) as u8, (y % 255) as u8, ((x + y) % 255) as u8, 255]);
        }
    }
    RasterImage::from_pixels(width, height, pixels).unwrap()
}

fn bench_point_filters(c: &mut Criterion) {
    let image = create_bench_image(512, 512);

    let mut group = c.benchmark_group("point_filters");
    for filter in [Filter::Invert, Filter::Grayscale, Filter::Gbr, Filter::Brg] {
        group.bench_with_input(BenchmarkId::from_parameter(filter), &filter, |b, f| {
            b.iter(|| f.apply(black_box(&image)).unwrap())
        });
    }
    group.finish();
}

fn bench_blur(c: &mut Criterion) {
    let image = create_bench_image(512, 512);

    let mut group = c.benchmark_group("gaussian_blur");
    group.sample_size(10); // Large radii are slow, reduce sample size
    for radius in [1.0f32, 5.0, 25.0] {
        let filter = Filter::Blur { radius };
        group.bench_with_input(BenchmarkId::from_parameter(radius), &filter, |b, f| {
            b.iter(|| f.apply(black_box(&image)).unwrap())
        });
    }
    group.finish();
}

fn bench_sharpen(c: &mut Criterion) {
    let image = create_bench_image(512, 512);
    let filter = Filter::Sharpen { strength: 1.0 };

    c.bench_function("sharpen_512", |b| {
        b.iter(|| filter.apply(black_box(&image)).unwrap())
    });
}

fn bench_session_chain(c: &mut Criterion) {
    let image = create_bench_image(256, 256);

    c.bench_function("session_chain_then_clear", |b| {
        b.iter(|| {
            let mut session = FilterSession::new(image.clone());
            session.apply_filter(Filter::Grayscale).unwrap();
            session.apply_filter(Filter::Sharpen { strength: 1.0 }).unwrap();
            session.apply_filter(Filter::Gbr).unwrap();
            black_box(session.clear_filters())
        })
    });
}

criterion_group!(benches, bench_point_filters, bench_blur, bench_sharpen, bench_session_chain);
criterion_main!(benches);
