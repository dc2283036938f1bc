//! Benchmarks for the mipmap decoders

use blp_decode::convert::{paletted, raw};
use blp_decode::{BgraPixel, Palette};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

fn create_palette() -> Palette {
    let mut palette = Palette::default();
    for (i, color) in palette.colors.iter_mut().enumerate() {
        *color = BgraPixel::new(i as u8, (i * 3) as u8, 255 - i as u8, 0x80);
    }
    palette
}

fn create_paletted(size: u32, alpha_bits: usize) -> Vec<u8> {
    let n = (size * size) as usize;
    let mut data: Vec<u8> = (0..n).map(|i| (i % 256) as u8).collect();
    data.extend((0..(n * alpha_bits).div_ceil(8)).map(|i| (i * 7) as u8));
    data
}

fn bench_paletted(c: &mut Criterion) {
    let palette = create_palette();
    let mut group = c.benchmark_group("paletted");

    for size in [64u32, 256, 1024] {
        group.throughput(Throughput::Elements(u64::from(size * size)));

        let data = create_paletted(size, 0);
        group.bench_with_input(BenchmarkId::new("no_alpha", size), &data, |b, data| {
            b.iter(|| paletted::decode_no_alpha(black_box(data), size, size, &palette))
        });

        let data = create_paletted(size, 1);
        group.bench_with_input(BenchmarkId::new("alpha1", size), &data, |b, data| {
            b.iter(|| paletted::decode_alpha1(black_box(data), size, size, &palette))
        });

        let data = create_paletted(size, 4);
        group.bench_with_input(BenchmarkId::new("alpha4", size), &data, |b, data| {
            b.iter(|| paletted::decode_alpha4(black_box(data), size, size, &palette))
        });

        let data = create_paletted(size, 8);
        group.bench_with_input(BenchmarkId::new("alpha8", size), &data, |b, data| {
            b.iter(|| paletted::decode_alpha8(black_box(data), size, size, &palette))
        });
    }

    group.finish();
}

fn bench_raw(c: &mut Criterion) {
    let mut group = c.benchmark_group("raw_bgra");

    for size in [64u32, 256, 1024] {
        let data: Vec<u8> = (0..size * size * 4).map(|i| i as u8).collect();
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| raw::decode_raw_bgra(black_box(data), size, size))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_paletted, bench_raw);
criterion_main!(benches);
