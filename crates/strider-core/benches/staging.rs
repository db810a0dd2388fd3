//! Benchmarks for the staging layer
//!
//! Measures address resolution over composite iterators and device
//! materialization of permutation ranges at a few representative sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use strider_core::{address_of, materialize_permutation, Executor, MappedComposite, PermutationIterator};

fn benchmark_address_of(c: &mut Criterion) {
    let mut group = c.benchmark_group("address_of");

    let elements: Vec<f32> = (0..4096).map(|i| i as f32).collect();
    let indices: Vec<u32> = (0..4096).rev().collect();
    let itr = PermutationIterator::new(&elements[..], &indices[..]);

    group.bench_function("permutation_4096", |bencher| {
        bencher.iter(|| black_box(address_of(black_box(&itr))));
    });

    group.bench_function("slice_4096", |bencher| {
        let range = &elements[..];
        bencher.iter(|| black_box(address_of(black_box(&range))));
    });

    group.finish();
}

fn benchmark_materialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("materialize_permutation");

    for size in [256, 1024, 4096].iter() {
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("host_to_device", size), size, |bencher, &size| {
            let exec = Executor::new().unwrap();
            let elements: Vec<f32> = (0..size).map(|i| i as f32).collect();
            let indices: Vec<u32> = (0..size as u32).rev().collect();
            let host = PermutationIterator::new(&elements[..], &indices[..]);

            bencher.iter(|| {
                black_box(materialize_permutation(&exec, &host).unwrap());
            });
        });
    }

    group.finish();
}

fn benchmark_mapped_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("mapped_window");

    for size in [256, 4096].iter() {
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("open_read_close", size), size, |bencher, &size| {
            let exec = Executor::new().unwrap();
            let elements: Vec<f32> = (0..size).map(|i| i as f32).collect();
            let indices: Vec<u32> = (0..size as u32).rev().collect();
            let host = PermutationIterator::new(&elements[..], &indices[..]);
            let dev = materialize_permutation(&exec, &host).unwrap();

            bencher.iter(|| {
                let mapped = MappedComposite::open(&dev).unwrap();
                let mut sum = 0.0f32;
                for n in 0..mapped.len() {
                    sum += mapped.get(n).unwrap();
                }
                mapped.close().unwrap();
                black_box(sum)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_address_of,
    benchmark_materialize,
    benchmark_mapped_access
);
criterion_main!(benches);
