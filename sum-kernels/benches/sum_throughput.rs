//! Criterion throughput benchmarks for every kernel at both lane widths.
//!
//! `sum-bench` reports cycle-level minima; these give a wall-clock view
//! with criterion's statistics for regression tracking.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use sum_kernels::{Kernel, KernelKind, Lane};
use sum_primitives::CpuFeatures;

const SIZES: [usize; 3] = [5_000, 312_500, 6_000_000];

fn bench_width<T: Lane>(c: &mut Criterion) {
    let features = CpuFeatures::detect();
    let mut group = c.benchmark_group(format!("sum_{}", T::NAME));
    group.sample_size(20);

    for &size in &SIZES {
        let data: Vec<T> = (0..size).map(T::from_index).collect();
        group.throughput(Throughput::Elements(size as u64));

        for kind in KernelKind::ALL {
            let kernel = Kernel::<T>::select(kind, &features);
            group.bench_with_input(BenchmarkId::new(kernel.label(), size), &data, |b, data| {
                b.iter(|| kernel.sum(black_box(data)))
            });
        }
    }

    group.finish();
}

fn bench_u32(c: &mut Criterion) {
    bench_width::<u32>(c);
}

fn bench_u64(c: &mut Criterion) {
    bench_width::<u64>(c);
}

criterion_group!(benches, bench_u32, bench_u64);
criterion_main!(benches);
