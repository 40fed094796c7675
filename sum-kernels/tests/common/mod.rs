#![allow(dead_code)]

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sum_kernels::{Kernel, KernelKind, Lane};
use sum_primitives::CpuFeatures;

pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// `0..n` as lanes, the benchmark's synthetic input.
pub fn iota<T: Lane>(n: usize) -> Vec<T> {
    (0..n).map(T::from_index).collect()
}

/// Every kernel for `T`: the best selection for this CPU plus the portable
/// vector kernels, so both code paths are exercised on any host.
pub fn all_kernels<T: Lane>() -> Vec<Kernel<T>> {
    let features = CpuFeatures::detect();
    let mut kernels: Vec<Kernel<T>> = KernelKind::ALL
        .iter()
        .map(|&kind| Kernel::<T>::select(kind, &features))
        .collect();
    kernels.push(Kernel::<T>::portable(KernelKind::Simd128));
    kernels.push(Kernel::<T>::portable(KernelKind::Simd256));
    kernels
}

/// Assert every kernel sums `data` to `expected`.
pub fn assert_all_kernels<T: Lane>(data: &[T], expected: T) {
    for kernel in all_kernels::<T>() {
        assert_eq!(
            kernel.sum(data),
            expected,
            "{} ({}) disagrees on {} {} elements",
            kernel.label(),
            kernel.backend(),
            data.len(),
            T::NAME
        );
    }
}
