use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sum_kernels::Lane;

use crate::config::DataPattern;
use crate::error::BenchError;

/// Deterministic data generator seeded for reproducible benchmarks.
pub struct DataGenerator {
    rng: StdRng,
}

impl DataGenerator {
    /// Create a new generator with a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Append `count` uniformly distributed values to `buf`.
    pub fn fill_uniform<T: Lane>(&mut self, buf: &mut Vec<T>, count: usize) {
        buf.extend((0..count).map(|_| T::from_u128(self.rng.gen::<u64>() as u128)));
    }
}

/// Allocate and fill the input buffer for one trial.
///
/// The allocation is fallible: running out of memory is reported as
/// [`BenchError::Allocation`] naming `size` instead of aborting the process.
pub fn allocate_input<T: Lane>(
    size: usize,
    pattern: DataPattern,
    gen: &mut DataGenerator,
) -> Result<Vec<T>, BenchError> {
    let mut buf: Vec<T> = Vec::new();
    buf.try_reserve_exact(size)
        .map_err(|source| BenchError::Allocation { size, source })?;

    match pattern {
        DataPattern::Sequential => buf.extend((0..size).map(T::from_index)),
        DataPattern::Random => gen.fill_uniform(&mut buf, size),
    }
    Ok(buf)
}
