//! Measurement harness: times one kernel over every configured size with
//! minimum-of-N cycle sampling and returns structured ReportRow results.

use std::hint::black_box;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use sum_kernels::{reference_sum, triangular_sum, Kernel, Lane};
use sum_primitives::CycleCounter;

use crate::config::{BenchConfig, DataPattern, Width};
use crate::data_gen::{allocate_input, DataGenerator};
use crate::error::BenchError;
use crate::stats::{MinSample, Sample};

/// Result of timing one kernel on one buffer.
#[derive(Debug, Clone, Copy)]
pub struct Measurement {
    /// Fewest cycles observed across all timed runs.
    pub min_cycles: u64,
    /// Cycles per second of the minimum-cycle run.
    pub clock_hz: f64,
    pub runs: u32,
}

/// One report line for one (kernel, size) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    pub kernel: String,
    pub backend: String,
    pub width: u32,
    pub size: usize,
    pub result: u64,
    pub min_cycles: u64,
    pub clock_ghz: f64,
    pub adds_per_cycle: f64,
    /// Whether `result` matched the expected sum.
    pub valid: bool,
}

/// Time `kernel` on `data`: `warmup` untimed calls, then `runs` timed calls.
///
/// Each timed call is bracketed by a wall-clock read and a cycle-counter
/// read on both sides. Only the minimum-cycle sample is kept.
pub fn measure_cycles<T: Lane>(
    kernel: &Kernel<T>,
    data: &[T],
    counter: &dyn CycleCounter,
    runs: u32,
    warmup: u32,
) -> Measurement {
    for _ in 0..warmup {
        black_box(kernel.sum(black_box(data)));
    }

    let mut best = MinSample::default();
    for _ in 0..runs {
        let start = Instant::now();
        let start_cycles = counter.read();
        black_box(kernel.sum(black_box(data)));
        let end_cycles = counter.read();
        let end = Instant::now();

        best.observe(Sample {
            start_cycles,
            end_cycles,
            start,
            end,
        });
    }

    Measurement {
        min_cycles: best.min_cycles().unwrap_or(0),
        clock_hz: best.clock_hz(),
        runs: best.observed(),
    }
}

/// Adds retired per cycle: `size / min_cycles`, or 0 when no cycles were seen.
pub fn adds_per_cycle(size: usize, min_cycles: u64) -> f64 {
    if min_cycles > 0 {
        size as f64 / min_cycles as f64
    } else {
        0.0
    }
}

/// Run one kernel across `sizes`.
///
/// For each size:
/// 1. allocate and fill the input buffer (allocation failure is fatal)
/// 2. measure_cycles -> min cycles + clock estimate
/// 3. one untimed call for the displayed result, checked against the expected sum
/// 4. emit the ReportRow, then release the buffer
pub fn run_test<T: Lane>(
    kernel: &Kernel<T>,
    sizes: &[usize],
    config: &BenchConfig,
    counter: &dyn CycleCounter,
    gen: &mut DataGenerator,
    progress_cb: Option<&dyn Fn(&str)>,
    emit: &mut dyn FnMut(&ReportRow),
) -> Result<Vec<ReportRow>, BenchError> {
    let width = Width::of::<T>();
    let mut rows = Vec::with_capacity(sizes.len());

    for &size in sizes {
        let label = format!("{} {} @ {}", kernel.label(), T::NAME, format_size(size));
        if let Some(cb) = progress_cb {
            cb(&format!("{}: setup", label));
        }

        let data = allocate_input::<T>(size, config.pattern, gen)?;
        let expected = match config.pattern {
            DataPattern::Sequential => triangular_sum::<T>(size),
            DataPattern::Random => reference_sum(&data),
        };

        if let Some(cb) = progress_cb {
            cb(&format!("{}: measuring ({} runs)", label, config.runs));
        }
        let m = measure_cycles(kernel, &data, counter, config.runs, config.warmup);

        let result = kernel.sum(&data);
        let valid = result == expected;
        if !valid {
            log::warn!(
                "{} validation failed: got {}, expected {}",
                label,
                result,
                expected
            );
        }

        let row = ReportRow {
            kernel: kernel.label(),
            backend: kernel.backend().to_string(),
            width: width.bits(),
            size,
            result: result.to_u64(),
            min_cycles: m.min_cycles,
            clock_ghz: m.clock_hz / 1e9,
            adds_per_cycle: adds_per_cycle(size, m.min_cycles),
            valid,
        };
        log::debug!(
            "{}: {} cycles over {} runs ({:.3} adds/cycle)",
            label,
            row.min_cycles,
            m.runs,
            row.adds_per_cycle
        );

        emit(&row);
        rows.push(row);
        drop(data);
    }

    Ok(rows)
}

/// Format a size number for display (e.g., 25000000 -> "25M").
pub fn format_size(size: usize) -> String {
    if size >= 1_000_000 && size.is_multiple_of(1_000_000) {
        format!("{}M", size / 1_000_000)
    } else if size >= 1_000 && size.is_multiple_of(1_000) {
        format!("{}K", size / 1_000)
    } else {
        format!("{}", size)
    }
}
