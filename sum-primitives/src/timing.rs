//! Cycle counters and wall-clock timing utilities for benchmark measurement.
//!
//! The hardware time-stamp counter is only reachable on x86_64. Every other
//! target measures with [`MonotonicCounter`], whose "cycles" are nanoseconds.

use std::sync::atomic::{compiler_fence, Ordering};
use std::time::{Duration, Instant};

/// Errors raised while selecting a cycle counter.
#[derive(Debug, thiserror::Error)]
pub enum TimingError {
    #[error("cycle counter '{0}' is not available on this target")]
    Unavailable(&'static str),
}

/// A monotonic, high-resolution tick source read around a timed region.
pub trait CycleCounter {
    /// Short name used in reports (e.g., "tsc").
    fn name(&self) -> &'static str;

    /// Read the current tick count.
    ///
    /// Implementations must keep the read ordered with respect to the
    /// surrounding code, so a timed call cannot drift across it.
    fn read(&self) -> u64;

    /// Whether ticks are real CPU cycles rather than wall-clock nanoseconds.
    fn is_hardware(&self) -> bool;
}

/// x86_64 time-stamp counter read with `rdtsc`.
///
/// Each read is fenced by `lfence` on both sides so earlier loads retire
/// before the counter is sampled and later instructions cannot start early.
#[cfg(target_arch = "x86_64")]
#[derive(Debug, Default, Clone, Copy)]
pub struct Tsc;

#[cfg(target_arch = "x86_64")]
impl CycleCounter for Tsc {
    fn name(&self) -> &'static str {
        "tsc"
    }

    #[inline(always)]
    fn read(&self) -> u64 {
        use std::arch::x86_64::{_mm_lfence, _rdtsc};

        compiler_fence(Ordering::SeqCst);
        // SAFETY: lfence is SSE2 and rdtsc is baseline on every x86_64 CPU.
        let ticks = unsafe {
            _mm_lfence();
            let t = _rdtsc();
            _mm_lfence();
            t
        };
        compiler_fence(Ordering::SeqCst);
        ticks
    }

    fn is_hardware(&self) -> bool {
        true
    }
}

/// Portable fallback: nanoseconds elapsed since the counter was created.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicCounter {
    origin: Instant,
}

impl MonotonicCounter {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleCounter for MonotonicCounter {
    fn name(&self) -> &'static str {
        "monotonic"
    }

    #[inline(always)]
    fn read(&self) -> u64 {
        compiler_fence(Ordering::SeqCst);
        let ns = self.origin.elapsed().as_nanos() as u64;
        compiler_fence(Ordering::SeqCst);
        ns
    }

    fn is_hardware(&self) -> bool {
        false
    }
}

/// Which cycle counter to measure with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CounterChoice {
    /// Hardware counter when the target has one, monotonic clock otherwise.
    #[default]
    Auto,
    Tsc,
    Monotonic,
}

/// Build the cycle counter for `choice`.
pub fn select_counter(choice: CounterChoice) -> Result<Box<dyn CycleCounter>, TimingError> {
    let counter: Box<dyn CycleCounter> = match choice {
        CounterChoice::Monotonic => Box::new(MonotonicCounter::new()),
        CounterChoice::Tsc => hardware_counter().ok_or(TimingError::Unavailable("tsc"))?,
        CounterChoice::Auto => {
            hardware_counter().unwrap_or_else(|| Box::new(MonotonicCounter::new()))
        }
    };
    log::info!(
        "cycle counter: {} (hardware: {})",
        counter.name(),
        counter.is_hardware()
    );
    Ok(counter)
}

#[cfg(target_arch = "x86_64")]
fn hardware_counter() -> Option<Box<dyn CycleCounter>> {
    Some(Box::new(Tsc))
}

#[cfg(not(target_arch = "x86_64"))]
fn hardware_counter() -> Option<Box<dyn CycleCounter>> {
    None
}

/// Simple wall-clock timer for benchmarking.
pub struct BenchTimer {
    start: Instant,
}

impl BenchTimer {
    /// Start the timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed wall time since `start`.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return elapsed time in milliseconds.
    pub fn stop(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }
}
