//! Minimum-of-N sampling for cycle measurements.
//!
//! No mean, median or outlier rejection: the sample with the fewest cycles
//! is the reported cost, and its own wall time gives the clock estimate.

use std::time::{Duration, Instant};

/// One timed kernel invocation.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub start_cycles: u64,
    pub end_cycles: u64,
    pub start: Instant,
    pub end: Instant,
}

impl Sample {
    /// Ticks spent in the call. A counter that stepped backwards reads as 0.
    pub fn cycles(&self) -> u64 {
        self.end_cycles.saturating_sub(self.start_cycles)
    }

    pub fn elapsed(&self) -> Duration {
        self.end.saturating_duration_since(self.start)
    }

    /// Cycles per wall-clock second, or 0 when no wall time elapsed.
    pub fn clock_hz(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.cycles() as f64 / secs
        } else {
            0.0
        }
    }
}

/// Keeps the lowest-cycle sample seen so far.
#[derive(Debug, Default)]
pub struct MinSample {
    best: Option<Sample>,
    observed: u32,
}

impl MinSample {
    pub fn observe(&mut self, sample: Sample) {
        self.observed += 1;
        let better = match self.best {
            Some(best) => sample.cycles() < best.cycles(),
            None => true,
        };
        if better {
            self.best = Some(sample);
        }
    }

    pub fn min_cycles(&self) -> Option<u64> {
        self.best.map(|s| s.cycles())
    }

    /// Clock estimate from the minimum-cycle sample itself.
    pub fn clock_hz(&self) -> f64 {
        self.best.map(|s| s.clock_hz()).unwrap_or(0.0)
    }

    pub fn observed(&self) -> u32 {
        self.observed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(origin: Instant, cycles: u64, nanos: u64) -> Sample {
        Sample {
            start_cycles: 1_000,
            end_cycles: 1_000 + cycles,
            start: origin,
            end: origin + Duration::from_nanos(nanos),
        }
    }

    #[test]
    fn test_empty() {
        let m = MinSample::default();
        assert_eq!(m.min_cycles(), None);
        assert_eq!(m.clock_hz(), 0.0);
        assert_eq!(m.observed(), 0);
    }

    #[test]
    fn test_keeps_minimum() {
        let t = Instant::now();
        let mut m = MinSample::default();
        for (cycles, ns) in [(900, 300), (450, 150), (2_000, 900), (451, 100)] {
            m.observe(sample(t, cycles, ns));
        }
        assert_eq!(m.min_cycles(), Some(450));
        assert_eq!(m.observed(), 4);
    }

    #[test]
    fn test_clock_comes_from_minimum_sample() {
        let t = Instant::now();
        let mut m = MinSample::default();
        // 3000 cycles in 1000ns = 3 GHz; 1000 cycles in 250ns = 4 GHz (the minimum)
        m.observe(sample(t, 3_000, 1_000));
        m.observe(sample(t, 1_000, 250));
        m.observe(sample(t, 5_000, 1_000));
        assert!((m.clock_hz() - 4.0e9).abs() < 1.0, "clock {}", m.clock_hz());
    }

    #[test]
    fn test_ties_keep_first_sample() {
        let t = Instant::now();
        let mut m = MinSample::default();
        m.observe(sample(t, 100, 50));
        m.observe(sample(t, 100, 20));
        // 100 cycles / 50ns, not 100 cycles / 20ns
        assert!((m.clock_hz() - 2.0e9).abs() < 1.0, "clock {}", m.clock_hz());
    }

    #[test]
    fn test_backwards_counter_saturates() {
        let t = Instant::now();
        let s = Sample {
            start_cycles: 10,
            end_cycles: 5,
            start: t,
            end: t,
        };
        assert_eq!(s.cycles(), 0);
        assert_eq!(s.clock_hz(), 0.0);
    }
}
