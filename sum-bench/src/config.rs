use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use sum_kernels::Lane;

/// Timed repetitions per (kernel, size) pair; the minimum is reported.
pub const NUM_RUNS: u32 = 100;

/// Compiled-in sizes for the 32-bit pipeline.
pub const DEFAULT_SIZES_U32: &[usize] = &[5_000];

/// Compiled-in sizes for the 64-bit pipeline.
pub const DEFAULT_SIZES_U64: &[usize] = &[5_000, 20_000, 312_500, 6_000_000, 25_000_000];

/// Integer width of the summed elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Width {
    W32,
    W64,
}

impl Width {
    pub fn bits(self) -> u32 {
        match self {
            Width::W32 => 32,
            Width::W64 => 64,
        }
    }

    /// The width matching lane type `T`.
    pub fn of<T: Lane>() -> Self {
        if T::BITS == 32 {
            Width::W32
        } else {
            Width::W64
        }
    }

    pub fn default_sizes(self) -> Vec<usize> {
        match self {
            Width::W32 => DEFAULT_SIZES_U32.to_vec(),
            Width::W64 => DEFAULT_SIZES_U64.to_vec(),
        }
    }
}

/// Contents of each input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
pub enum DataPattern {
    /// `0..size`, summing to `size * (size - 1) / 2`.
    #[default]
    Sequential,
    /// Seeded uniform random values.
    Random,
}

/// A benchmark profile with preset sizes, runs, and warmup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchProfile {
    pub name: String,
    /// `None` keeps the per-width defaults.
    pub sizes: Option<Vec<usize>>,
    pub runs: u32,
    pub warmup: u32,
}

/// Returns the "quick" profile: 5K / 10 runs / no warmup.
pub fn quick_profile() -> BenchProfile {
    BenchProfile {
        name: "quick".to_string(),
        sizes: Some(vec![5_000]),
        runs: 10,
        warmup: 0,
    }
}

/// Returns the "standard" profile: per-width defaults / 100 runs / no warmup.
pub fn standard_profile() -> BenchProfile {
    BenchProfile {
        name: "standard".to_string(),
        sizes: None,
        runs: NUM_RUNS,
        warmup: 0,
    }
}

/// Returns the "thorough" profile: 5K..100M / 1000 runs / 3 warmup.
pub fn thorough_profile() -> BenchProfile {
    let mut sizes = DEFAULT_SIZES_U64.to_vec();
    sizes.push(100_000_000);
    BenchProfile {
        name: "thorough".to_string(),
        sizes: Some(sizes),
        runs: 1000,
        warmup: 3,
    }
}

/// Lookup a profile by name.
pub fn get_profile(name: &str) -> Option<BenchProfile> {
    match name {
        "quick" => Some(quick_profile()),
        "standard" => Some(standard_profile()),
        "thorough" => Some(thorough_profile()),
        _ => None,
    }
}

/// Resolved settings for one benchmark invocation.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Explicit sizes for every width; `None` uses the per-width defaults.
    pub sizes: Option<Vec<usize>>,
    pub runs: u32,
    pub warmup: u32,
    pub pattern: DataPattern,
    pub seed: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: None,
            runs: NUM_RUNS,
            warmup: 0,
            pattern: DataPattern::Sequential,
            seed: 42,
        }
    }
}

impl BenchConfig {
    pub fn sizes_for(&self, width: Width) -> Vec<usize> {
        self.sizes
            .clone()
            .unwrap_or_else(|| width.default_sizes())
    }
}

/// Parse a human-readable size string to a usize.
///
/// Supports:
/// - "25M" or "25m" -> 25_000_000
/// - "0.5M" -> 500_000
/// - "5K" or "5k" -> 5_000
/// - "5_000" -> 5_000
/// - "5000" -> 5_000
pub fn parse_size(s: &str) -> Result<usize, String> {
    let s = s.trim();

    // Handle suffix multipliers
    if let Some(prefix) = s.strip_suffix('M').or_else(|| s.strip_suffix('m')) {
        return scaled(s, prefix, 1_000_000.0);
    }

    if let Some(prefix) = s.strip_suffix('K').or_else(|| s.strip_suffix('k')) {
        return scaled(s, prefix, 1_000.0);
    }

    // Raw number (possibly with underscores)
    s.replace('_', "")
        .parse::<usize>()
        .map_err(|e| format!("Invalid size '{}': {}", s, e))
}

fn scaled(original: &str, prefix: &str, multiplier: f64) -> Result<usize, String> {
    let num: f64 = prefix
        .replace('_', "")
        .parse()
        .map_err(|e| format!("Invalid size '{}': {}", original, e))?;
    if !num.is_finite() || num < 0.0 {
        return Err(format!("Invalid size '{}': must be a non-negative number", original));
    }
    Ok((num * multiplier).round() as usize)
}

/// Parse a comma-separated list of size strings.
pub fn parse_sizes(raw: &[String]) -> Result<Vec<usize>, String> {
    raw.iter().map(|s| parse_size(s)).collect()
}
