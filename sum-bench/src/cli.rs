use clap::{Parser, ValueEnum};

use sum_kernels::{KernelError, KernelKind};
use sum_primitives::CounterChoice;

use crate::config::{get_profile, parse_sizes, BenchConfig, DataPattern, Width, NUM_RUNS};
use crate::error::BenchError;

/// Add-throughput benchmark: scalar, unrolled and SIMD integer summation
#[derive(Parser, Debug)]
#[command(name = "sum-bench", version, about)]
pub struct SumArgs {
    /// Kernels to run (scalar unroll2 unroll4 simd128 simd256).
    /// Use "all" (the default) to run every kernel in order.
    #[arg(value_name = "KERNELS")]
    pub kernels: Vec<String>,

    /// Integer width to benchmark
    #[arg(long, value_enum, default_value_t = WidthArg::All)]
    pub width: WidthArg,

    /// Element counts to benchmark (e.g., 5K, 25M, 4097). Defaults depend on width.
    #[arg(long, value_delimiter = ',')]
    pub sizes: Option<Vec<String>>,

    /// Timed runs per size; the minimum cycle count is reported [default: 100]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub runs: Option<u32>,

    /// Untimed runs before measurement [default: 0]
    #[arg(long)]
    pub warmup: Option<u32>,

    /// Benchmark profile: quick (5K/10 runs), standard (defaults/100), thorough (up to 100M/1000/3 warmup)
    #[arg(long)]
    pub profile: Option<String>,

    /// Cycle counter: hardware time-stamp counter or monotonic clock
    #[arg(long, value_enum, default_value_t = CounterArg::Auto)]
    pub counter: CounterArg,

    /// Input data: 0..size or seeded random values
    #[arg(long, value_enum, default_value_t = DataPattern::Sequential)]
    pub pattern: DataPattern,

    /// Seed for --pattern random
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Use the portable lane-array kernels even when intrinsics are available
    #[arg(long)]
    pub portable: bool,

    /// Print a comparison table after the per-kernel reports
    #[arg(long)]
    pub summary: bool,

    /// Write JSON results to file
    #[arg(long)]
    pub json_file: Option<String>,

    /// Write CSV results to file
    #[arg(long)]
    pub csv_file: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WidthArg {
    #[value(name = "32")]
    W32,
    #[value(name = "64")]
    W64,
    All,
}

impl WidthArg {
    /// Widths to run, 32-bit first.
    pub fn widths(self) -> Vec<Width> {
        match self {
            WidthArg::W32 => vec![Width::W32],
            WidthArg::W64 => vec![Width::W64],
            WidthArg::All => vec![Width::W32, Width::W64],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CounterArg {
    Auto,
    Tsc,
    Monotonic,
}

impl From<CounterArg> for CounterChoice {
    fn from(arg: CounterArg) -> Self {
        match arg {
            CounterArg::Auto => CounterChoice::Auto,
            CounterArg::Tsc => CounterChoice::Tsc,
            CounterArg::Monotonic => CounterChoice::Monotonic,
        }
    }
}

impl SumArgs {
    /// Returns true if every kernel should run.
    pub fn is_all_kernels(&self) -> bool {
        self.kernels.is_empty() || self.kernels.iter().any(|k| k.eq_ignore_ascii_case("all"))
    }

    /// Selected kernels, always in benchmark order and without duplicates.
    pub fn kernel_kinds(&self) -> Result<Vec<KernelKind>, KernelError> {
        if self.is_all_kernels() {
            return Ok(KernelKind::ALL.to_vec());
        }
        let mut picked = Vec::with_capacity(self.kernels.len());
        for name in &self.kernels {
            picked.push(KernelKind::from_slug(name)?);
        }
        Ok(KernelKind::ALL
            .into_iter()
            .filter(|k| picked.contains(k))
            .collect())
    }

    /// Resolve sizes, runs and warmup.
    ///
    /// Explicit flags win over the profile, which wins over the compiled-in defaults.
    pub fn bench_config(&self) -> Result<BenchConfig, BenchError> {
        let profile = match self.profile.as_deref() {
            Some(name) => Some(get_profile(name).ok_or_else(|| {
                BenchError::Config(format!(
                    "Unknown profile '{}'. Valid: quick, standard, thorough",
                    name
                ))
            })?),
            None => None,
        };
        if let Some(ref p) = profile {
            log::info!("using profile '{}'", p.name);
        }

        let sizes = match &self.sizes {
            Some(raw) => Some(
                parse_sizes(raw)
                    .map_err(|e| BenchError::Config(format!("Error parsing sizes: {}", e)))?,
            ),
            None => profile.as_ref().and_then(|p| p.sizes.clone()),
        };

        let runs = self
            .runs
            .or(profile.as_ref().map(|p| p.runs))
            .unwrap_or(NUM_RUNS);
        let warmup = self
            .warmup
            .or(profile.as_ref().map(|p| p.warmup))
            .unwrap_or(0);

        Ok(BenchConfig {
            sizes,
            runs,
            warmup,
            pattern: self.pattern,
            seed: self.seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> SumArgs {
        SumArgs::try_parse_from(std::iter::once("sum-bench").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_no_arguments_reproduces_fixed_driver() {
        let args = parse(&[]);
        assert_eq!(args.kernel_kinds().unwrap(), KernelKind::ALL.to_vec());
        assert_eq!(args.width.widths(), vec![Width::W32, Width::W64]);
        let config = args.bench_config().unwrap();
        assert_eq!(config.runs, 100);
        assert_eq!(config.warmup, 0);
        assert_eq!(config.sizes, None);
        assert_eq!(config.pattern, DataPattern::Sequential);
        assert_eq!(args.counter, CounterArg::Auto);
    }

    #[test]
    fn test_kernel_selection_keeps_benchmark_order() {
        let args = parse(&["simd256", "scalar", "SIMD256"]);
        assert_eq!(
            args.kernel_kinds().unwrap(),
            vec![KernelKind::SingleScalar, KernelKind::Simd256]
        );
    }

    #[test]
    fn test_unknown_kernel() {
        let args = parse(&["simd512"]);
        assert!(matches!(
            args.kernel_kinds(),
            Err(KernelError::UnknownKernel(ref s)) if s == "simd512"
        ));
    }

    #[test]
    fn test_width_values() {
        assert_eq!(parse(&["--width", "32"]).width.widths(), vec![Width::W32]);
        assert_eq!(parse(&["--width", "64"]).width.widths(), vec![Width::W64]);
        assert!(SumArgs::try_parse_from(["sum-bench", "--width", "16"]).is_err());
    }

    #[test]
    fn test_sizes_flag() {
        let config = parse(&["--sizes", "5K,4097,25M"]).bench_config().unwrap();
        assert_eq!(config.sizes, Some(vec![5_000, 4_097, 25_000_000]));
        assert!(parse(&["--sizes", "5K,bogus"]).bench_config().is_err());
    }

    #[test]
    fn test_zero_runs_rejected() {
        assert!(SumArgs::try_parse_from(["sum-bench", "--runs", "0"]).is_err());
    }

    #[test]
    fn test_profile_defaults_and_overrides() {
        let config = parse(&["--profile", "thorough"]).bench_config().unwrap();
        assert_eq!(config.runs, 1000);
        assert_eq!(config.warmup, 3);

        let config = parse(&["--profile", "thorough", "--runs", "7", "--warmup", "0"])
            .bench_config()
            .unwrap();
        assert_eq!(config.runs, 7);
        assert_eq!(config.warmup, 0);

        let config = parse(&["--profile", "quick", "--sizes", "8"]).bench_config().unwrap();
        assert_eq!(config.sizes, Some(vec![8]));
        assert_eq!(config.runs, 10);
    }

    #[test]
    fn test_unknown_profile() {
        let err = parse(&["--profile", "extreme"]).bench_config().unwrap_err();
        assert!(err.to_string().contains("Unknown profile 'extreme'"));
    }

    #[test]
    fn test_counter_and_pattern_flags() {
        let args = parse(&["--counter", "monotonic", "--pattern", "random", "--seed", "7"]);
        assert_eq!(CounterChoice::from(args.counter), CounterChoice::Monotonic);
        let config = args.bench_config().unwrap();
        assert_eq!(config.pattern, DataPattern::Random);
        assert_eq!(config.seed, 7);
    }
}
