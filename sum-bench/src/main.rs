mod cli;
mod config;
mod data_gen;
mod error;
mod harness;
mod output;
mod stats;

use std::io::IsTerminal;

use clap::Parser;
use cli::SumArgs;
use config::{BenchConfig, Width};
use data_gen::DataGenerator;
use error::BenchError;
use harness::{run_test, ReportRow};
use output::progress::BenchProgress;
use output::table;
use sum_kernels::{best_available, Kernel, KernelKind, Lane};
use sum_primitives::{select_counter, BenchTimer, CpuFeatures, CycleCounter, HardwareInfo};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = SumArgs::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &SumArgs) -> Result<(), BenchError> {
    let config = args.bench_config()?;
    let kinds = args.kernel_kinds()?;
    let widths = args.width.widths();

    let hardware = HardwareInfo::detect();
    let counter = select_counter(args.counter.into())?;
    let best = best_available(&hardware.features);

    println!("sum-bench: integer add throughput");
    println!("  CPU: {} ({} logical cores)", hardware.cpu_name, hardware.logical_cores);
    println!("  Features: {}", feature_list(&hardware.features));
    println!(
        "  Cycle counter: {}{}",
        counter.name(),
        if counter.is_hardware() {
            ""
        } else {
            " (nanoseconds; clock estimate is nominal)"
        }
    );
    println!("  Best kernel: {}", best);
    println!(
        "  Kernels: {}",
        kinds.iter().map(|k| k.slug()).collect::<Vec<_>>().join(", ")
    );
    println!("  Runs: {}, Warmup: {}", config.runs, config.warmup);
    if let Some(ref path) = args.json_file {
        println!("  JSON output: {}", path);
    }
    if let Some(ref path) = args.csv_file {
        println!("  CSV output: {}", path);
    }

    let progress = if std::io::stderr().is_terminal() {
        BenchProgress::new()
    } else {
        BenchProgress::hidden()
    };
    let mut gen = DataGenerator::new(config.seed);
    let timer = BenchTimer::start();
    let mut all_results: Vec<ReportRow> = Vec::new();

    let ctx = RunContext {
        kinds: &kinds,
        config: &config,
        features: &hardware.features,
        portable: args.portable,
        counter: counter.as_ref(),
        progress: &progress,
    };

    for width in widths {
        let rows = match width {
            Width::W32 => run_width::<u32>(&ctx, &mut gen),
            Width::W64 => run_width::<u64>(&ctx, &mut gen),
        };
        match rows {
            Ok(rows) => all_results.extend(rows),
            Err(e) => {
                progress.finish();
                return Err(e);
            }
        }
    }

    progress.finish();
    log::info!(
        "{} measurements in {:.1} ms",
        all_results.len(),
        timer.stop()
    );

    if args.summary {
        output::summary::print_summary(&all_results);
    }

    if let Some(ref path) = args.json_file {
        if let Err(e) =
            output::json::write_json(path, &all_results, &hardware, counter.name(), config.runs)
        {
            eprintln!("Error writing JSON: {}", e);
        }
    }

    if let Some(ref path) = args.csv_file {
        if let Err(e) = output::csv::write_csv(path, &all_results) {
            eprintln!("Error writing CSV: {}", e);
        }
    }

    Ok(())
}

/// Everything a width pipeline needs besides the data generator.
struct RunContext<'a> {
    kinds: &'a [KernelKind],
    config: &'a BenchConfig,
    features: &'a CpuFeatures,
    portable: bool,
    counter: &'a dyn CycleCounter,
    progress: &'a BenchProgress,
}

/// Run every selected kernel for lane type `T`, printing one table per kernel.
fn run_width<T: Lane>(
    ctx: &RunContext<'_>,
    gen: &mut DataGenerator,
) -> Result<Vec<ReportRow>, BenchError> {
    let width = Width::of::<T>();
    let sizes = ctx.config.sizes_for(width);
    let mut results = Vec::new();

    ctx.progress
        .suspend(|| table::print_width_banner(width.bits(), T::NAME));

    for &kind in ctx.kinds {
        let kernel = if ctx.portable {
            Kernel::<T>::portable(kind)
        } else {
            Kernel::<T>::select(kind, ctx.features)
        };
        log::info!("running {:?}", kernel);

        ctx.progress.suspend(|| table::print_header(&kernel.label()));
        let cb = ctx.progress.callback();
        let rows = run_test(
            &kernel,
            &sizes,
            ctx.config,
            ctx.counter,
            gen,
            Some(&cb),
            &mut |row: &ReportRow| ctx.progress.suspend(|| table::print_row(row)),
        )?;
        ctx.progress.suspend(table::print_footer);

        results.extend(rows);
    }

    Ok(results)
}

fn feature_list(features: &CpuFeatures) -> String {
    let names = features.names();
    if names.is_empty() {
        "none (portable kernels only)".to_string()
    } else {
        names.join(", ")
    }
}
