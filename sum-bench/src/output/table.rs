//! Fixed-width text report: one table per kernel, one row per size.
//!
//! Columns are left-justified at 20/25/20/20/15 characters:
//! Test Size | Result | CPU Cycles | CPU Clock (GHz) | Adds per Cycle

use crate::harness::ReportRow;

/// Width of the `=` and `-` rules framing each table.
pub const RULE_WIDTH: usize = 103;

/// Title line plus column header for a kernel's table.
pub fn format_header(kernel_label: &str) -> String {
    format!(
        "\nRunning tests for function: {}\n{}\n{:<20}{:<25}{:<20}{:<20}{:<15}\n{}",
        kernel_label,
        "=".repeat(RULE_WIDTH),
        "Test Size",
        "Result",
        "CPU Cycles",
        "CPU Clock (GHz)",
        "Adds per Cycle",
        "-".repeat(RULE_WIDTH),
    )
}

/// One data row.
pub fn format_row(row: &ReportRow) -> String {
    format!(
        "{:<20}{:<25}{:<20}{:<20.3}{:<15.6}",
        row.size, row.result, row.min_cycles, row.clock_ghz, row.adds_per_cycle
    )
}

pub fn format_footer() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn print_header(kernel_label: &str) {
    println!("{}", format_header(kernel_label));
}

pub fn print_row(row: &ReportRow) {
    println!("{}", format_row(row));
}

pub fn print_footer() {
    println!("{}", format_footer());
}

/// Section banner separating the 32-bit and 64-bit pipelines.
pub fn print_width_banner(bits: u32, lane: &str) {
    println!("\n##### {}-bit integers ({}) #####", bits, lane);
}
