//! Summary table using comfy-table.
//!
//! For each width, compares every kernel at the largest measured size:
//! Kernel | Backend | Size | Adds/Cycle | vs SingleScalar

use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::harness::{format_size, ReportRow};

/// Speedup of `row` over the SingleScalar row at the same width and size.
fn speedup_vs_scalar(row: &ReportRow, rows: &[ReportRow]) -> Option<f64> {
    let scalar = rows.iter().find(|r| {
        r.kernel == "SingleScalar" && r.width == row.width && r.size == row.size
    })?;
    if scalar.adds_per_cycle > 0.0 {
        Some(row.adds_per_cycle / scalar.adds_per_cycle)
    } else {
        None
    }
}

fn speedup_cell(speedup: Option<f64>) -> Cell {
    match speedup {
        Some(s) => {
            let text = format!("{:.2}x", s);
            let cell = if s >= 4.0 {
                Cell::new(text).fg(Color::Green)
            } else if s >= 2.0 {
                Cell::new(text).fg(Color::Cyan)
            } else if s >= 1.0 {
                Cell::new(text).fg(Color::Yellow)
            } else {
                Cell::new(text).fg(Color::Red)
            };
            cell.set_alignment(CellAlignment::Right)
        }
        None => Cell::new("-").set_alignment(CellAlignment::Right),
    }
}

/// Build the summary table for one width, or `None` if it has no rows.
pub fn build_summary(rows: &[ReportRow], width: u32) -> Option<Table> {
    let largest = rows
        .iter()
        .filter(|r| r.width == width)
        .map(|r| r.size)
        .max()?;

    let mut table = Table::new();
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Kernel").add_attribute(Attribute::Bold),
            Cell::new("Backend").add_attribute(Attribute::Bold),
            Cell::new("Size").add_attribute(Attribute::Bold),
            Cell::new("Adds/Cycle").add_attribute(Attribute::Bold),
            Cell::new("vs SingleScalar").add_attribute(Attribute::Bold),
        ]);

    for row in rows.iter().filter(|r| r.width == width && r.size == largest) {
        let kernel = if row.valid {
            Cell::new(&row.kernel)
        } else {
            Cell::new(format!("{} (INVALID)", row.kernel)).fg(Color::Red)
        };
        table.add_row(vec![
            kernel,
            Cell::new(&row.backend),
            Cell::new(format_size(row.size)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.3}", row.adds_per_cycle)).set_alignment(CellAlignment::Right),
            speedup_cell(speedup_vs_scalar(row, rows)),
        ]);
    }

    Some(table)
}

/// Print one summary table per width present in `rows`.
pub fn print_summary(rows: &[ReportRow]) {
    for width in [32, 64] {
        if let Some(table) = build_summary(rows, width) {
            println!("\n=== Summary: u{} ===", width);
            println!("{table}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(kernel: &str, width: u32, size: usize, apc: f64) -> ReportRow {
        ReportRow {
            kernel: kernel.to_string(),
            backend: "scalar".to_string(),
            width,
            size,
            result: 0,
            min_cycles: 1,
            clock_ghz: 1.0,
            adds_per_cycle: apc,
            valid: true,
        }
    }

    #[test]
    fn test_speedup_vs_scalar() {
        let rows = vec![
            row("SingleScalar", 64, 1000, 0.5),
            row("Simd256", 64, 1000, 2.0),
            row("Simd256", 32, 1000, 8.0),
        ];
        assert_eq!(speedup_vs_scalar(&rows[1], &rows), Some(4.0));
        // No u32 scalar row to compare against
        assert_eq!(speedup_vs_scalar(&rows[2], &rows), None);
    }

    #[test]
    fn test_summary_uses_largest_size_only() {
        let rows = vec![
            row("SingleScalar", 64, 5_000, 0.9),
            row("SingleScalar", 64, 25_000_000, 1.0),
            row("Simd256", 64, 25_000_000, 3.0),
        ];
        let table = build_summary(&rows, 64).unwrap();
        let rendered = table.to_string();
        assert!(rendered.contains("25M"));
        assert!(!rendered.contains("5K"));
        assert!(rendered.contains("3.00x"));
    }

    #[test]
    fn test_summary_absent_width() {
        let rows = vec![row("SingleScalar", 64, 5_000, 1.0)];
        assert!(build_summary(&rows, 32).is_none());
    }
}
