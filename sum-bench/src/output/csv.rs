//! CSV output for benchmark results.
//!
//! Columns: kernel,backend,width,size,result,min_cycles,clock_ghz,adds_per_cycle,valid

use std::fs;
use std::io::Write;

use crate::error::BenchError;
use crate::harness::ReportRow;
use crate::output::json::ensure_parent_dir;

const HEADER: &str = "kernel,backend,width,size,result,min_cycles,clock_ghz,adds_per_cycle,valid";

/// Render rows as CSV text, header included.
pub fn to_csv(data: &[ReportRow]) -> String {
    let mut out = String::with_capacity(64 * (data.len() + 1));
    out.push_str(HEADER);
    out.push('\n');
    for r in data {
        out.push_str(&format!(
            "{},{},{},{},{},{},{:.3},{:.6},{}\n",
            r.kernel, r.backend, r.width, r.size, r.result, r.min_cycles, r.clock_ghz,
            r.adds_per_cycle, r.valid,
        ));
    }
    out
}

/// Write benchmark results to a CSV file.
pub fn write_csv(path: &str, data: &[ReportRow]) -> Result<(), BenchError> {
    ensure_parent_dir(path)?;

    let io_err = |source: std::io::Error| BenchError::Output {
        path: path.to_string(),
        source,
    };
    let mut file = fs::File::create(path).map_err(io_err)?;
    file.write_all(to_csv(data).as_bytes()).map_err(io_err)?;

    log::info!("CSV results written to: {}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<ReportRow> {
        vec![
            ReportRow {
                kernel: "SingleScalar".to_string(),
                backend: "scalar".to_string(),
                width: 32,
                size: 5000,
                result: 12_497_500,
                min_cycles: 5_100,
                clock_ghz: 4.2,
                adds_per_cycle: 0.980392,
                valid: true,
            },
            ReportRow {
                kernel: "Simd256 (portable)".to_string(),
                backend: "portable".to_string(),
                width: 32,
                size: 5000,
                result: 12_497_500,
                min_cycles: 900,
                clock_ghz: 4.2,
                adds_per_cycle: 5.555556,
                valid: true,
            },
        ]
    }

    #[test]
    fn test_to_csv_layout() {
        let text = to_csv(&rows());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
        assert_eq!(
            lines[1],
            "SingleScalar,scalar,32,5000,12497500,5100,4.200,0.980392,true"
        );
        assert!(lines[2].starts_with("Simd256 (portable),portable,32,"));
    }

    #[test]
    fn test_write_csv_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results/out.csv");
        let path = path.to_str().unwrap();
        write_csv(path, &rows()).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(text, to_csv(&rows()));
    }
}
