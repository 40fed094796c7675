//! JSON output for benchmark results.
//!
//! Serializes the report rows with a hardware and counter header.

use std::fs;
use std::path::Path;

use serde::Serialize;

use sum_primitives::HardwareInfo;

use crate::error::BenchError;
use crate::harness::ReportRow;

/// JSON output wrapper with hardware metadata.
#[derive(Serialize)]
struct JsonReport<'a> {
    hardware: &'a HardwareInfo,
    counter: &'a str,
    runs: u32,
    timestamp: String,
    results: &'a [ReportRow],
}

/// Write benchmark results to a JSON file.
pub fn write_json(
    path: &str,
    data: &[ReportRow],
    hardware: &HardwareInfo,
    counter: &str,
    runs: u32,
) -> Result<(), BenchError> {
    let report = JsonReport {
        hardware,
        counter,
        runs,
        timestamp: chrono::Utc::now().to_rfc3339(),
        results: data,
    };

    let json = serde_json::to_string_pretty(&report)?;

    ensure_parent_dir(path)?;
    fs::write(path, json).map_err(|source| BenchError::Output {
        path: path.to_string(),
        source,
    })?;

    log::info!("JSON results written to: {}", path);
    Ok(())
}

/// Create the parent directory of `path` if it has one.
pub(crate) fn ensure_parent_dir(path: &str) -> Result<(), BenchError> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| BenchError::Output {
                path: parent.display().to_string(),
                source,
            })?;
        }
    }
    Ok(())
}
