//! Output modules for rendering benchmark results.
//!
//! The fixed-width report goes to stdout as rows are measured; the summary
//! (comfy-table), JSON and CSV writers run once all kernels are done.

pub mod csv;
pub mod json;
pub mod progress;
pub mod summary;
pub mod table;
