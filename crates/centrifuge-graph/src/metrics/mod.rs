//! Per-file and per-module metrics derived from the graph and centrality scores.

mod file;
mod module;

pub use file::{FileMetrics, compute_file_metrics};
pub use module::{ModuleMetrics, compute_module_metrics};
