use indexmap::IndexMap;
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use serde::{Deserialize, Serialize};

use super::super::math::{ratio_or, round_to};
use super::super::{AnalysisOptions, DependencyGraph, ParsedFile};

/// Metrics of one file node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetrics {
    pub page_rank: f64,
    /// Normalized to `[0, 1]`.
    pub betweenness: f64,
    pub fan_in: usize,
    pub fan_out: usize,
    /// `fan_out / (fan_in + fan_out)`, 0 for isolated files.
    pub coupling: f64,
    /// Backfilled from force analysis. 0 unless the file is a tension file.
    pub tension: f64,
    pub is_bridge: bool,
    pub churn: u32,
    pub cyclomatic_complexity: f64,
    /// Distinct files that transitively import this one.
    pub blast_radius: usize,
    /// Non-default exports no inbound edge names.
    pub dead_exports: Vec<String>,
    pub has_tests: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_file: Option<String>,
}

/// Compute [`FileMetrics`] for every file node, keyed by path in graph order.
///
/// `page_rank` and `betweenness` are indexed by file index. Files missing from
/// `files` get neutral metadata (no churn, complexity 1, no dead exports).
pub fn compute_file_metrics(
    graph: &DependencyGraph,
    files: &[ParsedFile],
    page_rank: &[f64],
    betweenness: &[f64],
    options: &AnalysisOptions,
) -> IndexMap<String, FileMetrics> {
    let mut parsed_by_path: HashMap<&str, &ParsedFile> = HashMap::default();
    for file in files {
        parsed_by_path
            .entry(file.relative_path.as_str())
            .or_insert(file);
    }

    let mut metrics = IndexMap::with_capacity(graph.file_count());
    for index in graph.file_indices() {
        let path = graph.file_path(index);
        let parsed = parsed_by_path.get(path).copied();
        let fan_in = graph.fan_in(index);
        let fan_out = graph.fan_out(index);
        let btwn = betweenness.get(index).copied().unwrap_or(0.0);

        let consumed: HashSet<&str> = graph
            .incoming(index)
            .flat_map(|(_, edge)| edge.symbols.iter().map(String::as_str))
            .collect();
        let dead_exports: Vec<String> = parsed
            .map(|file| {
                file.exports
                    .iter()
                    .filter(|e| !e.is_default && !consumed.contains(e.name.as_str()))
                    .map(|e| e.name.clone())
                    .collect()
            })
            .unwrap_or_default();

        let test_file = parsed.and_then(|file| file.test_file.clone());
        let complexity = parsed.map_or(1.0, ParsedFile::mean_complexity);

        metrics.insert(
            path.to_string(),
            FileMetrics {
                page_rank: page_rank.get(index).copied().unwrap_or(0.0),
                betweenness: btwn,
                fan_in,
                fan_out,
                coupling: ratio_or(fan_out, fan_in + fan_out, 0.0),
                tension: 0.0,
                is_bridge: btwn > options.bridge_flag_threshold,
                churn: parsed.map_or(0, |file| file.churn),
                cyclomatic_complexity: round_to(complexity, 2),
                blast_radius: graph.blast_radius(index),
                dead_exports,
                has_tests: test_file.is_some(),
                test_file,
            },
        );
    }

    tracing::debug!(files = metrics.len(), "computed file metrics");
    metrics
}
