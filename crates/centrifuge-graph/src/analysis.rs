//! The analysis pipeline.
//!
//! ```text
//! ParsedFile[] -> build_graph -> cycles + centrality -> file/module metrics
//!              -> force analysis -> groups -> CodebaseGraph
//! ```
//!
//! Every stage is a pure function of the previous ones. The only write after a
//! stage completes is copying tension scores back into the file metrics.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::centrality::{betweenness_or_zero, page_rank_or_uniform};
use super::cycles::{Cycle, detect_cycles};
use super::{
    AnalysisOptions, DependencyGraph, FileMetrics, ForceAnalysis, GraphEdge, GraphNode,
    GroupMetrics, ModuleMetrics, ParsedFile, Result, build_graph, compute_file_metrics,
    compute_force_analysis, compute_groups, compute_module_metrics,
};

/// Headline counts of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub total_files: usize,
    pub total_functions: usize,
    pub total_dependencies: usize,
    pub circular_deps: Vec<Cycle>,
}

/// Immutable result of one analysis run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodebaseGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    /// Keyed by relative path, in input order.
    pub file_metrics: IndexMap<String, FileMetrics>,
    /// Keyed by module key, in order of first appearance.
    pub module_metrics: IndexMap<String, ModuleMetrics>,
    pub groups: Vec<GroupMetrics>,
    pub force_analysis: ForceAnalysis,
    pub stats: GraphStats,
}

/// Analyze `files` with the default options.
pub fn analyze(files: &[ParsedFile]) -> CodebaseGraph {
    analyze_with_options(files, &AnalysisOptions::default())
}

/// Analyze `files`.
pub fn analyze_with_options(files: &[ParsedFile], options: &AnalysisOptions) -> CodebaseGraph {
    let graph = build_graph(files);
    analyze_graph(graph, files, options)
}

/// Run every stage after graph construction.
///
/// `files` supplies per-file metadata (churn, complexity, tests, exports) and
/// may be empty, in which case neutral values are used.
pub fn analyze_graph(
    graph: DependencyGraph,
    files: &[ParsedFile],
    options: &AnalysisOptions,
) -> CodebaseGraph {
    let circular_deps = detect_cycles(&graph, options.max_cycles);
    let page_rank = page_rank_or_uniform(&graph, options);
    let betweenness = betweenness_or_zero(&graph);

    let mut file_metrics = compute_file_metrics(&graph, files, &page_rank, &betweenness, options);
    let module_metrics = compute_module_metrics(&graph);
    let force_analysis = compute_force_analysis(&graph, &module_metrics, &betweenness, options);

    for tension_file in &force_analysis.tension_files {
        if let Some(metrics) = file_metrics.get_mut(&tension_file.file) {
            metrics.tension = tension_file.tension;
        }
    }

    let stats = GraphStats {
        total_files: graph.file_count(),
        total_functions: graph.function_count(),
        total_dependencies: graph.edges().len(),
        circular_deps,
    };

    let (nodes, edges) = graph.into_parts();
    let groups = compute_groups(&nodes, &file_metrics, options.max_groups);

    tracing::debug!(
        files = stats.total_files,
        dependencies = stats.total_dependencies,
        cycles = stats.circular_deps.len(),
        "analysis complete"
    );

    CodebaseGraph {
        nodes,
        edges,
        file_metrics,
        module_metrics,
        groups,
        force_analysis,
        stats,
    }
}

impl CodebaseGraph {
    /// Rebuild the dependency graph behind this result.
    pub fn dependency_graph(&self) -> DependencyGraph {
        DependencyGraph::from_parts(self.nodes.clone(), self.edges.clone())
    }

    pub fn file_nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(|node| node.is_file())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParsedImport;

    #[test]
    fn test_empty_input() {
        let result = analyze(&[]);
        assert!(result.nodes.is_empty());
        assert!(result.edges.is_empty());
        assert!(result.groups.is_empty());
        assert_eq!(result.stats, GraphStats::default());
        assert_eq!(
            result.force_analysis.summary,
            "Codebase architecture looks healthy. No major force imbalances detected."
        );
    }

    #[test]
    fn test_tension_backfilled() {
        let result = analyze(&[
            ParsedFile::new("lib/mixed.ts")
                .with_import(ParsedImport::resolved("ui/view.ts", ["render"]))
                .with_import(ParsedImport::resolved("db/store.ts", ["save"])),
            ParsedFile::new("ui/view.ts"),
            ParsedFile::new("db/store.ts"),
        ]);
        assert_eq!(result.file_metrics["lib/mixed.ts"].tension, 1.0);
        assert_eq!(result.file_metrics["ui/view.ts"].tension, 0.0);
    }

    #[test]
    fn test_analyze_graph_without_metadata() {
        let files = vec![
            ParsedFile::new("a.ts").with_import(ParsedImport::resolved("b.ts", ["b"])),
            ParsedFile::new("b.ts").with_churn(4),
        ];
        let result = analyze_graph(build_graph(&files), &[], &AnalysisOptions::default());
        assert_eq!(result.stats.total_dependencies, 1);
        assert_eq!(result.file_metrics["b.ts"].churn, 0);
        assert_eq!(result.file_metrics["b.ts"].fan_in, 1);
    }

    #[test]
    fn test_json_uses_camel_case() {
        let result = analyze(&[ParsedFile::new("a.ts")]);
        let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(json["stats"]["totalFiles"], 1);
        assert!(json["fileMetrics"]["a.ts"]["pageRank"].is_number());
        assert!(json["forceAnalysis"]["tensionFiles"].is_array());
    }
}
