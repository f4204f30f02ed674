//! # centrifuge-graph
//!
//! Dependency graph construction and architectural force analysis for a
//! codebase.
//!
//! The crate is pure: it takes the [`ParsedFile`] records produced by an
//! external source parser and returns one immutable [`CodebaseGraph`]. It never
//! touches the filesystem.
//!
//! ## Pipeline
//!
//! ```text
//!   ParsedFile[]
//!        │
//!        ▼
//!   build_graph ──► DependencyGraph (file + function nodes, merged import edges)
//!        │
//!        ├──► detect_cycles        circular chains, capped
//!        ├──► page_rank            weighted power iteration
//!        └──► betweenness          Brandes, normalized
//!        │
//!        ▼
//!   file metrics ──► module metrics ──► force analysis ──► groups
//!        │
//!        ▼
//!   CodebaseGraph
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use centrifuge_graph::{ParsedFile, ParsedImport, analyze};
//!
//! let files = vec![
//!     ParsedFile::new("a.ts").with_import(ParsedImport::resolved("b.ts", ["run"])),
//!     ParsedFile::new("b.ts").with_import(ParsedImport::resolved("c.ts", ["helper"])),
//!     ParsedFile::new("c.ts"),
//! ];
//!
//! let result = analyze(&files);
//! assert_eq!(result.stats.total_files, 3);
//! assert_eq!(result.stats.total_dependencies, 2);
//! assert!(result.file_metrics["c.ts"].page_rank > result.file_metrics["a.ts"].page_rank);
//! ```
//!
//! ## Queries
//!
//! A finished [`CodebaseGraph`] answers read-only questions through the methods
//! in [`queries`]: [`overview`](CodebaseGraph::overview),
//! [`file_context`](CodebaseGraph::file_context),
//! [`dependents`](CodebaseGraph::dependents),
//! [`hotspots`](CodebaseGraph::hotspots) and
//! [`module_structure`](CodebaseGraph::module_structure).

pub mod analysis;
pub mod centrality;
pub mod cycles;
pub mod edge;
pub mod forces;
pub mod graph;
pub mod groups;
mod math;
pub mod metrics;
pub mod node;
pub mod options;
pub mod parsed;
pub mod queries;

pub use analysis::{CodebaseGraph, GraphStats, analyze, analyze_graph, analyze_with_options};
pub use centrality::{CentralityError, betweenness, page_rank};
pub use cycles::{Cycle, detect_cycles};
pub use edge::GraphEdge;
pub use forces::{
    BridgeFile, CohesionVerdict, ExtractionCandidate, ForceAnalysis, ModuleCohesion, ModulePull,
    TensionFile, compute_force_analysis,
};
pub use graph::{DependencyGraph, DependentLevel, FileIndex, build_graph};
pub use groups::{GROUP_COLORS, GroupMetrics, cloud_group, compute_groups};
pub use metrics::{FileMetrics, ModuleMetrics, compute_file_metrics, compute_module_metrics};
pub use node::{GraphNode, NodeKind, basename, function_id, module_key};
pub use options::AnalysisOptions;
pub use parsed::{ExportKind, ExportRole, ParsedExport, ParsedFile, ParsedImport};
pub use queries::{
    CodebaseOverview, DependentsReport, FileContext, HotspotMetric, HotspotReport, Level,
    ModuleStructure,
};

/// Error types for graph queries and serialization.
///
/// Analysis itself never fails; these only come from looking things up in a
/// finished result or encoding it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The path is not a file node of the analyzed graph.
    #[error("File not found in graph: {0}")]
    FileNotFound(String),

    /// The name does not match any hotspot metric.
    #[error("Unknown metric '{0}' (expected one of coupling, pagerank, fan_in, fan_out, betweenness, tension, escape_velocity)")]
    UnknownMetric(String),

    /// JSON encoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for centrifuge-graph operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests;
