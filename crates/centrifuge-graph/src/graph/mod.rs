//! Directed dependency graph over file nodes.
//!
//! The graph keeps the flat node and edge lists handed to consumers alongside
//! index-based adjacency over file nodes only. Function nodes are carried in the
//! node list but never take part in edges, centrality or cycle detection.
//!
//! Methods are split across submodules by concern:
//!
//! - `construction` - building a graph from [`ParsedFile`](crate::ParsedFile) records
//! - `queries` - node/edge lookups, neighbors and degrees
//! - `traversal` - breadth-first walks over dependents

mod construction;
mod queries;
mod traversal;

use rustc_hash::FxHashMap as HashMap;

use super::{GraphEdge, GraphNode};

pub use construction::build_graph;
pub use traversal::DependentLevel;

/// Dense index of a file node inside a [`DependencyGraph`].
pub type FileIndex = usize;

/// Per-file record backing the adjacency lists.
#[derive(Debug, Clone)]
pub(crate) struct FileEntry {
    /// Position of the file node in `nodes`.
    pub(crate) node: usize,
    pub(crate) export_count: usize,
    /// Edge positions leaving this file, in insertion order.
    pub(crate) outgoing: Vec<usize>,
    /// Edge positions entering this file, in insertion order.
    pub(crate) incoming: Vec<usize>,
}

/// Immutable dependency graph produced by the builder.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    pub(crate) nodes: Vec<GraphNode>,
    pub(crate) edges: Vec<GraphEdge>,
    pub(crate) files: Vec<FileEntry>,
    /// `(source, target)` file indices per edge, parallel to `edges`.
    pub(crate) endpoints: Vec<(FileIndex, FileIndex)>,
    pub(crate) file_lookup: HashMap<String, FileIndex>,
    pub(crate) edge_lookup: HashMap<(FileIndex, FileIndex), usize>,
}

impl DependencyGraph {
    /// Consume the graph, returning the flat node and edge lists.
    pub fn into_parts(self) -> (Vec<GraphNode>, Vec<GraphEdge>) {
        (self.nodes, self.edges)
    }
}
