//! Construction of a [`DependencyGraph`] from parsed files.

use rustc_hash::FxHashSet as HashSet;

use super::super::{GraphEdge, GraphNode, ParsedFile, ParsedImport};
use super::{DependencyGraph, FileEntry, FileIndex};

/// Build the dependency graph for `files`.
///
/// Files are registered in input order, each followed by its function and class
/// nodes. Import edges are added next, then one synthetic edge per associated
/// test file. Imports that do not resolve to a known file, and imports of a file
/// by itself, are skipped.
pub fn build_graph(files: &[ParsedFile]) -> DependencyGraph {
    let mut graph = DependencyGraph::default();

    for file in files {
        graph.register_file(file);
    }

    for file in files {
        let Some(source) = graph.file_index(&file.relative_path) else {
            continue;
        };
        for import in &file.imports {
            graph.add_import(source, import);
        }
    }

    for file in files {
        let Some(test_path) = file.test_file.as_deref() else {
            continue;
        };
        let (Some(test), Some(implementation)) = (
            graph.file_index(test_path),
            graph.file_index(&file.relative_path),
        ) else {
            tracing::trace!(file = %file.relative_path, test = test_path, "test file is not a known file");
            continue;
        };
        if test == implementation || graph.edge_lookup.contains_key(&(test, implementation)) {
            continue;
        }
        let edge = GraphEdge::test_link(test_path, &file.relative_path);
        graph.push_edge(test, implementation, edge);
    }

    tracing::debug!(
        files = graph.files.len(),
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "built dependency graph"
    );

    graph
}

impl DependencyGraph {
    /// Build a graph from parsed files. See [`build_graph`].
    pub fn from_parsed_files(files: &[ParsedFile]) -> Self {
        build_graph(files)
    }

    /// Rebuild adjacency from flat node and edge lists, such as those of a
    /// deserialized analysis result.
    ///
    /// Export counts only cover function and class exports, since other kinds
    /// never become nodes. Edges with unknown endpoints and repeated
    /// `(source, target)` pairs are skipped.
    pub fn from_parts(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        let mut graph = DependencyGraph::default();

        for node in nodes {
            if node.is_file() {
                if graph.file_lookup.contains_key(&node.id) {
                    continue;
                }
                graph.file_lookup.insert(node.id.clone(), graph.files.len());
                graph.files.push(FileEntry {
                    node: graph.nodes.len(),
                    export_count: 0,
                    outgoing: Vec::new(),
                    incoming: Vec::new(),
                });
            } else if let Some(parent) = node.parent_file.as_deref().and_then(|p| graph.file_index(p)) {
                graph.files[parent].export_count += 1;
            }
            graph.nodes.push(node);
        }

        for edge in edges {
            let (Some(source), Some(target)) =
                (graph.file_index(&edge.source), graph.file_index(&edge.target))
            else {
                tracing::trace!(source = %edge.source, target = %edge.target, "skipping dangling edge");
                continue;
            };
            if source == target || graph.edge_lookup.contains_key(&(source, target)) {
                continue;
            }
            graph.push_edge(source, target, edge);
        }

        graph
    }

    fn register_file(&mut self, file: &ParsedFile) {
        let path = file.relative_path.as_str();
        if self.file_lookup.contains_key(path) {
            tracing::warn!(file = path, "duplicate relative path; keeping the first record");
            return;
        }

        let index: FileIndex = self.files.len();
        self.file_lookup.insert(path.to_string(), index);
        self.files.push(FileEntry {
            node: self.nodes.len(),
            export_count: file.exports.len(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
        });
        self.nodes.push(GraphNode::file(path, file.loc));

        let mut seen: HashSet<&str> = HashSet::default();
        for export in file.exports.iter().filter(|e| e.kind.creates_node()) {
            if !seen.insert(export.name.as_str()) {
                tracing::warn!(file = path, export = %export.name, "duplicate export name");
                continue;
            }
            self.nodes
                .push(GraphNode::function(path, &export.name, export.loc));
        }
    }

    fn add_import(&mut self, source: FileIndex, import: &ParsedImport) {
        let Some(target_path) = import.resolved_target() else {
            tracing::trace!(from = %import.from, "skipping external import");
            return;
        };
        let Some(target) = self.file_index(target_path) else {
            tracing::trace!(target = target_path, "skipping import of unknown file");
            return;
        };
        if target == source {
            return;
        }

        if let Some(&position) = self.edge_lookup.get(&(source, target)) {
            self.edges[position].absorb(import);
            return;
        }

        let source_path = self.nodes[self.files[source].node].id.clone();
        let edge = GraphEdge::from_import(&source_path, target_path, import);
        self.push_edge(source, target, edge);
    }

    fn push_edge(&mut self, source: FileIndex, target: FileIndex, edge: GraphEdge) {
        let position = self.edges.len();
        self.edges.push(edge);
        self.endpoints.push((source, target));
        self.edge_lookup.insert((source, target), position);
        self.files[source].outgoing.push(position);
        self.files[target].incoming.push(position);
    }
}
