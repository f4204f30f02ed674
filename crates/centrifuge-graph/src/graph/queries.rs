//! Read-only lookups over a [`DependencyGraph`].

use std::ops::Range;

use super::super::{GraphEdge, GraphNode};
use super::{DependencyGraph, FileIndex};

impl DependencyGraph {
    /// All nodes: each file node followed by its function/class nodes.
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// All deduplicated file-to-file edges in insertion order.
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Number of file nodes.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Number of function/class nodes.
    pub fn function_count(&self) -> usize {
        self.nodes.len() - self.files.len()
    }

    pub fn file_indices(&self) -> Range<FileIndex> {
        0..self.files.len()
    }

    pub fn file_index(&self, path: &str) -> Option<FileIndex> {
        self.file_lookup.get(path).copied()
    }

    pub fn contains_file(&self, path: &str) -> bool {
        self.file_lookup.contains_key(path)
    }

    /// File node at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a file index of this graph.
    pub fn file_node(&self, index: FileIndex) -> &GraphNode {
        &self.nodes[self.files[index].node]
    }

    pub fn file_path(&self, index: FileIndex) -> &str {
        &self.file_node(index).id
    }

    pub fn module_of(&self, index: FileIndex) -> &str {
        &self.file_node(index).module
    }

    pub fn export_count(&self, index: FileIndex) -> usize {
        self.files[index].export_count
    }

    /// Function and class nodes attached to the file at `path`.
    pub fn children_of<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a GraphNode> + 'a {
        self.nodes
            .iter()
            .filter(move |node| node.parent_file.as_deref() == Some(path))
    }

    /// The edge `source -> target`, if present.
    pub fn edge(&self, source: &str, target: &str) -> Option<&GraphEdge> {
        let key = (self.file_index(source)?, self.file_index(target)?);
        self.edge_lookup.get(&key).map(|&position| &self.edges[position])
    }

    /// Outgoing edges of a file with their target indices.
    pub fn outgoing(&self, index: FileIndex) -> impl Iterator<Item = (FileIndex, &GraphEdge)> + '_ {
        self.files[index]
            .outgoing
            .iter()
            .map(move |&position| (self.endpoints[position].1, &self.edges[position]))
    }

    /// Incoming edges of a file with their source indices.
    pub fn incoming(&self, index: FileIndex) -> impl Iterator<Item = (FileIndex, &GraphEdge)> + '_ {
        self.files[index]
            .incoming
            .iter()
            .map(move |&position| (self.endpoints[position].0, &self.edges[position]))
    }

    pub fn successors(&self, index: FileIndex) -> impl Iterator<Item = FileIndex> + '_ {
        self.outgoing(index).map(|(target, _)| target)
    }

    pub fn predecessors(&self, index: FileIndex) -> impl Iterator<Item = FileIndex> + '_ {
        self.incoming(index).map(|(source, _)| source)
    }

    /// In-degree over file-to-file edges.
    pub fn fan_in(&self, index: FileIndex) -> usize {
        self.files[index].incoming.len()
    }

    /// Out-degree over file-to-file edges.
    pub fn fan_out(&self, index: FileIndex) -> usize {
        self.files[index].outgoing.len()
    }

    /// Sum of outgoing edge weights.
    pub fn out_weight(&self, index: FileIndex) -> f64 {
        self.outgoing(index)
            .map(|(_, edge)| f64::from(edge.weight))
            .sum()
    }

    /// `(source, target)` file indices of every edge, parallel to [`edges`](Self::edges).
    pub fn endpoints(&self) -> &[(FileIndex, FileIndex)] {
        &self.endpoints
    }
}

#[cfg(test)]
mod tests {
    use crate::{ExportKind, ParsedExport, ParsedFile, ParsedImport, build_graph};

    fn diamond() -> Vec<ParsedFile> {
        vec![
            ParsedFile::new("a.ts").with_import(ParsedImport::resolved("c.ts", ["c"])),
            ParsedFile::new("b.ts").with_import(ParsedImport::resolved("c.ts", ["c"])),
            ParsedFile::new("c.ts").with_import(ParsedImport::resolved("d.ts", ["d"])),
            ParsedFile::new("d.ts"),
        ]
    }

    #[test]
    fn test_diamond_degrees() {
        let graph = build_graph(&diamond());
        let c = graph.file_index("c.ts").unwrap();
        let d = graph.file_index("d.ts").unwrap();

        assert_eq!(graph.fan_in(c), 2);
        assert_eq!(graph.fan_out(c), 1);
        assert_eq!(graph.fan_in(d), 1);
        assert_eq!(graph.fan_out(d), 0);

        let preds: Vec<&str> = graph.predecessors(c).map(|i| graph.file_path(i)).collect();
        assert_eq!(preds, vec!["a.ts", "b.ts"]);
    }

    #[test]
    fn test_children_of() {
        let files = vec![
            ParsedFile::new("a.ts")
                .with_export(ParsedExport::new("f", ExportKind::Function))
                .with_export(ParsedExport::new("g", ExportKind::Function)),
            ParsedFile::new("b.ts"),
        ];
        let graph = build_graph(&files);

        let labels: Vec<&str> = graph.children_of("a.ts").map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["f", "g"]);
        assert_eq!(graph.children_of("b.ts").count(), 0);
        assert_eq!(graph.children_of("nope.ts").count(), 0);
        assert_eq!(graph.function_count(), 2);
    }
}
