//! Circular dependency detection over file nodes.
//!
//! The search is an iterative depth-first walk with explicit `(node, cursor)`
//! frames. A global visited set keeps every file from being expanded twice, so
//! the result holds at least one representative cycle per strongly connected
//! region reachable from an unvisited start. It is not an exhaustive listing of
//! every simple cycle.

use rustc_hash::FxHashSet as HashSet;

use super::DependencyGraph;
use super::graph::FileIndex;

/// A circular chain of file ids. The first id is repeated at the end.
pub type Cycle = Vec<String>;

struct Frame {
    node: FileIndex,
    cursor: usize,
}

/// Find up to `max_cycles` distinct cycles in `graph`.
///
/// Cycles are reported in discovery order. Two cycles that are rotations of one
/// another count once.
pub fn detect_cycles(graph: &DependencyGraph, max_cycles: usize) -> Vec<Cycle> {
    let file_count = graph.file_count();
    let successors: Vec<Vec<FileIndex>> = graph
        .file_indices()
        .map(|index| graph.successors(index).collect())
        .collect();

    let mut cycles: Vec<Cycle> = Vec::new();
    let mut seen: HashSet<Vec<FileIndex>> = HashSet::default();
    let mut visited = vec![false; file_count];
    // Position of each file on the current path, if it is on it.
    let mut path_position: Vec<Option<usize>> = vec![None; file_count];

    'starts: for start in graph.file_indices() {
        if visited[start] {
            continue;
        }

        let mut stack = vec![Frame { node: start, cursor: 0 }];
        let mut path = vec![start];
        path_position[start] = Some(0);
        visited[start] = true;

        while let Some(frame) = stack.last_mut() {
            if cycles.len() >= max_cycles {
                tracing::warn!(max_cycles, "cycle limit reached; stopping search");
                break 'starts;
            }

            let node = frame.node;
            let Some(&neighbor) = successors[node].get(frame.cursor) else {
                stack.pop();
                path.pop();
                path_position[node] = None;
                continue;
            };
            frame.cursor += 1;

            if let Some(position) = path_position[neighbor] {
                let members = &path[position..];
                if seen.insert(canonical_rotation(members)) {
                    cycles.push(to_cycle(graph, members));
                }
            } else if !visited[neighbor] {
                visited[neighbor] = true;
                path_position[neighbor] = Some(path.len());
                path.push(neighbor);
                stack.push(Frame {
                    node: neighbor,
                    cursor: 0,
                });
            }
        }

        for &index in &path {
            path_position[index] = None;
        }
    }

    tracing::debug!(cycles = cycles.len(), "detected circular dependencies");
    cycles
}

fn to_cycle(graph: &DependencyGraph, members: &[FileIndex]) -> Cycle {
    members
        .iter()
        .chain(members.first())
        .map(|&index| graph.file_path(index).to_string())
        .collect()
}

/// Rotation of `members` starting at its smallest file index.
///
/// Members of a simple cycle are distinct, so any total order over them gives
/// the same equivalence classes as ordering by id.
fn canonical_rotation(members: &[FileIndex]) -> Vec<FileIndex> {
    let start = members
        .iter()
        .enumerate()
        .min_by_key(|&(_, &index)| index)
        .map_or(0, |(position, _)| position);
    members[start..]
        .iter()
        .chain(&members[..start])
        .copied()
        .collect()
}

impl DependencyGraph {
    /// Circular dependency chains, capped at `max_cycles`. See [`detect_cycles`].
    pub fn circular_dependencies(&self, max_cycles: usize) -> Vec<Cycle> {
        detect_cycles(self, max_cycles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ParsedFile, ParsedImport, build_graph};

    fn graph(edges: &[(&str, &str)]) -> DependencyGraph {
        let mut files: Vec<ParsedFile> = Vec::new();
        for &(source, target) in edges {
            for path in [source, target] {
                if !files.iter().any(|f| f.relative_path == path) {
                    files.push(ParsedFile::new(path));
                }
            }
            let file = files
                .iter_mut()
                .find(|f| f.relative_path == source)
                .unwrap();
            file.imports.push(ParsedImport::resolved(target, ["x"]));
        }
        build_graph(&files)
    }

    #[test]
    fn test_two_cycle() {
        let cycles = detect_cycles(&graph(&[("a", "b"), ("b", "a")]), 100);
        assert_eq!(cycles, vec![vec!["a", "b", "a"]]);
    }

    #[test]
    fn test_three_cycle_length_four() {
        let cycles = detect_cycles(&graph(&[("a", "b"), ("b", "c"), ("c", "a")]), 100);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), 4);
        assert_eq!(cycles[0].first(), cycles[0].last());
    }

    #[test]
    fn test_disjoint_two_cycles() {
        let cycles = detect_cycles(
            &graph(&[("a", "b"), ("b", "a"), ("c", "d"), ("d", "c")]),
            100,
        );
        assert_eq!(cycles.len(), 2);
    }

    #[test]
    fn test_acyclic_chain() {
        let cycles = detect_cycles(&graph(&[("a", "b"), ("b", "c")]), 100);
        assert!(cycles.is_empty());
    }

    #[test]
    fn test_overlapping_cycles_stay_distinct() {
        // Overlapping cycles share b and c but normalize to different keys.
        let cycles = detect_cycles(
            &graph(&[("a", "b"), ("b", "c"), ("c", "b"), ("c", "a"), ("a", "c")]),
            100,
        );
        let mut keys: Vec<Vec<String>> = cycles
            .iter()
            .map(|c| {
                let body = &c[..c.len() - 1];
                let start = body
                    .iter()
                    .enumerate()
                    .min_by(|(_, x), (_, y)| x.cmp(y))
                    .unwrap()
                    .0;
                body[start..].iter().chain(&body[..start]).cloned().collect()
            })
            .collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }

    #[test]
    fn test_canonical_rotation() {
        assert_eq!(canonical_rotation(&[2, 0, 1]), vec![0, 1, 2]);
        assert_eq!(canonical_rotation(&[1, 2, 0]), vec![0, 1, 2]);
        assert_eq!(canonical_rotation(&[0, 1]), vec![0, 1]);
    }

    #[test]
    fn test_cap() {
        let cycles = detect_cycles(
            &graph(&[("a", "b"), ("b", "a"), ("c", "d"), ("d", "c")]),
            1,
        );
        assert_eq!(cycles.len(), 1);
    }

    #[test]
    fn test_self_cycle_never_reported() {
        let cycles = detect_cycles(&graph(&[("a", "a"), ("a", "b")]), 100);
        assert!(cycles.is_empty());
    }
}
