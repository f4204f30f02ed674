//! Breadth-first walks over dependents (in-neighbors).

use std::collections::VecDeque;

use rustc_hash::FxHashSet as HashSet;

use super::{DependencyGraph, FileIndex};

/// A file reached while walking dependents outward from a start file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependentLevel {
    pub file: FileIndex,
    /// 1 for direct dependents.
    pub depth: usize,
    /// Files between the start and `file`, beginning with the start file.
    pub through: Vec<FileIndex>,
}

impl DependencyGraph {
    /// Count of distinct files that transitively depend on `index`.
    ///
    /// The start file is never counted, even when it sits on a cycle.
    pub fn blast_radius(&self, index: FileIndex) -> usize {
        let mut visited: HashSet<FileIndex> = HashSet::default();
        visited.insert(index);
        let mut queue = VecDeque::from([index]);

        while let Some(current) = queue.pop_front() {
            for dependent in self.predecessors(current) {
                if visited.insert(dependent) {
                    queue.push_back(dependent);
                }
            }
        }

        visited.len() - 1
    }

    /// Dependents of `index` in level order, up to `max_depth` levels out.
    pub fn dependents_within(&self, index: FileIndex, max_depth: usize) -> Vec<DependentLevel> {
        let mut found = Vec::new();
        let mut visited: HashSet<FileIndex> = HashSet::default();
        visited.insert(index);

        let mut frontier: Vec<(FileIndex, Vec<FileIndex>)> = vec![(index, Vec::new())];
        let mut depth = 1;

        while depth <= max_depth && !frontier.is_empty() {
            let mut next = Vec::new();
            for (current, chain) in &frontier {
                let mut through = chain.clone();
                through.push(*current);
                for dependent in self.predecessors(*current) {
                    if !visited.insert(dependent) {
                        continue;
                    }
                    found.push(DependentLevel {
                        file: dependent,
                        depth,
                        through: through.clone(),
                    });
                    next.push((dependent, through.clone()));
                }
            }
            frontier = next;
            depth += 1;
        }

        found
    }
}
