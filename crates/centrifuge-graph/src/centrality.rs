//! PageRank and betweenness centrality over file nodes.
//!
//! Scores are returned as vectors indexed by [`FileIndex`]. The strict
//! functions report failures as [`CentralityError`]; the pipeline uses the
//! `_or_*` wrappers, which log the failure and fall back to uniform PageRank
//! or zero betweenness.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use thiserror::Error;

use super::graph::FileIndex;
use super::{AnalysisOptions, DependencyGraph};

/// Failure of a centrality computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CentralityError {
    #[error("PageRank did not converge within {iterations} iterations")]
    FailedToConverge { iterations: usize },

    #[error("non-finite centrality score for '{node}'")]
    NonFiniteScore { node: String },
}

/// Weighted PageRank by power iteration.
///
/// Each edge passes rank in proportion to its `weight`. Rank held by files with
/// no outgoing edges is spread evenly over every file. Iteration stops once the
/// L1 change between steps drops below `n * tolerance`.
pub fn page_rank(
    graph: &DependencyGraph,
    options: &AnalysisOptions,
) -> Result<Vec<f64>, CentralityError> {
    let n = graph.file_count();
    if n == 0 {
        return Ok(Vec::new());
    }

    let damping = options.damping;
    let uniform = 1.0 / n as f64;
    let out_weight: Vec<f64> = graph.file_indices().map(|i| graph.out_weight(i)).collect();

    let mut scores = vec![uniform; n];
    let mut next = vec![0.0; n];

    for iteration in 1..=options.max_iterations {
        let dangling: f64 = graph
            .file_indices()
            .filter(|&i| out_weight[i] == 0.0)
            .map(|i| scores[i])
            .sum();
        let base = (1.0 - damping) * uniform + damping * dangling * uniform;

        for v in graph.file_indices() {
            let inbound: f64 = graph
                .incoming(v)
                .map(|(u, edge)| scores[u] * f64::from(edge.weight) / out_weight[u])
                .sum();
            next[v] = base + damping * inbound;
        }

        let delta: f64 = scores.iter().zip(&next).map(|(a, b)| (a - b).abs()).sum();
        std::mem::swap(&mut scores, &mut next);

        if delta < n as f64 * options.tolerance {
            tracing::trace!(iterations = iteration, "PageRank converged");
            ensure_finite(graph, &scores)?;
            return Ok(scores);
        }
    }

    Err(CentralityError::FailedToConverge {
        iterations: options.max_iterations,
    })
}

/// Normalized directed betweenness (Brandes over weighted shortest paths).
///
/// Path cost is the sum of edge `weight`s, the same weights PageRank follows,
/// so a chain of light imports can be shorter than one heavy import. Raw
/// scores are scaled by `1 / ((n - 1)(n - 2))` when `n > 2`.
pub fn betweenness(graph: &DependencyGraph) -> Result<Vec<f64>, CentralityError> {
    let n = graph.file_count();
    let mut scores = vec![0.0; n];
    if n == 0 {
        return Ok(scores);
    }

    // Weights are at least 1 for built graphs; a deserialized 0 is treated as 1.
    let successors: Vec<Vec<(FileIndex, u64)>> = graph
        .file_indices()
        .map(|i| {
            graph
                .outgoing(i)
                .map(|(target, edge)| (target, u64::from(edge.weight.max(1))))
                .collect()
        })
        .collect();

    let mut order: Vec<FileIndex> = Vec::with_capacity(n);
    let mut predecessors: Vec<Vec<FileIndex>> = vec![Vec::new(); n];
    let mut paths = vec![0.0_f64; n];
    let mut distance: Vec<Option<u64>> = vec![None; n];
    let mut settled = vec![false; n];
    let mut dependency = vec![0.0_f64; n];
    let mut heap = BinaryHeap::new();

    for source in graph.file_indices() {
        order.clear();
        predecessors.iter_mut().for_each(Vec::clear);
        paths.fill(0.0);
        distance.fill(None);
        settled.fill(false);
        dependency.fill(0.0);

        paths[source] = 1.0;
        distance[source] = Some(0);
        heap.push(Reverse((0_u64, source)));

        while let Some(Reverse((cost, v))) = heap.pop() {
            if settled[v] {
                continue;
            }
            settled[v] = true;
            order.push(v);

            for &(w, weight) in &successors[v] {
                let next_cost = cost + weight;
                match distance[w] {
                    Some(known) if next_cost > known => {}
                    Some(known) if next_cost == known => {
                        paths[w] += paths[v];
                        predecessors[w].push(v);
                    }
                    _ => {
                        distance[w] = Some(next_cost);
                        paths[w] = paths[v];
                        predecessors[w].clear();
                        predecessors[w].push(v);
                        heap.push(Reverse((next_cost, w)));
                    }
                }
            }
        }

        while let Some(w) = order.pop() {
            for &v in &predecessors[w] {
                dependency[v] += paths[v] / paths[w] * (1.0 + dependency[w]);
            }
            if w != source {
                scores[w] += dependency[w];
            }
        }
    }

    if n > 2 {
        let scale = 1.0 / ((n - 1) as f64 * (n - 2) as f64);
        scores.iter_mut().for_each(|score| *score *= scale);
    }

    ensure_finite(graph, &scores)?;
    Ok(scores)
}

/// PageRank, or `1/n` for every file when the computation fails.
pub fn page_rank_or_uniform(graph: &DependencyGraph, options: &AnalysisOptions) -> Vec<f64> {
    page_rank(graph, options).unwrap_or_else(|error| {
        tracing::warn!(%error, "PageRank failed; using uniform scores");
        let n = graph.file_count();
        vec![1.0 / n as f64; n]
    })
}

/// Betweenness, or 0 for every file when the computation fails.
pub fn betweenness_or_zero(graph: &DependencyGraph) -> Vec<f64> {
    betweenness(graph).unwrap_or_else(|error| {
        tracing::warn!(%error, "betweenness failed; using zero scores");
        vec![0.0; graph.file_count()]
    })
}

fn ensure_finite(graph: &DependencyGraph, scores: &[f64]) -> Result<(), CentralityError> {
    match scores.iter().position(|score| !score.is_finite()) {
        Some(index) => Err(CentralityError::NonFiniteScore {
            node: graph.file_path(index).to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ParsedFile, ParsedImport, build_graph};

    fn chain() -> DependencyGraph {
        build_graph(&[
            ParsedFile::new("a.ts").with_import(ParsedImport::resolved("b.ts", ["b"])),
            ParsedFile::new("b.ts").with_import(ParsedImport::resolved("c.ts", ["c"])),
            ParsedFile::new("c.ts"),
        ])
    }

    #[test]
    fn test_page_rank_chain_favors_sink() {
        let scores = page_rank(&chain(), &AnalysisOptions::default()).unwrap();
        assert!(scores[2] > scores[0]);
        assert!(scores[1] > scores[0]);

        let total: f64 = scores.iter().sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_page_rank_respects_weights() {
        let graph = build_graph(&[
            ParsedFile::new("a.ts")
                .with_import(ParsedImport::resolved("heavy.ts", ["x", "y", "z"]))
                .with_import(ParsedImport::resolved("light.ts", ["x"])),
            ParsedFile::new("heavy.ts"),
            ParsedFile::new("light.ts"),
        ]);
        let scores = page_rank(&graph, &AnalysisOptions::default()).unwrap();
        assert!(scores[1] > scores[2]);
    }

    #[test]
    fn test_page_rank_fallback_is_uniform() {
        let options = AnalysisOptions {
            max_iterations: 0,
            ..AnalysisOptions::default()
        };
        let graph = chain();
        assert_eq!(
            page_rank(&graph, &options),
            Err(CentralityError::FailedToConverge { iterations: 0 })
        );

        let scores = page_rank_or_uniform(&graph, &options);
        assert!(scores.iter().all(|&s| (s - 1.0 / 3.0).abs() < 1e-12));
    }

    #[test]
    fn test_betweenness_chain_middle_is_highest() {
        let scores = betweenness(&chain()).unwrap();
        assert_eq!(scores, vec![0.0, 0.5, 0.0]);
    }

    #[test]
    fn test_betweenness_splits_parallel_paths() {
        // a -> {b, c} -> d: each middle file carries half of the a..d paths.
        let graph = build_graph(&[
            ParsedFile::new("a.ts")
                .with_import(ParsedImport::resolved("b.ts", ["b"]))
                .with_import(ParsedImport::resolved("c.ts", ["c"])),
            ParsedFile::new("b.ts").with_import(ParsedImport::resolved("d.ts", ["d"])),
            ParsedFile::new("c.ts").with_import(ParsedImport::resolved("d.ts", ["d"])),
            ParsedFile::new("d.ts"),
        ]);
        let scores = betweenness(&graph).unwrap();
        let expected = 0.5 / 6.0;
        assert!((scores[1] - expected).abs() < 1e-12);
        assert!((scores[2] - expected).abs() < 1e-12);
        assert_eq!(scores[0], 0.0);
        assert_eq!(scores[3], 0.0);
    }

    #[test]
    fn test_betweenness_follows_lighter_route() {
        // a -> b is one heavy import (cost 6 to d); a -> c -> e -> d costs 3.
        let graph = build_graph(&[
            ParsedFile::new("a.ts")
                .with_import(ParsedImport::resolved("b.ts", ["p", "q", "r", "s", "t"]))
                .with_import(ParsedImport::resolved("c.ts", ["c"])),
            ParsedFile::new("b.ts").with_import(ParsedImport::resolved("d.ts", ["d"])),
            ParsedFile::new("c.ts").with_import(ParsedImport::resolved("e.ts", ["e"])),
            ParsedFile::new("d.ts"),
            ParsedFile::new("e.ts").with_import(ParsedImport::resolved("d.ts", ["d"])),
        ]);
        let scores = betweenness(&graph).unwrap();
        let index = |p: &str| graph.file_index(p).unwrap();

        assert_eq!(scores[index("b.ts")], 0.0);
        let expected = 2.0 / 12.0;
        assert!((scores[index("c.ts")] - expected).abs() < 1e-12);
        assert!((scores[index("e.ts")] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_empty_and_single() {
        let empty = build_graph(&[]);
        assert!(page_rank(&empty, &AnalysisOptions::default()).unwrap().is_empty());
        assert!(betweenness(&empty).unwrap().is_empty());

        let single = build_graph(&[ParsedFile::new("a.ts")]);
        let pr = page_rank(&single, &AnalysisOptions::default()).unwrap();
        assert!((pr[0] - 1.0).abs() < 1e-9);
        assert_eq!(betweenness(&single).unwrap(), vec![0.0]);
    }
}
