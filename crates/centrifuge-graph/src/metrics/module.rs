use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use super::super::DependencyGraph;
use super::super::graph::FileIndex;
use super::super::math::{ratio_or, round_to};

/// Aggregate metrics of one module (directory key).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleMetrics {
    /// The module key, e.g. `src/parser/`.
    pub path: String,
    pub files: usize,
    pub loc: u64,
    pub exports: usize,
    /// Outgoing edges that stay inside the module.
    pub internal_deps: usize,
    /// Outgoing edges that leave the module.
    pub external_deps: usize,
    pub cohesion: f64,
    pub escape_velocity: f64,
    pub depends_on: Vec<String>,
    pub depended_by: Vec<String>,
}

/// Group file nodes by module and compute [`ModuleMetrics`] per module.
///
/// Modules appear in the order their first file appears in the graph.
pub fn compute_module_metrics(graph: &DependencyGraph) -> IndexMap<String, ModuleMetrics> {
    let mut members: IndexMap<&str, Vec<FileIndex>> = IndexMap::new();
    for index in graph.file_indices() {
        members
            .entry(graph.module_of(index))
            .or_default()
            .push(index);
    }
    let module_count = members.len();

    let mut metrics = IndexMap::with_capacity(module_count);
    for (&module, files) in &members {
        let mut internal_deps = 0;
        let mut external_deps = 0;
        let mut loc: u64 = 0;
        let mut exports = 0;
        let mut depends_on: IndexSet<&str> = IndexSet::new();
        let mut depended_by: IndexSet<&str> = IndexSet::new();

        for &file in files {
            loc += u64::from(graph.file_node(file).loc);
            exports += graph.export_count(file);

            for target in graph.successors(file) {
                let target_module = graph.module_of(target);
                if target_module == module {
                    internal_deps += 1;
                } else {
                    external_deps += 1;
                    depends_on.insert(target_module);
                }
            }

            for source in graph.predecessors(file) {
                let source_module = graph.module_of(source);
                if source_module != module {
                    depended_by.insert(source_module);
                }
            }
        }

        let cohesion = ratio_or(internal_deps, internal_deps + external_deps, 1.0);
        let escape_velocity = if external_deps == 0 && !depended_by.is_empty() {
            ratio_or(depended_by.len(), module_count - 1, 0.0).min(1.0)
        } else {
            0.0
        };

        metrics.insert(
            module.to_string(),
            ModuleMetrics {
                path: module.to_string(),
                files: files.len(),
                loc,
                exports,
                internal_deps,
                external_deps,
                cohesion: round_to(cohesion, 2),
                escape_velocity: round_to(escape_velocity, 2),
                depends_on: depends_on.into_iter().map(str::to_string).collect(),
                depended_by: depended_by.into_iter().map(str::to_string).collect(),
            },
        );
    }

    tracing::debug!(modules = metrics.len(), "computed module metrics");
    metrics
}
