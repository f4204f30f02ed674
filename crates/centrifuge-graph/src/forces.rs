//! Architectural force analysis.
//!
//! Combines file and module metrics into four diagnostics: a cohesion verdict
//! per module, files pulled apart by several modules (tension), files that sit
//! between otherwise separate modules (bridges), and modules ready to be pulled
//! out of the codebase (extraction candidates).

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use super::math::{normalized_entropy, round_to};
use super::node::{PATH_SEPARATOR, basename};
use super::{AnalysisOptions, DependencyGraph, ModuleMetrics};

const HEALTHY_SUMMARY: &str = "Codebase architecture looks healthy. No major force imbalances detected.";

/// Cohesion classification of a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CohesionVerdict {
    Cohesive,
    Moderate,
    JunkDrawer,
}

impl CohesionVerdict {
    pub fn classify(cohesion: f64, options: &AnalysisOptions) -> Self {
        if cohesion >= options.cohesive_threshold {
            Self::Cohesive
        } else if cohesion >= options.moderate_threshold {
            Self::Moderate
        } else {
            Self::JunkDrawer
        }
    }
}

/// Module metrics with their verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleCohesion {
    #[serde(flatten)]
    pub metrics: ModuleMetrics,
    pub verdict: CohesionVerdict,
}

/// Pull of one foreign module on a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModulePull {
    pub module: String,
    pub strength: f64,
    pub symbols: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TensionFile {
    pub file: String,
    pub tension: f64,
    /// Strongest pull first.
    pub pulled_by: Vec<ModulePull>,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeFile {
    pub file: String,
    pub betweenness: f64,
    /// Foreign modules the file touches.
    pub connects: Vec<String>,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionCandidate {
    pub target: String,
    pub escape_velocity: f64,
    pub internal_deps: usize,
    pub external_deps: usize,
    pub depended_by_modules: usize,
    pub recommendation: String,
}

/// Result of force analysis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForceAnalysis {
    pub module_cohesion: Vec<ModuleCohesion>,
    pub tension_files: Vec<TensionFile>,
    pub bridge_files: Vec<BridgeFile>,
    pub extraction_candidates: Vec<ExtractionCandidate>,
    pub summary: String,
}

/// Run force analysis.
///
/// `betweenness` is indexed by file index.
pub fn compute_force_analysis(
    graph: &DependencyGraph,
    module_metrics: &IndexMap<String, ModuleMetrics>,
    betweenness: &[f64],
    options: &AnalysisOptions,
) -> ForceAnalysis {
    let module_cohesion: Vec<ModuleCohesion> = module_metrics
        .values()
        .map(|metrics| ModuleCohesion {
            verdict: CohesionVerdict::classify(metrics.cohesion, options),
            metrics: metrics.clone(),
        })
        .collect();

    let mut tension_files = tension_files(graph, options);
    let mut bridge_files = bridge_files(graph, betweenness, options);
    let mut extraction_candidates = extraction_candidates(module_metrics, options);

    tension_files.sort_by(|a, b| b.tension.total_cmp(&a.tension));
    bridge_files.sort_by(|a, b| b.betweenness.total_cmp(&a.betweenness));
    extraction_candidates.sort_by(|a, b| b.escape_velocity.total_cmp(&a.escape_velocity));

    let summary = summarize(&module_cohesion, &tension_files, &extraction_candidates);

    tracing::debug!(
        tension = tension_files.len(),
        bridges = bridge_files.len(),
        extraction = extraction_candidates.len(),
        "computed force analysis"
    );

    ForceAnalysis {
        module_cohesion,
        tension_files,
        bridge_files,
        extraction_candidates,
        summary,
    }
}

#[derive(Default)]
struct Pull<'a> {
    strength: f64,
    symbols: IndexSet<&'a str>,
}

fn tension_files(graph: &DependencyGraph, options: &AnalysisOptions) -> Vec<TensionFile> {
    let mut found = Vec::new();

    for index in graph.file_indices() {
        let own_module = graph.module_of(index);
        let mut pulls: IndexMap<&str, Pull<'_>> = IndexMap::new();

        for (target, edge) in graph.outgoing(index) {
            let module = graph.module_of(target);
            if module == own_module {
                continue;
            }
            let pull = pulls.entry(module).or_default();
            pull.strength += f64::from(edge.weight.max(1));
            pull.symbols
                .extend(edge.symbols.iter().map(String::as_str));
        }

        for source in graph.predecessors(index) {
            let module = graph.module_of(source);
            if module == own_module {
                continue;
            }
            pulls.entry(module).or_default().strength += options.inbound_pull_strength;
        }

        if pulls.len() < 2 {
            continue;
        }

        let mut pulled_by: Vec<ModulePull> = pulls
            .into_iter()
            .map(|(module, pull)| ModulePull {
                module: module.to_string(),
                strength: round_to(pull.strength, 2),
                symbols: pull.symbols.into_iter().map(str::to_string).collect(),
            })
            .collect();

        let strengths: Vec<f64> = pulled_by.iter().map(|p| p.strength).collect();
        let tension = round_to(normalized_entropy(&strengths), 2);
        if tension <= options.tension_threshold {
            continue;
        }

        pulled_by.sort_by(|a, b| b.strength.total_cmp(&a.strength));
        let path = graph.file_path(index);
        found.push(TensionFile {
            file: path.to_string(),
            tension,
            recommendation: split_recommendation(path, &pulled_by),
            pulled_by,
        });
    }

    found
}

fn split_recommendation(path: &str, pulled_by: &[ModulePull]) -> String {
    let file_name = basename(path);
    let parts: Vec<String> = pulled_by
        .iter()
        .take(2)
        .map(|pull| {
            let module = basename(pull.module.trim_end_matches(PATH_SEPARATOR));
            format!("{module}-{file_name}")
        })
        .collect();
    format!("Split into {}", parts.join(" and "))
}

fn bridge_files(
    graph: &DependencyGraph,
    betweenness: &[f64],
    options: &AnalysisOptions,
) -> Vec<BridgeFile> {
    let mut found = Vec::new();

    for index in graph.file_indices() {
        let score = betweenness.get(index).copied().unwrap_or(0.0);
        if score < options.bridge_report_threshold {
            continue;
        }

        let own_module = graph.module_of(index);
        let connects: IndexSet<&str> = graph
            .successors(index)
            .chain(graph.predecessors(index))
            .map(|neighbor| graph.module_of(neighbor))
            .filter(|&module| module != own_module)
            .collect();

        if connects.len() < 2 {
            continue;
        }

        found.push(BridgeFile {
            file: graph.file_path(index).to_string(),
            betweenness: round_to(score, 2),
            role: format!(
                "Bridge between {} otherwise-disconnected modules",
                connects.len()
            ),
            connects: connects.into_iter().map(str::to_string).collect(),
        });
    }

    found
}

fn extraction_candidates(
    module_metrics: &IndexMap<String, ModuleMetrics>,
    options: &AnalysisOptions,
) -> Vec<ExtractionCandidate> {
    module_metrics
        .values()
        .filter(|m| m.escape_velocity >= options.escape_threshold && m.files >= 1)
        .map(|m| {
            let remaining = if m.external_deps == 0 {
                "0 deps on host codebase".to_string()
            } else {
                format!("{} deps to resolve", m.external_deps)
            };
            ExtractionCandidate {
                target: m.path.clone(),
                escape_velocity: m.escape_velocity,
                internal_deps: m.internal_deps,
                external_deps: m.external_deps,
                depended_by_modules: m.depended_by.len(),
                recommendation: format!("Extract to standalone package: {remaining}"),
            }
        })
        .collect()
}

fn summarize(
    module_cohesion: &[ModuleCohesion],
    tension_files: &[TensionFile],
    extraction_candidates: &[ExtractionCandidate],
) -> String {
    let junk_drawers: Vec<&str> = module_cohesion
        .iter()
        .filter(|m| m.verdict == CohesionVerdict::JunkDrawer)
        .map(|m| m.metrics.path.as_str())
        .collect();

    let mut clauses = Vec::new();
    if !junk_drawers.is_empty() {
        clauses.push(format!(
            "{} junk-drawer module(s) ({})",
            junk_drawers.len(),
            junk_drawers.join(", ")
        ));
    }
    if !tension_files.is_empty() {
        clauses.push(format!(
            "{} tension file(s) need splitting",
            tension_files.len()
        ));
    }
    if !extraction_candidates.is_empty() {
        let targets: Vec<&str> = extraction_candidates
            .iter()
            .map(|c| c.target.as_str())
            .collect();
        clauses.push(format!("{} ready for extraction", targets.join(", ")));
    }

    if clauses.is_empty() {
        HEALTHY_SUMMARY.to_string()
    } else {
        format!("{}.", clauses.join(". "))
    }
}
