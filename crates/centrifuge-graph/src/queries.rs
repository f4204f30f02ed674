//! Read-only questions asked of a finished [`CodebaseGraph`].
//!
//! These back the tool-calling surface: a codebase overview, the context of a
//! single file, its dependents, metric hotspots and the module structure. None
//! of them modify the result.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::cycles::Cycle;
use super::math::round_to;
use super::node::PATH_SEPARATOR;
use super::{CodebaseGraph, Error, FileMetrics, ModuleMetrics, Result};

/// Levels walked by [`CodebaseGraph::dependents`] when no depth is given.
pub const DEFAULT_DEPENDENT_DEPTH: usize = 2;

/// Entries returned by [`CodebaseGraph::hotspots`] when no limit is given.
pub const DEFAULT_HOTSPOT_LIMIT: usize = 10;

const TOP_DEPENDED_FILES: usize = 5;

/// Coarse rating used for coupling, risk and cycle severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Level {
    High,
    Medium,
    Low,
}

impl Level {
    fn coupling(cohesion: f64) -> Self {
        if cohesion < 0.4 {
            Self::High
        } else if cohesion < 0.7 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    fn risk(affected: usize) -> Self {
        if affected > 20 {
            Self::High
        } else if affected > 5 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    fn cycle_severity(cycle: &Cycle) -> Self {
        if cycle.len() > 3 { Self::High } else { Self::Low }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSummary {
    pub path: String,
    pub files: usize,
    pub loc: u64,
    pub avg_coupling: Level,
    pub cohesion: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewMetrics {
    #[serde(rename = "avgLOC")]
    pub avg_loc: u64,
    /// Deepest file path, in segments.
    pub max_depth: usize,
    pub circular_deps: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodebaseOverview {
    pub total_files: usize,
    pub total_functions: usize,
    pub total_dependencies: usize,
    /// Largest modules first.
    pub modules: Vec<ModuleSummary>,
    /// `"path (n dependents)"` for the most imported files.
    pub top_depended_files: Vec<String>,
    pub metrics: OverviewMetrics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSummary {
    pub name: String,
    pub loc: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRef {
    pub from: String,
    pub symbols: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependentRef {
    pub path: String,
    pub symbols: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileContextMetrics {
    pub page_rank: f64,
    pub betweenness: f64,
    pub fan_in: usize,
    pub fan_out: usize,
    pub coupling: f64,
    pub tension: f64,
    pub is_bridge: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileContext {
    pub path: String,
    pub loc: u32,
    pub module: String,
    /// Function and class exports.
    pub exports: Vec<ExportSummary>,
    pub imports: Vec<ImportRef>,
    pub dependents: Vec<DependentRef>,
    pub metrics: FileContextMetrics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitiveDependent {
    pub path: String,
    /// From the queried file up to the file that imports `path`'s target.
    pub through_path: Vec<String>,
    pub depth: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependentsReport {
    pub file: String,
    pub direct_dependents: Vec<DependentRef>,
    /// Dependents two or more levels out.
    pub transitive_dependents: Vec<TransitiveDependent>,
    pub total_affected: usize,
    pub risk_level: Level,
}

/// Metric to rank hotspots by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotspotMetric {
    Coupling,
    #[serde(rename = "pagerank")]
    PageRank,
    FanIn,
    FanOut,
    Betweenness,
    Tension,
    /// Ranks modules instead of files.
    EscapeVelocity,
}

impl HotspotMetric {
    pub const ALL: [HotspotMetric; 7] = [
        Self::Coupling,
        Self::PageRank,
        Self::FanIn,
        Self::FanOut,
        Self::Betweenness,
        Self::Tension,
        Self::EscapeVelocity,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Coupling => "coupling",
            Self::PageRank => "pagerank",
            Self::FanIn => "fan_in",
            Self::FanOut => "fan_out",
            Self::Betweenness => "betweenness",
            Self::Tension => "tension",
            Self::EscapeVelocity => "escape_velocity",
        }
    }
}

impl fmt::Display for HotspotMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HotspotMetric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|metric| metric.as_str() == normalized)
            .ok_or_else(|| Error::UnknownMetric(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub path: String,
    pub score: f64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotspotReport {
    pub metric: HotspotMetric,
    pub hotspots: Vec<Hotspot>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossModuleDep {
    pub from: String,
    pub to: String,
    /// Number of file edges between the two modules.
    pub weight: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircularDep {
    pub cycle: Cycle,
    pub severity: Level,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleStructure {
    pub modules: Vec<ModuleMetrics>,
    pub cross_module_deps: Vec<CrossModuleDep>,
    pub circular_deps: Vec<CircularDep>,
}

impl CodebaseGraph {
    /// High-level summary of the codebase.
    pub fn overview(&self) -> CodebaseOverview {
        let mut modules: Vec<ModuleSummary> = self
            .module_metrics
            .values()
            .map(|m| ModuleSummary {
                path: m.path.clone(),
                files: m.files,
                loc: m.loc,
                avg_coupling: Level::coupling(m.cohesion),
                cohesion: m.cohesion,
            })
            .collect();
        modules.sort_by(|a, b| b.files.cmp(&a.files));

        let mut by_fan_in: Vec<(&String, usize)> = self
            .file_metrics
            .iter()
            .map(|(path, m)| (path, m.fan_in))
            .collect();
        by_fan_in.sort_by(|a, b| b.1.cmp(&a.1));
        let top_depended_files = by_fan_in
            .into_iter()
            .take(TOP_DEPENDED_FILES)
            .map(|(path, fan_in)| format!("{path} ({fan_in} dependents)"))
            .collect();

        let total_files = self.stats.total_files;
        let total_loc: u64 = self.file_nodes().map(|n| u64::from(n.loc)).sum();
        let avg_loc = if total_files == 0 {
            0
        } else {
            (total_loc as f64 / total_files as f64).round() as u64
        };
        let max_depth = self
            .file_nodes()
            .map(|n| n.path.split(PATH_SEPARATOR).count())
            .max()
            .unwrap_or(0);

        CodebaseOverview {
            total_files,
            total_functions: self.stats.total_functions,
            total_dependencies: self.stats.total_dependencies,
            modules,
            top_depended_files,
            metrics: OverviewMetrics {
                avg_loc,
                max_depth,
                circular_deps: self.stats.circular_deps.len(),
            },
        }
    }

    /// Exports, imports, dependents and metrics of one file.
    pub fn file_context(&self, path: &str) -> Result<FileContext> {
        let metrics = self
            .file_metrics
            .get(path)
            .ok_or_else(|| Error::FileNotFound(path.to_string()))?;
        let node = self
            .file_nodes()
            .find(|n| n.id == path)
            .ok_or_else(|| Error::FileNotFound(path.to_string()))?;

        let exports = self
            .nodes
            .iter()
            .filter(|n| n.parent_file.as_deref() == Some(path))
            .map(|n| ExportSummary {
                name: n.label.clone(),
                loc: n.loc,
            })
            .collect();
        let imports = self
            .edges
            .iter()
            .filter(|e| e.source == path)
            .map(|e| ImportRef {
                from: e.target.clone(),
                symbols: e.symbols.clone(),
            })
            .collect();

        Ok(FileContext {
            path: path.to_string(),
            loc: node.loc,
            module: node.module.clone(),
            exports,
            imports,
            dependents: self.direct_dependents(path),
            metrics: FileContextMetrics {
                page_rank: round_to(metrics.page_rank, 3),
                betweenness: round_to(metrics.betweenness, 2),
                fan_in: metrics.fan_in,
                fan_out: metrics.fan_out,
                coupling: round_to(metrics.coupling, 2),
                tension: metrics.tension,
                is_bridge: metrics.is_bridge,
            },
        })
    }

    /// Files affected by a change to `path`, up to `max_depth` levels out
    /// ([`DEFAULT_DEPENDENT_DEPTH`] when `None`).
    pub fn dependents(&self, path: &str, max_depth: Option<usize>) -> Result<DependentsReport> {
        let graph = self.dependency_graph();
        let start = graph
            .file_index(path)
            .ok_or_else(|| Error::FileNotFound(path.to_string()))?;

        let levels = graph.dependents_within(start, max_depth.unwrap_or(DEFAULT_DEPENDENT_DEPTH));
        let total_affected = levels.len();
        let transitive_dependents = levels
            .into_iter()
            .filter(|level| level.depth > 1)
            .map(|level| TransitiveDependent {
                path: graph.file_path(level.file).to_string(),
                through_path: level
                    .through
                    .iter()
                    .map(|&index| graph.file_path(index).to_string())
                    .collect(),
                depth: level.depth,
            })
            .collect();

        Ok(DependentsReport {
            file: path.to_string(),
            direct_dependents: self.direct_dependents(path),
            transitive_dependents,
            total_affected,
            risk_level: Level::risk(total_affected),
        })
    }

    /// Top entries by `metric`, highest first ([`DEFAULT_HOTSPOT_LIMIT`] when `None`).
    pub fn hotspots(&self, metric: HotspotMetric, limit: Option<usize>) -> HotspotReport {
        let mut hotspots: Vec<Hotspot> = match metric {
            HotspotMetric::EscapeVelocity => self
                .module_metrics
                .values()
                .map(|m| Hotspot {
                    path: m.path.clone(),
                    score: m.escape_velocity,
                    reason: format!(
                        "{} modules depend on it, {} external deps",
                        m.depended_by.len(),
                        m.external_deps
                    ),
                })
                .collect(),
            HotspotMetric::Coupling => self.file_hotspots(|m| {
                (
                    m.coupling,
                    format!("fan-in: {}, fan-out: {}", m.fan_in, m.fan_out),
                )
            }),
            HotspotMetric::PageRank => {
                self.file_hotspots(|m| (m.page_rank, format!("{} dependents", m.fan_in)))
            }
            HotspotMetric::FanIn => self.file_hotspots(|m| {
                (m.fan_in as f64, format!("{} files import this", m.fan_in))
            }),
            HotspotMetric::FanOut => self.file_hotspots(|m| {
                (m.fan_out as f64, format!("imports {} files", m.fan_out))
            }),
            HotspotMetric::Betweenness => self.file_hotspots(|m| {
                let reason = if m.is_bridge {
                    "bridge between clusters"
                } else {
                    "on many shortest paths"
                };
                (m.betweenness, reason.to_string())
            }),
            HotspotMetric::Tension => self.file_hotspots(|m| {
                let reason = if m.tension > 0.0 {
                    "pulled by multiple modules"
                } else {
                    "no tension"
                };
                (m.tension, reason.to_string())
            }),
        };

        hotspots.sort_by(|a, b| b.score.total_cmp(&a.score));
        hotspots.truncate(limit.unwrap_or(DEFAULT_HOTSPOT_LIMIT));

        let summary = match hotspots.first() {
            Some(top) => format!(
                "Top {metric} hotspot: {} ({:.2}). {}.",
                top.path, top.score, top.reason
            ),
            None => format!("No significant {metric} hotspots found."),
        };

        HotspotReport {
            metric,
            hotspots,
            summary,
        }
    }

    /// One unsorted hotspot per file, scored by `score`.
    fn file_hotspots(&self, score: impl Fn(&FileMetrics) -> (f64, String)) -> Vec<Hotspot> {
        self.file_metrics
            .iter()
            .map(|(path, m)| {
                let (score, reason) = score(m);
                Hotspot {
                    path: path.clone(),
                    score,
                    reason,
                }
            })
            .collect()
    }

    /// Modules, the dependency weight between them, and circular chains.
    pub fn module_structure(&self) -> ModuleStructure {
        let mut modules: Vec<ModuleMetrics> = self.module_metrics.values().cloned().collect();
        modules.sort_by(|a, b| b.files.cmp(&a.files));

        let module_of: IndexMap<&str, &str> = self
            .file_nodes()
            .map(|n| (n.id.as_str(), n.module.as_str()))
            .collect();
        let mut weights: IndexMap<(&str, &str), usize> = IndexMap::new();
        for edge in &self.edges {
            let (Some(&from), Some(&to)) = (
                module_of.get(edge.source.as_str()),
                module_of.get(edge.target.as_str()),
            ) else {
                continue;
            };
            if from != to {
                *weights.entry((from, to)).or_default() += 1;
            }
        }

        let mut cross_module_deps: Vec<CrossModuleDep> = weights
            .into_iter()
            .map(|((from, to), weight)| CrossModuleDep {
                from: from.to_string(),
                to: to.to_string(),
                weight,
            })
            .collect();
        cross_module_deps.sort_by(|a, b| b.weight.cmp(&a.weight));

        let circular_deps = self
            .stats
            .circular_deps
            .iter()
            .map(|cycle| CircularDep {
                severity: Level::cycle_severity(cycle),
                cycle: cycle.clone(),
            })
            .collect();

        ModuleStructure {
            modules,
            cross_module_deps,
            circular_deps,
        }
    }

    fn direct_dependents(&self, path: &str) -> Vec<DependentRef> {
        self.edges
            .iter()
            .filter(|e| e.target == path)
            .map(|e| DependentRef {
                path: e.source.clone(),
                symbols: e.symbols.clone(),
            })
            .collect()
    }
}
