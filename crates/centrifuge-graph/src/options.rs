use serde::{Deserialize, Serialize};

/// Tunable constants of the analysis pipeline.
///
/// `Default` reproduces the stock thresholds; every field may be overridden
/// individually when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// PageRank damping factor.
    pub damping: f64,
    /// PageRank iteration cap.
    pub max_iterations: usize,
    /// Per-node PageRank convergence tolerance.
    pub tolerance: f64,
    /// Upper bound on reported cycles.
    pub max_cycles: usize,
    /// Betweenness above which a file is flagged `isBridge`.
    pub bridge_flag_threshold: f64,
    /// Betweenness at which a file is considered for the bridge report.
    pub bridge_report_threshold: f64,
    pub cohesive_threshold: f64,
    pub moderate_threshold: f64,
    /// Tension above which a file is reported.
    pub tension_threshold: f64,
    /// Escape velocity at which a module becomes an extraction candidate.
    pub escape_threshold: f64,
    /// Pull contributed by each incoming edge from another module.
    pub inbound_pull_strength: f64,
    pub max_groups: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            tolerance: 1e-6,
            max_cycles: 100,
            bridge_flag_threshold: 0.1,
            bridge_report_threshold: 0.05,
            cohesive_threshold: 0.6,
            moderate_threshold: 0.4,
            tension_threshold: 0.3,
            escape_threshold: 0.5,
            inbound_pull_strength: 0.5,
            max_groups: 8,
        }
    }
}
