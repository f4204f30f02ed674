use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::math::round_to;
use super::node::PATH_SEPARATOR;
use super::{FileMetrics, GraphNode};

/// Palette assigned to groups in importance order, wrapping around.
pub const GROUP_COLORS: [&str; 10] = [
    "#2563eb", "#dc2626", "#16a34a", "#9333ea", "#ea580c", "#0891b2", "#ca8a04", "#e11d48",
    "#4f46e5", "#059669",
];

/// Name of the group for files at the project root.
pub const ROOT_GROUP: &str = "root";

/// Top-level directories that only hold source and are skipped when naming groups.
const SOURCE_ROOTS: [&str; 5] = ["src", "lib", "app", "packages", "apps"];

/// Coarse aggregate of files for the visualization legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMetrics {
    pub name: String,
    pub files: usize,
    pub loc: u64,
    /// Summed PageRank, 4 decimals.
    pub importance: f64,
    pub fan_in: usize,
    pub fan_out: usize,
    pub color: String,
}

/// Collapse a module key to its cloud group name.
///
/// `src/parser/` becomes `parser`, `tools/gen/` becomes `tools`, and the root
/// module becomes [`ROOT_GROUP`].
pub fn cloud_group(module: &str) -> String {
    let mut parts = module
        .trim_end_matches(PATH_SEPARATOR)
        .split(PATH_SEPARATOR)
        .filter(|part| !part.is_empty());

    match (parts.next(), parts.next()) {
        (None | Some("."), _) => ROOT_GROUP.to_string(),
        (Some(first), Some(second)) if SOURCE_ROOTS.contains(&first) => second.to_string(),
        (Some(first), _) => first.to_string(),
    }
}

#[derive(Default)]
struct Totals {
    files: usize,
    loc: u64,
    page_rank: f64,
    fan_in: usize,
    fan_out: usize,
}

/// Aggregate file nodes into at most `max_groups` cloud groups.
///
/// Groups are sorted by importance, highest first. Ties keep first-seen order.
pub fn compute_groups(
    nodes: &[GraphNode],
    file_metrics: &IndexMap<String, FileMetrics>,
    max_groups: usize,
) -> Vec<GroupMetrics> {
    let mut totals: IndexMap<String, Totals> = IndexMap::new();

    for node in nodes.iter().filter(|n| n.is_file()) {
        let entry = totals.entry(cloud_group(&node.module)).or_default();
        entry.files += 1;
        entry.loc += u64::from(node.loc);
        if let Some(metrics) = file_metrics.get(&node.id) {
            entry.page_rank += metrics.page_rank;
            entry.fan_in += metrics.fan_in;
            entry.fan_out += metrics.fan_out;
        }
    }

    let mut sorted: Vec<(String, Totals)> = totals.into_iter().collect();
    sorted.sort_by(|(_, a), (_, b)| b.page_rank.total_cmp(&a.page_rank));

    sorted
        .into_iter()
        .take(max_groups)
        .zip(GROUP_COLORS.iter().cycle())
        .map(|((name, totals), color)| GroupMetrics {
            name,
            files: totals.files,
            loc: totals.loc,
            importance: round_to(totals.page_rank, 4),
            fan_in: totals.fan_in,
            fan_out: totals.fan_out,
            color: (*color).to_string(),
        })
        .collect()
}
