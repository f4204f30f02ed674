//! Settings for the process running the analysis, not the analysis itself.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Log level used when neither `--verbose` nor `--quiet` is given.
    #[serde(default)]
    pub log_level: Option<String>,

    /// `compact` or `full`.
    #[serde(default)]
    pub log_format: Option<String>,

    /// Pretty-print JSON output.
    #[serde(default)]
    pub pretty: bool,
}
