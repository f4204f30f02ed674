use std::path::{Path, PathBuf};

use centrifuge_graph::HotspotMetric;
use clap::{Args, Subcommand};

/// Available centrifuge subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the full analysis and print the result
    ///
    /// The output can be saved and passed back as INPUT to the query
    /// commands, which then skip re-analysis.
    Analyze(AnalyzeArgs),

    /// Summarize totals, modules and the most depended-on files
    Overview(InputArgs),

    /// Show exports, imports, dependents and metrics of one file
    File(FileArgs),

    /// List direct and transitive dependents of a file
    Dependents(DependentsArgs),

    /// Rank files (or modules, for escape_velocity) by a metric
    Hotspots(HotspotsArgs),

    /// Show modules, cross-module dependencies and circular dependencies
    Modules(InputArgs),

    /// Show the force analysis: cohesion, tension, bridges and extraction candidates
    Forces(InputArgs),

    /// Print the effective configuration as TOML
    Config,
}

/// Where the JSON input comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// JSON input: an array of parsed files or a saved analysis
    ///
    /// Reads stdin when omitted or `-`.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,
}

impl InputArgs {
    /// The input file, or `None` for stdin.
    pub fn path(&self) -> Option<&Path> {
        self.input.as_deref().filter(|p| *p != Path::new("-"))
    }
}

/// Arguments for the analyze command
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Write the result to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the file command
#[derive(Args, Debug)]
pub struct FileArgs {
    /// Relative path of the file, as it appears in the input
    #[arg(value_name = "PATH")]
    pub path: String,

    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for the dependents command
#[derive(Args, Debug)]
pub struct DependentsArgs {
    /// Relative path of the file, as it appears in the input
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Levels of transitive dependents to follow (default: 2)
    #[arg(short, long, value_name = "N")]
    pub depth: Option<usize>,

    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for the hotspots command
#[derive(Args, Debug)]
pub struct HotspotsArgs {
    /// Metric to rank by
    ///
    /// One of coupling, pagerank, fan_in, fan_out, betweenness, tension,
    /// escape_velocity.
    #[arg(short, long, default_value = "coupling")]
    pub metric: HotspotMetric,

    /// Maximum number of entries (default: 10)
    #[arg(short, long, value_name = "N")]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub input: InputArgs,
}
