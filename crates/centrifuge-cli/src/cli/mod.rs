//! Command-line interface definition for centrifuge.
//!
//! # Command Structure
//!
//! - `centrifuge analyze` - Full analysis result
//! - `centrifuge overview` - Codebase totals and modules
//! - `centrifuge file <PATH>` - Context of one file
//! - `centrifuge dependents <PATH>` - What breaks if a file changes
//! - `centrifuge hotspots` - Files ranked by a metric
//! - `centrifuge modules` - Module structure and cross-module dependencies
//! - `centrifuge forces` - Cohesion, tension, bridges and extraction candidates
//! - `centrifuge config` - Effective configuration as TOML

mod commands;
#[cfg(test)]
mod tests;

use std::path::PathBuf;

use clap::Parser;

pub use commands::{AnalyzeArgs, Command, DependentsArgs, FileArgs, HotspotsArgs, InputArgs};

/// Centrifuge - architectural force analysis for codebases
#[derive(Parser, Debug)]
#[command(
    name = "centrifuge",
    version,
    about = "Architectural force analysis for codebases",
    long_about = "Centrifuge builds a dependency graph from parsed source files and measures\n\
                  the forces acting on it: centrality, coupling, module cohesion, tension,\n\
                  bridges and extraction candidates. Input and output are JSON."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all log output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to a centrifuge.toml (default: discovered in the current directory)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
