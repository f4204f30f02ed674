//! Error handling for the centrifuge CLI.
//!
//! Library errors convert into [`CliError`] through `#[from]`; `main` turns the
//! final error into a miette report with a hint where one helps.

use centrifuge_config::ConfigError;
use miette::Report;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading or validating centrifuge.toml / CENTRIFUGE_* failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A query could not be answered
    #[error("{0}")]
    Graph(#[from] centrifuge_graph::Error),

    /// Invalid command-line arguments or input shape
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input is not valid JSON for the expected records
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Convert a CliError to a miette Report.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(ConfigError::InvalidValue { field, hint }) => miette::miette!(
            help = "Check centrifuge.toml and CENTRIFUGE_* environment variables",
            "Invalid value for '{}': {}",
            field,
            hint
        ),
        CliError::Graph(centrifuge_graph::Error::FileNotFound(path)) => miette::miette!(
            help = "Paths are matched exactly against the relativePath of the input records",
            "File not found in graph: {}",
            path
        ),
        CliError::Json(e) => miette::miette!(
            help = "INPUT must be a JSON array of parsed files or the output of `centrifuge analyze`",
            "Invalid input: {}",
            e
        ),
        _ => miette::miette!("{}", err),
    }
}
