//! Centrifuge CLI: architectural force analysis from the command line.
//!
//! The binary reads the JSON an external source parser produced (an array of
//! `ParsedFile` records) or a previously saved analysis, runs the pipeline from
//! `centrifuge-graph` and prints JSON to stdout. Logs go to stderr so the
//! output can be piped.
//!
//! # Modules
//!
//! - [`cli`] - Argument definitions (clap derive)
//! - [`commands`] - One function per subcommand
//! - [`error`] - `CliError` and its miette rendering
//! - [`input`] - Reading and recognizing JSON input
//! - [`logger`] - tracing subscriber setup

pub mod cli;
pub mod commands;
pub mod error;
pub mod input;
pub mod logger;

pub use error::{CliError, Result};
