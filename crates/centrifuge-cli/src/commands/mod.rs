//! Command implementations for the centrifuge CLI.
//!
//! - [`analyze`] - Full analysis, optionally written to a file
//! - [`query`] - Read-only questions over one analysis
//! - [`config`] - Effective configuration
//!
//! Every command receives a [`Context`] carrying the loaded configuration.

pub mod analyze;
pub mod config;
pub mod query;

use std::io::Write;
use std::path::Path;

use centrifuge_config::{CentrifugeConfig, ConfigDiscovery};
use serde::Serialize;

use crate::cli::Command;
use crate::error::Result;

/// State shared by all commands.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: CentrifugeConfig,
    pub pretty: bool,
}

impl Context {
    /// `pretty` is on if either the flag or `settings.pretty` says so.
    pub fn new(config: CentrifugeConfig, pretty: bool) -> Self {
        let pretty = pretty || config.settings.pretty;
        Self { config, pretty }
    }

    /// Serialize `value` as this context's JSON flavor.
    pub fn to_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }

    /// Print `value` as JSON on stdout.
    pub fn emit<T: Serialize>(&self, value: &T) -> Result<()> {
        let json = self.to_json(value)?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{json}")?;
        Ok(())
    }
}

/// Load configuration from `explicit`, or discover it in the current directory.
pub fn load_config(explicit: Option<&Path>) -> Result<CentrifugeConfig> {
    let root = std::env::current_dir()?;
    let discovery = ConfigDiscovery::new(&root);
    let config = match explicit {
        Some(path) => discovery.load_from(path)?,
        None => discovery.load()?,
    };
    Ok(config)
}

/// Dispatch a parsed subcommand.
pub fn execute(command: Command, context: &Context) -> Result<()> {
    match command {
        Command::Analyze(args) => analyze::execute(args, context),
        Command::Overview(input) => query::overview(&input, context),
        Command::File(args) => query::file(&args, context),
        Command::Dependents(args) => query::dependents(&args, context),
        Command::Hotspots(args) => query::hotspots(&args, context),
        Command::Modules(input) => query::modules(&input, context),
        Command::Forces(input) => query::forces(&input, context),
        Command::Config => config::execute(context),
    }
}
