//! Layered configuration for centrifuge.
//!
//! Values are resolved in this order, later sources winning:
//!
//! 1. Built-in defaults ([`AnalysisOptions::default`], [`GlobalSettings::default`])
//! 2. `centrifuge.toml`, discovered in a root directory or given explicitly
//! 3. `CENTRIFUGE_*` environment variables, nested with `__`
//!    (`CENTRIFUGE_ANALYSIS__MAX_CYCLES=10`)
//!
//! [`AnalysisOptions::default`]: centrifuge_graph::AnalysisOptions

pub mod config;
pub mod discovery;
pub mod error;
pub mod settings;
pub mod validation;

pub use config::*;
pub use error::*;
pub use settings::*;

pub use discovery::{ConfigDiscovery, discover};
pub use validation::validate_schema;
