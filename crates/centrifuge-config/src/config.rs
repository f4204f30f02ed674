//! Top-level configuration structure and its figment layering.
//!
//! For locating `centrifuge.toml` on disk, see the `discovery` module.

use std::path::Path;

use centrifuge_graph::AnalysisOptions;
use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::settings::GlobalSettings;
use crate::validation::validate_schema;

/// File name searched for by discovery.
pub const CONFIG_FILE_NAME: &str = "centrifuge.toml";

/// Prefix of environment overrides. Nested keys are joined with `__`.
pub const ENV_PREFIX: &str = "CENTRIFUGE_";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CentrifugeConfig {
    #[serde(default)]
    pub analysis: AnalysisOptions,

    #[serde(default)]
    pub settings: GlobalSettings,
}

impl CentrifugeConfig {
    /// The layered provider: defaults, then `config_file` if given, then the
    /// environment.
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = config_file {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Extract and validate a configuration from any figment.
    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let config: Self = figment.extract()?;
        validate_schema(&config)?;
        Ok(config)
    }

    /// Parse a TOML document layered over the defaults. The environment is
    /// not consulted.
    ///
    /// # Example
    ///
    /// ```
    /// use centrifuge_config::CentrifugeConfig;
    ///
    /// let config = CentrifugeConfig::from_toml_str(
    ///     r#"
    /// [analysis]
    /// max_cycles = 10
    /// "#,
    /// )
    /// .unwrap();
    /// assert_eq!(config.analysis.max_cycles, 10);
    /// assert_eq!(config.analysis.max_groups, 8);
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::string(content));
        Self::from_figment(&figment)
    }

    /// Render the configuration as a TOML document.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::invalid("config", e.to_string()))
    }
}
