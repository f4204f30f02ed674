//! Schema validation of a loaded configuration.
//!
//! Only value ranges are checked here. Nothing touches the filesystem.

use centrifuge_graph::AnalysisOptions;

use crate::config::CentrifugeConfig;
use crate::error::{ConfigError, Result};
use crate::settings::GlobalSettings;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["compact", "full"];

/// Validate every section of `config`.
///
/// # Example
///
/// ```
/// use centrifuge_config::{CentrifugeConfig, validate_schema};
///
/// let mut config = CentrifugeConfig::default();
/// validate_schema(&config).unwrap();
///
/// config.analysis.tolerance = 0.0;
/// assert!(validate_schema(&config).is_err());
/// ```
pub fn validate_schema(config: &CentrifugeConfig) -> Result<()> {
    validate_analysis(&config.analysis)?;
    validate_settings(&config.settings)
}

fn validate_analysis(options: &AnalysisOptions) -> Result<()> {
    unit_interval("analysis.damping", options.damping)?;

    if !(options.tolerance.is_finite() && options.tolerance > 0.0) {
        return Err(ConfigError::invalid(
            "analysis.tolerance",
            format!("must be a positive number, got {}", options.tolerance),
        ));
    }

    if options.max_iterations == 0 {
        return Err(ConfigError::invalid(
            "analysis.max_iterations",
            "must be at least 1",
        ));
    }

    for (field, value) in [
        ("analysis.bridge_flag_threshold", options.bridge_flag_threshold),
        ("analysis.bridge_report_threshold", options.bridge_report_threshold),
        ("analysis.cohesive_threshold", options.cohesive_threshold),
        ("analysis.moderate_threshold", options.moderate_threshold),
        ("analysis.tension_threshold", options.tension_threshold),
        ("analysis.escape_threshold", options.escape_threshold),
        ("analysis.inbound_pull_strength", options.inbound_pull_strength),
    ] {
        unit_interval(field, value)?;
    }

    if options.moderate_threshold > options.cohesive_threshold {
        return Err(ConfigError::invalid(
            "analysis.moderate_threshold",
            format!(
                "must not exceed cohesive_threshold ({} > {})",
                options.moderate_threshold, options.cohesive_threshold
            ),
        ));
    }

    Ok(())
}

fn validate_settings(settings: &GlobalSettings) -> Result<()> {
    if let Some(level) = &settings.log_level {
        if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::invalid(
                "settings.log_level",
                format!("expected one of {}, got '{level}'", LOG_LEVELS.join(", ")),
            ));
        }
    }

    if let Some(format) = &settings.log_format {
        if !LOG_FORMATS.contains(&format.as_str()) {
            return Err(ConfigError::invalid(
                "settings.log_format",
                format!("expected one of {}, got '{format}'", LOG_FORMATS.join(", ")),
            ));
        }
    }

    Ok(())
}

fn unit_interval(field: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be between 0 and 1, got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: ConfigError) -> String {
        match err {
            ConfigError::InvalidValue { field, .. } => field,
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn defaults_are_valid() {
        validate_schema(&CentrifugeConfig::default()).unwrap();
    }

    #[test]
    fn damping_bounds_are_inclusive() {
        let mut config = CentrifugeConfig::default();
        config.analysis.damping = 0.0;
        validate_schema(&config).unwrap();
        config.analysis.damping = 1.0;
        validate_schema(&config).unwrap();
        config.analysis.damping = -0.1;
        assert_eq!(field_of(validate_schema(&config).unwrap_err()), "analysis.damping");
    }

    #[test]
    fn tolerance_must_be_positive() {
        let mut config = CentrifugeConfig::default();
        config.analysis.tolerance = -1e-6;
        assert_eq!(field_of(validate_schema(&config).unwrap_err()), "analysis.tolerance");
        config.analysis.tolerance = f64::NAN;
        assert_eq!(field_of(validate_schema(&config).unwrap_err()), "analysis.tolerance");
    }

    #[test]
    fn zero_iterations_rejected() {
        let mut config = CentrifugeConfig::default();
        config.analysis.max_iterations = 0;
        assert_eq!(
            field_of(validate_schema(&config).unwrap_err()),
            "analysis.max_iterations"
        );
    }

    #[test]
    fn thresholds_outside_unit_interval_rejected() {
        let mut config = CentrifugeConfig::default();
        config.analysis.escape_threshold = 1.2;
        assert_eq!(
            field_of(validate_schema(&config).unwrap_err()),
            "analysis.escape_threshold"
        );
    }

    #[test]
    fn moderate_above_cohesive_rejected() {
        let mut config = CentrifugeConfig::default();
        config.analysis.moderate_threshold = 0.7;
        config.analysis.cohesive_threshold = 0.5;
        assert_eq!(
            field_of(validate_schema(&config).unwrap_err()),
            "analysis.moderate_threshold"
        );
    }

    #[test]
    fn log_settings_checked() {
        let mut config = CentrifugeConfig::default();
        config.settings.log_level = Some("DEBUG".to_string());
        validate_schema(&config).unwrap();

        config.settings.log_level = Some("loud".to_string());
        assert_eq!(field_of(validate_schema(&config).unwrap_err()), "settings.log_level");

        config.settings.log_level = None;
        config.settings.log_format = Some("json".to_string());
        assert_eq!(field_of(validate_schema(&config).unwrap_err()), "settings.log_format");
    }
}
