//! Tests for default values and edge cases.

use centrifuge_config::{CentrifugeConfig, GlobalSettings, validate_schema};
use centrifuge_graph::AnalysisOptions;

#[test]
fn centrifuge_config_defaults() {
    let config = CentrifugeConfig::default();
    assert_eq!(config.analysis, AnalysisOptions::default());
    assert_eq!(config.settings, GlobalSettings::default());
    validate_schema(&config).unwrap();
}

#[test]
fn analysis_defaults_match_pipeline_constants() {
    let options = CentrifugeConfig::default().analysis;
    assert_eq!(options.damping, 0.85);
    assert_eq!(options.max_iterations, 100);
    assert_eq!(options.tolerance, 1e-6);
    assert_eq!(options.max_cycles, 100);
    assert_eq!(options.bridge_flag_threshold, 0.1);
    assert_eq!(options.bridge_report_threshold, 0.05);
    assert_eq!(options.cohesive_threshold, 0.6);
    assert_eq!(options.moderate_threshold, 0.4);
    assert_eq!(options.tension_threshold, 0.3);
    assert_eq!(options.escape_threshold, 0.5);
    assert_eq!(options.inbound_pull_strength, 0.5);
    assert_eq!(options.max_groups, 8);
}

#[test]
fn global_settings_defaults() {
    let settings = GlobalSettings::default();
    assert!(settings.log_level.is_none());
    assert!(settings.log_format.is_none());
    assert!(!settings.pretty);
}

#[test]
fn empty_toml_yields_defaults() {
    let config = CentrifugeConfig::from_toml_str("").unwrap();
    assert_eq!(config, CentrifugeConfig::default());
}

#[test]
fn unknown_keys_are_ignored() {
    let config = CentrifugeConfig::from_toml_str(
        r#"
[analysis]
max_groups = 3
legacy_option = true

[server]
port = 8080
"#,
    )
    .unwrap();
    assert_eq!(config.analysis.max_groups, 3);
}

#[test]
fn zero_cycle_cap_is_allowed() {
    let config = CentrifugeConfig::from_toml_str("[analysis]\nmax_cycles = 0\n").unwrap();
    assert_eq!(config.analysis.max_cycles, 0);
}
