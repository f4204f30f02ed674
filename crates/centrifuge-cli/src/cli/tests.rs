use super::*;
use centrifuge_graph::HotspotMetric;
use clap::CommandFactory;

#[test]
fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_analyze_defaults_to_stdin() {
    let cli = Cli::try_parse_from(["centrifuge", "analyze"]).unwrap();
    let Command::Analyze(args) = cli.command else {
        panic!("expected analyze");
    };
    assert!(args.input.path().is_none());
    assert!(args.output.is_none());
}

#[test]
fn test_dash_means_stdin() {
    let cli = Cli::try_parse_from(["centrifuge", "overview", "-"]).unwrap();
    let Command::Overview(args) = cli.command else {
        panic!("expected overview");
    };
    assert!(args.path().is_none());
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "centrifuge",
        "forces",
        "files.json",
        "--pretty",
        "--verbose",
        "--config",
        "ci.toml",
    ])
    .unwrap();
    assert!(cli.pretty);
    assert!(cli.verbose);
    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("ci.toml")));
}

#[test]
fn test_verbose_conflicts_with_quiet() {
    assert!(Cli::try_parse_from(["centrifuge", "-v", "-q", "overview"]).is_err());
}

#[test]
fn test_hotspot_metric_parsing() {
    let cli =
        Cli::try_parse_from(["centrifuge", "hotspots", "--metric", "fan-in", "-l", "3"]).unwrap();
    let Command::Hotspots(args) = cli.command else {
        panic!("expected hotspots");
    };
    assert_eq!(args.metric, HotspotMetric::FanIn);
    assert_eq!(args.limit, Some(3));

    assert!(Cli::try_parse_from(["centrifuge", "hotspots", "--metric", "loudness"]).is_err());
}

#[test]
fn test_dependents_args() {
    let cli = Cli::try_parse_from([
        "centrifuge",
        "dependents",
        "src/db.ts",
        "graph.json",
        "--depth",
        "4",
    ])
    .unwrap();
    let Command::Dependents(args) = cli.command else {
        panic!("expected dependents");
    };
    assert_eq!(args.path, "src/db.ts");
    assert_eq!(args.depth, Some(4));
    assert_eq!(args.input.path(), Some(std::path::Path::new("graph.json")));
}
