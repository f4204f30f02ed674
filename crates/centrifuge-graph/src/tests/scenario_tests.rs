//! End-to-end scenarios through the full analysis pipeline.

use crate::{
    CodebaseGraph, CohesionVerdict, ExportKind, HotspotMetric, NodeKind, ParsedExport, ParsedFile,
    ParsedImport, analyze,
};

#[test]
fn test_three_file_chain() {
    let result = analyze(&[
        ParsedFile::new("a.ts").with_import(ParsedImport::resolved("b.ts", ["b"])),
        ParsedFile::new("b.ts").with_import(ParsedImport::resolved("c.ts", ["c"])),
        ParsedFile::new("c.ts"),
    ]);

    assert_eq!(result.stats.total_files, 3);
    assert_eq!(result.stats.total_dependencies, 2);
    assert!(result.stats.circular_deps.is_empty());
    assert!(result.file_metrics["c.ts"].page_rank > result.file_metrics["a.ts"].page_rank);
}

#[test]
fn test_shared_utility_between_modules() {
    let result = analyze(&[
        ParsedFile::new("utils.ts"),
        ParsedFile::new("src/a/x.ts").with_import(ParsedImport::resolved("utils.ts", ["fmt"])),
        ParsedFile::new("src/b/y.ts").with_import(ParsedImport::resolved("utils.ts", ["fmt"])),
    ]);

    let tension_files = &result.force_analysis.tension_files;
    if let Some(utils) = tension_files.iter().find(|t| t.file == "utils.ts") {
        assert!(utils.tension > 0.3 && utils.tension <= 1.0);
        assert_eq!(result.file_metrics["utils.ts"].tension, utils.tension);
    }
}

#[test]
fn test_repeated_imports_merge_symbols() {
    let result = analyze(&[
        ParsedFile::new("app.ts")
            .with_import(ParsedImport::resolved("lib.ts", ["parse"]).type_only())
            .with_import(ParsedImport::resolved("lib.ts", ["format"])),
        ParsedFile::new("lib.ts")
            .with_export(ParsedExport::new("parse", ExportKind::Function))
            .with_export(ParsedExport::new("format", ExportKind::Function))
            .with_export(ParsedExport::new("unused", ExportKind::Function)),
    ]);

    assert_eq!(result.edges.len(), 1);
    let edge = &result.edges[0];
    assert_eq!(edge.symbols, vec!["parse", "format"]);
    assert_eq!(edge.weight, 2);
    assert!(!edge.is_type_only);
    // Both merged symbols count as consumed.
    assert_eq!(result.file_metrics["lib.ts"].dead_exports, vec!["unused"]);
}

#[test]
fn test_metadata_only_exports_never_become_nodes() {
    let result = analyze(&[ParsedFile::new("src/model.ts")
        .with_export(ParsedExport::new("Model", ExportKind::Class))
        .with_export(ParsedExport::new("Options", ExportKind::Interface))
        .with_export(ParsedExport::new("Kind", ExportKind::Enum))
        .with_export(ParsedExport::new("Id", ExportKind::Type))
        .with_export(ParsedExport::new("DEFAULTS", ExportKind::Variable))]);

    assert_eq!(result.stats.total_functions, 1);
    let function = result
        .nodes
        .iter()
        .find(|n| n.kind == NodeKind::Function)
        .unwrap();
    assert_eq!(function.id, "src/model.ts::Model");
    assert_eq!(
        result.file_metrics["src/model.ts"].dead_exports,
        vec!["Model", "Options", "Kind", "Id", "DEFAULTS"]
    );
    assert_eq!(result.module_metrics["src/"].exports, 5);
}

#[test]
fn test_module_cohesion_verdicts() {
    let result = analyze(&[
        ParsedFile::new("core/a.ts").with_import(ParsedImport::resolved("core/b.ts", ["b"])),
        ParsedFile::new("core/b.ts"),
        ParsedFile::new("ui/view.ts").with_import(ParsedImport::resolved("core/a.ts", ["a"])),
    ]);

    assert_eq!(result.module_metrics["core/"].cohesion, 1.0);
    assert_eq!(result.module_metrics["ui/"].cohesion, 0.0);

    let verdict = |path: &str| {
        result
            .force_analysis
            .module_cohesion
            .iter()
            .find(|m| m.metrics.path == path)
            .map(|m| m.verdict)
    };
    assert_eq!(verdict("core/"), Some(CohesionVerdict::Cohesive));
    assert_eq!(verdict("ui/"), Some(CohesionVerdict::JunkDrawer));
    assert!(result.force_analysis.summary.starts_with("1 junk-drawer module(s) (ui/)"));
}

#[test]
fn test_groups_aggregate_and_cap() {
    let result = analyze(&[
        ParsedFile::new("src/parser/lexer.ts").with_loc(50),
        ParsedFile::new("src/parser/tokens.ts").with_loc(30),
    ]);
    assert_eq!(result.groups.len(), 1);
    assert_eq!(result.groups[0].name, "parser");
    assert_eq!(result.groups[0].files, 2);
    assert_eq!(result.groups[0].loc, 80);

    let many: Vec<ParsedFile> = (0..12)
        .map(|i| ParsedFile::new(format!("dir{i}/index.ts")).with_loc(10))
        .collect();
    let result = analyze(&many);
    assert_eq!(result.groups.len(), 8);
    assert!(
        result
            .groups
            .windows(2)
            .all(|w| w[0].importance >= w[1].importance)
    );
}

#[test]
fn test_test_file_links_count_as_dependents() {
    let result = analyze(&[
        ParsedFile::new("src/math.ts")
            .with_test_file("src/math.test.ts")
            .with_export(ParsedExport::new("add", ExportKind::Function)),
        ParsedFile::new("src/math.test.ts").mark_test_file(),
    ]);

    let math = &result.file_metrics["src/math.ts"];
    assert!(math.has_tests);
    assert_eq!(math.fan_in, 1);
    assert_eq!(math.blast_radius, 1);
    assert_eq!(result.edges[0].symbols, vec!["tests"]);
}

#[test]
fn test_queries_work_on_deserialized_result() {
    let original = analyze(&[
        ParsedFile::new("src/app.ts").with_import(ParsedImport::resolved("src/lib.ts", ["run"])),
        ParsedFile::new("src/lib.ts").with_import(ParsedImport::resolved("shared/log.ts", ["log"])),
        ParsedFile::new("shared/log.ts"),
    ]);

    let json = original.to_pretty_json().unwrap();
    let restored: CodebaseGraph = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.stats, original.stats);
    assert_eq!(restored.edges, original.edges);

    let report = restored.dependents("shared/log.ts", None).unwrap();
    assert_eq!(report.total_affected, 2);

    let hotspots = restored.hotspots(HotspotMetric::PageRank, Some(1));
    assert_eq!(hotspots.hotspots[0].path, "shared/log.ts");
}
