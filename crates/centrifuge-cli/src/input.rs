//! Reading JSON input.
//!
//! Two shapes are accepted: the array of `ParsedFile` records an external
//! parser emits, which is analyzed, or a saved `CodebaseGraph` object, which
//! is used as is.

use std::io::Read;
use std::path::Path;

use centrifuge_graph::{AnalysisOptions, CodebaseGraph, ParsedFile, analyze_with_options};
use serde_json::Value;

use crate::error::{CliError, Result};

/// Read the whole input, from `path` or stdin.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "reading input file");
            Ok(std::fs::read_to_string(path)?)
        }
        None => {
            tracing::debug!("reading input from stdin");
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Turn JSON text into an analysis result.
pub fn parse_graph(text: &str, options: &AnalysisOptions) -> Result<CodebaseGraph> {
    let value: Value = serde_json::from_str(text)?;
    match value {
        Value::Array(_) => {
            let files: Vec<ParsedFile> = serde_json::from_value(value)?;
            tracing::info!(files = files.len(), "analyzing parsed files");
            Ok(analyze_with_options(&files, options))
        }
        Value::Object(_) => {
            tracing::debug!("using saved analysis");
            Ok(serde_json::from_value(value)?)
        }
        other => Err(CliError::InvalidArgument(format!(
            "expected a JSON array of parsed files or an analysis object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Read and parse in one step.
pub fn load_graph(path: Option<&Path>, options: &AnalysisOptions) -> Result<CodebaseGraph> {
    parse_graph(&read_input(path)?, options)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILES: &str = r#"[
        {"relativePath": "a.ts", "loc": 10, "imports": [
            {"from": "./b", "resolvedFrom": "b.ts", "symbols": ["b"], "isTypeOnly": false}
        ]},
        {"relativePath": "b.ts", "loc": 5}
    ]"#;

    #[test]
    fn test_parsed_files_are_analyzed() {
        let graph = parse_graph(FILES, &AnalysisOptions::default()).unwrap();
        assert_eq!(graph.stats.total_files, 2);
        assert_eq!(graph.stats.total_dependencies, 1);
    }

    #[test]
    fn test_saved_analysis_is_reused() {
        let graph = parse_graph(FILES, &AnalysisOptions::default()).unwrap();
        let saved = graph.to_json().unwrap();

        let reloaded = parse_graph(&saved, &AnalysisOptions::default()).unwrap();
        assert_eq!(reloaded.stats, graph.stats);
        assert_eq!(reloaded.edges, graph.edges);
    }

    #[test]
    fn test_other_json_is_rejected() {
        let err = parse_graph("42", &AnalysisOptions::default()).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(ref msg) if msg.ends_with("a number")));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_graph("[{", &AnalysisOptions::default()).unwrap_err();
        assert!(matches!(err, CliError::Json(_)));
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("files.json");
        std::fs::write(&path, FILES).unwrap();
        assert_eq!(read_input(Some(&path)).unwrap(), FILES);
    }
}
