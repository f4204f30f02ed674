//! Input contract produced by the external source parser.
//!
//! The core never reads files itself. A parser (owned elsewhere) hands over one
//! [`ParsedFile`] per source file with its exports, resolved imports and a few
//! pieces of metadata (churn, test association).

use serde::{Deserialize, Deserializer, Serialize};

/// Kind of a top-level export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Function,
    Class,
    Variable,
    Type,
    Interface,
    Enum,
}

/// What an export contributes to the dependency graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportRole {
    /// The export becomes a function node attached to its file.
    GraphNode,
    /// The export is tracked for dead-export detection only.
    MetadataOnly,
}

impl ExportKind {
    /// The mapping of every export kind to its role in the graph.
    pub const fn role(self) -> ExportRole {
        match self {
            Self::Function => ExportRole::GraphNode,
            Self::Class => ExportRole::GraphNode,
            Self::Variable => ExportRole::MetadataOnly,
            Self::Type => ExportRole::MetadataOnly,
            Self::Interface => ExportRole::MetadataOnly,
            Self::Enum => ExportRole::MetadataOnly,
        }
    }

    /// Returns true if exports of this kind become function nodes.
    pub const fn creates_node(self) -> bool {
        matches!(self.role(), ExportRole::GraphNode)
    }
}

fn default_complexity() -> u32 {
    1
}

fn deserialize_complexity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    u32::deserialize(deserializer).map(|c| c.max(1))
}

/// A single export declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedExport {
    pub name: String,
    #[serde(alias = "type")]
    pub kind: ExportKind,
    #[serde(default)]
    pub loc: u32,
    #[serde(default)]
    pub is_default: bool,
    /// Branch-counted complexity of the export body. Starts at 1.
    #[serde(
        default = "default_complexity",
        deserialize_with = "deserialize_complexity"
    )]
    pub complexity: u32,
}

impl ParsedExport {
    /// Construct a non-default export with complexity 1.
    pub fn new(name: impl Into<String>, kind: ExportKind) -> Self {
        Self {
            name: name.into(),
            kind,
            loc: 0,
            is_default: false,
            complexity: 1,
        }
    }

    pub fn with_loc(mut self, loc: u32) -> Self {
        self.loc = loc;
        self
    }

    pub fn with_complexity(mut self, complexity: u32) -> Self {
        self.complexity = complexity.max(1);
        self
    }

    pub fn default_export(mut self) -> Self {
        self.is_default = true;
        self
    }
}

/// A single import statement.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedImport {
    /// Raw specifier as written in the source.
    #[serde(default)]
    pub from: String,
    /// Relative path of the resolved target. Empty when external or unresolvable.
    #[serde(default)]
    pub resolved_from: String,
    /// Imported names: `"default"` for default imports, `"* as X"` for namespaces.
    #[serde(default)]
    pub symbols: Vec<String>,
    #[serde(default)]
    pub is_type_only: bool,
}

impl ParsedImport {
    /// Construct an import already resolved to `target`.
    pub fn resolved<I, S>(target: impl Into<String>, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let target = target.into();
        Self {
            from: format!("./{target}"),
            resolved_from: target,
            symbols: symbols.into_iter().map(Into::into).collect(),
            is_type_only: false,
        }
    }

    /// Construct an import of an external package that never resolves.
    pub fn external(specifier: impl Into<String>) -> Self {
        Self {
            from: specifier.into(),
            ..Self::default()
        }
    }

    pub fn type_only(mut self) -> Self {
        self.is_type_only = true;
        self
    }

    /// The resolved target path, or `None` for external imports.
    pub fn resolved_target(&self) -> Option<&str> {
        let target = self.resolved_from.trim();
        (!target.is_empty()).then_some(target)
    }
}

/// Everything the parser knows about one source file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFile {
    /// Path relative to the project root. Unique key of the file.
    pub relative_path: String,
    #[serde(default)]
    pub loc: u32,
    #[serde(default)]
    pub exports: Vec<ParsedExport>,
    #[serde(default)]
    pub imports: Vec<ParsedImport>,
    /// Commit count from version control.
    #[serde(default)]
    pub churn: u32,
    #[serde(default)]
    pub is_test_file: bool,
    /// Path of the associated test file, if one was matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_file: Option<String>,
}

impl ParsedFile {
    /// Create an empty record for `relative_path`.
    pub fn new(relative_path: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            ..Self::default()
        }
    }

    pub fn with_loc(mut self, loc: u32) -> Self {
        self.loc = loc;
        self
    }

    pub fn with_export(mut self, export: ParsedExport) -> Self {
        self.exports.push(export);
        self
    }

    pub fn with_import(mut self, import: ParsedImport) -> Self {
        self.imports.push(import);
        self
    }

    pub fn with_churn(mut self, churn: u32) -> Self {
        self.churn = churn;
        self
    }

    pub fn with_test_file(mut self, test_file: impl Into<String>) -> Self {
        self.test_file = Some(test_file.into());
        self
    }

    pub fn mark_test_file(mut self) -> Self {
        self.is_test_file = true;
        self
    }

    /// Mean complexity across exports, 1 when the file exports nothing.
    pub fn mean_complexity(&self) -> f64 {
        if self.exports.is_empty() {
            return 1.0;
        }
        let total: u64 = self.exports.iter().map(|e| u64::from(e.complexity)).sum();
        total as f64 / self.exports.len() as f64
    }
}
