use serde::{Deserialize, Serialize};

use super::ParsedImport;

/// Symbol recorded on the synthetic test → implementation edge.
pub const TESTS_SYMBOL: &str = "tests";

/// Directed import edge between two file nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub symbols: Vec<String>,
    /// True only while every contributing import was type-only.
    pub is_type_only: bool,
    /// Symbol count, or 1 when no symbols were named.
    pub weight: u32,
}

impl GraphEdge {
    /// Create an edge from the first import seen between two files.
    ///
    /// The symbol list is taken as parsed, repeats included.
    pub fn from_import(source: &str, target: &str, import: &ParsedImport) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            symbols: import.symbols.clone(),
            is_type_only: import.is_type_only,
            weight: (import.symbols.len() as u32).max(1),
        }
    }

    /// Create the synthetic edge from a test file to the file it covers.
    pub fn test_link(test_path: &str, implementation_path: &str) -> Self {
        Self {
            source: test_path.to_string(),
            target: implementation_path.to_string(),
            symbols: vec![TESTS_SYMBOL.to_string()],
            is_type_only: false,
            weight: 1,
        }
    }

    /// Merge a repeated import between the same pair of files.
    ///
    /// Only symbols not already on the edge are appended, and the weight follows
    /// the merged symbol count. The edge stays type-only only if this import is type-only too.
    pub fn absorb(&mut self, import: &ParsedImport) {
        self.is_type_only &= import.is_type_only;
        self.push_symbols(&import.symbols);
    }

    fn push_symbols(&mut self, symbols: &[String]) {
        for symbol in symbols {
            if !self.carries(symbol) {
                self.symbols.push(symbol.clone());
            }
        }
        self.weight = (self.symbols.len() as u32).max(1);
    }

    /// Returns true if `name` is imported through this edge.
    pub fn carries(&self, name: &str) -> bool {
        self.symbols.iter().any(|s| s == name)
    }
}
