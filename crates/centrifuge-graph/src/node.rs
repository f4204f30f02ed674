use serde::{Deserialize, Serialize};

/// Separator used in relative paths and module keys.
pub const PATH_SEPARATOR: char = '/';

/// Module key of files that live at the project root.
pub const ROOT_MODULE: &str = ".";

/// Graph node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Function,
}

/// A file or an exported function/class attached to a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// File nodes use the relative path; function nodes use `path::name`.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub path: String,
    pub label: String,
    pub loc: u32,
    pub module: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_file: Option<String>,
}

impl GraphNode {
    /// Create a file node for `path`.
    pub fn file(path: impl Into<String>, loc: u32) -> Self {
        let path = path.into();
        Self {
            id: path.clone(),
            kind: NodeKind::File,
            label: basename(&path).to_string(),
            module: module_key(&path),
            path,
            loc,
            parent_file: None,
        }
    }

    /// Create a function node for export `name` of the file at `path`.
    pub fn function(path: &str, name: &str, loc: u32) -> Self {
        Self {
            id: function_id(path, name),
            kind: NodeKind::Function,
            path: path.to_string(),
            label: name.to_string(),
            loc,
            module: module_key(path),
            parent_file: Some(path.to_string()),
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    pub fn is_function(&self) -> bool {
        self.kind == NodeKind::Function
    }
}

/// Node id of an exported function or class.
pub fn function_id(path: &str, name: &str) -> String {
    format!("{path}::{name}")
}

/// Directory-derived grouping key: `dirname + "/"`, or `"."` at the root.
pub fn module_key(relative_path: &str) -> String {
    match relative_path.rfind(PATH_SEPARATOR) {
        Some(idx) if idx > 0 => format!("{}{}", &relative_path[..idx], PATH_SEPARATOR),
        _ => ROOT_MODULE.to_string(),
    }
}

/// Last path segment.
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches(PATH_SEPARATOR);
    match trimmed.rfind(PATH_SEPARATOR) {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_key() {
        assert_eq!(module_key("src/parser/index.ts"), "src/parser/");
        assert_eq!(module_key("src/graph/builder.ts"), "src/graph/");
        assert_eq!(module_key("root.ts"), ".");
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("src/parser/index.ts"), "index.ts");
        assert_eq!(basename("src/parser/"), "parser");
        assert_eq!(basename("index.ts"), "index.ts");
    }

    #[test]
    fn test_function_node() {
        let node = GraphNode::function("src/a.ts", "foo", 4);
        assert_eq!(node.id, "src/a.ts::foo");
        assert_eq!(node.parent_file.as_deref(), Some("src/a.ts"));
        assert_eq!(node.module, "src/");
        assert!(node.is_function());
    }

    #[test]
    fn test_node_serializes_type_field() {
        let json = serde_json::to_value(GraphNode::file("a.ts", 1)).unwrap();
        assert_eq!(json["type"], "file");
        assert!(json.get("parentFile").is_none());
    }
}
