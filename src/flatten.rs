//! Key-path flattening for structured documents.
//!
//! Turns a [`Node`] tree into a flat mapping from a dot/bracket-delimited
//! key path to a leaf value. Object fields extend the path with `.name`
//! (bare `name` at the root), array elements append `[index]` to the parent
//! segment with no separating dot, and scalars terminate the path.
//!
//! Flattening is pure: no shared state between invocations, and identical
//! input always produces identical output in document order.

use indexmap::IndexMap;

use crate::value::Node;

/// Flatten a document tree into `key path -> value` entries.
pub fn flatten(node: &Node, base_path: &str) -> IndexMap<String, String> {
    flatten_excluding(node, base_path, &[])
}

/// Flatten a document tree, skipping top-level object fields whose name
/// matches an exclusion case-insensitively.
///
/// Exclusion applies to the immediate children of the passed node only.
/// A nested field that happens to share an excluded name (for example a
/// `language` key several levels deep in content) is still emitted.
pub fn flatten_excluding(
    node: &Node,
    base_path: &str,
    exclusions: &[&str],
) -> IndexMap<String, String> {
    let mut entries = IndexMap::new();
    match node {
        Node::Object(children) => {
            for (name, child) in children {
                if exclusions.iter().any(|ex| ex.eq_ignore_ascii_case(name)) {
                    continue;
                }
                walk(child, join_field(base_path, name), &mut entries);
            }
        }
        other => walk(other, base_path.to_string(), &mut entries),
    }
    entries
}

fn walk(node: &Node, path: String, entries: &mut IndexMap<String, String>) {
    match node {
        Node::Object(children) => {
            for (name, child) in children {
                walk(child, join_field(&path, name), entries);
            }
        }
        Node::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                walk(item, format!("{path}[{index}]"), entries);
            }
        }
        Node::Scalar(text) => {
            entries.insert(path, text.clone());
        }
    }
}

fn join_field(base_path: &str, name: &str) -> String {
    if base_path.is_empty() {
        name.to_string()
    } else {
        format!("{base_path}.{name}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn flat(value: serde_json::Value) -> IndexMap<String, String> {
        flatten(&Node::from(value), "")
    }

    #[test]
    fn test_dot_paths_for_nested_objects() {
        let entries = flat(json!({
            "menu": {"file": {"open": "Open", "close": "Close"}},
            "title": "App"
        }));
        assert_eq!(entries.get("menu.file.open").unwrap(), "Open");
        assert_eq!(entries.get("menu.file.close").unwrap(), "Close");
        assert_eq!(entries.get("title").unwrap(), "App");
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn test_bracket_paths_for_arrays() {
        let entries = flat(json!({
            "days": ["Mon", "Tue"],
            "matrix": [["a"], ["b", "c"]]
        }));
        assert_eq!(entries.get("days[0]").unwrap(), "Mon");
        assert_eq!(entries.get("days[1]").unwrap(), "Tue");
        assert_eq!(entries.get("matrix[0][0]").unwrap(), "a");
        assert_eq!(entries.get("matrix[1][1]").unwrap(), "c");
    }

    #[test]
    fn test_array_of_objects() {
        let entries = flat(json!({"steps": [{"label": "First"}, {"label": "Second"}]}));
        assert_eq!(entries.get("steps[0].label").unwrap(), "First");
        assert_eq!(entries.get("steps[1].label").unwrap(), "Second");
    }

    #[test]
    fn test_non_string_scalars_are_stringified() {
        let entries = flat(json!({"count": 3, "enabled": false, "missing": null}));
        assert_eq!(entries.get("count").unwrap(), "3");
        assert_eq!(entries.get("enabled").unwrap(), "false");
        assert_eq!(entries.get("missing").unwrap(), "null");
    }

    #[test]
    fn test_base_path_prefixes_every_key() {
        let node = Node::from(json!({"open": "Open"}));
        let entries = flatten(&node, "menu");
        assert_eq!(entries.get("menu.open").unwrap(), "Open");
    }

    #[test]
    fn test_exclusion_applies_to_top_level_only() {
        let entries = flatten_excluding(
            &Node::from(json!({
                "language": "English",
                "app": {"language": "kept", "x": {"language": "also kept"}}
            })),
            "",
            &["language"],
        );
        assert!(!entries.contains_key("language"));
        assert_eq!(entries.get("app.language").unwrap(), "kept");
        assert_eq!(entries.get("app.x.language").unwrap(), "also kept");
    }

    #[test]
    fn test_exclusion_is_case_insensitive() {
        let entries = flatten_excluding(
            &Node::from(json!({"Language": "English", "greeting": "Hi"})),
            "",
            &["language"],
        );
        assert!(!entries.contains_key("Language"));
        assert_eq!(entries.get("greeting").unwrap(), "Hi");
    }

    #[test]
    fn test_flattening_is_idempotent() {
        let node = Node::from(json!({"a": {"b": ["x", {"c": "y"}]}}));
        let first = flatten(&node, "");
        let second = flatten(&node, "");
        assert_eq!(first, second);
        let keys: Vec<&String> = first.keys().collect();
        assert_eq!(keys, ["a.b[0]", "a.b[1].c"]);
    }
}
