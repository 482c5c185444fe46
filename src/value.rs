//! Generic document tree shared by all format parsers.
//!
//! Every source format is adapted into [`Node`] before flattening, so key
//! derivation lives in one place instead of one recursive walker per format.
//! Object children use [`IndexMap`] to preserve document order.

use indexmap::IndexMap;

/// A structured document: named children, ordered children, or a leaf.
///
/// Scalar text carries the stringified leaf value: strings keep their
/// original text, numbers their literal text, booleans `true`/`false`,
/// null `null`.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Object(IndexMap<String, Node>),
    Array(Vec<Node>),
    Scalar(String),
}

impl Node {
    /// Returns the named children if this node is an object.
    pub fn as_object(&self) -> Option<&IndexMap<String, Node>> {
        match self {
            Node::Object(children) => Some(children),
            _ => None,
        }
    }

    /// Returns the leaf text if this node is a scalar.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Node::Scalar(text) => Some(text),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Node::Scalar("null".to_string()),
            serde_json::Value::Bool(flag) => Node::Scalar(flag.to_string()),
            serde_json::Value::Number(number) => Node::Scalar(number.to_string()),
            serde_json::Value::String(text) => Node::Scalar(text),
            serde_json::Value::Array(items) => {
                Node::Array(items.into_iter().map(Node::from).collect())
            }
            serde_json::Value::Object(fields) => Node::Object(
                fields
                    .into_iter()
                    .map(|(name, child)| (name, Node::from(child)))
                    .collect(),
            ),
        }
    }
}
