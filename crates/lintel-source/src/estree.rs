//! Loading parser output in ESTree JSON form.
//!
//! The root object must carry `tokens`, `comments`, `loc` and `range`; every
//! node must carry `range` and `loc`. Child nodes are discovered structurally:
//! any object (or array element) with a string `type` property. A `null`
//! array element is an elided element and is counted as a hole.

use lintel_syntax::{Ast, NodeKind, SourceLocation, Token, TreeBuilder, UnknownNodeKind};
use serde::Deserialize;
use serde_json::{Map, Value};
use text_size::{TextRange, TextSize};
use tracing::debug;

use crate::{SourceCode, SourceCodeError};

/// Properties that never hold child nodes.
const NON_CHILD_KEYS: &[&str] = &[
    "type",
    "range",
    "loc",
    "start",
    "end",
    "tokens",
    "comments",
    "parent",
    "leadingComments",
    "trailingComments",
    "innerComments",
];

/// A node decoded from JSON, before it is placed in the arena.
struct RawNode {
    kind: NodeKind,
    range: TextRange,
    loc: SourceLocation,
    children: Vec<RawNode>,
    holes: u32,
}

fn field<'a>(
    object: &'a Map<String, Value>,
    name: &'static str,
) -> Result<&'a Value, SourceCodeError> {
    object
        .get(name)
        .filter(|value| !value.is_null())
        .ok_or(SourceCodeError::MissingData { field: name })
}

fn decode_range(object: &Map<String, Value>) -> Result<TextRange, SourceCodeError> {
    let [start, end] = <[u32; 2]>::deserialize(field(object, "range")?)?;
    Ok(TextRange::new(TextSize::new(start), TextSize::new(end)))
}

fn decode_loc(object: &Map<String, Value>) -> Result<SourceLocation, SourceCodeError> {
    Ok(SourceLocation::deserialize(field(object, "loc")?)?)
}

fn node_object(value: &Value) -> Option<&Map<String, Value>> {
    value.as_object().filter(|object| object.get("type").is_some_and(Value::is_string))
}

fn decode_node(object: &Map<String, Value>) -> Result<RawNode, SourceCodeError> {
    let tag = object.get("type").and_then(Value::as_str).unwrap_or_default();
    let kind = tag
        .parse::<NodeKind>()
        .map_err(|UnknownNodeKind(tag)| SourceCodeError::UnknownNodeType { tag })?;
    let range = decode_range(object)?;
    let loc = decode_loc(object)?;

    let mut children = Vec::new();
    let mut holes = 0;
    for (key, value) in object {
        if NON_CHILD_KEYS.contains(&key.as_str()) {
            continue;
        }
        match value {
            Value::Array(items) => {
                for item in items {
                    if item.is_null() {
                        holes += 1;
                    } else if let Some(child) = node_object(item) {
                        children.push(decode_node(child)?);
                    }
                }
            }
            value => {
                if let Some(child) = node_object(value) {
                    children.push(decode_node(child)?);
                }
            }
        }
    }
    children.sort_by_key(|child| child.range.start());

    Ok(RawNode { kind, range, loc, children, holes })
}

fn build(builder: &mut TreeBuilder, node: &RawNode) {
    builder.start_node(node.kind, node.range, node.loc);
    builder.add_holes(node.holes);
    for child in &node.children {
        build(builder, child);
    }
    builder.finish_node();
}

impl SourceCode {
    /// Builds the facade from an ESTree program serialized as JSON.
    pub fn from_estree_json(text: &str, json: &str) -> Result<Self, SourceCodeError> {
        let root: Map<String, Value> = serde_json::from_str(json)?;

        let tokens = Vec::<Token>::deserialize(field(&root, "tokens")?)?;
        let comments = Vec::<Token>::deserialize(field(&root, "comments")?)?;
        decode_loc(&root)?;
        decode_range(&root)?;

        let program = decode_node(&root)?;
        let mut builder = TreeBuilder::new();
        build(&mut builder, &program);
        let tree = builder.finish();
        debug!(nodes = tree.len(), "decoded ESTree program");

        Self::new(text, Ast::new(tree, Some(tokens), Some(comments)))
    }
}
