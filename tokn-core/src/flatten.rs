//! Token flattener
//!
//!     Walks a nested token document depth-first, in source key order, and produces one
//!     [TokenEntry] per leaf. A node is a leaf when it is an object holding a `$value` key.
//!     Any key starting with `$` that is not inside a leaf is document metadata
//!     (`$themes`, `$metadata`, ...) and is skipped together with its subtree. Scalars found in
//!     interior position are not tokens and are ignored.

use crate::error::DocumentError;
use crate::token::{TokenEntry, TokenValue};
use serde_json::{Map, Value};

const VALUE_KEY: &str = "$value";
const TYPE_KEY: &str = "$type";
const DESCRIPTION_KEY: &str = "$description";
const METADATA_MARKER: char = '$';

/// Parse a JSON token document and flatten it.
pub fn parse_document(source: &str) -> Result<Vec<TokenEntry>, DocumentError> {
    let document: Value = serde_json::from_str(source)?;
    flatten_document(&document)
}

/// Flatten an already parsed document. The root must be an object.
pub fn flatten_document(document: &Value) -> Result<Vec<TokenEntry>, DocumentError> {
    match document {
        Value::Object(map) => Ok(flatten(map)),
        Value::Array(_) => Err(DocumentError::NotAnObject("an array")),
        Value::String(_) => Err(DocumentError::NotAnObject("a string")),
        Value::Number(_) => Err(DocumentError::NotAnObject("a number")),
        Value::Bool(_) => Err(DocumentError::NotAnObject("a boolean")),
        Value::Null => Err(DocumentError::NotAnObject("null")),
    }
}

/// Flatten the children of `node` into entries, in traversal order.
pub fn flatten(node: &Map<String, Value>) -> Vec<TokenEntry> {
    let mut entries = Vec::new();
    let mut path = Vec::new();
    walk(node, &mut path, &mut entries);
    entries
}

fn walk(node: &Map<String, Value>, path: &mut Vec<String>, entries: &mut Vec<TokenEntry>) {
    for (key, value) in node {
        if key.starts_with(METADATA_MARKER) {
            continue;
        }
        let Value::Object(child) = value else {
            continue;
        };

        path.push(key.clone());
        match child.get(VALUE_KEY) {
            Some(raw) => entries.push(leaf(path.clone(), raw, child)),
            None => walk(child, path, entries),
        }
        path.pop();
    }
}

fn leaf(path: Vec<String>, raw: &Value, node: &Map<String, Value>) -> TokenEntry {
    TokenEntry {
        path,
        value: TokenValue::from_json(raw),
        token_type: string_field(node, TYPE_KEY),
        description: string_field(node, DESCRIPTION_KEY),
    }
}

fn string_field(node: &Map<String, Value>, key: &str) -> Option<String> {
    node.get(key).and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(entries: &[TokenEntry]) -> Vec<String> {
        entries.iter().map(TokenEntry::dotted_path).collect()
    }

    #[test]
    fn test_flattens_in_source_order() {
        let entries = parse_document(
            r##"{
                "Theme": {
                    "Accent": { "$value": "{Theme.Base}" },
                    "Base": { "$value": "#335CFF", "$type": "color" }
                },
                "Spacing": { "Small": { "$value": "4", "$type": "spacing" } }
            }"##,
        )
        .unwrap();

        assert_eq!(
            paths(&entries),
            vec!["Theme.Accent", "Theme.Base", "Spacing.Small"]
        );
        assert_eq!(entries[1].type_tag(), Some("color"));
        assert_eq!(entries[0].type_tag(), None);
    }

    #[test]
    fn test_skips_metadata_keys() {
        let entries = parse_document(
            r##"{
                "$themes": [],
                "$metadata": { "tokenSetOrder": ["Foundations"] },
                "Foundations": {
                    "$description": "ignored here",
                    "Blue": { "50": { "$value": "#EBF1FF", "$description": "lightest" } }
                }
            }"##,
        )
        .unwrap();

        assert_eq!(paths(&entries), vec!["Foundations.Blue.50"]);
        assert_eq!(entries[0].description.as_deref(), Some("lightest"));
    }

    #[test]
    fn test_leaf_keeps_non_string_values() {
        let entries = parse_document(
            r#"{ "Z-Index": { "Modal": { "$value": 1000 } },
                 "Elevation": { "Sm": { "$value": [{ "x": 0, "y": 1 }], "$type": "boxShadow" } } }"#,
        )
        .unwrap();

        assert!(matches!(entries[0].value, TokenValue::Number(_)));
        assert!(matches!(entries[1].value, TokenValue::Other(_)));
    }

    #[test]
    fn test_ignores_interior_scalars() {
        let entries = parse_document(r#"{ "Spacing": { "note": "not a token", "X": { "$value": "1" } } }"#)
            .unwrap();
        assert_eq!(paths(&entries), vec!["Spacing.X"]);
    }

    #[test]
    fn test_rejects_non_object_root() {
        let err = parse_document("[1, 2]").unwrap_err();
        assert!(matches!(err, DocumentError::NotAnObject("an array")));
        assert!(matches!(
            parse_document("{ nope").unwrap_err(),
            DocumentError::Json(_)
        ));
    }
}
