//! Token data model
//!
//!     A token document is a tree of named groups whose leaves carry a `$value`. Flattening turns
//!     every leaf into a [TokenEntry] addressed by its path from the document root. Entries are
//!     built once per run and never mutated afterwards; everything downstream (the reference
//!     index, both resolution strategies and the emitters) borrows them.

use serde::Serialize;
use serde_json::{Number, Value};
use std::fmt;

/// The value carried by a token leaf.
///
/// Strings may embed references (`{Group.Name}`); numbers and every other JSON value are
/// literals. Composite values (shadow layers, typography objects) land in `Other` and are
/// emitted as compact JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TokenValue {
    Text(String),
    Number(Number),
    Other(Value),
}

impl TokenValue {
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => TokenValue::Text(s.clone()),
            Value::Number(n) => TokenValue::Number(n.clone()),
            other => TokenValue::Other(other.clone()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TokenValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for TokenValue {
    fn from(value: &str) -> Self {
        TokenValue::Text(value.to_string())
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Text(s) => f.write_str(s),
            TokenValue::Number(n) => write_number(f, n),
            TokenValue::Other(v) => write!(f, "{}", v),
        }
    }
}

/// Numbers print in their shortest form: `4.0` prints as `4`.
fn write_number(f: &mut fmt::Formatter<'_>, n: &Number) -> fmt::Result {
    if n.is_f64() {
        if let Some(x) = n.as_f64() {
            if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e15 {
                return write!(f, "{}", x as i64);
            }
            return write!(f, "{}", x);
        }
    }
    write!(f, "{}", n)
}

/// A single flattened token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenEntry {
    /// Segments from the document root to the leaf. Never empty.
    pub path: Vec<String>,
    pub value: TokenValue,
    /// The `$type` tag, used only to bias quoting.
    #[serde(rename = "type")]
    pub token_type: Option<String>,
    pub description: Option<String>,
}

impl TokenEntry {
    pub fn new(path: Vec<String>, value: TokenValue) -> Self {
        debug_assert!(!path.is_empty(), "token path must not be empty");
        Self {
            path,
            value,
            token_type: None,
            description: None,
        }
    }

    pub fn with_type(mut self, token_type: impl Into<String>) -> Self {
        self.token_type = Some(token_type.into());
        self
    }

    /// The root category (first path segment), used for bundle partitioning.
    pub fn root(&self) -> &str {
        self.path.first().map(String::as_str).unwrap_or_default()
    }

    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }

    pub fn type_tag(&self) -> Option<&str> {
        self.token_type.as_deref()
    }
}
