//! Error types for document loading and reference resolution
//!
//! Both resolution errors are fatal for a build: they mean the source document is malformed.

use thiserror::Error;

/// Reasons a reference cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No token is registered under the reference key. Carries the raw text between braces.
    #[error("Unable to resolve token reference: {reference}")]
    Unresolvable { reference: String },

    /// Resolving the token's literal value requires the token itself.
    #[error("Circular token reference detected for {path}")]
    Circular { path: String },
}

/// Problems with the token document itself.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Invalid token document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Token document root must be an object, found {0}")]
    NotAnObject(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let err = ResolveError::Unresolvable {
            reference: "Color.Missing".into(),
        };
        assert_eq!(
            err.to_string(),
            "Unable to resolve token reference: Color.Missing"
        );

        let err = ResolveError::Circular {
            path: "Theme.Accent".into(),
        };
        assert!(err.to_string().contains("Theme.Accent"));
    }
}
