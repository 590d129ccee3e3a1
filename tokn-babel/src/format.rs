//! Format trait definition
//!
//! This module defines the core Format trait that all output formats implement. A format turns
//! one bundle of resolved tokens into text and, optionally, reads its own output back into a
//! [TokenCatalog] for documentation pages.

use crate::catalog::TokenCatalog;
use crate::error::FormatError;
use tokn_core::{ReferenceIndex, ResolutionCache, TokenEntry};

/// The tokens of one output bundle, in flattening order.
#[derive(Debug, Clone)]
pub struct Bundle<'a> {
    pub title: &'a str,
    pub tokens: Vec<&'a TokenEntry>,
}

impl<'a> Bundle<'a> {
    pub fn new(title: &'a str, tokens: Vec<&'a TokenEntry>) -> Self {
        Self { title, tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Run-scoped state handed to serializers.
///
/// The index covers the whole document, not just the bundle, so cross-bundle references
/// resolve. The cache is shared by every bundle of one run.
pub struct EmitContext<'a> {
    pub index: &'a ReferenceIndex<'a>,
    pub cache: &'a mut ResolutionCache,
    /// Timestamp written into generated headers.
    pub generated_at: &'a str,
}

/// Trait for token output formats
///
/// # Examples
///
/// ```ignore
/// struct JsonFormat;
///
/// impl Format for JsonFormat {
///     fn name(&self) -> &str {
///         "json"
///     }
///
///     fn file_extension(&self) -> &str {
///         "json"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, bundle: &Bundle<'_>, ctx: &mut EmitContext<'_>) -> Result<String, FormatError> {
///         todo!()
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "scss", "css")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// Extension of the files this format writes, without the dot
    fn file_extension(&self) -> &str;

    /// Whether this format can read its own output back (source → TokenCatalog)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (Bundle → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse emitted text into a catalog.
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str) -> Result<TokenCatalog, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize one bundle.
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(
        &self,
        _bundle: &Bundle<'_>,
        _ctx: &mut EmitContext<'_>,
    ) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }
}
