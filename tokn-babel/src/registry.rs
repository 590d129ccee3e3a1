//! Format registry for format discovery and selection
//!
//! This module provides a centralized registry for all available formats.
//! Formats can be registered and retrieved by name.

use crate::catalog::TokenCatalog;
use crate::error::FormatError;
use crate::format::{Bundle, EmitContext, Format};
use crate::formats::{CssFormat, ScssFormat};
use std::collections::HashMap;

/// Registry of token formats
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::with_defaults();
///
/// let scss = registry.serialize(&bundle, &mut ctx, "scss")?;
/// let catalog = registry.parse(&scss, "scss")?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format
    ///
    /// If a format with the same name already exists, it will be replaced.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Parse emitted text using the specified format
    pub fn parse(&self, source: &str, format: &str) -> Result<TokenCatalog, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_parsing() {
            return Err(FormatError::NotSupported(format!(
                "Format '{}' does not support parsing",
                format
            )));
        }
        fmt.parse(source)
    }

    /// Serialize a bundle using the specified format
    pub fn serialize(
        &self,
        bundle: &Bundle<'_>,
        ctx: &mut EmitContext<'_>,
        format: &str,
    ) -> Result<String, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_serialization() {
            return Err(FormatError::NotSupported(format!(
                "Format '{}' does not support serialization",
                format
            )));
        }
        fmt.serialize(bundle, ctx)
    }

    /// Create a registry with the built-in formats and the default banner
    pub fn with_defaults() -> Self {
        Self::with_banner(crate::DEFAULT_BANNER)
    }

    /// Create a registry with the built-in formats, writing `banner` into generated headers
    pub fn with_banner(banner: &str) -> Self {
        let mut registry = Self::new();
        registry.register(ScssFormat::new(banner));
        registry.register(CssFormat::new(banner));
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokn_core::{ReferenceIndex, ResolutionCache, TokenEntry};

    // Test format
    struct TestFormat;
    impl Format for TestFormat {
        fn name(&self) -> &str {
            "test"
        }
        fn description(&self) -> &str {
            "Test format"
        }
        fn file_extension(&self) -> &str {
            "txt"
        }
        fn supports_serialization(&self) -> bool {
            true
        }
        fn serialize(
            &self,
            bundle: &Bundle<'_>,
            _ctx: &mut EmitContext<'_>,
        ) -> Result<String, FormatError> {
            Ok(format!("{} tokens", bundle.len()))
        }
    }

    fn serialize_empty(registry: &FormatRegistry, format: &str) -> Result<String, FormatError> {
        let tokens: Vec<TokenEntry> = Vec::new();
        let index = ReferenceIndex::build(&tokens, &[] as &[&str]);
        let mut cache = ResolutionCache::new();
        let mut ctx = EmitContext {
            index: &index,
            cache: &mut cache,
            generated_at: "now",
        };
        registry.serialize(&Bundle::new("Empty", Vec::new()), &mut ctx, format)
    }

    #[test]
    fn test_registry_creation() {
        let registry = FormatRegistry::new();
        assert_eq!(registry.formats.len(), 0);
    }

    #[test]
    fn test_registry_register() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat);

        assert!(registry.has("test"));
        assert_eq!(registry.list_formats(), vec!["test"]);
    }

    #[test]
    fn test_registry_get_nonexistent() {
        let registry = FormatRegistry::new();
        match registry.get("nonexistent") {
            Err(FormatError::FormatNotFound(name)) => assert_eq!(name, "nonexistent"),
            _ => panic!("Expected FormatNotFound error"),
        }
    }

    #[test]
    fn test_registry_serialize() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat);
        assert_eq!(serialize_empty(&registry, "test").unwrap(), "0 tokens");
    }

    #[test]
    fn test_registry_parse_not_supported() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat);

        let result = registry.parse("input", "test");
        assert!(matches!(result, Err(FormatError::NotSupported(_))));
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = FormatRegistry::with_defaults();
        assert_eq!(registry.list_formats(), vec!["css", "scss"]);
        assert!(registry.get("scss").unwrap().supports_parsing());
        assert!(!registry.get("css").unwrap().supports_parsing());
        assert!(registry.parse("", "css").is_err());
    }

    #[test]
    fn test_registry_replace_format() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat);
        registry.register(TestFormat); // Replace

        assert_eq!(registry.list_formats().len(), 1);
    }
}
