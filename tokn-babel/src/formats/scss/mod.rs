//! Alias-preserving stylesheet variable format
//!
//! Data Model:
//!
//!     | Token                    | SCSS                                   |
//!     |--------------------------|----------------------------------------|
//!     | literal                  | `$name: value;` (quoted when required) |
//!     | value is `{Other}`       | `$name: $other;`                       |
//!     | value mixes references   | `$name: "#{$other} text";`             |
//!     | second path segment      | `// Section` comment between runs      |
//!
//!     SCSS has no hoisting, so a variable must be declared before any variable that reads it.
//!     Each bundle is written base tokens first, aliases second. Across bundles the same rule is
//!     kept by the concatenation order of the build.
//!
//! Parsing:
//!
//!     The format can read its own output back into a [TokenCatalog] for documentation pages.
//!     The reader is lenient by construction; see [parser].

pub mod parser;
pub mod serializer;

use crate::catalog::TokenCatalog;
use crate::error::FormatError;
use crate::format::{Bundle, EmitContext, Format};
use serializer::ScssSerializer;

pub struct ScssFormat {
    banner: String,
}

impl ScssFormat {
    pub fn new(banner: impl Into<String>) -> Self {
        Self {
            banner: banner.into(),
        }
    }
}

impl Default for ScssFormat {
    fn default() -> Self {
        Self::new(crate::DEFAULT_BANNER)
    }
}

impl Format for ScssFormat {
    fn name(&self) -> &str {
        "scss"
    }

    fn description(&self) -> &str {
        "SCSS variables with symbolic aliases"
    }

    fn file_extension(&self) -> &str {
        "scss"
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<TokenCatalog, FormatError> {
        Ok(TokenCatalog::parse(source, &self.banner))
    }

    fn serialize(
        &self,
        bundle: &Bundle<'_>,
        ctx: &mut EmitContext<'_>,
    ) -> Result<String, FormatError> {
        Ok(ScssSerializer::new(&self.banner).serialize(
            bundle.title,
            &bundle.tokens,
            ctx.index,
            ctx.generated_at,
        )?)
    }
}
