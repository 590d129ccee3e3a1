//! Flattened custom property format
//!
//!     Every reference is resolved down to its literal, so the output has no inter-variable
//!     dependencies: one `:root` block of `--kebab-name: value;` declarations per bundle. Literal
//!     resolution goes through the run's shared [tokn_core::ResolutionCache], which is also
//!     where reference cycles surface as errors.

pub mod serializer;

use crate::error::FormatError;
use crate::format::{Bundle, EmitContext, Format};
use serializer::CssSerializer;

pub struct CssFormat {
    banner: String,
}

impl CssFormat {
    pub fn new(banner: impl Into<String>) -> Self {
        Self {
            banner: banner.into(),
        }
    }
}

impl Default for CssFormat {
    fn default() -> Self {
        Self::new(crate::DEFAULT_BANNER)
    }
}

impl Format for CssFormat {
    fn name(&self) -> &str {
        "css"
    }

    fn description(&self) -> &str {
        "CSS custom properties with fully resolved values"
    }

    fn file_extension(&self) -> &str {
        "css"
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(
        &self,
        bundle: &Bundle<'_>,
        ctx: &mut EmitContext<'_>,
    ) -> Result<String, FormatError> {
        Ok(CssSerializer::new(&self.banner).serialize(
            bundle.title,
            &bundle.tokens,
            ctx.index,
            ctx.cache,
        )?)
    }
}
