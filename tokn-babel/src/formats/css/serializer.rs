use crate::common::emission_order;
use tokn_core::quoting::{quote, should_quote_flat};
use tokn_core::{ReferenceIndex, ResolutionCache, ResolveError, TokenEntry, TokenValue};

const INDENT: &str = "  ";

pub struct CssSerializer<'b> {
    banner: &'b str,
}

impl<'b> CssSerializer<'b> {
    pub fn new(banner: &'b str) -> Self {
        Self { banner }
    }

    pub fn serialize(
        &self,
        title: &str,
        tokens: &[&TokenEntry],
        index: &ReferenceIndex<'_>,
        cache: &mut ResolutionCache,
    ) -> Result<String, ResolveError> {
        let mut lines = vec![
            format!("/* {} - {} (CSS) */", self.banner, title),
            ":root {".to_string(),
        ];

        for named in emission_order(tokens) {
            let resolved = cache.resolve(named.token, index)?;
            lines.push(format!(
                "{}{}: {};",
                INDENT,
                named.names.flat_property(),
                format_value(named.token, &resolved)
            ));
        }

        lines.push("}".to_string());
        lines.push(String::new());
        Ok(lines.join("\n"))
    }
}

/// Apply the flattened quoting rule. The owning token's type decides, not the target's.
fn format_value(token: &TokenEntry, resolved: &TokenValue) -> String {
    match resolved {
        TokenValue::Text(text) if should_quote_flat(text, token.type_tag()) => quote(text),
        other => other.to_string(),
    }
}
