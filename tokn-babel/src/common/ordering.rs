//! Emission order
//!
//! Both formats emit a bundle sorted by kebab identifier, ties broken by dotted path. Plain
//! byte-wise ordering keeps the result independent of locale.

use tokn_core::{derive, DerivedNames, TokenEntry};

/// A token paired with its derived identifiers.
#[derive(Debug, Clone)]
pub struct NamedToken<'a> {
    pub token: &'a TokenEntry,
    pub names: DerivedNames,
}

impl<'a> NamedToken<'a> {
    pub fn new(token: &'a TokenEntry) -> Self {
        Self {
            token,
            names: derive(&token.path),
        }
    }

    /// The comment section this token is grouped under in the alias format.
    pub fn section(&self) -> &'a str {
        let token: &'a TokenEntry = self.token;
        let path = &token.path;
        path.get(1).or_else(|| path.first()).map(String::as_str).unwrap_or_default()
    }
}

/// Derive names once per token and sort for emission.
pub fn emission_order<'a>(tokens: &[&'a TokenEntry]) -> Vec<NamedToken<'a>> {
    let mut named: Vec<_> = tokens
        .iter()
        .map(|&token| (token.dotted_path(), NamedToken::new(token)))
        .collect();
    named.sort_by(|(a_path, a), (b_path, b)| {
        a.names
            .kebab
            .cmp(&b.names.kebab)
            .then_with(|| a_path.cmp(b_path))
    });
    named.into_iter().map(|(_, named)| named).collect()
}
