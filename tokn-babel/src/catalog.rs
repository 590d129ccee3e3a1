//! Token catalog
//!
//!     The structured view documentation pages consume: the concatenated alias-preserving file read
//!     back into sections and groups of entries with resolved values. Produced by the `scss`
//!     format's parser (see `formats/scss/parser.rs`).

use serde::Serialize;

/// One declaration read back from emitted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub section: String,
    pub group: String,
    /// Identifier without the `$` sigil.
    pub name: String,
    /// Identifier with the sigil, e.g. `$primaryBase`.
    pub variable: String,
    /// Best-effort resolved value. Unresolvable aliases are left as written.
    pub value: String,
    pub raw_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenGroup {
    pub name: String,
    pub tokens: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub name: String,
    pub groups: Vec<TokenGroup>,
}

/// Sections in first-seen order, each with its groups in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenCatalog {
    sections: Vec<Section>,
}

impl TokenCatalog {
    /// Read emitted alias-format text. Never fails; see `formats::scss::parser`.
    pub fn parse(source: &str, banner: &str) -> Self {
        crate::formats::scss::parser::read_catalog(source, banner)
    }

    pub(crate) fn push(&mut self, entry: CatalogEntry) {
        let pos = match self.sections.iter().position(|s| s.name == entry.section) {
            Some(pos) => pos,
            None => {
                self.sections.push(Section {
                    name: entry.section.clone(),
                    groups: Vec::new(),
                });
                self.sections.len() - 1
            }
        };
        let section = &mut self.sections[pos];
        match section.groups.iter_mut().find(|g| g.name == entry.group) {
            Some(group) => group.tokens.push(entry),
            None => section.groups.push(TokenGroup {
                name: entry.group.clone(),
                tokens: vec![entry],
            }),
        }
    }

    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    /// Groups of a section; empty for unknown sections.
    pub fn section(&self, name: &str) -> &[TokenGroup] {
        self.sections
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.groups.as_slice())
            .unwrap_or_default()
    }

    /// Every entry, section by section and group by group.
    pub fn all_tokens(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.sections
            .iter()
            .flat_map(|s| s.groups.iter())
            .flat_map(|g| g.tokens.iter())
    }

    /// Exact lookup; `variable` may omit the `$`.
    pub fn find_token(&self, variable: &str) -> Option<&CatalogEntry> {
        let wanted = with_sigil(variable);
        self.all_tokens().find(|t| t.variable == wanted)
    }

    /// Prefix lookup; `prefix` may omit the `$`.
    pub fn find_tokens_by_prefix(&self, prefix: &str) -> Vec<&CatalogEntry> {
        let wanted = with_sigil(prefix);
        self.all_tokens()
            .filter(|t| t.variable.starts_with(&wanted))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.all_tokens().count()
    }

    pub fn is_empty(&self) -> bool {
        self.all_tokens().next().is_none()
    }
}

fn with_sigil(name: &str) -> String {
    if name.starts_with('$') {
        name.to_string()
    } else {
        format!("${}", name)
    }
}
