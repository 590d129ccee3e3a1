//! Reference index
//!
//!     Maps normalized reference keys to token entries. Every entry is registered under its full
//!     dotted path (`spacing.small`); entries whose root category is short-key eligible are also
//!     registered with the root stripped (`small`), so references may omit the category.
//!
//!     Registration is insert-if-absent for each key independently: the first entry in document
//!     order owns a key and later duplicates are shadowed. The index is built once and never
//!     mutated afterwards.
//!
//!     Normalization collapses whitespace runs, treats `_` as a space, trims and lowercases, so
//!     `{Font_Size.Base}` and `{font size.base}` find the same token.

use crate::error::ResolveError;
use crate::token::TokenEntry;
use std::collections::{HashMap, HashSet};

/// Normalize reference text (or a dotted path) into a lookup key.
pub fn normalize_reference_key(key: &str) -> String {
    key.replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Lookup from normalized reference key to token.
#[derive(Debug)]
pub struct ReferenceIndex<'a> {
    keys: HashMap<String, &'a TokenEntry>,
}

impl<'a> ReferenceIndex<'a> {
    /// Register `tokens` in order. `short_key_roots` lists the root categories that may be
    /// referenced without their prefix.
    pub fn build<S: AsRef<str>>(tokens: &'a [TokenEntry], short_key_roots: &[S]) -> Self {
        let short_roots: HashSet<&str> = short_key_roots.iter().map(AsRef::as_ref).collect();
        let mut index = ReferenceIndex {
            keys: HashMap::with_capacity(tokens.len() * 2),
        };
        for token in tokens {
            index.insert_if_absent(token.path.join("."), token);
            if short_roots.contains(token.root()) && token.path.len() > 1 {
                index.insert_if_absent(token.path[1..].join("."), token);
            }
        }
        index
    }

    fn insert_if_absent(&mut self, raw_key: String, token: &'a TokenEntry) {
        self.keys
            .entry(normalize_reference_key(&raw_key))
            .or_insert(token);
    }

    /// Look up a raw reference (the text between braces).
    pub fn get(&self, reference: &str) -> Result<&'a TokenEntry, ResolveError> {
        self.keys
            .get(&normalize_reference_key(reference))
            .copied()
            .ok_or_else(|| ResolveError::Unresolvable {
                reference: reference.to_string(),
            })
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.keys.contains_key(&normalize_reference_key(reference))
    }

    /// Number of registered keys (full and short).
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
