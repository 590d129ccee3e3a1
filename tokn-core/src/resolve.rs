//! Reference resolution
//!
//!     Two strategies share one reference graph:
//!
//!     Alias-preserving ([resolve_alias])
//!         A value that is exactly one reference becomes the referenced token's camel variable
//!         (`$primaryBase`), keeping alias chains symbolic. Mixed or multiple references are
//!         interpolated (`"#{$spacingMd} solid"`) and quoted. Reference-free values go through
//!         the alias quoting rule.
//!
//!     Literal ([ResolutionCache::resolve])
//!         Every reference is replaced by the fully resolved literal of its target, transitively.
//!         Results are memoized per token path. An in-flight set keyed by token path detects
//!         cycles: reaching a token that is still being resolved fails with
//!         [ResolveError::Circular].
//!
//!     A missing reference is fatal in both strategies.

use crate::error::ResolveError;
use crate::index::ReferenceIndex;
use crate::naming;
use crate::quoting::{quote, should_quote_alias};
use crate::reference::{references, replace_references, sole_reference, try_replace_references};
use crate::token::{TokenEntry, TokenValue};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A value rendered for the alias-preserving format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasValue {
    /// A bare variable pointing at another token, e.g. `$primaryBase`.
    Alias(String),
    /// Anything else, quoted when the rules require it.
    Literal(String),
}

impl AliasValue {
    pub fn as_str(&self) -> &str {
        match self {
            AliasValue::Alias(s) | AliasValue::Literal(s) => s,
        }
    }

    pub fn is_alias(&self) -> bool {
        matches!(self, AliasValue::Alias(_))
    }
}

impl fmt::Display for AliasValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render `token`'s value for the alias-preserving format.
pub fn resolve_alias(
    token: &TokenEntry,
    index: &ReferenceIndex<'_>,
) -> Result<AliasValue, ResolveError> {
    let raw = match &token.value {
        TokenValue::Text(raw) => raw,
        other => return Ok(AliasValue::Literal(other.to_string())),
    };

    if references(raw).is_empty() {
        return Ok(if should_quote_alias(raw, token.type_tag()) {
            AliasValue::Literal(quote(raw))
        } else {
            AliasValue::Literal(raw.clone())
        });
    }

    if let Some(key) = sole_reference(raw) {
        let target = index.get(key)?;
        return Ok(AliasValue::Alias(naming::alias_variable(&target.path)));
    }

    let interpolated = try_replace_references(raw, |key| {
        let target = index.get(key)?;
        Ok::<_, ResolveError>(format!("#{{{}}}", naming::alias_variable(&target.path)))
    })?;
    Ok(AliasValue::Literal(quote(&interpolated)))
}

/// Memoized literal resolution with cycle detection.
///
/// One cache may be shared by every flattened-format bundle of a single run so shared base
/// tokens are resolved once. Never share a cache across runs: it holds results for one
/// particular document.
///
/// Resolution walks the reference graph with an explicit work stack, so chain length is bounded
/// by memory rather than by the thread's stack.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    resolved: HashMap<Vec<String>, TokenValue>,
    /// Paths on the current work stack. Empty between calls.
    in_flight: HashSet<Vec<String>>,
    hits: usize,
}

/// A token whose references are being resolved, one at a time, left to right.
struct Frame<'t> {
    token: &'t TokenEntry,
    keys: Vec<&'t str>,
    /// Resolved literals for `keys[..parts.len()]`.
    parts: Vec<String>,
}

impl<'t> Frame<'t> {
    fn pending_key(&self) -> Option<&'t str> {
        self.keys.get(self.parts.len()).copied()
    }

    fn finish(&self) -> TokenValue {
        match &self.token.value {
            TokenValue::Text(raw) => {
                let mut parts = self.parts.iter();
                TokenValue::Text(replace_references(raw, |_| {
                    parts.next().cloned().unwrap_or_default()
                }))
            }
            literal => literal.clone(),
        }
    }
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fully resolve `token`'s value, substituting every reference with its literal.
    pub fn resolve<'t>(
        &mut self,
        token: &'t TokenEntry,
        index: &ReferenceIndex<'t>,
    ) -> Result<TokenValue, ResolveError> {
        if let Some(done) = self.resolved.get(&token.path) {
            self.hits += 1;
            return Ok(done.clone());
        }

        let result = self.walk(token, index);
        if result.is_err() {
            self.in_flight.clear();
        }
        result
    }

    fn enter<'t>(&mut self, token: &'t TokenEntry) -> Frame<'t> {
        self.in_flight.insert(token.path.clone());
        let keys = match &token.value {
            TokenValue::Text(raw) => references(raw),
            _ => Vec::new(),
        };
        Frame {
            token,
            keys,
            parts: Vec::new(),
        }
    }

    fn walk<'t>(
        &mut self,
        token: &'t TokenEntry,
        index: &ReferenceIndex<'t>,
    ) -> Result<TokenValue, ResolveError> {
        let mut current = self.enter(token);
        let mut waiting: Vec<Frame<'t>> = Vec::new();

        loop {
            if let Some(key) = current.pending_key() {
                let target = index.get(key)?;
                if let Some(done) = self.resolved.get(&target.path) {
                    self.hits += 1;
                    current.parts.push(done.to_string());
                } else if self.in_flight.contains(&target.path) {
                    return Err(ResolveError::Circular {
                        path: target.dotted_path(),
                    });
                } else {
                    let child = self.enter(target);
                    waiting.push(std::mem::replace(&mut current, child));
                }
                continue;
            }

            let value = current.finish();
            self.in_flight.remove(&current.token.path);
            self.resolved
                .insert(current.token.path.clone(), value.clone());

            match waiting.pop() {
                Some(parent) => {
                    current = parent;
                    current.parts.push(value.to_string());
                }
                None => return Ok(value),
            }
        }
    }

    /// Number of tokens resolved so far.
    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }

    /// Number of lookups answered from the cache.
    pub fn hits(&self) -> usize {
        self.hits
    }
}

/// Resolve one token with a throwaway cache.
pub fn resolve_literal<'t>(
    token: &'t TokenEntry,
    index: &ReferenceIndex<'t>,
) -> Result<TokenValue, ResolveError> {
    ResolutionCache::new().resolve(token, index)
}
