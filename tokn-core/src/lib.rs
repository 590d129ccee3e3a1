//! # tokn-core
//!
//! Design token graph resolution.
//!
//! Pipeline
//!
//!     source document ─▶ [flatten] ─▶ [TokenEntry] list ─▶ [ReferenceIndex]
//!                                                             │
//!                         [naming] ◀── [resolve] (alias / literal) ◀┘
//!
//!     - flatten:   nested `$value` document to addressable entries, in source order
//!     - index:     normalized reference key to entry, with short keys for eligible roots
//!     - naming:    path to camel / kebab identifiers
//!     - resolve:   alias-preserving rendering and memoized literal resolution with cycle
//!                  detection
//!     - quoting:   the per-format quoting rules
//!
//!     Everything here is pure and run-scoped: indexes and caches are constructed by the caller
//!     and passed by reference, so independent runs (and tests) never share state. Emission and
//!     file layout live in `tokn-babel`.

pub mod error;
pub mod flatten;
pub mod index;
pub mod naming;
pub mod quoting;
pub mod reference;
pub mod resolve;
pub mod token;

pub use error::{DocumentError, ResolveError};
pub use flatten::{flatten_document, parse_document};
pub use index::{normalize_reference_key, ReferenceIndex};
pub use naming::{derive, DerivedNames};
pub use resolve::{resolve_alias, resolve_literal, AliasValue, ResolutionCache};
pub use token::{TokenEntry, TokenValue};
