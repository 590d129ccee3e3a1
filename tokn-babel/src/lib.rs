//! Output formats and builds for design-token documents
//!
//!     This crate turns the resolved token graph of `tokn-core` into stylesheet text, and reads
//!     emitted text back into a catalog for documentation tooling.
//!
//! Architecture
//!
//!     - Format trait: uniform interface for every output format (parsing and/or serialization)
//!     - FormatRegistry: discovery and selection of formats by name
//!     - Format implementations: `scss` (alias-preserving, parse and serialize) and `css`
//!       (flattened, serialize only)
//!     - build: splits a document into bundles and runs every format over each, in memory
//!     - publish: replaces the output tree with a finished build
//!
//!     This is a pure lib: it powers tokn-cli but supposes no shell. Nothing here prints, reads
//!     environment variables or exits; progress is reported through `tracing`.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait, Bundle and EmitContext
//!     ├── registry.rs             # FormatRegistry
//!     ├── catalog.rs              # TokenCatalog, the parsed view of alias-format text
//!     ├── build.rs                # bundle orchestration
//!     ├── publish.rs              # writing a build to disk
//!     ├── common                  # emission order shared by both formats
//!     ├── formats
//!     │   ├── scss
//!     │   │   ├── parser.rs
//!     │   │   ├── serializer.rs
//!     │   │   └── mod.rs
//!     │   └── css
//!     │       ├── serializer.rs
//!     │       └── mod.rs
//!     └── lib.rs
//!
//! Round tripping
//!
//!     The alias format can be read back, but not into a token document: the catalog keeps
//!     sections, groups, identifiers and resolved values. Paths, types and descriptions are gone
//!     once text has been emitted.

pub mod build;
pub mod catalog;
pub mod common;
pub mod error;
pub mod format;
pub mod formats;
pub mod publish;
pub mod registry;

/// Prefix of every generated header comment.
pub const DEFAULT_BANNER: &str = "BUILD DESIGN SYSTEM";

pub use build::{
    build, build_source, BuildOptions, BuildOutput, BuildSettings, BundleReport, BundleSpec,
    ManifestSpec, OutputFile,
};
pub use catalog::{CatalogEntry, Section, TokenCatalog, TokenGroup};
pub use error::{BuildError, FormatError};
pub use format::{Bundle, EmitContext, Format};
pub use publish::{publish, OutputLayout};
pub use registry::FormatRegistry;
