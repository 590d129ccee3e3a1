//! Bundle orchestration
//!
//!     A build turns one token document into every output file, entirely in memory:
//!
//!     1. flatten the document and index it once
//!     2. for each configured bundle, select the tokens whose root category belongs to it
//!        (bundles with no tokens are skipped, no empty files) and run both formats
//!     3. concatenate the alias files in the configured dependency order
//!     4. write the manifest pointing at the concatenation and at every bundle file
//!
//!     One [ResolutionCache] serves every flattened bundle of the run, so base tokens shared by
//!     several bundles are resolved once. Nothing is written to disk here: a resolution failure
//!     anywhere aborts the build before any file exists. See [crate::publish] for writing.

use crate::error::BuildError;
use crate::format::{Bundle, EmitContext};
use crate::registry::FormatRegistry;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tokn_core::{parse_document, ReferenceIndex, ResolutionCache, TokenEntry};
use tracing::{debug, info};

const ALIAS_FORMAT: &str = "scss";
const FLAT_FORMAT: &str = "css";

/// One named output bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleSpec {
    pub title: String,
    /// Root categories whose tokens belong to this bundle.
    pub roots: Vec<String>,
    pub alias_file: String,
    pub flat_file: String,
}

impl BundleSpec {
    pub fn new(title: &str, roots: &[&str], alias_file: &str, flat_file: &str) -> Self {
        Self {
            title: title.to_string(),
            roots: roots.iter().map(|r| r.to_string()).collect(),
            alias_file: alias_file.to_string(),
            flat_file: flat_file.to_string(),
        }
    }

    fn selects(&self, token: &TokenEntry) -> bool {
        self.roots.iter().any(|root| root == token.root())
    }
}

/// The alternate bundle advertised (commented out) in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSpec {
    pub file: String,
    pub alternate: String,
    pub replaces: String,
    pub label: String,
}

/// Everything a build needs besides the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSettings {
    pub banner: String,
    pub bundles: Vec<BundleSpec>,
    pub short_key_roots: Vec<String>,
    pub concat_file: String,
    pub concat_title: String,
    /// Alias files in the order they are concatenated. Referenced bundles come first.
    pub concat_order: Vec<String>,
    pub manifest: ManifestSpec,
}

impl Default for BuildSettings {
    fn default() -> Self {
        let bundles = vec![
            BundleSpec::new("Foundations", &["Foundations"], "_foundations.scss", "foundations.css"),
            BundleSpec::new("Light Tokens", &["Tokens/Light"], "tokens-light.scss", "tokens-light.css"),
            BundleSpec::new("Dark Tokens", &["Tokens/Dark"], "tokens-dark.scss", "tokens-dark.css"),
            BundleSpec::new("Theme", &["Theme"], "_theme.scss", "theme.css"),
            BundleSpec::new("Radius", &["Radius"], "_radius.scss", "radius.css"),
            BundleSpec::new("Spacing", &["Spacing"], "_spacing.scss", "spacing.css"),
            BundleSpec::new("Typography", &["Typography"], "_typography.scss", "typography.css"),
            BundleSpec::new("Elevation", &["Elevation"], "_elevation.scss", "elevation.css"),
            BundleSpec::new("Breakpoints", &["Breakpoints"], "_breakpoints.scss", "breakpoints.css"),
            BundleSpec::new("Animation", &["Animation"], "_animation.scss", "animation.css"),
            BundleSpec::new("Z-Index", &["Z-Index"], "_z-index.scss", "z-index.css"),
        ];
        let short_key_roots = [
            "Foundations",
            "Theme",
            "Radius",
            "Spacing",
            "Typography",
            "Animation",
            "Breakpoints",
            "Z-Index",
            "Elevation",
        ];
        let concat_order = [
            "_foundations.scss",
            "tokens-light.scss",
            "_theme.scss",
            "_radius.scss",
            "_spacing.scss",
            "_typography.scss",
            "_elevation.scss",
            "_breakpoints.scss",
            "_animation.scss",
            "_z-index.scss",
        ];
        Self {
            banner: crate::DEFAULT_BANNER.to_string(),
            bundles,
            short_key_roots: short_key_roots.iter().map(|s| s.to_string()).collect(),
            concat_file: "_all.scss".to_string(),
            concat_title: "All Tokens (Light Mode)".to_string(),
            concat_order: concat_order.iter().map(|s| s.to_string()).collect(),
            manifest: ManifestSpec {
                file: "_index.scss".to_string(),
                alternate: "tokens-dark.scss".to_string(),
                replaces: "tokens-light.scss".to_string(),
                label: "dark semantic tokens".to_string(),
            },
        }
    }
}

/// Per-run knobs that are not configuration.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Timestamp written into headers. Defaults to the current UTC time.
    pub generated_at: Option<String>,
}

impl BuildOptions {
    pub fn at(generated_at: impl Into<String>) -> Self {
        Self {
            generated_at: Some(generated_at.into()),
        }
    }

    fn timestamp(&self) -> String {
        self.generated_at
            .clone()
            .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputFile {
    pub name: String,
    pub contents: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleReport {
    pub title: String,
    pub tokens: usize,
}

/// All files of one build, in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildOutput {
    /// Per-bundle alias files, then the concatenation, then the manifest.
    pub alias_files: Vec<OutputFile>,
    pub flat_files: Vec<OutputFile>,
    pub bundles: Vec<BundleReport>,
    pub generated_at: String,
}

impl BuildOutput {
    pub fn alias_file(&self, name: &str) -> Option<&str> {
        find_file(&self.alias_files, name)
    }

    pub fn flat_file(&self, name: &str) -> Option<&str> {
        find_file(&self.flat_files, name)
    }
}

fn find_file<'a>(files: &'a [OutputFile], name: &str) -> Option<&'a str> {
    files
        .iter()
        .find(|f| f.name == name)
        .map(|f| f.contents.as_str())
}

/// Parse a JSON token document and build it.
pub fn build_source(
    source: &str,
    settings: &BuildSettings,
    options: &BuildOptions,
) -> Result<BuildOutput, BuildError> {
    let tokens = parse_document(source)?;
    build(&tokens, settings, options)
}

/// Build every output file for flattened `tokens`.
pub fn build(
    tokens: &[TokenEntry],
    settings: &BuildSettings,
    options: &BuildOptions,
) -> Result<BuildOutput, BuildError> {
    let generated_at = options.timestamp();
    let registry = FormatRegistry::with_banner(&settings.banner);
    let index = ReferenceIndex::build(tokens, &settings.short_key_roots);
    let mut cache = ResolutionCache::new();
    debug!(tokens = tokens.len(), keys = index.len(), "indexed token document");

    let mut output = BuildOutput {
        alias_files: Vec::new(),
        flat_files: Vec::new(),
        bundles: Vec::new(),
        generated_at: generated_at.clone(),
    };

    for spec in &settings.bundles {
        let selected: Vec<&TokenEntry> = tokens.iter().filter(|t| spec.selects(t)).collect();
        if selected.is_empty() {
            debug!(bundle = %spec.title, "no tokens, skipping bundle");
            continue;
        }
        info!(bundle = %spec.title, tokens = selected.len(), "building bundle");

        let bundle = Bundle::new(&spec.title, selected);
        let mut ctx = EmitContext {
            index: &index,
            cache: &mut cache,
            generated_at: &generated_at,
        };
        let alias = registry.serialize(&bundle, &mut ctx, ALIAS_FORMAT)?;
        let flat = registry.serialize(&bundle, &mut ctx, FLAT_FORMAT)?;

        output.alias_files.push(OutputFile {
            name: spec.alias_file.clone(),
            contents: alias,
        });
        output.flat_files.push(OutputFile {
            name: spec.flat_file.clone(),
            contents: flat,
        });
        output.bundles.push(BundleReport {
            title: spec.title.clone(),
            tokens: bundle.len(),
        });
    }
    debug!(
        resolved = cache.len(),
        cache_hits = cache.hits(),
        "literal resolution finished"
    );

    let concatenation = concatenate(&output.alias_files, settings, &generated_at);
    let manifest = manifest(settings, &generated_at);
    output.alias_files.push(OutputFile {
        name: settings.concat_file.clone(),
        contents: concatenation,
    });
    output.alias_files.push(OutputFile {
        name: settings.manifest.file.clone(),
        contents: manifest,
    });

    Ok(output)
}

/// The alias files in dependency order. Files the build skipped contribute an empty string.
fn concatenate(files: &[OutputFile], settings: &BuildSettings, generated_at: &str) -> String {
    let header = format!(
        "// {} - {}\n// Auto-generated on {}\n\n",
        settings.banner, settings.concat_title, generated_at
    );
    let body = settings
        .concat_order
        .iter()
        .map(|name| find_file(files, name).unwrap_or_default())
        .collect::<Vec<_>>()
        .join("\n");
    header + &body
}

fn manifest(settings: &BuildSettings, generated_at: &str) -> String {
    let forwards = settings
        .bundles
        .iter()
        .filter(|b| b.alias_file != settings.manifest.alternate)
        .map(|b| format!("@use './{}' as *;", file_stem(&b.alias_file)))
        .collect::<Vec<_>>()
        .join("\n// ");

    format!(
        "// {banner} - Generated SCSS Tokens\n\
         // Auto-generated on {generated_at}\n\
         \n\
         // Use this single file for all tokens\n\
         @use './{all}' as *;\n\
         \n\
         // Or use individual files (not recommended due to dependency issues):\n\
         // {forwards}\n\
         // To switch to {label}, replace {replaces} with:\n\
         // @use './{alternate}' as *;\n",
        banner = settings.banner,
        generated_at = generated_at,
        all = partial_name(&settings.concat_file),
        forwards = forwards,
        label = settings.manifest.label,
        replaces = file_stem(&settings.manifest.replaces),
        alternate = file_stem(&settings.manifest.alternate),
    )
}

fn file_stem(file: &str) -> &str {
    file.strip_suffix(".scss").unwrap_or(file)
}

/// SCSS resolves `./all` to the partial `_all.scss`.
fn partial_name(file: &str) -> &str {
    let stem = file_stem(file);
    stem.strip_prefix('_').unwrap_or(stem)
}
