//! Shared configuration loader for the tokn toolchain.
//!
//! `defaults/tokn.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer project files on top of
//! those defaults via [`Loader`] before deserializing into [`ToknConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokn_babel::{BuildSettings, BundleSpec, ManifestSpec, OutputLayout};

const DEFAULT_TOML: &str = include_str!("../defaults/tokn.default.toml");

/// Top-level configuration consumed by tokn applications.
#[derive(Debug, Clone, Deserialize)]
pub struct ToknConfig {
    pub banner: String,
    pub paths: PathsConfig,
    pub references: ReferencesConfig,
    pub concat: ConcatConfig,
    pub manifest: ManifestConfig,
    pub theme: ThemeConfig,
    pub bundles: Vec<BundleConfig>,
}

/// Input document and output tree locations.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    pub tokens_file: PathBuf,
    pub build_root: PathBuf,
    pub alias_dir: PathBuf,
    pub flat_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReferencesConfig {
    pub short_key_roots: Vec<String>,
}

/// The all-in-one alias file.
#[derive(Debug, Clone, Deserialize)]
pub struct ConcatConfig {
    pub file: String,
    pub title: String,
    pub order: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManifestConfig {
    pub file: String,
    pub alternate: String,
    pub replaces: String,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BundleConfig {
    pub title: String,
    pub roots: Vec<String>,
    pub alias_file: String,
    pub flat_file: String,
}

/// Which variants downstream pages treat as active. The build itself ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ThemeConfig {
    pub color_mode: ColorMode,
    pub neutral_mode: NeutralMode,
    pub theme_mode: ThemeMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorMode {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NeutralMode {
    Gray,
    Slate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    Blue,
    Purple,
    Orange,
    Sky,
}

impl ToknConfig {
    /// The settings a build runs with.
    pub fn build_settings(&self) -> BuildSettings {
        BuildSettings {
            banner: self.banner.clone(),
            bundles: self
                .bundles
                .iter()
                .map(|b| BundleSpec {
                    title: b.title.clone(),
                    roots: b.roots.clone(),
                    alias_file: b.alias_file.clone(),
                    flat_file: b.flat_file.clone(),
                })
                .collect(),
            short_key_roots: self.references.short_key_roots.clone(),
            concat_file: self.concat.file.clone(),
            concat_title: self.concat.title.clone(),
            concat_order: self.concat.order.clone(),
            manifest: ManifestSpec {
                file: self.manifest.file.clone(),
                alternate: self.manifest.alternate.clone(),
                replaces: self.manifest.replaces.clone(),
                label: self.manifest.label.clone(),
            },
        }
    }

    /// Where `publish` writes.
    pub fn output_layout(&self) -> OutputLayout {
        OutputLayout {
            build_root: self.paths.build_root.clone(),
            alias_dir: self.paths.alias_dir.clone(),
            flat_dir: self.paths.flat_dir.clone(),
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<ToknConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ToknConfig, ConfigError> {
    Loader::new().build()
}
