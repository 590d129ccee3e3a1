//! Writing a finished build to disk
//!
//!     The output tree is owned by the build: the build root is removed wholesale and recreated, so
//!     files from bundles that no longer exist do not linger. Call this only with a [BuildOutput]
//!     that was fully computed, which is what keeps a failed build from touching the old tree.
//!
//!     A non-empty root that contains neither the alias nor the flat directory is left alone and
//!     reported as [BuildError::ForeignRoot].

use crate::build::{BuildOutput, OutputFile};
use crate::error::BuildError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the alias and flat files of a build go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub build_root: PathBuf,
    /// Relative to `build_root`.
    pub alias_dir: PathBuf,
    /// Relative to `build_root`.
    pub flat_dir: PathBuf,
}

impl OutputLayout {
    pub fn new(build_root: impl Into<PathBuf>) -> Self {
        Self {
            build_root: build_root.into(),
            alias_dir: PathBuf::from("scss"),
            flat_dir: PathBuf::from("css"),
        }
    }

    pub fn alias_path(&self) -> PathBuf {
        self.build_root.join(&self.alias_dir)
    }

    pub fn flat_path(&self) -> PathBuf {
        self.build_root.join(&self.flat_dir)
    }
}

/// Replace the output tree with `output`. Returns every written path, alias files first.
pub fn publish(output: &BuildOutput, layout: &OutputLayout) -> Result<Vec<PathBuf>, BuildError> {
    let root = &layout.build_root;
    if root.exists() {
        if !is_previous_build(layout)? {
            return Err(BuildError::ForeignRoot { path: root.clone() });
        }
        debug!(path = %root.display(), "removing previous build");
        fs::remove_dir_all(root).map_err(|e| BuildError::io(root, e))?;
    }

    let mut written = Vec::with_capacity(output.alias_files.len() + output.flat_files.len());
    write_all(&layout.alias_path(), &output.alias_files, &mut written)?;
    write_all(&layout.flat_path(), &output.flat_files, &mut written)?;
    Ok(written)
}

/// An existing root may be replaced when it is empty or holds one of the output directories.
fn is_previous_build(layout: &OutputLayout) -> Result<bool, BuildError> {
    let root = &layout.build_root;
    if layout.alias_path().is_dir() || layout.flat_path().is_dir() {
        return Ok(true);
    }
    let mut entries = fs::read_dir(root).map_err(|e| BuildError::io(root, e))?;
    Ok(entries.next().is_none())
}

fn write_all(
    dir: &Path,
    files: &[OutputFile],
    written: &mut Vec<PathBuf>,
) -> Result<(), BuildError> {
    fs::create_dir_all(dir).map_err(|e| BuildError::io(dir, e))?;
    for file in files {
        let path = dir.join(&file.name);
        fs::write(&path, &file.contents).map_err(|e| BuildError::io(&path, e))?;
        debug!(path = %path.display(), bytes = file.contents.len(), "wrote file");
        written.push(path);
    }
    Ok(())
}
