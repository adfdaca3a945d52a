//! Scanner module - selects the files a migration runs over
//!
//! Either walks a project root (honouring ignore files) and keeps files by
//! extension and exclusion globs, or passes explicit paths through in the
//! order given.

mod filesystem;

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::FilesConfig;
use crate::error::ConfigError;

/// Selects candidate files under a project root
#[derive(Debug, Clone)]
pub struct FileSelector {
    root: PathBuf,
    extensions: Vec<String>,
    excludes: GlobSet,
}

impl FileSelector {
    /// Build a selector from configuration plus migration-specific exclusions
    pub fn new(
        root: impl Into<PathBuf>,
        files: &FilesConfig,
        extra_excludes: &[String],
    ) -> Result<Self, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in files.exclude.iter().chain(extra_excludes) {
            let glob = Glob::new(pattern).map_err(|source| ConfigError::InvalidGlob {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        let excludes = builder.build().map_err(|source| ConfigError::InvalidGlob {
            pattern: files.exclude.join(", "),
            source,
        })?;

        Ok(Self {
            root: root.into(),
            extensions: files
                .extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect(),
            excludes,
        })
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether a root-relative path passes the extension and exclusion filters
    pub fn accepts(&self, relative: &Path) -> bool {
        let has_extension = relative
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext));

        has_extension && !self.excludes.is_match(relative)
    }

    /// Walk the root and return matching files, sorted, joined onto the root
    pub fn select(&self) -> Vec<PathBuf> {
        let mut selected: Vec<PathBuf> = filesystem::scan_directory(&self.root)
            .into_iter()
            .filter(|relative| self.accepts(relative))
            .collect();
        selected.sort();

        debug!(root = %self.root.display(), count = selected.len(), "Selected files");
        selected.into_iter().map(|p| self.root.join(p)).collect()
    }

    /// Resolve explicit paths against the root, keeping their order
    pub fn resolve(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        paths
            .iter()
            .map(|p| if p.is_absolute() { p.clone() } else { self.root.join(p) })
            .collect()
    }
}
