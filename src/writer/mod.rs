//! Backup/Writer - persists rewritten content
//!
//! Unchanged outcomes are never written. For changed ones the original
//! content can first be copied to `<path><suffix>`.
//!
//! The backup write and the main write are two separate operations: a crash
//! between them leaves a backup next to an untouched original. Re-running
//! the migration is the recovery path since rules are idempotent.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::RewriteError;
use crate::rewriter::RewriteOutcome;

/// What happens to the pre-rewrite content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupMode {
    /// Leave a backup next to the rewritten file
    #[default]
    Keep,
    /// Write a backup, then remove it once the rewrite is on disk
    Transient,
    /// Overwrite without a backup
    None,
}

/// What [`BackupWriter::persist`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistStatus {
    /// Nothing changed, nothing written
    Skipped,
    /// The file was rewritten, with the backup path if one was left behind
    Written {
        /// Backup left on disk
        backup: Option<PathBuf>,
    },
    /// Dry run: the file would have been rewritten
    WouldWrite,
}

/// Writes rewrite outcomes back to disk
#[derive(Debug, Clone)]
pub struct BackupWriter {
    mode: BackupMode,
    suffix: String,
    dry_run: bool,
}

impl Default for BackupWriter {
    fn default() -> Self {
        Self::new(BackupMode::Keep, ".backup")
    }
}

impl BackupWriter {
    /// Create a writer
    pub fn new(mode: BackupMode, suffix: impl Into<String>) -> Self {
        Self {
            mode,
            suffix: suffix.into(),
            dry_run: false,
        }
    }

    /// Never touch the filesystem
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Whether this writer is in dry-run mode
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Backup location for `path`
    pub fn backup_path(&self, path: &Path) -> PathBuf {
        let mut backup = path.as_os_str().to_os_string();
        backup.push(&self.suffix);
        PathBuf::from(backup)
    }

    /// Persist an outcome
    pub fn persist(&self, outcome: &RewriteOutcome) -> Result<PersistStatus, RewriteError> {
        if !outcome.changed() {
            return Ok(PersistStatus::Skipped);
        }

        if self.dry_run {
            debug!(path = %outcome.path().display(), "Dry run, not writing");
            return Ok(PersistStatus::WouldWrite);
        }

        let path = outcome.path();
        let backup = match self.mode {
            BackupMode::None => None,
            BackupMode::Keep | BackupMode::Transient => {
                let backup = self.backup_path(path);
                fs::write(&backup, outcome.original_content()).map_err(|source| {
                    RewriteError::Backup {
                        path: backup.display().to_string(),
                        source,
                    }
                })?;
                debug!(backup = %backup.display(), "Backup written");
                Some(backup)
            }
        };

        fs::write(path, outcome.final_content()).map_err(|source| RewriteError::Write {
            path: path.display().to_string(),
            source,
        })?;
        info!(path = %path.display(), "File rewritten");

        let backup = match (self.mode, backup) {
            (BackupMode::Transient, Some(backup)) => {
                fs::remove_file(&backup).map_err(|source| RewriteError::Backup {
                    path: backup.display().to_string(),
                    source,
                })?;
                None
            }
            (_, backup) => backup,
        };

        Ok(PersistStatus::Written { backup })
    }
}
