//! # Run Report Structures
//!
//! This module defines the data structures describing a migration run.
//!
//! ## Overview
//!
//! - [`FileStatus`] - What happened to one file (Changed, Skipped, NotFound, Failed)
//! - [`FileReport`] - Per-file entry with applied rules, backup and optional diff
//! - [`RunSummary`] - Aggregate counters
//! - [`RunReport`] - Everything above for one run
//!
//! ## Examples
//!
//! ```rust
//! use codemod::runner::{FileReport, FileStatus, RunReport};
//!
//! let mut report = RunReport::new("typed-client", false);
//! report.record(FileReport::new("src/a.ts", FileStatus::Changed));
//! report.record(FileReport::new("src/b.ts", FileStatus::Skipped));
//!
//! assert_eq!(report.summary.processed, 2);
//! assert_eq!(report.summary.changed, 1);
//! assert!(!report.has_failures());
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Outcome category for one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// At least one rule fired (written, or would be in a dry run)
    Changed,
    /// No rule fired
    Skipped,
    /// The path does not exist or could not be read
    NotFound,
    /// Writing the result or its backup failed
    Failed,
}

impl FileStatus {
    /// Short label for terminal output
    pub fn label(&self) -> &'static str {
        match self {
            Self::Changed => "changed",
            Self::Skipped => "skipped",
            Self::NotFound => "not found",
            Self::Failed => "failed",
        }
    }
}

/// What happened to one file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Path as processed
    pub path: PathBuf,

    /// Outcome category
    pub status: FileStatus,

    /// Ids of the rules that fired, in order
    pub applied_rules: Vec<String>,

    /// Backup left on disk, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<PathBuf>,

    /// Error message for NotFound / Failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Unified diff of the change, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

impl FileReport {
    /// Create a report entry
    pub fn new(path: impl Into<PathBuf>, status: FileStatus) -> Self {
        Self {
            path: path.into(),
            status,
            applied_rules: Vec::new(),
            backup: None,
            error: None,
            diff: None,
        }
    }

    /// Set the applied rules
    pub fn with_applied_rules(mut self, rules: impl IntoIterator<Item = String>) -> Self {
        self.applied_rules = rules.into_iter().collect();
        self
    }

    /// Set the backup path
    pub fn with_backup(mut self, backup: Option<PathBuf>) -> Self {
        self.backup = backup;
        self
    }

    /// Set the error message
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Set the diff
    pub fn with_diff(mut self, diff: Option<String>) -> Self {
        self.diff = diff;
        self
    }
}

/// Aggregate counters, built up as files are processed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Paths attempted
    pub processed: usize,
    /// Paths where at least one rule fired
    pub changed: usize,
    /// Paths where no rule fired
    pub skipped: usize,
    /// Paths that could not be read
    pub not_found: usize,
    /// Paths whose write failed
    pub failed: usize,
}

impl RunSummary {
    /// Count one file
    pub fn record(&mut self, status: FileStatus) {
        self.processed += 1;
        match status {
            FileStatus::Changed => self.changed += 1,
            FileStatus::Skipped => self.skipped += 1,
            FileStatus::NotFound => self.not_found += 1,
            FileStatus::Failed => self.failed += 1,
        }
    }
}

/// Full result of one migration run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Migration that ran
    pub migration: String,

    /// Whether files were left untouched
    pub dry_run: bool,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,

    /// Aggregate counters
    pub summary: RunSummary,

    /// Per-file entries in processing order
    files: Vec<FileReport>,
}

impl RunReport {
    /// Start an empty report
    pub fn new(migration: impl Into<String>, dry_run: bool) -> Self {
        Self {
            migration: migration.into(),
            dry_run,
            started_at: Utc::now(),
            duration_ms: 0,
            summary: RunSummary::default(),
            files: Vec::new(),
        }
    }

    /// Add a file entry and update the counters
    pub fn record(&mut self, file: FileReport) {
        self.summary.record(file.status);
        self.files.push(file);
    }

    /// Record the total duration
    pub fn finish(&mut self, duration: Duration) {
        self.duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
    }

    /// Append the entries of a follow-up pass over other files
    pub fn merge(&mut self, other: RunReport) {
        for file in other.files {
            self.record(file);
        }
        self.duration_ms = self.duration_ms.saturating_add(other.duration_ms);
    }

    /// Per-file entries
    pub fn files(&self) -> &[FileReport] {
        &self.files
    }

    /// Entries with a given status
    pub fn files_with_status(&self, status: FileStatus) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(move |f| f.status == status)
    }

    /// Whether any file was not found or failed to write
    pub fn has_failures(&self) -> bool {
        self.summary.not_found > 0 || self.summary.failed > 0
    }
}
