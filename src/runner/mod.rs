//! Runner - drives a migration over a list of files
//!
//! Files are processed one at a time in the order given. A file that cannot
//! be read or written is recorded and the run moves on; nothing short of a
//! panic stops it early.

mod report;

pub use report::{FileReport, FileStatus, RunReport, RunSummary};

use similar::TextDiff;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::rewriter::{FileRewriter, RewriteOutcome};
use crate::rules::RuleSet;
use crate::utils::timing::{format_duration, Timer};
use crate::writer::{BackupWriter, PersistStatus};

/// Runs one rule set over many files
pub struct Runner<'a> {
    rule_set: &'a RuleSet,
    writer: BackupWriter,
    with_diff: bool,
}

impl<'a> Runner<'a> {
    /// Create a runner
    pub fn new(rule_set: &'a RuleSet, writer: BackupWriter) -> Self {
        Self {
            rule_set,
            writer,
            with_diff: false,
        }
    }

    /// Attach a unified diff to every changed file
    pub fn with_diff(mut self, with_diff: bool) -> Self {
        self.with_diff = with_diff;
        self
    }

    /// Process every path in order
    pub fn run<I, P>(&self, paths: I) -> RunReport
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let timer = Timer::start();
        let rewriter = FileRewriter::new(self.rule_set);
        let mut report = RunReport::new(self.rule_set.name(), self.writer.is_dry_run());

        info!(migration = self.rule_set.name(), dry_run = self.writer.is_dry_run(), "Starting migration");

        for path in paths {
            let path = path.into();
            let file = self.process(&rewriter, path);
            debug!(path = %file.path.display(), status = file.status.label(), "File processed");
            report.record(file);
        }

        report.finish(timer.elapsed());
        info!(
            "Migration complete in {}: {} changed, {} skipped, {} not found, {} failed",
            format_duration(timer.elapsed()),
            report.summary.changed,
            report.summary.skipped,
            report.summary.not_found,
            report.summary.failed,
        );

        report
    }

    fn process(&self, rewriter: &FileRewriter<'_>, path: PathBuf) -> FileReport {
        let outcome = match rewriter.rewrite(path.clone()) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable file");
                return FileReport::new(path, FileStatus::NotFound).with_error(e.to_string());
            }
        };

        match self.writer.persist(&outcome) {
            Ok(PersistStatus::Skipped) => FileReport::new(path, FileStatus::Skipped),
            Ok(PersistStatus::WouldWrite) => self.changed(path, &outcome, None),
            Ok(PersistStatus::Written { backup }) => self.changed(path, &outcome, backup),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to persist rewrite");
                FileReport::new(path, FileStatus::Failed)
                    .with_applied_rules(outcome.applied_rule_ids().iter().cloned())
                    .with_error(e.to_string())
            }
        }
    }

    fn changed(&self, path: PathBuf, outcome: &RewriteOutcome, backup: Option<PathBuf>) -> FileReport {
        let diff = self
            .with_diff
            .then(|| unified_diff(&path, outcome.original_content(), outcome.final_content()));

        FileReport::new(path, FileStatus::Changed)
            .with_applied_rules(outcome.applied_rule_ids().iter().cloned())
            .with_backup(backup)
            .with_diff(diff)
    }
}

/// Unified diff between two versions of a file
pub fn unified_diff(path: &Path, before: &str, after: &str) -> String {
    let name = path.display().to_string();
    TextDiff::from_lines(before, after)
        .unified_diff()
        .context_radius(2)
        .header(&format!("a/{}", name), &format!("b/{}", name))
        .to_string()
}
