//! # File Rewriter
//!
//! Applies a [`RuleSet`] to one file's content and reports what happened.
//!
//! Rules run in order against a working copy; each sees the output of the
//! previous one. A rule whose trigger does not hold is skipped without
//! stopping the pipeline. The whole rewrite happens in memory, so a file is
//! either left alone or written once in full.
//!
//! ## Examples
//!
//! ```rust
//! use codemod::config::TypedClientConfig;
//! use codemod::rewriter::FileRewriter;
//! use codemod::rules::migrations::typed_client;
//!
//! let set = typed_client::rule_set(&TypedClientConfig::default()).unwrap();
//! let rewriter = FileRewriter::new(&set);
//!
//! let first = rewriter.rewrite_content("route.ts", "  const supabase = await createClient()\n");
//! assert!(first.changed());
//!
//! let second = rewriter.rewrite_content("route.ts", first.final_content());
//! assert!(!second.changed());
//! ```

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, span, Level};

use crate::error::RewriteError;
use crate::rules::RuleSet;

/// A file being processed: immutable original plus a working copy
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    original_content: String,
    current_content: String,
}

impl SourceFile {
    /// Read a file from disk. Any read failure is reported as not found.
    pub fn read(path: impl Into<PathBuf>) -> Result<Self, RewriteError> {
        let path = path.into();
        let content = fs::read_to_string(&path).map_err(|source| RewriteError::NotFound {
            path: path.display().to_string(),
            source,
        })?;

        Ok(Self::from_content(path, content))
    }

    /// Wrap in-memory content
    pub fn from_content(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            path: path.into(),
            current_content: content.clone(),
            original_content: content,
        }
    }

    /// File path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Content as read
    pub fn original_content(&self) -> &str {
        &self.original_content
    }

    /// Working copy
    pub fn current_content(&self) -> &str {
        &self.current_content
    }
}

/// Result of rewriting one file. Immutable once produced.
#[derive(Debug, Clone, Serialize)]
pub struct RewriteOutcome {
    path: PathBuf,
    changed: bool,
    applied_rule_ids: Vec<String>,
    #[serde(skip)]
    original_content: String,
    #[serde(skip)]
    final_content: String,
}

impl RewriteOutcome {
    /// File path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether at least one rule fired
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Ids of the rules that fired, in application order
    pub fn applied_rule_ids(&self) -> &[String] {
        &self.applied_rule_ids
    }

    /// Content before any rule ran
    pub fn original_content(&self) -> &str {
        &self.original_content
    }

    /// Content after every rule ran
    pub fn final_content(&self) -> &str {
        &self.final_content
    }
}

/// Applies a rule set to files
pub struct FileRewriter<'a> {
    rule_set: &'a RuleSet,
}

impl<'a> FileRewriter<'a> {
    /// Create a rewriter for the given rule set
    pub fn new(rule_set: &'a RuleSet) -> Self {
        Self { rule_set }
    }

    /// Read `path` once and rewrite it
    pub fn rewrite(&self, path: impl Into<PathBuf>) -> Result<RewriteOutcome, RewriteError> {
        let source = SourceFile::read(path)?;
        Ok(self.process(source))
    }

    /// Rewrite in-memory content as if it had been read from `path`
    pub fn rewrite_content(&self, path: impl Into<PathBuf>, content: &str) -> RewriteOutcome {
        self.process(SourceFile::from_content(path, content))
    }

    fn process(&self, mut source: SourceFile) -> RewriteOutcome {
        let span = span!(Level::DEBUG, "rewrite", migration = self.rule_set.name(), path = %source.path.display());
        let _guard = span.enter();

        let mut applied_rule_ids = Vec::new();

        for rule in self.rule_set.rules() {
            if !rule.trigger(&source.current_content) {
                continue;
            }

            let rewritten = rule.apply(&source.current_content);
            if rewritten == source.current_content.as_str() {
                continue;
            }

            debug!(rule_id = rule.id(), "Rule fired");
            let rewritten = rewritten.into_owned();
            source.current_content = rewritten;
            applied_rule_ids.push(rule.id().to_string());
        }

        RewriteOutcome {
            path: source.path,
            changed: !applied_rule_ids.is_empty(),
            applied_rule_ids,
            original_content: source.original_content,
            final_content: source.current_content,
        }
    }
}
