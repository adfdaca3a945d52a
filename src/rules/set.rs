//! Rule sets - ordered rule lists encoding one migration

use std::fmt;

use super::rule::PatternRule;

/// An ordered collection of rules that together encode one migration.
///
/// Rules run in insertion order and each one sees the output of the
/// previous one, so later rules must tolerate text already rewritten by
/// earlier rules.
pub struct RuleSet {
    name: String,
    description: String,
    rules: Vec<Box<dyn PatternRule>>,
    excludes: Vec<String>,
}

impl RuleSet {
    /// Create an empty rule set
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            rules: Vec::new(),
            excludes: Vec::new(),
        }
    }

    /// Append a rule at the end of the sequence
    pub fn with_rule(mut self, rule: impl PatternRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Append an already boxed rule
    pub fn push(&mut self, rule: Box<dyn PatternRule>) {
        self.rules.push(rule);
    }

    /// Add file exclusion globs that apply whenever this migration runs
    pub fn with_excludes<I, S>(mut self, globs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes.extend(globs.into_iter().map(Into::into));
        self
    }

    /// Migration name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human readable description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Rules in application order
    pub fn rules(&self) -> &[Box<dyn PatternRule>] {
        &self.rules
    }

    /// Rule ids in application order
    pub fn rule_ids(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Exclusion globs contributed by this migration
    pub fn excludes(&self) -> &[String] {
        &self.excludes
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("name", &self.name)
            .field("rules", &self.rule_ids())
            .field("excludes", &self.excludes)
            .finish()
    }
}
