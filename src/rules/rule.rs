//! # Pattern Rules
//!
//! A pattern rule is the smallest unit of a migration: a cheap [`Trigger`]
//! deciding whether the rule should look at a file at all, and an `apply`
//! step that rewrites every matching span.
//!
//! ## Firing
//!
//! A rule *fires* when its trigger holds and `apply` returns text that
//! differs from its input. A trigger that holds while the matcher finds no
//! span is a no-op: `apply` hands back the borrowed input unchanged.
//!
//! ## Examples
//!
//! ```rust
//! use codemod::rules::{PatternRule, RegexRule, Trigger};
//!
//! let rule = RegexRule::template(
//!     "demo/rename",
//!     Trigger::always().contains("oldApi(").lacks("newApi("),
//!     r"oldApi\(",
//!     "newApi(",
//! )
//! .unwrap();
//!
//! assert!(rule.trigger("oldApi(1); oldApi(2);"));
//! assert_eq!(rule.apply("oldApi(1); oldApi(2);"), "newApi(1); newApi(2);");
//! ```

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::fmt;

use crate::error::ConfigError;

/// A single detect-and-replace unit
pub trait PatternRule: Send + Sync {
    /// Stable identifier used in logs and reports
    fn id(&self) -> &str;

    /// Cheap precondition over the current content
    fn trigger(&self, content: &str) -> bool;

    /// Rewrite every matching span. Returns the input borrowed when nothing matched.
    fn apply<'a>(&self, content: &'a str) -> Cow<'a, str>;
}

/// Substring precondition: every `requires` entry present, no `forbids` entry present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trigger {
    requires: Vec<String>,
    forbids: Vec<String>,
}

impl Trigger {
    /// A trigger that always holds
    pub fn always() -> Self {
        Self::default()
    }

    /// Require a substring to be present
    pub fn contains(mut self, needle: impl Into<String>) -> Self {
        self.requires.push(needle.into());
        self
    }

    /// Require a substring to be absent
    pub fn lacks(mut self, needle: impl Into<String>) -> Self {
        self.forbids.push(needle.into());
        self
    }

    /// Evaluate the trigger against content
    pub fn is_met(&self, content: &str) -> bool {
        self.requires.iter().all(|r| content.contains(r.as_str()))
            && !self.forbids.iter().any(|f| content.contains(f.as_str()))
    }
}

type ReplaceFn = Box<dyn Fn(&Captures<'_>) -> String + Send + Sync>;

/// How a [`RegexRule`] builds replacement text
pub enum Replacement {
    /// `$1` / `${name}` expansion
    Template(String),
    /// Computed from the captures. Returning `caps[0]` keeps the span as is.
    Computed(ReplaceFn),
}

impl fmt::Debug for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replacement::Template(t) => f.debug_tuple("Template").field(t).finish(),
            Replacement::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Regex-driven rule with global substitution
#[derive(Debug)]
pub struct RegexRule {
    id: String,
    trigger: Trigger,
    matcher: Regex,
    replacement: Replacement,
}

impl RegexRule {
    /// Build a rule from a pattern and a replacement
    pub fn new(
        id: impl Into<String>,
        trigger: Trigger,
        pattern: &str,
        replacement: Replacement,
    ) -> Result<Self, ConfigError> {
        let id = id.into();
        let matcher = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            rule_id: id.clone(),
            source,
        })?;

        Ok(Self {
            id,
            trigger,
            matcher,
            replacement,
        })
    }

    /// Build a rule with a `$1`-style replacement template
    pub fn template(
        id: impl Into<String>,
        trigger: Trigger,
        pattern: &str,
        template: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Self::new(id, trigger, pattern, Replacement::Template(template.into()))
    }

    /// Build a rule whose replacement is computed from the captures
    pub fn computed<F>(
        id: impl Into<String>,
        trigger: Trigger,
        pattern: &str,
        f: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&Captures<'_>) -> String + Send + Sync + 'static,
    {
        Self::new(id, trigger, pattern, Replacement::Computed(Box::new(f)))
    }
}

impl PatternRule for RegexRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn trigger(&self, content: &str) -> bool {
        self.trigger.is_met(content)
    }

    fn apply<'a>(&self, content: &'a str) -> Cow<'a, str> {
        match &self.replacement {
            Replacement::Template(template) => self.matcher.replace_all(content, template.as_str()),
            Replacement::Computed(f) => self.matcher.replace_all(content, |caps: &Captures<'_>| f(caps)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_requires_and_forbids() {
        let trigger = Trigger::always().contains("foo").lacks("bar");

        assert!(trigger.is_met("foo"));
        assert!(!trigger.is_met("foo bar"));
        assert!(!trigger.is_met("baz"));
        assert!(Trigger::always().is_met(""));
    }

    #[test]
    fn test_template_rule_replaces_all_occurrences() {
        let rule = RegexRule::template("t", Trigger::always(), r"a(\d)", "b$1").unwrap();
        assert_eq!(rule.apply("a1 a2 a3"), "b1 b2 b3");
    }

    #[test]
    fn test_zero_matches_borrows_input() {
        let rule = RegexRule::template("t", Trigger::always(), r"missing", "x").unwrap();
        assert!(matches!(rule.apply("nothing here"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_computed_rule_can_decline_a_span() {
        let rule = RegexRule::computed("t", Trigger::always(), r"\w+", |caps| {
            if &caps[0] == "keep" {
                caps[0].to_string()
            } else {
                caps[0].to_uppercase()
            }
        })
        .unwrap();

        assert_eq!(rule.apply("keep this"), "keep THIS");
        assert_eq!(rule.apply("keep"), "keep");
    }

    #[test]
    fn test_invalid_pattern_reports_rule_id() {
        let err = RegexRule::template("broken/rule", Trigger::always(), "(", "x").unwrap_err();
        assert!(err.to_string().contains("broken/rule"));
    }
}
