//! Import-statement repair
//!
//! [`ImportRule`] makes sure `import { <name> } from '<module>'` is present,
//! picking exactly one insertion strategy by precedence:
//!
//! 1. [`ImportStrategy::ExtendExisting`] - a value import from `<module>` already
//!    exists, so `<name>` is appended to its braces list
//! 2. [`ImportStrategy::AfterAnchor`] - an import from the anchor module
//!    exists, so a new line goes right after that statement
//! 3. [`ImportStrategy::NearUsage`] - a new line goes right above the first
//!    line matching the usage anchor
//!
//! When none is available the rule leaves the content untouched.

use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;

use super::rule::{PatternRule, Trigger};
use crate::error::ConfigError;

lazy_static! {
    /// First `import` line of a module
    static ref FIRST_IMPORT: Regex = Regex::new(r"(?m)^import\b").unwrap();
}

/// Which insertion strategy an [`ImportRule`] picked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStrategy {
    /// Append the name to an existing import from the same module
    ExtendExisting,
    /// Insert a new import line after the anchor import
    AfterAnchor,
    /// Insert a new import line above the usage anchor
    NearUsage,
}

/// Ensures a named import exists
#[derive(Debug)]
pub struct ImportRule {
    id: String,
    trigger: Trigger,
    name: String,
    module: String,
    same_module: Regex,
    anchor: Option<Regex>,
    usage_anchor: Regex,
    required_usage: Option<Regex>,
}

impl ImportRule {
    /// Create a rule importing `name` from `module`
    pub fn new(
        id: impl Into<String>,
        trigger: Trigger,
        name: impl Into<String>,
        module: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let id = id.into();
        let module = module.into();
        let same_module = compile(
            &id,
            &format!(
                r#"\bimport\s*(?:(?P<kind>type)\b\s*)?(?:[A-Za-z_$][\w$]*\s*,\s*)?\{{(?P<names>[^}}]*)\}}\s*from\s*['"]{}['"]"#,
                regex::escape(&module)
            ),
        )?;

        Ok(Self {
            id,
            trigger,
            name: name.into(),
            module,
            same_module,
            anchor: None,
            usage_anchor: FIRST_IMPORT.clone(),
            required_usage: None,
        })
    }

    /// Only add the import when `pattern` matches somewhere in the content
    pub fn with_required_usage(mut self, pattern: &str) -> Result<Self, ConfigError> {
        self.required_usage = Some(compile(&self.id, pattern)?);
        Ok(self)
    }

    /// Insert after the import statement that pulls from `module`
    pub fn with_anchor_module(mut self, module: &str) -> Result<Self, ConfigError> {
        self.anchor = Some(compile(
            &self.id,
            &format!(
                r#"(?m)^import\b[^;]*?\bfrom\s*['"]{}['"][ \t]*;?"#,
                regex::escape(module)
            ),
        )?);
        Ok(self)
    }

    /// Override the fallback anchor (defaults to the first `import` line)
    pub fn with_usage_anchor(mut self, pattern: &str) -> Result<Self, ConfigError> {
        self.usage_anchor = compile(&self.id, pattern)?;
        Ok(self)
    }

    /// Whether `name` is already imported from `module`
    ///
    /// Default-plus-named (`import X, { name }`) and type-only forms count.
    pub fn is_satisfied(&self, content: &str) -> bool {
        self.same_module.captures_iter(content).any(|caps| {
            caps["names"].split(',').any(|entry| {
                let mut tokens = entry.split_whitespace();
                let first = tokens.next();
                let imported = if first == Some("type") {
                    tokens.next()
                } else {
                    first
                };
                imported == Some(self.name.as_str())
            })
        })
    }

    /// Braces list of the first value import from `module`
    ///
    /// `import type { .. }` statements are never extended with a value.
    fn extendable_names<'c>(&self, content: &'c str) -> Option<regex::Match<'c>> {
        self.same_module
            .captures_iter(content)
            .filter(|caps| caps.name("kind").is_none())
            .find_map(|caps| caps.name("names"))
    }

    /// The strategy that would run on `content`, if any
    pub fn strategy(&self, content: &str) -> Option<ImportStrategy> {
        if self.is_satisfied(content) {
            return None;
        }

        if let Some(usage) = &self.required_usage {
            if !usage.is_match(content) {
                return None;
            }
        }

        if self.extendable_names(content).is_some() {
            Some(ImportStrategy::ExtendExisting)
        } else if self.anchor.as_ref().is_some_and(|a| a.is_match(content)) {
            Some(ImportStrategy::AfterAnchor)
        } else if self.usage_anchor.is_match(content) {
            Some(ImportStrategy::NearUsage)
        } else {
            None
        }
    }

    fn import_line(&self, semicolon: bool) -> String {
        format!(
            "import {{ {} }} from '{}'{}",
            self.name,
            self.module,
            if semicolon { ";" } else { "" }
        )
    }

    fn extend_existing(&self, content: &str) -> Option<String> {
        let names = self.extendable_names(content)?;
        let body = names.as_str();

        let trimmed = body.trim_end();
        let tail = &body[trimmed.len()..];
        let (head, trailing_comma) = match trimmed.strip_suffix(',') {
            Some(head) => (head, ","),
            None => (trimmed, ""),
        };

        let new_body = if head.trim().is_empty() {
            format!(" {} ", self.name)
        } else if body.contains('\n') {
            let last_line = head.rsplit('\n').next().unwrap_or(head);
            let indent_len = last_line.len() - last_line.trim_start().len();
            format!(
                "{},\n{}{}{}{}",
                head,
                &last_line[..indent_len],
                self.name,
                trailing_comma,
                tail
            )
        } else {
            format!("{}, {}{}{}", head, self.name, trailing_comma, tail)
        };

        Some(format!(
            "{}{}{}",
            &content[..names.start()],
            new_body,
            &content[names.end()..]
        ))
    }

    fn insert_after_anchor(&self, content: &str) -> Option<String> {
        let found = self.anchor.as_ref()?.find(content)?;
        let line = self.import_line(found.as_str().ends_with(';'));

        Some(format!(
            "{}\n{}{}",
            &content[..found.end()],
            line,
            &content[found.end()..]
        ))
    }

    fn insert_near_usage(&self, content: &str) -> Option<String> {
        let found = self.usage_anchor.find(content)?;
        let line_start = content[..found.start()].rfind('\n').map_or(0, |i| i + 1);
        let line_end = content[found.start()..]
            .find('\n')
            .map_or(content.len(), |i| found.start() + i);
        let semicolon = content[line_start..line_end].trim_end().ends_with(';');

        Some(format!(
            "{}{}\n{}",
            &content[..line_start],
            self.import_line(semicolon),
            &content[line_start..]
        ))
    }
}

impl PatternRule for ImportRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn trigger(&self, content: &str) -> bool {
        self.trigger.is_met(content)
    }

    fn apply<'a>(&self, content: &'a str) -> Cow<'a, str> {
        let rewritten = match self.strategy(content) {
            Some(ImportStrategy::ExtendExisting) => self.extend_existing(content),
            Some(ImportStrategy::AfterAnchor) => self.insert_after_anchor(content),
            Some(ImportStrategy::NearUsage) => self.insert_near_usage(content),
            None => None,
        };

        rewritten.map_or(Cow::Borrowed(content), Cow::Owned)
    }
}

fn compile(rule_id: &str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        rule_id: rule_id.to_string(),
        source,
    })
}
