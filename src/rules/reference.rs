//! Downstream reference repair
//!
//! Once a binding has been rebound to a wrapper (`x = wrap(raw)`), some
//! accessors must keep addressing the raw value. [`BindingReferenceRule`]
//! redirects `x.<accessor>.` to `raw.<accessor>.` for every such `x`.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::HashSet;

use super::rule::{PatternRule, Trigger};
use crate::error::ConfigError;

/// Redirects accessor chains from wrapped bindings to the raw binding
#[derive(Debug)]
pub struct BindingReferenceRule {
    id: String,
    trigger: Trigger,
    target: String,
    accessor: String,
    binding: Regex,
    reference: Regex,
}

impl BindingReferenceRule {
    /// `wrapper(target)` marks a wrapped binding; `accessor` is the member to redirect
    pub fn new(
        id: impl Into<String>,
        trigger: Trigger,
        wrapper: &str,
        target: &str,
        accessor: &str,
    ) -> Result<Self, ConfigError> {
        let id = id.into();
        let compile = |pattern: String| {
            Regex::new(&pattern).map_err(|source| ConfigError::InvalidPattern {
                rule_id: id.clone(),
                source,
            })
        };

        let binding = compile(format!(
            r"(?P<name>[A-Za-z_$][\w$]*)\s*=\s*{}\(\s*{}\s*\)",
            regex::escape(wrapper),
            regex::escape(target)
        ))?;
        let reference = compile(format!(
            r"(?P<name>[A-Za-z_$][\w$]*)\s*\.\s*{}\s*\.",
            regex::escape(accessor)
        ))?;

        Ok(Self {
            id,
            trigger,
            target: target.to_string(),
            accessor: accessor.to_string(),
            binding,
            reference,
        })
    }

    /// Names currently bound to the wrapper
    pub fn wrapped_bindings<'a>(&self, content: &'a str) -> HashSet<&'a str> {
        self.binding
            .captures_iter(content)
            .filter_map(|caps| caps.name("name"))
            .map(|m| m.as_str())
            .filter(|name| *name != self.target)
            .collect()
    }
}

impl PatternRule for BindingReferenceRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn trigger(&self, content: &str) -> bool {
        self.trigger.is_met(content)
    }

    fn apply<'a>(&self, content: &'a str) -> Cow<'a, str> {
        let wrapped = self.wrapped_bindings(content);
        if wrapped.is_empty() {
            return Cow::Borrowed(content);
        }

        self.reference.replace_all(content, |caps: &Captures<'_>| {
            let start = caps.get(0).map_or(0, |m| m.start());
            let member_of_other = content[..start].ends_with('.');

            if !member_of_other && wrapped.contains(&caps["name"]) {
                format!("{}.{}.", self.target, self.accessor)
            } else {
                caps[0].to_string()
            }
        })
    }
}
