//! Rules module - pattern rules, rule sets and the built-in migrations

pub mod import;
pub mod migrations;
pub mod reference;
pub mod rule;
pub mod set;

pub use import::{ImportRule, ImportStrategy};
pub use reference::BindingReferenceRule;
pub use rule::{PatternRule, RegexRule, Replacement, Trigger};
pub use set::RuleSet;
