//! Custom migrations
//!
//! Allows users to define migrations via regex rules in configuration.

use tracing::debug;

use crate::config::CustomMigration;
use crate::error::ConfigError;
use crate::rules::{RegexRule, RuleSet, Trigger};

/// Build a rule set from its configuration. Every pattern is compiled up front.
pub fn rule_set(name: &str, migration: &CustomMigration) -> Result<RuleSet, ConfigError> {
    let description = migration
        .description
        .clone()
        .unwrap_or_else(|| format!("Custom migration '{}'", name));

    let mut set = RuleSet::new(name, description).with_excludes(migration.exclude.iter().cloned());

    for rule in &migration.rules {
        debug!(migration = name, rule_id = %rule.id, pattern = %rule.pattern, "Compiling custom rule");

        let trigger = rule
            .requires
            .iter()
            .fold(Trigger::always(), |t, needle| t.contains(needle.clone()));
        let trigger = rule
            .forbids
            .iter()
            .fold(trigger, |t, needle| t.lacks(needle.clone()));

        set.push(Box::new(RegexRule::template(
            format!("{}/{}", name, rule.id),
            trigger,
            &rule.pattern,
            rule.replacement.clone(),
        )?));
    }

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CustomRule;
    use crate::rewriter::FileRewriter;

    fn migration(pattern: &str) -> CustomMigration {
        CustomMigration {
            description: None,
            exclude: vec!["**/legacy/**".to_string()],
            rules: vec![CustomRule {
                id: "call".to_string(),
                pattern: pattern.to_string(),
                replacement: "fetcher($1)".to_string(),
                requires: vec!["legacyFetch(".to_string()],
                forbids: vec!["// codemod:skip".to_string()],
            }],
        }
    }

    #[test]
    fn test_custom_rule_set_rewrites() {
        let set = rule_set("rename-fetcher", &migration(r"legacyFetch\(([^)]*)\)")).unwrap();
        let outcome = FileRewriter::new(&set).rewrite_content("a.ts", "legacyFetch('/a')\nlegacyFetch('/b')\n");

        assert_eq!(set.rule_ids(), vec!["rename-fetcher/call"]);
        assert_eq!(set.description(), "Custom migration 'rename-fetcher'");
        assert_eq!(set.excludes(), ["**/legacy/**"]);
        assert_eq!(outcome.final_content(), "fetcher('/a')\nfetcher('/b')\n");
        assert!(outcome.changed());
    }

    #[test]
    fn test_forbidden_marker_disables_rule() {
        let set = rule_set("rename-fetcher", &migration(r"legacyFetch\(([^)]*)\)")).unwrap();
        let input = "// codemod:skip\nlegacyFetch('/a')\n";
        let outcome = FileRewriter::new(&set).rewrite_content("a.ts", input);

        assert!(!outcome.changed());
        assert_eq!(outcome.final_content(), input);
    }

    #[test]
    fn test_invalid_pattern_is_a_config_error() {
        let err = rule_set("broken", &migration("legacyFetch((")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { ref rule_id, .. } if rule_id == "broken/call"));
    }
}
