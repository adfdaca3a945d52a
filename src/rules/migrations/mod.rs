//! Migrations - concrete rule sets
//!
//! | Name | Description |
//! |------|-------------|
//! | `typed-client` | Wrap factory-created clients in a typed wrapper |
//! | `prefetch-link` | Swap raw breadcrumb links for prefetching links |
//! | `named-exports` | Convert default exports to named exports |
//!
//! Configuration may add more under `[migrations.<name>]`.

pub mod custom;
pub mod named_exports;
pub mod prefetch_link;
pub mod typed_client;

use crate::config::Config;
use crate::error::{CodemodError, ConfigError};

use super::RuleSet;

/// Built-in migrations as (name, description)
pub const BUILTIN: &[(&str, &str)] = &[
    (typed_client::NAME, typed_client::DESCRIPTION),
    (prefetch_link::NAME, prefetch_link::DESCRIPTION),
    (named_exports::NAME, named_exports::DESCRIPTION),
];

/// Whether `name` is a built-in migration
pub fn is_builtin(name: &str) -> bool {
    BUILTIN.iter().any(|(builtin, _)| *builtin == name)
}

/// Names of every available migration, built-ins first
pub fn available(config: &Config) -> Vec<String> {
    BUILTIN
        .iter()
        .map(|(name, _)| name.to_string())
        .chain(config.migrations.keys().cloned())
        .collect()
}

/// Build the rule set for `name`
pub fn load(name: &str, config: &Config) -> Result<RuleSet, CodemodError> {
    validate(config)?;

    let set = match name {
        typed_client::NAME => typed_client::rule_set(&config.typed_client)?,
        prefetch_link::NAME => prefetch_link::rule_set(&config.prefetch_link)?,
        named_exports::NAME => named_exports::rule_set()?,
        other => match config.migrations.get(other) {
            Some(migration) => custom::rule_set(other, migration)?,
            None => {
                return Err(CodemodError::UnknownMigration {
                    name: other.to_string(),
                    available: available(config).join(", "),
                })
            }
        },
    };

    Ok(set)
}

/// Build every available rule set
pub fn load_all(config: &Config) -> Result<Vec<RuleSet>, CodemodError> {
    available(config)
        .iter()
        .map(|name| load(name, config))
        .collect()
}

/// Reject configured migrations that shadow a built-in
fn validate(config: &Config) -> Result<(), ConfigError> {
    match config.migrations.keys().find(|name| is_builtin(name)) {
        Some(name) => Err(ConfigError::DuplicateMigration { name: name.clone() }),
        None => Ok(()),
    }
}
