//! Configuration module

pub mod loader;

pub use loader::Config;

use serde::{Deserialize, Serialize};

use crate::writer::BackupMode;

/// Backup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupConfig {
    /// What to do with the pre-rewrite content (keep, transient, none)
    #[serde(default)]
    pub mode: BackupMode,

    /// Suffix appended to the original path to form the backup path
    #[serde(default = "default_backup_suffix")]
    pub suffix: String,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            mode: BackupMode::default(),
            suffix: default_backup_suffix(),
        }
    }
}

fn default_backup_suffix() -> String {
    ".backup".to_string()
}

/// File selection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    /// File extensions to consider, without the leading dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Glob patterns for paths that are never rewritten
    #[serde(default = "default_excludes")]
    pub exclude: Vec<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            exclude: default_excludes(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    ["ts", "tsx", "js", "jsx"].iter().map(|s| s.to_string()).collect()
}

fn default_excludes() -> Vec<String> {
    [
        "**/*.d.ts",
        "**/node_modules/**",
        "**/.next/**",
        "**/dist/**",
        "**/build/**",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Parameters of the client-wrapping migration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TypedClientConfig {
    /// Factory whose result gets wrapped
    pub factory: String,
    /// Wrapping function
    pub wrapper: String,
    /// Name bound to the raw factory result
    pub intermediate: String,
    /// Module exporting the wrapper
    pub wrapper_module: String,
    /// Module exporting the factory, used as insertion anchor
    pub anchor_module: String,
    /// Accessor that must keep addressing the raw client
    pub accessor: String,
}

impl Default for TypedClientConfig {
    fn default() -> Self {
        Self {
            factory: "createClient".to_string(),
            wrapper: "typed".to_string(),
            intermediate: "client".to_string(),
            wrapper_module: "@/lib/supabase/typed-client".to_string(),
            anchor_module: "@/utils/supabase/server".to_string(),
            accessor: "auth".to_string(),
        }
    }
}

/// Parameters of the link-swap migration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefetchLinkConfig {
    /// Component whose link attribute is being moved
    pub outer: String,
    /// Component that now carries the link
    pub inner: String,
    /// Attribute moved from outer to inner
    pub attribute: String,
    /// Flag added to the outer component
    pub outer_flag: String,
    /// Module exporting the inner component
    pub inner_module: String,
    /// Module exporting the outer component, used as insertion anchor
    pub anchor_module: String,
}

impl Default for PrefetchLinkConfig {
    fn default() -> Self {
        Self {
            outer: "BreadcrumbLink".to_string(),
            inner: "PrefetchLink".to_string(),
            attribute: "href".to_string(),
            outer_flag: "asChild".to_string(),
            inner_module: "@/components/ui/prefetch-link".to_string(),
            anchor_module: "@/components/ui/breadcrumb".to_string(),
        }
    }
}

/// A migration defined entirely in configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CustomMigration {
    /// Human readable description
    #[serde(default)]
    pub description: Option<String>,

    /// Extra exclusion globs for this migration
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Rules, applied in the listed order
    #[serde(default)]
    pub rules: Vec<CustomRule>,
}

/// Regex rule defined in configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomRule {
    /// Rule identifier, unique within its migration
    pub id: String,

    /// Regex pattern to match
    pub pattern: String,

    /// Replacement template (`$1`, `${name}`)
    pub replacement: String,

    /// Substrings that must all be present for the rule to run
    #[serde(default)]
    pub requires: Vec<String>,

    /// Substrings whose presence disables the rule
    #[serde(default)]
    pub forbids: Vec<String>,
}
