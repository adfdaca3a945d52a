//! Configuration loader

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{CodemodError, ConfigError};

use super::{BackupConfig, CustomMigration, FilesConfig, PrefetchLinkConfig, TypedClientConfig};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILENAME: &str = ".codemod.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Backup behaviour
    #[serde(default)]
    pub backup: BackupConfig,

    /// File selection
    #[serde(default)]
    pub files: FilesConfig,

    /// Client-wrapping migration parameters
    #[serde(default)]
    pub typed_client: TypedClientConfig,

    /// Link-swap migration parameters
    #[serde(default)]
    pub prefetch_link: PrefetchLinkConfig,

    /// Configuration-defined migrations, keyed by name
    #[serde(default)]
    pub migrations: BTreeMap<String, CustomMigration>,
}

impl Config {
    /// Load `.codemod.toml` from `dir`, or return defaults when absent
    pub fn load_or_default(dir: &Path) -> Result<Self, CodemodError> {
        let config_path = dir.join(CONFIG_FILENAME);

        if config_path.exists() {
            Self::load_from_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, CodemodError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(ConfigError::from)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, CodemodError> {
        toml::to_string_pretty(self).map_err(|e| {
            ConfigError::Serialize {
                message: e.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::BackupMode;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.backup.mode, BackupMode::Keep);
        assert_eq!(config.backup.suffix, ".backup");
        assert!(config.files.extensions.contains(&"tsx".to_string()));
        assert!(config.files.exclude.contains(&"**/*.d.ts".to_string()));
        assert_eq!(config.typed_client.factory, "createClient");
        assert_eq!(config.prefetch_link.outer, "BreadcrumbLink");
        assert!(config.migrations.is_empty());
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let toml_content = r#"
[backup]
mode = "transient"

[typed_client]
wrapper = "withTypes"
"#;
        let config: Config = toml::from_str(toml_content).unwrap();

        assert_eq!(config.backup.mode, BackupMode::Transient);
        assert_eq!(config.backup.suffix, ".backup");
        assert_eq!(config.typed_client.wrapper, "withTypes");
        assert_eq!(config.typed_client.factory, "createClient");
    }

    #[test]
    fn test_custom_migration_parsing() {
        let toml_content = r#"
[migrations.rename-fetcher]
description = "Rename the legacy fetcher"
exclude = ["**/legacy/**"]

[[migrations.rename-fetcher.rules]]
id = "call"
pattern = "legacyFetch\\("
replacement = "fetcher("
forbids = ["fetcher("]
"#;
        let config: Config = toml::from_str(toml_content).unwrap();
        let migration = config.migrations.get("rename-fetcher").unwrap();

        assert_eq!(migration.rules.len(), 1);
        assert_eq!(migration.rules[0].pattern, r"legacyFetch\(");
        assert_eq!(migration.rules[0].forbids, vec!["fetcher(".to_string()]);
        assert!(migration.rules[0].requires.is_empty());
        assert_eq!(migration.exclude, vec!["**/legacy/**".to_string()]);
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(dir.path()).unwrap();
        assert_eq!(config.backup.suffix, ".backup");
    }

    #[test]
    fn test_load_from_file_reports_parse_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "[backup\nmode = ").unwrap();

        let err = Config::load_from_file(&path).unwrap_err();
        assert!(matches!(err, CodemodError::Config(ConfigError::Parse(_))));
    }

    #[test]
    fn test_toml_round_trip_preserves_backup_mode() {
        let mut config = Config::default();
        config.backup.mode = BackupMode::None;

        let serialized = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.backup.mode, BackupMode::None);
    }
}
