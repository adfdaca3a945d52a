//! Error types for codemod
//!
//! This module defines custom error types using `thiserror` for better error handling
//! and more descriptive error messages throughout the application.

use thiserror::Error;

/// Main error type for codemod
#[derive(Error, Debug)]
pub enum CodemodError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Per-file rewrite errors
    #[error("Rewrite error: {0}")]
    Rewrite(#[from] RewriteError),

    /// The requested migration is neither built in nor configured
    #[error("Unknown migration '{name}' (available: {available})")]
    UnknownMigration {
        /// Name that was requested
        name: String,
        /// Comma-separated list of known migrations
        available: String,
    },
}

/// Errors that occur while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        /// Path to the configuration file
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Failed to parse the configuration file
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Failed to serialize configuration or output
    #[error("Failed to serialize: {message}")]
    Serialize {
        /// Description of what failed
        message: String,
    },

    /// A rule pattern does not compile
    #[error("Invalid pattern in rule '{rule_id}': {source}")]
    InvalidPattern {
        /// Identifier of the offending rule
        rule_id: String,
        /// The underlying regex error
        source: regex::Error,
    },

    /// An exclusion glob does not compile
    #[error("Invalid glob '{pattern}': {source}")]
    InvalidGlob {
        /// The glob as written
        pattern: String,
        /// The underlying globset error
        source: globset::Error,
    },

    /// A configured migration reuses a built-in name
    #[error("Migration '{name}' is already defined")]
    DuplicateMigration {
        /// The conflicting name
        name: String,
    },
}

/// Errors scoped to a single file. None of these abort a run.
#[derive(Error, Debug)]
pub enum RewriteError {
    /// The path does not exist or cannot be read as text
    #[error("File not found or unreadable '{path}': {source}")]
    NotFound {
        /// Path that could not be read
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Writing the rewritten content failed
    #[error("Failed to write '{path}': {source}")]
    Write {
        /// Path that could not be written
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Writing or removing the backup copy failed
    #[error("Failed to handle backup '{path}': {source}")]
    Backup {
        /// Backup path
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },
}

impl RewriteError {
    /// Whether this error means the input file could not be read
    pub fn is_not_found(&self) -> bool {
        matches!(self, RewriteError::NotFound { .. })
    }
}

impl From<serde_json::Error> for CodemodError {
    fn from(err: serde_json::Error) -> Self {
        CodemodError::Config(ConfigError::Serialize {
            message: err.to_string(),
        })
    }
}
