//! # CLI Module
//!
//! Command-line interface built with `clap`.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `run` | Apply a migration to the project or to explicit paths |
//! | `list` | List available migrations and their rules |
//! | `init` | Write a default `.codemod.toml` |
//!
//! ## Global Options
//!
//! - `-v, --verbose` - Increase verbosity level (-v, -vv, -vvv)
//! - `-c, --config <FILE>` - Path to configuration file
//! - `-C, --directory <DIR>` - Project directory (defaults to current directory)
//!
//! ## Examples
//!
//! ```bash
//! # Preview a migration
//! codemod run typed-client --dry-run --diff
//!
//! # Apply it to two files without prompting
//! codemod run prefetch-link src/app/orders/page.tsx src/app/users/page.tsx --yes
//!
//! # Machine-readable report
//! codemod run named-exports --yes --format json -o report.json
//! ```

pub mod commands;
pub mod exit_codes;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use commands::{GenerateManArgs, InitArgs, ListArgs, RunArgs};
use crate::config::loader::CONFIG_FILENAME;
use crate::config::Config;
use crate::error::CodemodError;

/// codemod - apply idempotent, pattern-based source migrations
#[derive(Parser, Debug)]
#[command(name = "codemod")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE", env = "CODEMOD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Project directory (defaults to current directory)
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply a migration
    Run(RunArgs),

    /// List available migrations
    List(ListArgs),

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Generate man page (hidden, for packaging)
    #[command(hide = true)]
    GenerateMan(GenerateManArgs),
}

/// Global options shared by every command
#[derive(Debug, Clone)]
pub struct Context {
    config: Option<PathBuf>,
    directory: PathBuf,
}

impl Context {
    /// Build from the global flags
    pub fn new(config: Option<PathBuf>, directory: Option<PathBuf>) -> Self {
        Self {
            config,
            directory: directory.unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    /// Project directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Where `init` writes and `run` looks by default
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| self.directory.join(CONFIG_FILENAME))
    }

    /// Load the explicit config file, or `.codemod.toml` under the directory
    pub fn load_config(&self) -> Result<Config, CodemodError> {
        match &self.config {
            Some(path) => Config::load_from_file(path),
            None => Config::load_or_default(&self.directory),
        }
    }
}
