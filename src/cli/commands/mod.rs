//! CLI commands module

pub mod generate_man;
pub mod init;
pub mod list;
pub mod run;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Migration to apply (see `codemod list`)
    #[arg(value_name = "MIGRATION")]
    pub migration: String,

    /// Files to rewrite, in order (defaults to scanning the project directory)
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Show what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Overwrite files without writing a backup
    #[arg(long, conflicts_with = "transient_backup")]
    pub no_backup: bool,

    /// Remove each backup once its file has been rewritten
    #[arg(long)]
    pub transient_backup: bool,

    /// Include a unified diff for every changed file
    #[arg(long)]
    pub diff: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Output format
    #[arg(short, long, default_value = "terminal")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, default_value = "terminal")]
    pub format: OutputFormat,
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the generate-man command
#[derive(Args, Debug)]
pub struct GenerateManArgs {
    /// Output directory for the man page
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}
