//! Generate man page command

use anyhow::{Context, Result};
use clap::CommandFactory;
use std::fs;

use super::GenerateManArgs;
use crate::cli::exit_codes;
use crate::cli::Cli;

/// Execute the generate-man command
pub async fn execute(args: GenerateManArgs) -> Result<i32> {
    let man = clap_mangen::Man::new(Cli::command());
    let output_path = args.output.join("codemod.1");

    let mut buffer: Vec<u8> = Vec::new();
    man.render(&mut buffer)
        .context("Failed to generate man page")?;

    fs::write(&output_path, buffer)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    println!("Man page generated: {}", output_path.display());

    Ok(exit_codes::SUCCESS)
}
