//! Init command - Initialize a new configuration file

use anyhow::{Context as _, Result};
use colored::Colorize;
use std::fs;

use super::InitArgs;
use crate::cli::exit_codes;
use crate::cli::Context;
use crate::config::Config;

/// Appended to the generated file so custom migrations are discoverable
const CUSTOM_MIGRATION_EXAMPLE: &str = r#"
# Custom migrations are regex rule sets:
#
# [migrations.rename-fetcher]
# description = "Rename legacyFetch to fetchJson"
# exclude = ["**/*.test.ts"]
#
# [[migrations.rename-fetcher.rules]]
# id = "call"
# pattern = '\blegacyFetch\('
# replacement = "fetchJson("
# requires = ["legacyFetch("]
# forbids = []
"#;

pub async fn execute(context: &Context, args: InitArgs) -> Result<i32> {
    let config_path = context.config_path();

    if config_path.exists() && !args.force {
        eprintln!(
            "{} {} already exists. Use --force to overwrite.",
            "Error:".red().bold(),
            config_path.display()
        );
        return Ok(exit_codes::ERROR);
    }

    let mut content = Config::default().to_toml()?;
    content.push_str(CUSTOM_MIGRATION_EXAMPLE);

    fs::write(&config_path, &content).with_context(|| {
        format!("Failed to write configuration file {}", config_path.display())
    })?;

    println!(
        "{} Created {}",
        "Success:".green().bold(),
        config_path.display().to_string().cyan()
    );

    println!("\nNext steps:");
    println!("  1. Review and customize {}", config_path.display().to_string().cyan());
    println!("  2. Run {} to see available migrations", "codemod list".cyan());
    println!(
        "  3. Run {} to preview a migration",
        "codemod run <MIGRATION> --dry-run --diff".cyan()
    );

    Ok(exit_codes::SUCCESS)
}
