//! List command - show available migrations

use anyhow::{Context as _, Result};

use super::ListArgs;
use crate::cli::exit_codes;
use crate::cli::output::renderer;
use crate::cli::Context;
use crate::rules::migrations;

/// Execute the list command
pub async fn execute(context: &Context, args: ListArgs) -> Result<i32> {
    let config = context
        .load_config()
        .context("Failed to load configuration")?;

    let sets = migrations::load_all(&config)?;
    println!("{}", renderer(args.format).render_migrations(&sets)?);

    Ok(exit_codes::SUCCESS)
}
