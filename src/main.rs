//! codemod - one-shot, re-runnable source migrations
//!
//! This is the main entry point for the CLI application.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use codemod::cli::{self, exit_codes, Cli, Commands};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    let context = cli::Context::new(cli.config, cli.directory);

    let result = match cli.command {
        Commands::Run(args) => cli::commands::run::execute(&context, args).await,
        Commands::List(args) => cli::commands::list::execute(&context, args).await,
        Commands::Init(args) => cli::commands::init::execute(&context, args).await,
        Commands::GenerateMan(args) => cli::commands::generate_man::execute(args).await,
    };

    match result {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(exit_codes::for_error(&e));
        }
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}
