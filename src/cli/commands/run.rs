//! Run command - apply one migration to a file list
//!
//! Selects files (explicit paths, or a scan of the project directory),
//! rewrites them through the migration's rule set and prints a report.

use anyhow::{Context as _, Result};
use colored::Colorize;
use dialoguer::Confirm;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use super::RunArgs;
use crate::cli::exit_codes;
use crate::cli::output::renderer;
use crate::cli::Context;
use crate::config::{BackupConfig, FilesConfig};
use crate::rules::migrations::{self, named_exports};
use crate::runner::{RunReport, Runner};
use crate::scanner::FileSelector;
use crate::writer::{BackupMode, BackupWriter};

/// Execute the run command
///
/// Returns [`exit_codes::FILES_FAILED`] when any file was not found or
/// could not be written; the rest of the list is still processed.
pub async fn execute(context: &Context, args: RunArgs) -> Result<i32> {
    let config = context
        .load_config()
        .context("Failed to load configuration")?;

    let rule_set = migrations::load(&args.migration, &config)?;

    let selector = FileSelector::new(context.directory(), &config.files, rule_set.excludes())?;
    let paths = if args.paths.is_empty() {
        selector.select()
    } else {
        selector.resolve(&args.paths)
    };
    info!(migration = rule_set.name(), files = paths.len(), "Files selected");

    if !args.yes && !args.dry_run && !paths.is_empty() {
        let proceed = Confirm::new()
            .with_prompt(format!(
                "Apply '{}' to {} file(s)?",
                rule_set.name(),
                paths.len()
            ))
            .default(false)
            .interact()?;

        if !proceed {
            println!("{}", "Aborted.".yellow());
            return Ok(exit_codes::SUCCESS);
        }
    }

    let writer = backup_writer(&config.backup, &args);
    let report = if rule_set.name() == named_exports::NAME {
        run_named_exports(context, &config.files, paths, writer, args.diff)?
    } else {
        Runner::new(&rule_set, writer).with_diff(args.diff).run(paths)
    };

    let rendered = renderer(args.format).render_run(&report)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &rendered)
            .with_context(|| format!("Failed to write report to {}", output_path.display()))?;
        eprintln!("Report written to: {}", output_path.display());
    } else {
        println!("{rendered}");
    }

    Ok(if report.has_failures() {
        exit_codes::FILES_FAILED
    } else {
        exit_codes::SUCCESS
    })
}

/// Convert default exports, then fix the files importing them
///
/// Converted files get their own imports fixed in the same pass. Every
/// other project file (framework entry points included) gets a second,
/// import-only pass, so no file is written twice.
fn run_named_exports(
    context: &Context,
    files: &FilesConfig,
    paths: Vec<PathBuf>,
    writer: BackupWriter,
    diff: bool,
) -> Result<RunReport> {
    let source_root = context.directory().join(named_exports::SOURCE_ROOT);
    let modules = named_exports::converted_modules(&source_root, &paths);
    info!(modules = modules.len(), "Default exports to convert");

    let conversion = named_exports::rule_set_with_importers(&modules)?;
    let mut report = Runner::new(&conversion, writer.clone())
        .with_diff(diff)
        .run(&paths);

    let importers = named_exports::importers_rule_set(&modules)?;
    if !importers.is_empty() {
        let converted: HashSet<&PathBuf> = paths.iter().collect();
        let others: Vec<PathBuf> = FileSelector::new(context.directory(), files, &[])?
            .select()
            .into_iter()
            .filter(|path| !converted.contains(path))
            .collect();
        info!(files = others.len(), "Updating importers");

        report.merge(Runner::new(&importers, writer).with_diff(diff).run(others));
    }

    Ok(report)
}

/// Writer for the configured backup settings, overridden by flags
fn backup_writer(backup: &BackupConfig, args: &RunArgs) -> BackupWriter {
    let mode = if args.no_backup {
        BackupMode::None
    } else if args.transient_backup {
        BackupMode::Transient
    } else {
        backup.mode
    };

    BackupWriter::new(mode, backup.suffix.clone()).dry_run(args.dry_run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::OutputFormat;
    use std::path::{Path, PathBuf};

    fn args() -> RunArgs {
        RunArgs {
            migration: "typed-client".to_string(),
            paths: Vec::new(),
            dry_run: false,
            no_backup: false,
            transient_backup: false,
            diff: false,
            yes: true,
            format: OutputFormat::Json,
            output: None,
        }
    }

    #[test]
    fn test_backup_writer_uses_config_by_default() {
        let backup = BackupConfig {
            mode: BackupMode::Transient,
            suffix: ".orig".to_string(),
        };
        let writer = backup_writer(&backup, &args());

        assert!(!writer.is_dry_run());
        assert_eq!(writer.backup_path(Path::new("a.ts")), PathBuf::from("a.ts.orig"));
    }

    #[test]
    fn test_backup_writer_flags_override() {
        let mut run_args = args();
        run_args.no_backup = true;
        run_args.dry_run = true;

        let writer = backup_writer(&BackupConfig::default(), &run_args);
        assert!(writer.is_dry_run());
    }

    #[tokio::test]
    async fn test_execute_rewrites_and_writes_report() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = dir.path().join("route.ts");
        fs::write(
            &source,
            "  const supabase = await createClient()\n  const { data } = await supabase.auth.getUser()\n",
        )
        .unwrap();
        let report_path = dir.path().join("report.json");

        let context = Context::new(None, Some(dir.path().to_path_buf()));
        let mut run_args = args();
        run_args.output = Some(report_path.clone());

        let code = execute(&context, run_args).await.unwrap();
        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();

        assert_eq!(code, exit_codes::SUCCESS);
        assert_eq!(report["summary"]["changed"], 1);
        assert!(fs::read_to_string(&source).unwrap().contains("typed(client)"));
        assert!(dir.path().join("route.ts.backup").exists());
    }

    #[tokio::test]
    async fn test_execute_named_exports_updates_importers() {
        let dir = tempfile::TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/components")).unwrap();
        fs::create_dir_all(root.join("src/app/orders")).unwrap();
        fs::write(
            root.join("src/components/OrderCard.tsx"),
            "export default function OrderCard() {\n  return null\n}\n",
        )
        .unwrap();
        fs::write(
            root.join("src/components/OrderList.tsx"),
            "import Card from '@/components/OrderCard'\nconst OrderList = () => null\nexport default OrderList\n",
        )
        .unwrap();
        fs::write(
            root.join("src/app/orders/page.tsx"),
            "import OrderList from \"@/components/OrderList\"\nexport default function Page() {}\n",
        )
        .unwrap();

        let context = Context::new(None, Some(root.to_path_buf()));
        let mut run_args = args();
        run_args.migration = "named-exports".to_string();
        run_args.no_backup = true;
        run_args.output = Some(root.join("report.json"));

        let code = execute(&context, run_args).await.unwrap();

        assert_eq!(code, exit_codes::SUCCESS);
        assert_eq!(
            fs::read_to_string(root.join("src/components/OrderCard.tsx")).unwrap(),
            "export function OrderCard() {\n  return null\n}\n"
        );
        assert_eq!(
            fs::read_to_string(root.join("src/components/OrderList.tsx")).unwrap(),
            "import { OrderCard as Card } from '@/components/OrderCard'\nexport const OrderList = () => null\n"
        );
        // The page keeps its default export but its import is updated
        assert_eq!(
            fs::read_to_string(root.join("src/app/orders/page.tsx")).unwrap(),
            "import { OrderList } from \"@/components/OrderList\"\nexport default function Page() {}\n"
        );

        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(root.join("report.json")).unwrap()).unwrap();
        assert_eq!(report["summary"]["changed"], 3);
    }

    #[tokio::test]
    async fn test_execute_unknown_migration() {
        let dir = tempfile::TempDir::new().unwrap();
        let context = Context::new(None, Some(dir.path().to_path_buf()));
        let mut run_args = args();
        run_args.migration = "does-not-exist".to_string();

        let err = execute(&context, run_args).await.unwrap_err();
        assert_eq!(exit_codes::for_error(&err), exit_codes::INVALID_ARGS);
    }
}
