//! Terminal output formatting with colors

use colored::Colorize;
use std::time::Duration;

use super::ReportRenderer;
use crate::error::CodemodError;
use crate::rules::RuleSet;
use crate::runner::{FileReport, FileStatus, RunReport};
use crate::utils::timing::format_duration;

pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }

    fn format_header(&self, report: &RunReport) -> String {
        let mut header = format!(
            "\n{} v{}\n\n{} {}\n{} {}\n",
            "codemod".cyan().bold(),
            env!("CARGO_PKG_VERSION"),
            "Migration:".dimmed(),
            report.migration.white().bold(),
            "Started:".dimmed(),
            report.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
        );
        if report.dry_run {
            header.push_str(&format!("{}\n", "Dry run: no files will be written".yellow()));
        }
        header
    }

    fn format_file(&self, file: &FileReport) -> String {
        let marker = match file.status {
            FileStatus::Changed => "✓".green(),
            FileStatus::Skipped => "·".dimmed(),
            FileStatus::NotFound => "?".yellow(),
            FileStatus::Failed => "✗".red(),
        };

        let mut output = format!(
            "  {} {} {}\n",
            marker,
            file.path.display(),
            format!("({})", file.status.label()).dimmed()
        );

        for rule in &file.applied_rules {
            output.push_str(&format!("    {} {}\n", "└─".dimmed(), rule.cyan()));
        }
        if let Some(backup) = &file.backup {
            output.push_str(&format!(
                "    {} backup: {}\n",
                "└─".dimmed(),
                backup.display().to_string().dimmed()
            ));
        }
        if let Some(error) = &file.error {
            output.push_str(&format!("    {} {}\n", "└─".dimmed(), error.red()));
        }
        if let Some(diff) = &file.diff {
            output.push_str(&self.format_diff(diff));
        }

        output
    }

    fn format_diff(&self, diff: &str) -> String {
        let mut output = String::new();
        for line in diff.lines() {
            let colored_line = if line.starts_with("+++") || line.starts_with("---") {
                line.bold()
            } else if line.starts_with('+') {
                line.green()
            } else if line.starts_with('-') {
                line.red()
            } else if line.starts_with("@@") {
                line.cyan()
            } else {
                line.normal()
            };
            output.push_str(&format!("      {}\n", colored_line));
        }
        output
    }

    fn format_summary(&self, report: &RunReport) -> String {
        let summary = &report.summary;
        let mut output = format!(
            "\n{}\n{}\n\n",
            "━".repeat(50).dimmed(),
            "  SUMMARY".bold()
        );

        let changed_label = if report.dry_run { "Would change:" } else { "Changed:" };
        output.push_str(&format!("  {:<14}{}\n", "Processed:", summary.processed));
        output.push_str(&format!(
            "  {:<14}{}\n",
            changed_label,
            summary.changed.to_string().green()
        ));
        output.push_str(&format!("  {:<14}{}\n", "Skipped:", summary.skipped));
        if summary.not_found > 0 {
            output.push_str(&format!(
                "  {:<14}{}\n",
                "Not found:",
                summary.not_found.to_string().yellow()
            ));
        }
        if summary.failed > 0 {
            output.push_str(&format!(
                "  {:<14}{}\n",
                "Failed:",
                summary.failed.to_string().red()
            ));
        }
        output.push_str(&format!(
            "\n  {} {}\n",
            "Duration:".dimmed(),
            format_duration(Duration::from_millis(report.duration_ms))
        ));

        output
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer for TerminalOutput {
    fn render_run(&self, report: &RunReport) -> Result<String, CodemodError> {
        let mut output = self.format_header(report);

        output.push_str(&format!(
            "\n{}\n{}\n\n",
            "━".repeat(50).dimmed(),
            "  FILES".bold()
        ));
        if report.files().is_empty() {
            output.push_str(&format!("  {}\n", "No files selected.".yellow()));
        }
        for file in report.files() {
            output.push_str(&self.format_file(file));
        }

        output.push_str(&self.format_summary(report));
        Ok(output)
    }

    fn render_migrations(&self, migrations: &[RuleSet]) -> Result<String, CodemodError> {
        let mut output = format!("\n{}\n\n", "Available migrations".bold());

        for set in migrations {
            output.push_str(&format!("  {}\n", set.name().cyan().bold()));
            if !set.description().is_empty() {
                output.push_str(&format!("    {}\n", set.description()));
            }
            for id in set.rule_ids() {
                output.push_str(&format!("    {} {}\n", "•".dimmed(), id));
            }
            if !set.excludes().is_empty() {
                output.push_str(&format!(
                    "    {} {}\n",
                    "excludes:".dimmed(),
                    set.excludes().join(", ").dimmed()
                ));
            }
            output.push('\n');
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::rules::migrations;
    use std::path::PathBuf;

    fn create_test_report(dry_run: bool) -> RunReport {
        let mut report = RunReport::new("prefetch-link", dry_run);
        report.record(
            FileReport::new("src/app/orders/page.tsx", FileStatus::Changed)
                .with_applied_rules(vec!["prefetch-link/string-attr".to_string()])
                .with_backup(Some(PathBuf::from("src/app/orders/page.tsx.backup")))
                .with_diff(Some("--- a/x\n+++ b/x\n@@ -1 +1 @@\n-old\n+new\n".to_string())),
        );
        report.record(FileReport::new("src/gone.tsx", FileStatus::NotFound).with_error("missing"));
        report
    }

    #[test]
    fn test_render_run_lists_files_and_rules() {
        let rendered = TerminalOutput::new().render_run(&create_test_report(false)).unwrap();

        assert!(rendered.contains("prefetch-link"));
        assert!(rendered.contains("src/app/orders/page.tsx"));
        assert!(rendered.contains("prefetch-link/string-attr"));
        assert!(rendered.contains("page.tsx.backup"));
        assert!(rendered.contains("missing"));
        assert!(rendered.contains("SUMMARY"));
        assert!(rendered.contains("Not found:"));
        assert!(!rendered.contains("Dry run"));
    }

    #[test]
    fn test_render_run_dry_run_wording() {
        let rendered = TerminalOutput::new().render_run(&create_test_report(true)).unwrap();

        assert!(rendered.contains("Dry run"));
        assert!(rendered.contains("Would change:"));
        assert!(rendered.contains("+new"));
    }

    #[test]
    fn test_render_run_empty() {
        let report = RunReport::new("typed-client", false);
        let rendered = TerminalOutput::new().render_run(&report).unwrap();
        assert!(rendered.contains("No files selected."));
    }

    #[test]
    fn test_render_migrations() {
        let sets = migrations::load_all(&Config::default()).unwrap();
        let rendered = TerminalOutput::new().render_migrations(&sets).unwrap();

        assert!(rendered.contains("typed-client"));
        assert!(rendered.contains("typed-client/call-site"));
        assert!(rendered.contains("named-exports"));
        assert!(rendered.contains("excludes:"));
    }
}
