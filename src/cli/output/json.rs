//! JSON output formatting

use serde::Serialize;

use super::ReportRenderer;
use crate::error::CodemodError;
use crate::rules::RuleSet;
use crate::runner::RunReport;

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct RunOutput<'a> {
    version: &'static str,
    #[serde(flatten)]
    report: &'a RunReport,
}

#[derive(Serialize)]
struct MigrationSummary<'a> {
    name: &'a str,
    description: &'a str,
    rules: Vec<&'a str>,
    exclude: &'a [String],
}

impl ReportRenderer for JsonOutput {
    fn render_run(&self, report: &RunReport) -> Result<String, CodemodError> {
        let output = RunOutput {
            version: env!("CARGO_PKG_VERSION"),
            report,
        };
        Ok(serde_json::to_string_pretty(&output)?)
    }

    fn render_migrations(&self, migrations: &[RuleSet]) -> Result<String, CodemodError> {
        let output: Vec<MigrationSummary<'_>> = migrations
            .iter()
            .map(|set| MigrationSummary {
                name: set.name(),
                description: set.description(),
                rules: set.rule_ids(),
                exclude: set.excludes(),
            })
            .collect();
        Ok(serde_json::to_string_pretty(&output)?)
    }
}
