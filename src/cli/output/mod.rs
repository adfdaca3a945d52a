//! Output formatting module for CLI

pub mod json;
mod terminal;

pub use json::JsonOutput;
pub use terminal::TerminalOutput;

use crate::error::CodemodError;
use crate::rules::RuleSet;
use crate::runner::RunReport;

use super::commands::OutputFormat;

/// Trait for rendering command output
pub trait ReportRenderer {
    /// Render the result of a migration run
    fn render_run(&self, report: &RunReport) -> Result<String, CodemodError>;

    /// Render the list of available migrations
    fn render_migrations(&self, migrations: &[RuleSet]) -> Result<String, CodemodError>;
}

/// Renderer for a `--format` value
pub fn renderer(format: OutputFormat) -> Box<dyn ReportRenderer> {
    match format {
        OutputFormat::Terminal => Box::new(TerminalOutput::new()),
        OutputFormat::Json => Box::new(JsonOutput::new()),
    }
}
