pub mod json;
pub mod md;

use crate::error::RuncastError;
use crate::types::report::RunReport;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(report: &RunReport, format: OutputFormat) -> Result<String, RuncastError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(RuncastError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
    }
}
