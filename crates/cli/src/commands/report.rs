//! Bank summary report command

use anyhow::{Context, Result};
use bankapp_business::{BankConfig, BankingService};
use bankapp_reports::{
    BankReportService, CsvExporter, JsonExporter, MarkdownExporter, ReportExporter,
};
use std::path::Path;
use tracing::info;

use crate::ReportFormat;

/// Seed the bank from `config` and render its summary
pub fn render(config: &BankConfig, format: ReportFormat) -> Result<String> {
    let bank = BankingService::from_config(config).context("Failed to seed the bank")?;
    let summary = BankReportService::new(bank.repository()).summary("Bank Summary");

    let exporter: Box<dyn ReportExporter> = match format {
        ReportFormat::Csv => Box::new(CsvExporter::new()),
        ReportFormat::Json => Box::new(JsonExporter::new()),
        ReportFormat::Markdown => Box::new(MarkdownExporter::new()),
    };
    Ok(exporter.export(&summary))
}

/// Write the report to `output`, or stdout when no path is given
pub fn generate(config: &BankConfig, format: ReportFormat, output: Option<&Path>) -> Result<()> {
    let rendered = render(config, format)?;

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!(path = %path.display(), "Report written");
        }
        None => print!("{}", rendered),
    }
    Ok(())
}
