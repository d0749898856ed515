//! # BankApp Reports
//!
//! Read-only reporting over the client repository.
//!
//! - [`BankReportService`] - number of clients, number of accounts, credit sum
//! - [`BankSummaryReport`] - per-account snapshot for export
//! - [`CsvExporter`], [`JsonExporter`], [`MarkdownExporter`] - output formats
//!
//! ## Example
//!
//! ```rust,ignore
//! use bankapp_reports::{BankReportService, MarkdownExporter, ReportExporter};
//!
//! let reports = BankReportService::new(banking.repository());
//! let summary = reports.summary("Bank Summary");
//! println!("{}", MarkdownExporter::new().export(&summary));
//! ```

pub mod bank_report;
pub mod exporters;

pub use bank_report::{AccountLine, BankReportService, BankSummaryReport};
pub use exporters::{CsvExporter, JsonExporter, MarkdownExporter, ReportData, ReportExporter};
