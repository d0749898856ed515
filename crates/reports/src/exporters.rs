//! Report exporters - CSV, JSON, Markdown
//!
//! Every exporter renders anything implementing [`ReportData`].

/// Trait for exporting reports to different formats
pub trait ReportExporter {
    /// Render the report in the target format
    fn export(&self, report: &dyn ReportData) -> String;

    /// File extension for this format
    fn extension(&self) -> &'static str;

    fn mime_type(&self) -> &'static str;
}

/// Tabular data with a title and key/value summary
pub trait ReportData {
    fn title(&self) -> &str;

    fn headers(&self) -> Vec<String>;

    fn rows(&self) -> Vec<Vec<String>>;

    /// Aggregate figures shown above the table
    fn summary(&self) -> Vec<(String, String)>;
}

// ============================================================================
// CSV Exporter
// ============================================================================

/// CSV format exporter (data rows only, summary is omitted)
pub struct CsvExporter {
    delimiter: char,
    include_header: bool,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }
}

impl CsvExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn without_header(mut self) -> Self {
        self.include_header = false;
        self
    }

    fn escape(&self, field: &str) -> String {
        let needs_quotes = field.contains(self.delimiter)
            || field.contains('"')
            || field.contains('\n');
        if needs_quotes {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn push_line(&self, output: &mut String, fields: &[String]) {
        let line: Vec<String> = fields.iter().map(|f| self.escape(f)).collect();
        output.push_str(&line.join(&self.delimiter.to_string()));
        output.push('\n');
    }
}

impl ReportExporter for CsvExporter {
    fn export(&self, report: &dyn ReportData) -> String {
        let mut output = String::new();
        if self.include_header {
            self.push_line(&mut output, &report.headers());
        }
        for row in report.rows() {
            self.push_line(&mut output, &row);
        }
        output
    }

    fn extension(&self) -> &'static str {
        "csv"
    }

    fn mime_type(&self) -> &'static str {
        "text/csv"
    }
}

// ============================================================================
// JSON Exporter
// ============================================================================

/// JSON format exporter
pub struct JsonExporter {
    pretty: bool,
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl JsonExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }
}

impl ReportExporter for JsonExporter {
    fn export(&self, report: &dyn ReportData) -> String {
        let headers = report.headers();

        let data: Vec<serde_json::Value> = report
            .rows()
            .into_iter()
            .map(|row| {
                let record: serde_json::Map<String, serde_json::Value> = headers
                    .iter()
                    .cloned()
                    .zip(row.into_iter().map(serde_json::Value::String))
                    .collect();
                serde_json::Value::Object(record)
            })
            .collect();

        let summary: serde_json::Map<String, serde_json::Value> = report
            .summary()
            .into_iter()
            .map(|(key, value)| (key, serde_json::Value::String(value)))
            .collect();

        let document = serde_json::json!({
            "title": report.title(),
            "summary": summary,
            "data": data,
        });

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        };
        rendered.unwrap_or_default()
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn mime_type(&self) -> &'static str {
        "application/json"
    }
}

// ============================================================================
// Markdown Exporter
// ============================================================================

/// Markdown format exporter
pub struct MarkdownExporter {
    include_summary: bool,
}

impl Default for MarkdownExporter {
    fn default() -> Self {
        Self {
            include_summary: true,
        }
    }
}

impl MarkdownExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_summary(mut self) -> Self {
        self.include_summary = false;
        self
    }

    fn table_row(cells: &[String]) -> String {
        let escaped: Vec<String> = cells.iter().map(|c| c.replace('|', "\\|")).collect();
        format!("| {} |\n", escaped.join(" | "))
    }
}

impl ReportExporter for MarkdownExporter {
    fn export(&self, report: &dyn ReportData) -> String {
        let mut output = format!("# {}\n\n", report.title());

        if self.include_summary {
            output.push_str("## Summary\n\n");
            for (key, value) in report.summary() {
                output.push_str(&format!("- **{}**: {}\n", key, value));
            }
            output.push('\n');
        }

        let headers = report.headers();
        if headers.is_empty() {
            return output;
        }

        output.push_str("## Accounts\n\n");
        output.push_str(&Self::table_row(&headers));
        let separator: Vec<String> = headers.iter().map(|_| "---".to_string()).collect();
        output.push_str(&Self::table_row(&separator));
        for row in report.rows() {
            output.push_str(&Self::table_row(&row));
        }

        output
    }

    fn extension(&self) -> &'static str {
        "md"
    }

    fn mime_type(&self) -> &'static str {
        "text/markdown"
    }
}
