/*!
 * Reporting functionality for filexport
 *
 * Provides functionality for generating formatted reports of extraction
 * results using the tabled library for clean, consistent table rendering.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::types::ExportFormat;
use crate::utils::format_file_size;

/// Information about a file in the report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReportInfo {
    /// Number of lines in the file
    pub lines: usize,
    /// Number of characters in the file
    pub chars: usize,
    /// Size of the file in bytes
    pub bytes: u64,
}

/// Statistics for one export run
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Where the export was written
    pub destination: String,
    /// Format of the export
    pub format: ExportFormat,
    /// Time taken to read and convert
    pub duration: Duration,
    /// Number of files processed
    pub files_processed: usize,
    /// Total number of lines
    pub total_lines: usize,
    /// Total number of characters
    pub total_chars: usize,
    /// Total number of bytes read
    pub total_bytes: u64,
    /// Size of the rendered export in bytes
    pub export_bytes: usize,
    /// Details for each file, in batch order
    pub file_details: Vec<(String, FileReportInfo)>,
    /// Outcome of the clipboard copy, if one was requested
    pub copied: Option<bool>,
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for export results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate a report string based on export statistics
    pub fn generate_report(&self, report: &ExportReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    /// Print the report to stderr, keeping stdout for the export itself
    pub fn print_report(&self, report: &ExportReport) {
        eprintln!("\n{}", self.generate_report(report));
    }

    // Keep the tail of long names, which carries the file name
    fn format_name(&self, name: &str, max_len: usize) -> String {
        let count = name.chars().count();
        if count <= max_len {
            return name.to_string();
        }

        let tail: String = name.chars().skip(count - (max_len - 3)).collect();
        format!("...{}", tail)
    }

    fn create_summary_table(&self, report: &ExportReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let mut rows = vec![
            SummaryRow {
                key: "📂 Destination".to_string(),
                value: report.destination.clone(),
            },
            SummaryRow {
                key: "🧾 Format".to_string(),
                value: report.format.to_string(),
            },
            SummaryRow {
                key: "⏱️ Process Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "📄 Files Processed".to_string(),
                value: self.format_number(report.files_processed),
            },
            SummaryRow {
                key: "📝 Total Lines".to_string(),
                value: self.format_number(report.total_lines),
            },
            SummaryRow {
                key: "🔤 Total Characters".to_string(),
                value: self.format_number(report.total_chars),
            },
            SummaryRow {
                key: "📥 Input Size".to_string(),
                value: format_file_size(report.total_bytes),
            },
            SummaryRow {
                key: "📦 Export Size".to_string(),
                value: format_file_size(report.export_bytes as u64),
            },
        ];

        if let Some(copied) = report.copied {
            rows.push(SummaryRow {
                key: "📋 Clipboard".to_string(),
                value: if copied { "copied" } else { "failed" }.to_string(),
            });
        }

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn create_files_table(&self, report: &ExportReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File")]
            name: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Size")]
            size: String,
        }

        let rows: Vec<FileRow> = report
            .file_details
            .iter()
            .take(15)
            .map(|(name, info)| FileRow {
                name: self.format_name(name, 60),
                lines: self.format_number(info.lines),
                size: format_file_size(info.bytes),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn generate_console_report(&self, report: &ExportReport) -> String {
        let summary_table = self.create_summary_table(report);
        let files_table = self.create_files_table(report);

        let summary_title = "✅  EXPORT COMPLETE";
        let files_title = if report.file_details.len() > 15 {
            "📋  FIRST 15 FILES"
        } else {
            "📋  PROCESSED FILES"
        };

        format!(
            "{}\n{}\n\n{}\n{}",
            files_title, files_table, summary_title, summary_table
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report(files: usize) -> ExportReport {
        ExportReport {
            destination: "stdout".to_string(),
            format: ExportFormat::Markdown,
            duration: Duration::from_millis(12),
            files_processed: files,
            total_lines: files * 10,
            total_chars: files * 100,
            total_bytes: files as u64 * 100,
            export_bytes: files * 120,
            file_details: (0..files)
                .map(|i| {
                    (
                        format!("file{}.txt", i),
                        FileReportInfo {
                            lines: 10,
                            chars: 100,
                            bytes: 100,
                        },
                    )
                })
                .collect(),
            copied: Some(true),
        }
    }

    #[test]
    fn test_report_contains_summary() {
        let reporter = Reporter::new(ReportFormat::ConsoleTable);
        let output = reporter.generate_report(&sample_report(2));

        assert!(output.contains("EXPORT COMPLETE"));
        assert!(output.contains("PROCESSED FILES"));
        assert!(output.contains("file0.txt"));
        assert!(output.contains("markdown"));
        assert!(output.contains("copied"));
    }

    #[test]
    fn test_report_truncates_long_batches() {
        let reporter = Reporter::new(ReportFormat::ConsoleTable);
        let output = reporter.generate_report(&sample_report(20));

        assert!(output.contains("FIRST 15 FILES"));
        assert!(output.contains("file14.txt"));
        assert!(!output.contains("file15.txt"));
    }

    #[test]
    fn test_format_number() {
        let reporter = Reporter::new(ReportFormat::ConsoleTable);
        assert_eq!(reporter.format_number(999), "999");
        assert_eq!(reporter.format_number(1_500), "1.5K");
        assert_eq!(reporter.format_number(2_000_000), "2.0M");
    }

    #[test]
    fn test_format_name_keeps_tail() {
        let reporter = Reporter::new(ReportFormat::ConsoleTable);
        let name = format!("{}/main.rs", "deep".repeat(20));
        let formatted = reporter.format_name(&name, 20);

        assert_eq!(formatted.chars().count(), 20);
        assert!(formatted.starts_with("..."));
        assert!(formatted.ends_with("/main.rs"));
    }
}
