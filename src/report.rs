/*!
 * Reporting functionality for projcat
 *
 * Summarizes a run as console tables rendered with the tabled library.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::utils::format_file_size;

/// What the concatenation pass did, file by file
#[derive(Debug, Clone, Default)]
pub struct ConcatReport {
    /// Scan root basename
    pub project_name: String,
    /// Branch embedded in the headers
    pub branch: String,
    /// Relative paths that got a content block, in output order
    pub written: Vec<String>,
    /// Written files whose content was blank
    pub empty_files: Vec<String>,
    /// Written files that could not be read, with the error message
    pub read_errors: Vec<(String, String)>,
    /// Files left out because of their name
    pub skipped_by_name: Vec<String>,
    /// Files left out because of their extension
    pub skipped_by_extension: Vec<String>,
    /// Configured root files that do not exist
    pub missing_root_files: Vec<String>,
    /// Configured include directories that do not exist
    pub missing_dirs: Vec<String>,
    /// Traversal errors inside include directories
    pub walk_errors: Vec<String>,
}

impl ConcatReport {
    /// Number of recoverable problems met during the pass
    pub fn warning_count(&self) -> usize {
        self.read_errors.len()
            + self.missing_root_files.len()
            + self.missing_dirs.len()
            + self.walk_errors.len()
    }
}

/// Statistics for a complete run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Tree output path
    pub tree_file: String,
    /// Concatenation output path
    pub concat_file: String,
    /// Size of the concatenation output in bytes
    pub concat_size: u64,
    /// Time taken by both passes
    pub duration: Duration,
    /// Concatenation details
    pub concat: ConcatReport,
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for run results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate a report string
    pub fn generate_report(&self, report: &RunReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &RunReport) {
        println!("\n{}", self.generate_report(report));
    }

    fn create_summary_table(&self, report: &RunReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let concat = &report.concat;
        let rows = vec![
            SummaryRow {
                key: "🌳 Tree File".to_string(),
                value: report.tree_file.clone(),
            },
            SummaryRow {
                key: "📂 Concatenated File".to_string(),
                value: report.concat_file.clone(),
            },
            SummaryRow {
                key: "🏷️ Project / Branch".to_string(),
                value: format!("{} / {}", concat.project_name, concat.branch),
            },
            SummaryRow {
                key: "⏱️ Process Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "📄 Files Written".to_string(),
                value: format!(
                    "{} ({} empty)",
                    concat.written.len(),
                    concat.empty_files.len()
                ),
            },
            SummaryRow {
                key: "🚫 Files Skipped".to_string(),
                value: format!(
                    "{} by name, {} by extension",
                    concat.skipped_by_name.len(),
                    concat.skipped_by_extension.len()
                ),
            },
            SummaryRow {
                key: "📦 Output Size".to_string(),
                value: format_file_size(report.concat_size),
            },
        ];

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn create_warnings_table(&self, concat: &ConcatReport) -> String {
        #[derive(Tabled)]
        struct WarningRow {
            #[tabled(rename = "Kind")]
            kind: &'static str,

            #[tabled(rename = "Path")]
            path: String,

            #[tabled(rename = "Detail")]
            detail: String,
        }

        let mut rows = Vec::new();
        rows.extend(concat.missing_root_files.iter().map(|p| WarningRow {
            kind: "missing root file",
            path: p.clone(),
            detail: String::new(),
        }));
        rows.extend(concat.missing_dirs.iter().map(|p| WarningRow {
            kind: "missing directory",
            path: p.clone(),
            detail: String::new(),
        }));
        rows.extend(concat.read_errors.iter().map(|(p, msg)| WarningRow {
            kind: "read error",
            path: p.clone(),
            detail: msg.clone(),
        }));
        rows.extend(concat.walk_errors.iter().map(|msg| WarningRow {
            kind: "walk error",
            path: String::new(),
            detail: msg.clone(),
        }));

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn generate_console_report(&self, report: &RunReport) -> String {
        let summary = format!(
            "✅  PROCESS COMPLETE\n{}",
            self.create_summary_table(report)
        );

        if report.concat.warning_count() == 0 {
            return summary;
        }

        format!(
            "⚠️  WARNINGS\n{}\n\n{}",
            self.create_warnings_table(&report.concat),
            summary
        )
    }
}
