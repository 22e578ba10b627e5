pub mod config;
pub mod error;
pub mod parser;
pub mod quiz;
pub mod report;
pub mod rules;
pub mod schema;
pub mod score;
pub mod types;
pub mod window;

use std::path::Path;

pub use error::AnalyzeError;
pub use parser::{ParsedRecords, RawTable};
pub use report::Report;
pub use rules::Thresholds;

#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub thresholds: Thresholds,
}

/// Run the full pipeline over a report file on disk: read, detect columns,
/// parse records, infer the window, classify and score.
pub fn analyze_file(input: &Path, opts: &AnalyzeOptions) -> Result<Report, AnalyzeError> {
    let table = parser::read_table(input)?;
    analyze_table(&table, opts)
}

/// Same pipeline for a table that was split elsewhere (spreadsheet sources,
/// tests). This is the engine's contract with any file-source collaborator:
/// a header row plus ordered data rows.
pub fn analyze_table(table: &RawTable, opts: &AnalyzeOptions) -> Result<Report, AnalyzeError> {
    let columns = schema::detect_columns(&table.headers)?;
    let parsed = parser::parse_records(&columns, table)?;
    Ok(analyze_records(&parsed, &opts.thresholds))
}

/// Score an already-parsed record set. Pure and synchronous; analyzing the
/// same records with the same thresholds always yields the same report.
pub fn analyze_records(parsed: &ParsedRecords, thresholds: &Thresholds) -> Report {
    let window = window::ReportWindow::from_bounds(parsed.min_start, parsed.max_end);
    let classified = rules::classify(&parsed.records, thresholds);
    score::score_report(parsed, &classified, &window)
}
