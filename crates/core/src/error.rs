use thiserror::Error;

/// Errors surfaced to the person who uploaded the report. Every variant is
/// recoverable by retrying with a different file; none leaves partial state
/// behind.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error(
        "unsupported file format `.{extension}`: expected a delimited text report (.csv, .tsv or .txt)"
    )]
    UnsupportedFormat { extension: String },

    #[error("the report has no data rows: expected a header row followed by at least one row")]
    EmptyOrHeaderOnly,

    #[error(
        "could not find a clicks or spend column in the report; headers seen: {headers}"
    )]
    MissingRequiredColumns { headers: String },

    #[error("no usable rows in the report: every row had zero clicks and zero spend")]
    NoValidRows,

    #[error("failed to read report: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse report: {0}")]
    Csv(#[from] csv::Error),
}
