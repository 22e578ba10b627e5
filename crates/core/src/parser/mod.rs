mod record;

use std::path::Path;

use crate::error::AnalyzeError;

pub use record::{coerce_date, coerce_number, parse_records, ParsedRecords};

/// A report after splitting but before any typing: the header row plus every
/// data row as ordered cell strings. Spreadsheet-sourced tables enter the
/// engine through this type; the bundled reader only covers delimited text.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Read a delimited-text report from disk. The extension picks the
/// delimiter; `.txt` is sniffed from the first line.
pub fn read_table(path: &Path) -> Result<RawTable, AnalyzeError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let text = match extension.as_str() {
        "csv" | "tsv" | "tab" | "txt" => std::fs::read_to_string(path)?,
        _ => return Err(AnalyzeError::UnsupportedFormat { extension }),
    };

    let delimiter = match extension.as_str() {
        "tsv" | "tab" => b'\t',
        "csv" => b',',
        _ => sniff_delimiter(&text),
    };

    parse_delimited(&text, delimiter)
}

/// Split delimited text into a `RawTable`. Ragged rows are tolerated; a
/// missing header row or zero data rows is `EmptyOrHeaderOnly`.
pub fn parse_delimited(text: &str, delimiter: u8) -> Result<RawTable, AnalyzeError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(AnalyzeError::EmptyOrHeaderOnly);
    }

    let mut rows = Vec::new();
    for row in reader.records() {
        let row = row?;
        rows.push(row.iter().map(|c| c.to_string()).collect());
    }
    if rows.is_empty() {
        return Err(AnalyzeError::EmptyOrHeaderOnly);
    }

    Ok(RawTable { headers, rows })
}

fn sniff_delimiter(text: &str) -> u8 {
    let first_line = text.lines().next().unwrap_or("");
    let mut best = b',';
    let mut best_count = 0;
    for candidate in [b',', b'\t', b';'] {
        let count = first_line.bytes().filter(|b| *b == candidate).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_comma_delimited_text() {
        let table = parse_delimited("Clicks,Spend\n12,20\n", b',').unwrap();
        assert_eq!(table.headers, vec!["Clicks", "Spend"]);
        assert_eq!(table.rows, vec![vec!["12".to_string(), "20".to_string()]]);
    }

    #[test]
    fn tolerates_ragged_rows() {
        let table = parse_delimited("A,B,C\n1,2\n1,2,3,4\n", b',').unwrap();
        assert_eq!(table.rows[0].len(), 2);
        assert_eq!(table.rows[1].len(), 4);
    }

    #[test]
    fn header_only_input_is_rejected() {
        let err = parse_delimited("Clicks,Spend\n", b',').unwrap_err();
        assert!(matches!(err, AnalyzeError::EmptyOrHeaderOnly));
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = parse_delimited("", b',').unwrap_err();
        assert!(matches!(err, AnalyzeError::EmptyOrHeaderOnly));
    }

    #[test]
    fn sniffs_tab_delimiter_in_txt() {
        assert_eq!(sniff_delimiter("Clicks\tSpend\tSales"), b'\t');
        assert_eq!(sniff_delimiter("Clicks;Spend;Sales"), b';');
        assert_eq!(sniff_delimiter("Clicks,Spend"), b',');
    }

    #[test]
    fn read_table_rejects_unknown_extensions() {
        let mut f = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        write!(f, "not a table").unwrap();
        let err = read_table(f.path()).unwrap_err();
        assert!(matches!(
            err,
            AnalyzeError::UnsupportedFormat { ref extension } if extension == "xlsx"
        ));
    }

    #[test]
    fn read_table_reads_tsv_by_extension() {
        let mut f = tempfile::Builder::new().suffix(".tsv").tempfile().unwrap();
        write!(f, "Clicks\tSpend\n12\t20\n").unwrap();
        let table = read_table(f.path()).unwrap();
        assert_eq!(table.headers, vec!["Clicks", "Spend"]);
        assert_eq!(table.rows.len(), 1);
    }
}
