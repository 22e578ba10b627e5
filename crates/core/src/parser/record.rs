use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::AnalyzeError;
use crate::schema::ColumnMap;
use crate::types::PerformanceRecord;

use super::RawTable;

/// The accepted record set plus the running totals and date bounds the
/// scorer and extrapolator need. Totals only cover accepted rows.
#[derive(Debug, Clone)]
pub struct ParsedRecords {
    pub records: Vec<PerformanceRecord>,
    pub total_spend: f64,
    pub total_sales: f64,
    pub total_clicks: u64,
    pub min_start: Option<NaiveDate>,
    pub max_end: Option<NaiveDate>,
}

// Strips currency symbols, thousands separators and surrounding junk before
// the numeric parse. Sign and exponent characters survive so "-5" still
// parses (and is then clamped to zero).
static RE_NUMERIC_JUNK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9eE+\-.]").expect("valid regex"));

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%Y/%m/%d",
    "%d-%b-%Y",
    "%b %d, %Y",
];

/// Coerce a raw cell to a non-negative number. Malformed values become 0,
/// never an error.
pub fn coerce_number(cell: &str) -> f64 {
    let cleaned = RE_NUMERIC_JUNK.replace_all(cell.trim(), "");
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => v.max(0.0),
        _ => 0.0,
    }
}

/// Parse a date cell against the known report formats. Empty or invalid
/// cells are absent, not an error.
pub fn coerce_date(cell: &str) -> Option<NaiveDate> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

fn cell<'a>(row: &'a [String], index: Option<usize>) -> &'a str {
    index.and_then(|i| row.get(i)).map(String::as_str).unwrap_or("")
}

/// Convert raw rows into typed records. Rows where both clicks and spend
/// coerce to zero are dropped; if nothing survives, the whole report is
/// rejected with `NoValidRows`.
pub fn parse_records(columns: &ColumnMap, table: &RawTable) -> Result<ParsedRecords, AnalyzeError> {
    let mut records = Vec::new();
    let mut total_spend = 0.0;
    let mut total_sales = 0.0;
    let mut total_clicks = 0u64;
    let mut min_start: Option<NaiveDate> = None;
    let mut max_end: Option<NaiveDate> = None;

    for row in &table.rows {
        let clicks = coerce_number(cell(row, columns.clicks)) as u64;
        let spend = coerce_number(cell(row, columns.spend));
        if clicks == 0 && spend == 0.0 {
            continue;
        }

        let impressions = coerce_number(cell(row, columns.impressions)) as u64;
        let orders = coerce_number(cell(row, columns.orders)) as u64;
        let sales = coerce_number(cell(row, columns.sales));
        let roas = if spend > 0.0 { sales / spend } else { 0.0 };

        let campaign = match cell(row, columns.campaign).trim() {
            "" => None,
            name => Some(name.to_string()),
        };
        let start_date = coerce_date(cell(row, columns.start_date));
        let end_date = coerce_date(cell(row, columns.end_date));

        // Bounds are tracked independently, not paired per record.
        if let Some(s) = start_date {
            min_start = Some(min_start.map_or(s, |m| m.min(s)));
        }
        if let Some(e) = end_date {
            max_end = Some(max_end.map_or(e, |m| m.max(e)));
        }

        total_spend += spend;
        total_sales += sales;
        total_clicks += clicks;

        records.push(PerformanceRecord {
            term: cell(row, columns.term).trim().to_string(),
            campaign,
            impressions,
            clicks,
            orders,
            spend,
            sales,
            roas,
            start_date,
            end_date,
        });
    }

    if records.is_empty() {
        return Err(AnalyzeError::NoValidRows);
    }

    Ok(ParsedRecords {
        records,
        total_spend,
        total_sales,
        total_clicks,
        min_start,
        max_end,
    })
}
