use crate::error::AnalyzeError;

/// Column positions resolved from a report header row. Everything except
/// clicks/spend is optional; a field that never matched stays `None` and the
/// corresponding record fields default to zero/absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub term: Option<usize>,
    pub campaign: Option<usize>,
    pub impressions: Option<usize>,
    pub clicks: Option<usize>,
    pub spend: Option<usize>,
    pub sales: Option<usize>,
    pub orders: Option<usize>,
    pub start_date: Option<usize>,
    pub end_date: Option<usize>,
}

// Alias lists are in priority order: the first alias that matches any header
// wins, then earlier headers win within an alias. Matching is by
// case-insensitive containment, which tolerates vendor prefixes such as
// "7 Day Total Sales" or a UTF-8 BOM on the first header.
const TERM_ALIASES: &[&str] = &["customer search term", "search term", "query"];
const CAMPAIGN_ALIASES: &[&str] = &["campaign name", "campaign"];
const IMPRESSION_ALIASES: &[&str] = &["impressions"];
const CLICK_ALIASES: &[&str] = &["clicks"];
const SPEND_ALIASES: &[&str] = &["spend", "cost"];
const SALES_ALIASES: &[&str] = &["sales", "revenue"];
const ORDER_ALIASES: &[&str] = &["orders", "conversions"];
const START_DATE_ALIASES: &[&str] = &["start date", "date"];
const END_DATE_ALIASES: &[&str] = &["end date", "date"];

fn find_column(lowered: &[String], aliases: &[&str]) -> Option<usize> {
    for alias in aliases {
        if let Some(pos) = lowered.iter().position(|h| h.contains(alias)) {
            return Some(pos);
        }
    }
    None
}

/// Map report headers to the fixed internal field set. Fails only when
/// neither a clicks nor a spend column can be resolved; the error message
/// carries the first headers seen so the user can tell what was uploaded.
pub fn detect_columns(headers: &[String]) -> Result<ColumnMap, AnalyzeError> {
    let lowered: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();

    let map = ColumnMap {
        term: find_column(&lowered, TERM_ALIASES),
        campaign: find_column(&lowered, CAMPAIGN_ALIASES),
        impressions: find_column(&lowered, IMPRESSION_ALIASES),
        clicks: find_column(&lowered, CLICK_ALIASES),
        spend: find_column(&lowered, SPEND_ALIASES),
        sales: find_column(&lowered, SALES_ALIASES),
        orders: find_column(&lowered, ORDER_ALIASES),
        start_date: find_column(&lowered, START_DATE_ALIASES),
        end_date: find_column(&lowered, END_DATE_ALIASES),
    };

    if map.clicks.is_none() && map.spend.is_none() {
        let headers = headers
            .iter()
            .take(6)
            .map(|h| format!("`{}`", h.trim()))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(AnalyzeError::MissingRequiredColumns { headers });
    }

    Ok(map)
}
