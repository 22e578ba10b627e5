use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    High,
    Medium,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Waste,
    Gain,
}

/// One row of a search-term report after coercion. All numeric fields are
/// clamped to >= 0; absent campaign and date cells stay `None` rather than
/// empty-string sentinels.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceRecord {
    pub term: String,
    pub campaign: Option<String>,
    pub impressions: u64,
    pub clicks: u64,
    pub orders: u64,
    pub spend: f64,
    pub sales: f64,
    pub roas: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub title: String,
    pub description: String,
    pub monthly_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_count: Option<usize>,
    pub priority: Priority,
    pub direction: Direction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Totals {
    pub monthly_spend: f64,
    pub monthly_sales: f64,
    pub roas: f64,
    pub acos: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataQuality {
    pub valid_rows: usize,
    pub window_days: i64,
    pub multiplier: f64,
    pub period_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WasteTerm {
    pub term: String,
    pub monthly_spend: f64,
}
