use serde::{Deserialize, Serialize};

use crate::types::PerformanceRecord;

/// Spend floor for the low-efficiency rule. A fixed gate rather than part of
/// the named threshold surface: below this the recoverable amount is noise.
pub const MIN_EFFICIENCY_SPEND: f64 = 10.0;

/// The six named classification thresholds. Every field is serde-defaulted
/// so a config file can override any subset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub harvest_min_clicks: u64,
    pub harvest_min_orders: u64,
    pub harvest_min_sales: f64,
    pub negative_min_clicks: u64,
    pub negative_min_spend: f64,
    pub target_roas: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            harvest_min_clicks: 10,
            harvest_min_orders: 3,
            harvest_min_sales: 150.0,
            negative_min_clicks: 10,
            negative_min_spend: 10.0,
            target_roas: 2.5,
        }
    }
}

/// Records grouped by the category predicates. The three categories are
/// evaluated independently and are not mutually exclusive; downstream
/// aggregation sums each category without deduplicating across them.
#[derive(Debug, Default)]
pub struct Classified<'a> {
    pub negatives: Vec<&'a PerformanceRecord>,
    pub harvests: Vec<&'a PerformanceRecord>,
    pub low_efficiency: Vec<&'a PerformanceRecord>,
}

/// Spending without converting: block it with a negative keyword.
pub fn is_negative_candidate(record: &PerformanceRecord, t: &Thresholds) -> bool {
    record.clicks >= t.negative_min_clicks
        && record.spend >= t.negative_min_spend
        && record.orders == 0
}

/// Converting well already: worth promoting into a tightly-targeted keyword.
pub fn is_harvest_opportunity(record: &PerformanceRecord, t: &Thresholds) -> bool {
    record.clicks >= t.harvest_min_clicks
        && record.orders >= t.harvest_min_orders
        && record.sales >= t.harvest_min_sales
        && record.roas >= t.target_roas
}

/// Converting, but below the target return.
pub fn is_low_efficiency(record: &PerformanceRecord, t: &Thresholds) -> bool {
    record.spend > MIN_EFFICIENCY_SPEND && record.roas > 0.0 && record.roas < t.target_roas
}

pub fn classify<'a>(records: &'a [PerformanceRecord], t: &Thresholds) -> Classified<'a> {
    let mut out = Classified::default();
    for record in records {
        if is_negative_candidate(record, t) {
            out.negatives.push(record);
        }
        if is_harvest_opportunity(record, t) {
            out.harvests.push(record);
        }
        if is_low_efficiency(record, t) {
            out.low_efficiency.push(record);
        }
    }
    out
}
