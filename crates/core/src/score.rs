use crate::parser::ParsedRecords;
use crate::report::Report;
use crate::rules::Classified;
use crate::types::{DataQuality, Direction, Issue, Priority, Totals, WasteTerm};
use crate::window::ReportWindow;

/// Assumed revenue uplift from promoting a proven term into a tightly
/// targeted keyword.
pub const HARVEST_UPLIFT: f64 = 0.15;

/// Assumed recoverable share of below-target spend.
pub const EFFICIENCY_RECOVERY: f64 = 0.20;

const TOP_WASTE_TERMS: usize = 5;

/// Piecewise health score over the opportunity ratio (monthly opportunity
/// divided by monthly spend). Lower ratio means a healthier account. The
/// segment anchors are product-tuned; the result is always in 45..=100.
pub fn health_score(ratio: f64) -> u8 {
    let raw = if ratio <= 0.05 {
        90.0 + (1.0 - ratio / 0.05) * 10.0
    } else if ratio <= 0.10 {
        75.0 + (1.0 - (ratio - 0.05) / 0.05) * 15.0
    } else if ratio <= 0.20 {
        60.0 + (1.0 - (ratio - 0.10) / 0.10) * 15.0
    } else {
        (60.0 - ((ratio - 0.20) * 100.0).min(15.0)).max(45.0)
    };
    raw.round().clamp(45.0, 100.0) as u8
}

fn push_issue(
    issues: &mut Vec<Issue>,
    title: &str,
    description: &str,
    monthly_amount: f64,
    record_count: usize,
    priority: Priority,
    direction: Direction,
) {
    let rounded = monthly_amount.round();
    // A category that rounds to nothing is not worth a line item.
    if rounded <= 0.0 {
        return;
    }
    issues.push(Issue {
        title: title.to_string(),
        description: description.to_string(),
        monthly_amount: rounded,
        record_count: Some(record_count),
        priority,
        direction,
    });
}

fn top_waste_terms(classified: &Classified<'_>, multiplier: f64) -> Vec<WasteTerm> {
    let mut negatives: Vec<_> = classified
        .negatives
        .iter()
        .filter(|r| !r.term.is_empty())
        .collect();
    negatives.sort_by(|a, b| {
        b.spend
            .partial_cmp(&a.spend)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.term.cmp(&b.term))
    });
    negatives
        .into_iter()
        .take(TOP_WASTE_TERMS)
        .map(|r| WasteTerm {
            term: r.term.clone(),
            monthly_spend: (r.spend * multiplier).round(),
        })
        .collect()
}

/// Turn classified records into the final report: monthly dollar figures per
/// category, blended totals, the health score and the issue list.
pub fn score_report(
    parsed: &ParsedRecords,
    classified: &Classified<'_>,
    window: &ReportWindow,
) -> Report {
    let multiplier = window.multiplier;

    let raw_waste: f64 = classified.negatives.iter().map(|r| r.spend).sum();
    let raw_harvest: f64 =
        classified.harvests.iter().map(|r| r.sales).sum::<f64>() * HARVEST_UPLIFT;
    let raw_efficiency: f64 =
        classified.low_efficiency.iter().map(|r| r.spend).sum::<f64>() * EFFICIENCY_RECOVERY;

    let monthly_waste = raw_waste * multiplier;
    let monthly_harvest = raw_harvest * multiplier;
    let monthly_efficiency = raw_efficiency * multiplier;
    let monthly_opportunity = monthly_waste + monthly_harvest + monthly_efficiency;

    let monthly_spend = parsed.total_spend * multiplier;
    let monthly_sales = parsed.total_sales * multiplier;

    // max(spend, 1) keeps a near-zero-spend account from dividing by zero.
    let ratio = monthly_opportunity / monthly_spend.max(1.0);
    let score = health_score(ratio);

    let mut issues = Vec::new();
    push_issue(
        &mut issues,
        "Negative keyword waste",
        "Search terms that keep taking clicks without a single order. \
         Blocking them with negative keywords stops the spend immediately.",
        monthly_waste,
        classified.negatives.len(),
        Priority::High,
        Direction::Waste,
    );
    push_issue(
        &mut issues,
        "Missed harvest revenue",
        "Search terms already converting above target. Promoting them into \
         exact-match keywords typically lifts their sales further.",
        monthly_harvest,
        classified.harvests.len(),
        Priority::High,
        Direction::Gain,
    );
    push_issue(
        &mut issues,
        "Low-efficiency spend",
        "Terms that convert, but below the target return. Bid and placement \
         adjustments can recover part of this spend.",
        monthly_efficiency,
        classified.low_efficiency.len(),
        Priority::Medium,
        Direction::Waste,
    );

    let roas = if parsed.total_spend > 0.0 {
        parsed.total_sales / parsed.total_spend
    } else {
        0.0
    };
    let acos = if parsed.total_sales > 0.0 {
        parsed.total_spend / parsed.total_sales
    } else {
        0.0
    };

    Report {
        report_version: "0.1.0".to_string(),
        score,
        monthly_opportunity: monthly_opportunity.round(),
        totals: Totals {
            monthly_spend,
            monthly_sales,
            roas,
            acos,
        },
        data_quality: DataQuality {
            valid_rows: parsed.records.len(),
            window_days: window.days,
            multiplier,
            period_label: window.label(),
        },
        issues,
        top_waste_terms: top_waste_terms(classified, multiplier),
    }
}
