use serde::{Deserialize, Serialize};

use crate::types::{DataQuality, Issue, Totals, WasteTerm};

/// Top-level analysis output. Computed fresh per upload; the engine never
/// persists it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub report_version: String,
    pub score: u8,
    pub monthly_opportunity: f64,
    pub totals: Totals,
    pub data_quality: DataQuality,
    pub issues: Vec<Issue>,
    pub top_waste_terms: Vec<WasteTerm>,
}

impl Report {
    pub fn to_markdown(&self) -> String {
        let mut s = String::new();
        s.push_str("# termwaste report\n\n");
        s.push_str(&format!("- report_version: `{}`\n", self.report_version));
        s.push_str(&format!("- health_score: `{}` / 100\n", self.score));
        s.push_str(&format!(
            "- monthly_opportunity: `${:.0}`\n",
            self.monthly_opportunity
        ));
        s.push('\n');

        s.push_str("## Totals\n\n");
        s.push_str(&format!(
            "- monthly_spend: `${:.2}`\n",
            self.totals.monthly_spend
        ));
        s.push_str(&format!(
            "- monthly_sales: `${:.2}`\n",
            self.totals.monthly_sales
        ));
        s.push_str(&format!("- blended_roas: `{:.2}`\n", self.totals.roas));
        s.push_str(&format!("- blended_acos: `{:.2}`\n", self.totals.acos));
        s.push('\n');

        s.push_str("## Data quality\n\n");
        s.push_str(&format!(
            "- valid_rows: `{}`\n",
            self.data_quality.valid_rows
        ));
        s.push_str(&format!(
            "- window: `{}`\n",
            self.data_quality.period_label
        ));
        s.push_str(&format!(
            "- monthly_multiplier: `{:.3}`\n",
            self.data_quality.multiplier
        ));
        s.push('\n');

        s.push_str("## Issues\n\n");
        if self.issues.is_empty() {
            s.push_str("- (none)\n");
        } else {
            for issue in &self.issues {
                s.push_str(&format!("### {}\n", issue.title));
                s.push_str(&format!("- priority: `{:?}`\n", issue.priority));
                s.push_str(&format!("- direction: `{:?}`\n", issue.direction));
                s.push_str(&format!(
                    "- monthly_amount: `${:.0}`\n",
                    issue.monthly_amount
                ));
                if let Some(count) = issue.record_count {
                    s.push_str(&format!("- records: `{}`\n", count));
                }
                s.push_str(&format!("- {}\n", issue.description));
                s.push('\n');
            }
        }

        if !self.top_waste_terms.is_empty() {
            s.push_str("## Top waste terms\n\n");
            for t in &self.top_waste_terms {
                s.push_str(&format!("- {} (`${:.0}`/month)\n", t.term, t.monthly_spend));
            }
            s.push('\n');
        }

        s
    }
}
