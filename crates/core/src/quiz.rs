use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::types::Direction;

pub const Q_SPEND: &str = "monthly_spend";
pub const Q_ACOS: &str = "acos_range";
pub const Q_CAMPAIGNS: &str = "campaign_count";
pub const Q_NEGATIVES: &str = "negative_cadence";
pub const Q_HARVEST: &str = "harvest_maturity";
pub const Q_COMPETITORS: &str = "competitor_monitoring";

/// Midpoint assumed when the spend question was not answered.
pub const DEFAULT_SPEND_MIDPOINT: f64 = 5_000.0;

// Category fractions applied on top of the per-answer factors. Tuned product
// constants, same standing as the score-curve anchors.
const ACOS_FRACTION: f64 = 1.0;
const NEGATIVE_FRACTION: f64 = 0.25;
const HARVEST_FRACTION: f64 = 0.30;
const COMPETITOR_FRACTION: f64 = 0.35;
const STRUCTURE_FRACTION: f64 = 0.10;

// The low/high display band around the point estimate. Presentational
// spread, not a statistical confidence interval.
const BAND_LOW: f64 = 0.85;
const BAND_HIGH: f64 = 1.15;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizOption {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub penalty: f64,
    #[serde(default)]
    pub midpoint: f64,
    #[serde(default)]
    pub waste_factor: f64,
    #[serde(default)]
    pub opportunity_factor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub options: Vec<QuizOption>,
}

/// The six-question catalog. Data, not logic: a config file can replace it
/// wholesale without touching the scoring model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizCatalog {
    pub questions: Vec<Question>,
}

impl Default for QuizCatalog {
    fn default() -> Self {
        default_catalog()
    }
}

/// Caller-owned answer state: question id to selected option value. One
/// entry per question; complete when all six are present.
pub type AnswerSet = BTreeMap<String, String>;

pub fn load_answers(path: &Path) -> anyhow::Result<AnswerSet> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let answers: AnswerSet =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    Ok(answers)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizComponent {
    pub title: String,
    pub direction: Direction,
    pub monthly_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResult {
    pub score: u8,
    pub total: f64,
    pub low: f64,
    pub high: f64,
    pub breakdown: Vec<QuizComponent>,
}

impl QuizResult {
    pub fn to_markdown(&self) -> String {
        let mut s = String::new();
        s.push_str("# termwaste quiz estimate\n\n");
        s.push_str(&format!("- health_score: `{}` / 100\n", self.score));
        s.push_str(&format!(
            "- monthly_opportunity: `${:.0}` (`${:.0}` to `${:.0}`)\n",
            self.total, self.low, self.high
        ));
        s.push('\n');
        s.push_str("## Breakdown\n\n");
        if self.breakdown.is_empty() {
            s.push_str("- (none)\n");
        } else {
            for c in &self.breakdown {
                s.push_str(&format!(
                    "- {}: `${:.0}`/month ({:?})\n",
                    c.title, c.monthly_amount, c.direction
                ));
            }
        }
        s
    }
}

/// Score a questionnaire. Tolerates missing answers: an unanswered spend
/// question falls back to a fixed midpoint, anything else contributes
/// nothing. Never fails.
pub fn score_quiz(answers: &AnswerSet, catalog: &QuizCatalog) -> QuizResult {
    let selected = |id: &str| -> Option<&QuizOption> {
        let question = catalog.questions.iter().find(|q| q.id == id)?;
        let value = answers.get(id)?;
        question.options.iter().find(|o| &o.value == value)
    };

    let midpoint = selected(Q_SPEND)
        .map(|o| o.midpoint)
        .filter(|m| *m > 0.0)
        .unwrap_or(DEFAULT_SPEND_MIDPOINT);

    let penalty: f64 = [Q_ACOS, Q_NEGATIVES, Q_HARVEST, Q_COMPETITORS]
        .iter()
        .filter_map(|id| selected(id))
        .map(|o| o.penalty)
        .sum();
    let score = (100.0 + penalty).round().clamp(45.0, 100.0) as u8;

    let waste = |id: &str| selected(id).map(|o| o.waste_factor).unwrap_or(0.0);
    let opportunity = |id: &str| selected(id).map(|o| o.opportunity_factor).unwrap_or(0.0);

    let components = [
        (
            "Inefficient delivery",
            Direction::Waste,
            midpoint * waste(Q_ACOS) * ACOS_FRACTION,
        ),
        (
            "Negative keyword leakage",
            Direction::Waste,
            midpoint * waste(Q_NEGATIVES) * NEGATIVE_FRACTION,
        ),
        (
            "Missed harvest revenue",
            Direction::Gain,
            midpoint * opportunity(Q_HARVEST) * HARVEST_FRACTION,
        ),
        (
            "Competitor blind spots",
            Direction::Waste,
            midpoint * waste(Q_COMPETITORS) * COMPETITOR_FRACTION,
        ),
        (
            "Structure drag",
            Direction::Waste,
            midpoint * waste(Q_CAMPAIGNS) * STRUCTURE_FRACTION,
        ),
    ];

    let total_raw: f64 = components.iter().map(|(_, _, amount)| amount).sum();
    let breakdown: Vec<QuizComponent> = components
        .iter()
        .filter(|(_, _, amount)| amount.round() > 0.0)
        .map(|(title, direction, amount)| QuizComponent {
            title: title.to_string(),
            direction: *direction,
            monthly_amount: amount.round(),
        })
        .collect();

    let total = total_raw.round();
    QuizResult {
        score,
        total,
        low: (total * BAND_LOW).round(),
        high: (total * BAND_HIGH).round(),
        breakdown,
    }
}

fn option(
    value: &str,
    label: &str,
    penalty: f64,
    midpoint: f64,
    waste_factor: f64,
    opportunity_factor: f64,
) -> QuizOption {
    QuizOption {
        value: value.to_string(),
        label: label.to_string(),
        penalty,
        midpoint,
        waste_factor,
        opportunity_factor,
    }
}

fn question(id: &str, prompt: &str, options: Vec<QuizOption>) -> Question {
    Question {
        id: id.to_string(),
        prompt: prompt.to_string(),
        options,
    }
}

fn default_catalog() -> QuizCatalog {
    QuizCatalog {
        questions: vec![
            question(
                Q_SPEND,
                "What is your monthly ad spend?",
                vec![
                    option("under_1k", "Under $1,000", 0.0, 500.0, 0.0, 0.0),
                    option("1k_5k", "$1,000 to $5,000", 0.0, 3_000.0, 0.0, 0.0),
                    option("5k_15k", "$5,000 to $15,000", 0.0, 10_000.0, 0.0, 0.0),
                    option("15k_50k", "$15,000 to $50,000", 0.0, 32_500.0, 0.0, 0.0),
                    option("over_50k", "Over $50,000", 0.0, 75_000.0, 0.0, 0.0),
                ],
            ),
            question(
                Q_ACOS,
                "What is your current ACOS?",
                vec![
                    option("under_15", "Under 15%", 0.0, 0.0, 0.0, 0.0),
                    option("15_25", "15% to 25%", -4.0, 0.0, 0.04, 0.0),
                    option("25_40", "25% to 40%", -9.0, 0.0, 0.09, 0.0),
                    option("over_40", "Over 40%", -15.0, 0.0, 0.15, 0.0),
                    option("unsure", "Not sure", -8.0, 0.0, 0.08, 0.0),
                ],
            ),
            question(
                Q_CAMPAIGNS,
                "How many active campaigns do you run?",
                vec![
                    option("1_5", "1 to 5", 0.0, 0.0, 0.0, 0.0),
                    option("6_20", "6 to 20", 0.0, 0.0, 0.02, 0.0),
                    option("21_50", "21 to 50", 0.0, 0.0, 0.05, 0.0),
                    option("over_50", "More than 50", 0.0, 0.0, 0.08, 0.0),
                ],
            ),
            question(
                Q_NEGATIVES,
                "When did you last add negative keywords?",
                vec![
                    option("this_week", "Within the last week", 0.0, 0.0, 0.0, 0.0),
                    option("this_month", "Within the last month", -3.0, 0.0, 0.03, 0.0),
                    option("this_quarter", "Within the last quarter", -7.0, 0.0, 0.08, 0.0),
                    option("rarely", "Rarely", -12.0, 0.0, 0.14, 0.0),
                    option("never", "Never", -15.0, 0.0, 0.18, 0.0),
                ],
            ),
            question(
                Q_HARVEST,
                "How do you promote converting search terms into keywords?",
                vec![
                    option("automated", "Continuously, automated", 0.0, 0.0, 0.0, 0.0),
                    option("monthly", "Manually, about monthly", -3.0, 0.0, 0.0, 0.05),
                    option("occasionally", "Occasionally", -8.0, 0.0, 0.0, 0.12),
                    option("never", "Never", -12.0, 0.0, 0.0, 0.20),
                ],
            ),
            question(
                Q_COMPETITORS,
                "How often do you review competitor placements?",
                vec![
                    option("weekly", "Weekly or more", 0.0, 0.0, 0.0, 0.0),
                    option("monthly", "Monthly", -2.0, 0.0, 0.04, 0.0),
                    option("rarely", "Rarely", -5.0, 0.0, 0.08, 0.0),
                    option("never", "Never", -8.0, 0.0, 0.12, 0.0),
                ],
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(pairs: &[(&str, &str)]) -> AnswerSet {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn favorable() -> AnswerSet {
        answers(&[
            (Q_SPEND, "under_1k"),
            (Q_ACOS, "under_15"),
            (Q_CAMPAIGNS, "1_5"),
            (Q_NEGATIVES, "this_week"),
            (Q_HARVEST, "automated"),
            (Q_COMPETITORS, "weekly"),
        ])
    }

    #[test]
    fn all_favorable_answers_score_100() {
        let result = score_quiz(&favorable(), &QuizCatalog::default());
        assert_eq!(result.score, 100);
        assert_eq!(result.total, 0.0);
        assert!(result.breakdown.is_empty());
    }

    #[test]
    fn worst_answers_stay_above_the_floor() {
        let worst = answers(&[
            (Q_SPEND, "over_50k"),
            (Q_ACOS, "over_40"),
            (Q_CAMPAIGNS, "over_50"),
            (Q_NEGATIVES, "never"),
            (Q_HARVEST, "never"),
            (Q_COMPETITORS, "never"),
        ]);
        let result = score_quiz(&worst, &QuizCatalog::default());
        assert_eq!(result.score, 50);
        assert!(result.total > 0.0);
        assert_eq!(result.breakdown.len(), 5);
    }

    #[test]
    fn component_math_uses_midpoint_and_fractions() {
        let set = answers(&[
            (Q_SPEND, "5k_15k"),
            (Q_ACOS, "25_40"),
            (Q_CAMPAIGNS, "21_50"),
            (Q_NEGATIVES, "this_quarter"),
            (Q_HARVEST, "occasionally"),
            (Q_COMPETITORS, "rarely"),
        ]);
        let result = score_quiz(&set, &QuizCatalog::default());

        // midpoint 10_000: acos 0.09, negatives 0.08 * 0.25, harvest
        // 0.12 * 0.30, competitors 0.08 * 0.35, structure 0.05 * 0.10.
        let amount = |title: &str| {
            result
                .breakdown
                .iter()
                .find(|c| c.title == title)
                .map(|c| c.monthly_amount)
                .unwrap()
        };
        assert_eq!(amount("Inefficient delivery"), 900.0);
        assert_eq!(amount("Negative keyword leakage"), 200.0);
        assert_eq!(amount("Missed harvest revenue"), 360.0);
        assert_eq!(amount("Competitor blind spots"), 280.0);
        assert_eq!(amount("Structure drag"), 50.0);
        assert_eq!(result.total, 1790.0);
        assert_eq!(result.score, 71);
    }

    #[test]
    fn band_scales_the_point_estimate() {
        let set = answers(&[(Q_SPEND, "5k_15k"), (Q_ACOS, "over_40")]);
        let result = score_quiz(&set, &QuizCatalog::default());
        assert_eq!(result.total, 1500.0);
        assert_eq!(result.low, 1275.0);
        assert_eq!(result.high, 1725.0);
    }

    #[test]
    fn unanswered_spend_falls_back_to_default_midpoint() {
        let set = answers(&[(Q_ACOS, "over_40")]);
        let result = score_quiz(&set, &QuizCatalog::default());
        // 5_000 default midpoint * 0.15.
        assert_eq!(result.total, 750.0);
        assert_eq!(result.score, 85);
    }

    #[test]
    fn unknown_values_and_empty_sets_are_tolerated() {
        let empty = AnswerSet::new();
        let result = score_quiz(&empty, &QuizCatalog::default());
        assert_eq!(result.score, 100);
        assert_eq!(result.total, 0.0);

        let bogus = answers(&[(Q_ACOS, "not_a_real_option"), ("not_a_question", "x")]);
        let result = score_quiz(&bogus, &QuizCatalog::default());
        assert_eq!(result.score, 100);
    }

    #[test]
    fn harvest_component_is_a_gain() {
        let set = answers(&[(Q_SPEND, "5k_15k"), (Q_HARVEST, "never")]);
        let result = score_quiz(&set, &QuizCatalog::default());
        let harvest = &result.breakdown[0];
        assert_eq!(harvest.title, "Missed harvest revenue");
        assert_eq!(harvest.direction, Direction::Gain);
        assert_eq!(harvest.monthly_amount, 600.0);
    }
}
