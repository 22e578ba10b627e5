use chrono::NaiveDate;
use serde::Serialize;

/// Fallback window when the report carries no usable dates, or when the
/// observed span looks like mixed report periods.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Spans at or beyond a year are treated as a data artifact (e.g. several
/// report periods pasted together) and reset to the default window. This is
/// deliberate policy, not a bug to fix: the engine assumes well-formed data
/// at sub-year granularity.
pub const MAX_PLAUSIBLE_SPAN_DAYS: i64 = 365;

/// The inferred reporting period and the factor that projects period totals
/// to a standard 30-day month. `multiplier` is always > 0.
#[derive(Debug, Clone, Serialize)]
pub struct ReportWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub days: i64,
    pub multiplier: f64,
}

impl ReportWindow {
    pub fn from_bounds(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        if let (Some(s), Some(e)) = (start, end) {
            let days = (e - s).num_days() + 1;
            if days > 0 && days < MAX_PLAUSIBLE_SPAN_DAYS {
                return Self {
                    start,
                    end,
                    days,
                    multiplier: DEFAULT_WINDOW_DAYS as f64 / days as f64,
                };
            }
        }
        Self {
            start,
            end,
            days: DEFAULT_WINDOW_DAYS,
            multiplier: 1.0,
        }
    }

    pub fn label(&self) -> String {
        match (self.start, self.end) {
            (Some(s), Some(e)) => format!(
                "{} days ({} - {})",
                self.days,
                s.format("%b %d"),
                e.format("%b %d")
            ),
            _ => "period unknown".to_string(),
        }
    }
}
