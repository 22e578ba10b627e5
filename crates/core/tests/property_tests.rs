use chrono::NaiveDate;
use proptest::prelude::*;

use termwaste_core::parser::{coerce_date, coerce_number, parse_delimited};
use termwaste_core::score::health_score;
use termwaste_core::window::ReportWindow;

proptest! {
    #[test]
    fn health_score_stays_in_band(ratio in 0.0f64..100.0) {
        let score = health_score(ratio);
        prop_assert!((45..=100).contains(&score));
    }

    #[test]
    fn health_score_never_rewards_a_higher_ratio(a in 0.0f64..10.0, b in 0.0f64..10.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(health_score(lo) >= health_score(hi));
    }

    #[test]
    fn coerce_number_is_total_and_non_negative(cell in "\\PC*") {
        let value = coerce_number(&cell);
        prop_assert!(value >= 0.0);
        prop_assert!(value.is_finite());
    }

    #[test]
    fn coerce_date_is_total(cell in "\\PC*") {
        // Should never panic regardless of input.
        let _ = coerce_date(&cell);
    }

    #[test]
    fn parse_delimited_never_panics(text in "\\PC*") {
        let _ = parse_delimited(&text, b',');
    }

    #[test]
    fn multiplier_is_always_positive(
        start_offset in 0i64..1000,
        span in -1000i64..1000,
    ) {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let start = base + chrono::Duration::days(start_offset);
        let end = start + chrono::Duration::days(span);
        let window = ReportWindow::from_bounds(Some(start), Some(end));
        prop_assert!(window.multiplier > 0.0);
        prop_assert!(window.days > 0);
    }
}
