use std::io::Write;

use termwaste_core::config::Config;
use termwaste_core::quiz::{score_quiz, AnswerSet};

#[test]
fn parse_threshold_overrides() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    write!(
        f,
        r#"
[thresholds]
negative_min_clicks = 20
target_roas = 3.0
"#
    )
    .unwrap();

    let cfg = Config::load(f.path()).unwrap();
    assert_eq!(cfg.thresholds.negative_min_clicks, 20);
    assert_eq!(cfg.thresholds.target_roas, 3.0);
    // Unset fields keep their defaults.
    assert_eq!(cfg.thresholds.harvest_min_orders, 3);
    assert_eq!(cfg.thresholds.harvest_min_sales, 150.0);
}

#[test]
fn parse_empty_toml_gives_defaults() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    write!(f, "").unwrap();

    let cfg = Config::load(f.path()).unwrap();
    assert_eq!(cfg.thresholds.negative_min_clicks, 10);
    assert_eq!(cfg.thresholds.target_roas, 2.5);
    assert!(cfg.quiz.is_none());
    // The default catalog still carries the six questions.
    assert_eq!(cfg.catalog().questions.len(), 6);
}

#[test]
fn parse_quiz_catalog_override() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    write!(
        f,
        r#"
[[quiz.questions]]
id = "monthly_spend"
prompt = "Monthly budget?"

[[quiz.questions.options]]
value = "small"
label = "Small"
midpoint = 2000.0

[[quiz.questions]]
id = "acos_range"
prompt = "Current ACOS?"

[[quiz.questions.options]]
value = "high"
label = "High"
penalty = -20.0
waste_factor = 0.10
"#
    )
    .unwrap();

    let cfg = Config::load(f.path()).unwrap();
    let catalog = cfg.catalog();
    assert_eq!(catalog.questions.len(), 2);

    let mut answers = AnswerSet::new();
    answers.insert("monthly_spend".to_string(), "small".to_string());
    answers.insert("acos_range".to_string(), "high".to_string());
    let result = score_quiz(&answers, &catalog);
    assert_eq!(result.score, 80);
    assert_eq!(result.total, 200.0);
}

#[test]
fn parse_invalid_toml_returns_error() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    write!(f, "this is not valid [ toml {{{{").unwrap();

    assert!(Config::load(f.path()).is_err());
}
