use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::quiz::QuizCatalog;
use crate::rules::Thresholds;

/// External configuration: classification thresholds and, optionally, a
/// replacement quiz catalog. Both override the built-in defaults without
/// touching engine logic.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub thresholds: Thresholds,
    pub quiz: Option<QuizCatalog>,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents =
            std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let config: Config =
            toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
        Ok(config)
    }

    pub fn discover() -> Option<Self> {
        let path = Path::new("termwaste.toml");
        if path.exists() {
            Config::load(path).ok()
        } else {
            None
        }
    }

    /// The catalog to score questionnaires with: the configured one if
    /// present, otherwise the built-in six questions.
    pub fn catalog(&self) -> QuizCatalog {
        self.quiz.clone().unwrap_or_default()
    }
}
