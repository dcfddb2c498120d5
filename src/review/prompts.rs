//! Tone-specific prompt templates.
//!
//! Each template directs the model to answer with the same fixed JSON
//! schema (summary, score, issues[], suggestions[]); only the persona
//! changes. The composed prompt is template + blank line + raw source.

use super::Tone;

pub const STRICT_TEMPLATE: &str = r#"You are a strict code reviewer. Analyze this code and return ONLY valid JSON in this exact format:
{
  "summary": "brief overall assessment",
  "score": 8.5,
  "issues": [
    {
      "line": 12,
      "severity": "error",
      "message": "specific issue description",
      "fix": "exact code replacement"
    }
  ],
  "suggestions": ["general suggestion 1", "suggestion 2"]
}

Code to review:"#;

pub const FRIENDLY_TEMPLATE: &str = r#"You are a friendly code mentor. Provide constructive feedback in this exact JSON format:
{
  "summary": "encouraging overall assessment",
  "score": 8.5,
  "issues": [
    {
      "line": 12,
      "severity": "warning",
      "message": "helpful suggestion",
      "fix": "improved code version"
    }
  ],
  "suggestions": ["positive suggestion 1", "suggestion 2"]
}

Code to review:"#;

pub const SENIOR_TEMPLATE: &str = r#"You are a senior engineer conducting a thorough code review. Return ONLY this JSON format:
{
  "summary": "professional assessment",
  "score": 8.5,
  "issues": [
    {
      "line": 12,
      "severity": "error",
      "message": "detailed technical issue",
      "fix": "professional fix"
    }
  ],
  "suggestions": ["architectural suggestion", "best practice"]
}

Code to review:"#;

/// Template for the given tone.
pub fn template(tone: Tone) -> &'static str {
    match tone {
        Tone::Strict => STRICT_TEMPLATE,
        Tone::Friendly => FRIENDLY_TEMPLATE,
        Tone::Senior => SENIOR_TEMPLATE,
    }
}

/// Compose the full prompt sent to the backend.
pub fn build_prompt(tone: Tone, source: &str) -> String {
    format!("{}\n\n{}", template(tone), source)
}
