//! HTTP client for the local Ollama generate endpoint.
//!
//! One blocking request-response exchange per review; no streaming, no
//! retry. A failed exchange is terminal for that submission.

use super::error::ReviewError;
use super::parse::parse_review;
use super::prompts::build_prompt;
use super::{Review, Tone};
use crate::config::Config;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    /// Constrains Ollama's output to JSON.
    format: &'a str,
}

/// Outer envelope of a non-streamed Ollama response. The review JSON
/// arrives as a string inside `response`.
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

pub struct ReviewClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
}

impl ReviewClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run one review. Empty input fails before any network work;
    /// transport failures and non-2xx statuses map to
    /// `BackendUnavailable`; an unparseable 2xx body yields the
    /// degraded Review rather than an error.
    pub async fn generate_review(&self, source: &str, tone: Tone) -> Result<Review, ReviewError> {
        if source.trim().is_empty() {
            return Err(ReviewError::EmptyInput);
        }

        let prompt = build_prompt(tone, source);
        let request = GenerateRequest {
            model: &self.model,
            prompt: &prompt,
            stream: false,
            format: "json",
        };

        let response = self
            .http
            .post(format!("{}/api/generate", self.endpoint))
            .json(&request)
            .send()
            .await
            .map_err(|e| ReviewError::backend(transport_reason(&e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ReviewError::backend(transport_reason(&e)))?;

        review_from_exchange(status, &body)
    }
}

/// Map a completed HTTP exchange to a Review. Split out from the
/// transport so the status and parse handling stay testable offline.
pub(crate) fn review_from_exchange(status: u16, body: &str) -> Result<Review, ReviewError> {
    if !(200..300).contains(&status) {
        let reason = match status {
            404 => "model not found - try `ollama pull` first".to_string(),
            500..=599 => format!("Ollama server error ({})", status),
            _ => format!("HTTP {}: {}", status, truncate_str(body, 120)),
        };
        return Err(ReviewError::backend(reason));
    }

    // Both a broken envelope and a broken inner payload degrade: after
    // a successful exchange the caller must always get a Review.
    match serde_json::from_str::<GenerateResponse>(body) {
        Ok(envelope) => Ok(parse_review(&envelope.response)),
        Err(_) => Ok(Review::degraded()),
    }
}

fn transport_reason(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        "connection refused".to_string()
    } else {
        truncate_str(&err.to_string(), 120).to_string()
    }
}

/// Truncate a string for display (Unicode-safe)
fn truncate_str(s: &str, max_chars: usize) -> &str {
    if s.chars().count() <= max_chars {
        s
    } else {
        let byte_idx = s
            .char_indices()
            .nth(max_chars)
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        &s[..byte_idx]
    }
}
