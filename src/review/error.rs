//! Review error definitions.
//!
//! Malformed backend output is deliberately absent here: a 2xx exchange
//! that fails to parse is recovered with `Review::degraded()` and never
//! surfaces as an error to the caller.

use thiserror::Error;

/// An error terminal to a single review request. Nothing is retried
/// automatically; the user resubmits.
#[derive(Debug, Clone, Error)]
pub enum ReviewError {
    #[error("Please enter some code to review")]
    EmptyInput,

    #[error("Ollama not detected. Install and run Ollama locally for AI review. ({reason})")]
    BackendUnavailable { reason: String },
}

impl ReviewError {
    pub fn backend(reason: impl Into<String>) -> Self {
        Self::BackendUnavailable {
            reason: reason.into(),
        }
    }
}
