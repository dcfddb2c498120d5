use crate::review::Review;

/// Messages from background tasks to the main UI thread
pub enum BackgroundMessage {
    /// Review completed; carries the model that produced it for display.
    ReviewReady { review: Review, model: String },
    /// Review request failed (empty input never reaches here; backend
    /// failures and task panics do). The review state is left untouched.
    ReviewFailed(String),
}
