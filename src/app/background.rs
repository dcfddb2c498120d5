//! Background task handling for revue
//!
//! Channel sends use `let _ =`: if the receiver is dropped the app is
//! shutting down and nobody is listening for the result anyway.

use crate::app::messages::BackgroundMessage;
use crate::app::App;
use crate::config::Config;
use crate::review::{ReviewClient, Tone};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::mpsc;

/// Spawn one review request onto the tokio runtime. The caller is
/// responsible for not spawning while another request is in flight;
/// completion arrives as a `BackgroundMessage`.
pub fn spawn_review(
    tx: mpsc::Sender<BackgroundMessage>,
    config: Config,
    source: String,
    tone: Tone,
) {
    tokio::spawn(async move {
        let work = async {
            let client = ReviewClient::new(&config)?;
            let model = client.model().to_string();
            let review = client.generate_review(&source, tone).await?;
            anyhow::Ok((review, model))
        };

        // A panic in the request path must not take the UI down with it.
        let result = AssertUnwindSafe(work).catch_unwind().await;
        let msg = match result {
            Ok(Ok((review, model))) => BackgroundMessage::ReviewReady { review, model },
            Ok(Err(e)) => BackgroundMessage::ReviewFailed(e.to_string()),
            Err(_) => BackgroundMessage::ReviewFailed("review task panicked".to_string()),
        };
        let _ = tx.send(msg);
    });
}

/// Drain completed background work into app state. Called every tick.
pub fn drain_messages(app: &mut App, rx: &mpsc::Receiver<BackgroundMessage>) {
    while let Ok(msg) = rx.try_recv() {
        match msg {
            BackgroundMessage::ReviewReady { review, model } => {
                let issues = review.issues.len();
                app.set_review(review, model.clone());
                app.show_toast(&format!(
                    "+ Code review completed: {} issue(s) ({})",
                    issues, model
                ));
            }
            BackgroundMessage::ReviewFailed(e) => {
                // Leave any previous review in place; only the loading
                // state and the toast change.
                app.loading = crate::app::LoadingState::None;
                app.show_toast(&e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::LoadingState;
    use crate::review::Review;

    #[test]
    fn test_drain_installs_ready_review() {
        let (tx, rx) = mpsc::channel();
        let mut app = App::new(Config::default(), "code".to_string(), None);
        app.loading = LoadingState::Reviewing;

        tx.send(BackgroundMessage::ReviewReady {
            review: Review::degraded(),
            model: "test-model".to_string(),
        })
        .unwrap();
        drain_messages(&mut app, &rx);

        assert!(app.review.is_some());
        assert!(!app.loading.is_loading());
        assert_eq!(app.active_model.as_deref(), Some("test-model"));
    }

    #[test]
    fn test_drain_failure_leaves_review_unset() {
        let (tx, rx) = mpsc::channel();
        let mut app = App::new(Config::default(), "code".to_string(), None);
        app.loading = LoadingState::Reviewing;

        tx.send(BackgroundMessage::ReviewFailed(
            "Ollama not detected".to_string(),
        ))
        .unwrap();
        drain_messages(&mut app, &rx);

        assert!(app.review.is_none());
        assert!(!app.loading.is_loading());
        assert!(app.toast.is_some());
    }
}
