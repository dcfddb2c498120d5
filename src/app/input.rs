//! Key dispatch for the revue TUI.

use crate::app::messages::BackgroundMessage;
use crate::app::{background, App, LoadingState};
use crate::review::ReviewError;
use crate::source;
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::mpsc;

pub fn handle_key(app: &mut App, key: KeyEvent, tx: &mpsc::Sender<BackgroundMessage>) {
    // Help overlay swallows everything except its dismiss keys.
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Enter => submit(app, tx),
        KeyCode::Char('t') => {
            app.tone = app.tone.next();
            app.show_toast(&format!("tone: {}", app.tone.label()));
        }
        KeyCode::Char('v') => {
            app.diff_view = app.diff_view.toggle();
        }
        KeyCode::Char('j') | KeyCode::Down => app.select_next_issue(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev_issue(),
        KeyCode::Char('J') | KeyCode::PageDown => {
            app.diff_scroll = app.diff_scroll.saturating_add(5);
        }
        KeyCode::Char('K') | KeyCode::PageUp => {
            app.diff_scroll = app.diff_scroll.saturating_sub(5);
        }
        KeyCode::Char('a') => {
            if app.apply_selected_fix() {
                app.show_toast("+ Fix applied");
            }
        }
        KeyCode::Char('A') => {
            if app.issue_count() > 0 {
                app.apply_all_fixes();
                app.show_toast("+ All fixes applied");
            }
        }
        KeyCode::Char('u') => {
            app.reset_working();
        }
        KeyCode::Char('r') => reload(app),
        _ => {}
    }
}

/// Kick off a review. Ignored while one is already in flight: the
/// trigger is disabled during loading, which serializes requests by
/// prevention rather than cancellation.
fn submit(app: &mut App, tx: &mpsc::Sender<BackgroundMessage>) {
    if app.loading.is_loading() {
        return;
    }
    if app.source.trim().is_empty() {
        app.show_toast(&ReviewError::EmptyInput.to_string());
        return;
    }

    app.loading = LoadingState::Reviewing;
    background::spawn_review(
        tx.clone(),
        app.config.clone(),
        app.source.clone(),
        app.tone,
    );
}

fn reload(app: &mut App) {
    let Some(path) = app.source_path.clone() else {
        app.show_toast("no file to reload (source came from stdin)");
        return;
    };
    match source::load_source(&path) {
        Ok(content) => {
            app.source = content;
            app.show_toast(&format!("+ reloaded {}", path.display()));
        }
        Err(e) => app.show_toast(&format!("reload failed: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crossterm::event::KeyModifiers;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn enter() -> KeyEvent {
        KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)
    }

    #[test]
    fn test_empty_source_submit_toasts_without_spawning() {
        let (tx, rx) = mpsc::channel();
        let mut app = App::new(Config::default(), "   ".to_string(), None);

        submit(&mut app, &tx);

        assert!(!app.loading.is_loading());
        assert!(app.toast.as_ref().unwrap().message.contains("enter some code"));
        // Nothing was spawned, so nothing can ever arrive.
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_submit_is_ignored_while_loading() {
        let (tx, _rx) = mpsc::channel();
        let mut app = App::new(Config::default(), "code".to_string(), None);
        app.loading = LoadingState::Reviewing;
        app.toast = None;

        handle_key(&mut app, enter(), &tx);

        // Still loading, no feedback toast: the key was simply ignored.
        assert!(app.loading.is_loading());
        assert!(app.toast.is_none());
    }

    #[test]
    fn test_tone_key_cycles() {
        let (tx, _rx) = mpsc::channel();
        let mut app = App::new(Config::default(), "code".to_string(), None);
        let before = app.tone;

        handle_key(&mut app, key('t'), &tx);

        assert_ne!(app.tone, before);
    }

    #[test]
    fn test_help_overlay_swallows_other_keys() {
        let (tx, _rx) = mpsc::channel();
        let mut app = App::new(Config::default(), "code".to_string(), None);
        app.show_help = true;

        handle_key(&mut app, key('t'), &tx);
        assert!(app.show_help);
        assert_eq!(app.tone, app.config.default_tone);

        handle_key(&mut app, key('?'), &tx);
        assert!(!app.show_help);
    }

    #[test]
    fn test_apply_and_reset_keys_edit_working_text() {
        use crate::review::{Issue, Review, Severity};

        let (tx, _rx) = mpsc::channel();
        let mut app = App::new(Config::default(), "a\nb".to_string(), None);
        app.set_review(
            Review {
                summary: "s".to_string(),
                score: 8.0,
                issues: vec![Issue {
                    line: 2,
                    severity: Severity::Warning,
                    message: "m".to_string(),
                    fix: "B".to_string(),
                }],
                suggestions: vec![],
            },
            "test-model".to_string(),
        );

        handle_key(&mut app, key('a'), &tx);
        assert_eq!(app.working, "a\nB");
        assert!(app.toast.as_ref().unwrap().message.contains("Fix applied"));

        handle_key(&mut app, key('u'), &tx);
        assert_eq!(app.working, "a\nb");
        assert!(app.applied.is_empty());
    }

    #[test]
    fn test_quit_key() {
        let (tx, _rx) = mpsc::channel();
        let mut app = App::new(Config::default(), "code".to_string(), None);
        handle_key(&mut app, key('q'), &tx);
        assert!(app.should_quit);
    }
}
