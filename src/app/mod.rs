//! Application state for the revue TUI.

pub mod background;
pub mod input;
pub mod messages;
pub mod runtime;

pub use messages::BackgroundMessage;
pub use runtime::run_tui;

use crate::config::Config;
use crate::diff::{self, LineDiff};
use crate::review::{Review, Tone};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;

/// Loading state for background tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingState {
    #[default]
    None,
    Reviewing,
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        !matches!(self, LoadingState::None)
    }
}

/// Diff rendering mode (`v` toggles).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffViewMode {
    #[default]
    Unified,
    SideBySide,
}

impl DiffViewMode {
    pub fn label(&self) -> &'static str {
        match self {
            DiffViewMode::Unified => "unified",
            DiffViewMode::SideBySide => "side-by-side",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            DiffViewMode::Unified => DiffViewMode::SideBySide,
            DiffViewMode::SideBySide => DiffViewMode::Unified,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn duration_secs(&self) -> u64 {
        match self {
            ToastKind::Success => 3,
            ToastKind::Error => 6,
            ToastKind::Info => 4,
        }
    }
}

/// A transient notification shown near the bottom of the screen.
pub struct Toast {
    pub message: String,
    pub created_at: Instant,
    pub kind: ToastKind,
}

impl Toast {
    pub fn new(message: &str) -> Self {
        // Auto-detect toast type - check success indicators BEFORE error keywords
        let kind = if message.starts_with('+') || message.contains("completed") {
            ToastKind::Success
        } else if message.contains("failed")
            || message.contains("error")
            || message.contains("Error")
            || message.contains("not detected")
            || message.contains("Please enter")
        {
            ToastKind::Error
        } else {
            ToastKind::Info
        };

        Self {
            message: message.to_string(),
            created_at: Instant::now(),
            kind,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed().as_secs() >= self.kind.duration_secs()
    }
}

/// Spinner animation frames (braille pattern)
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct App {
    pub config: Config,
    /// Original submitted source; the diff baseline.
    pub source: String,
    pub source_path: Option<PathBuf>,
    pub tone: Tone,
    /// Current review, replaced wholesale on each completed submission.
    pub review: Option<Review>,
    /// Model that produced the current review.
    pub active_model: Option<String>,
    pub loading: LoadingState,
    pub toast: Option<Toast>,
    pub diff_view: DiffViewMode,
    /// Source text with the accepted fixes merged in. Starts equal to
    /// `source` and advances as issues are applied; `u` resets it.
    pub working: String,
    /// Indices of issues whose fixes are merged into `working`.
    pub applied: HashSet<usize>,
    pub selected_issue: usize,
    pub diff_scroll: usize,
    pub show_help: bool,
    pub should_quit: bool,
    spinner_tick: usize,
}

impl App {
    pub fn new(config: Config, source: String, source_path: Option<PathBuf>) -> Self {
        let tone = config.default_tone;
        Self {
            config,
            working: source.clone(),
            source,
            source_path,
            tone,
            review: None,
            active_model: None,
            loading: LoadingState::None,
            toast: None,
            diff_view: DiffViewMode::default(),
            applied: HashSet::new(),
            selected_issue: 0,
            diff_scroll: 0,
            show_help: false,
            should_quit: false,
            spinner_tick: 0,
        }
    }

    pub fn show_toast(&mut self, message: &str) {
        self.toast = Some(Toast::new(message));
    }

    /// Per-frame housekeeping: expire toasts, advance the spinner.
    pub fn tick(&mut self) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
        if self.loading.is_loading() {
            self.spinner_tick = self.spinner_tick.wrapping_add(1);
        }
    }

    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_tick % SPINNER_FRAMES.len()]
    }

    /// Install a completed review, discarding the previous one. The
    /// working text restarts from the original source because the new
    /// review's line numbers refer to it.
    pub fn set_review(&mut self, review: Review, model: String) {
        self.review = Some(review);
        self.active_model = Some(model);
        self.working = self.source.clone();
        self.applied.clear();
        self.selected_issue = 0;
        self.diff_scroll = 0;
        self.loading = LoadingState::None;
    }

    /// Source text with every suggested fix applied, using the
    /// configured application strategy. The diff preview baseline.
    pub fn fixed_preview(&self) -> String {
        let Some(review) = &self.review else {
            return self.source.clone();
        };
        if self.config.independent_fixes {
            diff::apply_fixes_by_line(&self.source, &review.issues)
        } else {
            diff::apply_all(&self.source, &review.issues)
        }
    }

    /// Line classification shown in the diff panel. Until the user
    /// accepts a fix this previews every suggested fix; once any fix
    /// has been applied it tracks the working text instead.
    pub fn diff_lines(&self) -> Vec<LineDiff> {
        if self.applied.is_empty() {
            diff::classify_lines(&self.source, &self.fixed_preview())
        } else {
            diff::classify_lines(&self.source, &self.working)
        }
    }

    pub fn issue_count(&self) -> usize {
        self.review.as_ref().map(|r| r.issues.len()).unwrap_or(0)
    }

    pub fn select_next_issue(&mut self) {
        let count = self.issue_count();
        if count > 0 && self.selected_issue + 1 < count {
            self.selected_issue += 1;
        }
    }

    pub fn select_prev_issue(&mut self) {
        self.selected_issue = self.selected_issue.saturating_sub(1);
    }

    /// Merge the selected issue's fix into the working text. Fixes
    /// applied one at a time fold cumulatively, matching `apply_all`
    /// when accepted in order. Returns false if nothing was applied.
    pub fn apply_selected_fix(&mut self) -> bool {
        let Some(review) = &self.review else {
            return false;
        };
        let Some(issue) = review.issues.get(self.selected_issue) else {
            return false;
        };
        if !self.applied.insert(self.selected_issue) {
            return false;
        }
        self.working = diff::apply_fix(&self.working, issue);
        true
    }

    /// Replace the working text with every fix applied, using the
    /// configured strategy.
    pub fn apply_all_fixes(&mut self) {
        let count = self.issue_count();
        if count == 0 {
            return;
        }
        self.working = self.fixed_preview();
        self.applied.extend(0..count);
    }

    /// Discard applied fixes; the working text returns to the source.
    pub fn reset_working(&mut self) {
        self.working = self.source.clone();
        self.applied.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::{Issue, Severity};

    fn app_with_review(source: &str, issues: Vec<Issue>) -> App {
        let mut app = App::new(Config::default(), source.to_string(), None);
        app.set_review(
            Review {
                summary: "s".to_string(),
                score: 8.0,
                issues,
                suggestions: vec![],
            },
            "test-model".to_string(),
        );
        app
    }

    fn issue(line: usize, fix: &str) -> Issue {
        Issue {
            line,
            severity: Severity::Error,
            message: "m".to_string(),
            fix: fix.to_string(),
        }
    }

    #[test]
    fn test_toast_kind_detection() {
        assert_eq!(Toast::new("+ Code review completed").kind, ToastKind::Success);
        assert_eq!(Toast::new("Ollama not detected").kind, ToastKind::Error);
        assert_eq!(Toast::new("tone: friendly").kind, ToastKind::Info);
    }

    #[test]
    fn test_fixed_preview_without_review_is_the_source() {
        let app = App::new(Config::default(), "a\nb".to_string(), None);
        assert_eq!(app.fixed_preview(), "a\nb");
    }

    #[test]
    fn test_fixed_preview_applies_all_issue_fixes() {
        let app = app_with_review("a\nb\nc", vec![issue(2, "B")]);
        assert_eq!(app.fixed_preview(), "a\nB\nc");
        assert!(app.diff_lines()[1].is_change());
    }

    #[test]
    fn test_independent_fixes_config_switches_strategy() {
        let mut app = app_with_review("a\nb", vec![issue(1, "a1\na2"), issue(2, "B")]);
        assert_eq!(app.fixed_preview(), "a1\nB\nb");
        app.config.independent_fixes = true;
        assert_eq!(app.fixed_preview(), "a1\na2\nB");
    }

    #[test]
    fn test_apply_selected_fix_advances_working_text() {
        let mut app = app_with_review("a\nb\nc", vec![issue(2, "B")]);
        assert_eq!(app.working, app.source);

        assert!(app.apply_selected_fix());
        assert_eq!(app.working, "a\nB\nc");
        // Re-applying the same issue is a no-op.
        assert!(!app.apply_selected_fix());
        assert_eq!(app.working, "a\nB\nc");
    }

    #[test]
    fn test_fixes_applied_one_at_a_time_fold_cumulatively() {
        let mut app = app_with_review("a\nb", vec![issue(1, "a1\na2"), issue(2, "B")]);
        app.apply_selected_fix();
        app.select_next_issue();
        app.apply_selected_fix();
        assert_eq!(app.working, crate::diff::apply_all("a\nb", &app.review.as_ref().unwrap().issues));
    }

    #[test]
    fn test_diff_tracks_working_text_once_fixes_are_applied() {
        let mut app = app_with_review("a\nb", vec![issue(1, "A"), issue(2, "B")]);
        // Nothing applied yet: diff previews every suggested fix.
        assert!(app.diff_lines()[0].is_change());
        assert!(app.diff_lines()[1].is_change());

        app.apply_selected_fix();
        // Only the accepted fix shows as changed now.
        assert!(app.diff_lines()[0].is_change());
        assert!(!app.diff_lines()[1].is_change());
    }

    #[test]
    fn test_reset_working_restores_the_source() {
        let mut app = app_with_review("a\nb", vec![issue(1, "A")]);
        app.apply_selected_fix();
        assert_ne!(app.working, app.source);

        app.reset_working();
        assert_eq!(app.working, app.source);
        assert!(app.applied.is_empty());
    }

    #[test]
    fn test_apply_all_fixes_uses_configured_strategy() {
        let mut app = app_with_review("a\nb", vec![issue(1, "a1\na2"), issue(2, "B")]);
        app.config.independent_fixes = true;
        app.apply_all_fixes();
        assert_eq!(app.working, "a1\na2\nB");
        assert_eq!(app.applied.len(), 2);
    }

    #[test]
    fn test_new_review_resets_selection_and_working_text() {
        let mut app = app_with_review("a\nb", vec![issue(1, "A"), issue(2, "B")]);
        app.select_next_issue();
        app.apply_selected_fix();
        assert!(!app.applied.is_empty());

        app.set_review(Review::degraded(), "test-model".to_string());
        assert!(app.applied.is_empty());
        assert_eq!(app.working, app.source);
        assert_eq!(app.selected_issue, 0);
        assert!(!app.loading.is_loading());
    }

    #[test]
    fn test_issue_selection_clamps_to_bounds() {
        let mut app = app_with_review("a\nb", vec![issue(1, "A"), issue(2, "B")]);
        app.select_prev_issue();
        assert_eq!(app.selected_issue, 0);
        app.select_next_issue();
        app.select_next_issue();
        app.select_next_issue();
        assert_eq!(app.selected_issue, 1);
    }
}
