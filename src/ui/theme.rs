//! Greyscale theme for revue with a few semantic accents
//! High-contrast monochrome base; color only where meaning demands it.

use crate::review::Severity;
use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    // ─────────────────────────────────────────────────────────────────────
    // Core greyscale palette - from brightest to darkest
    // ─────────────────────────────────────────────────────────────────────

    /// Pure white - maximum emphasis
    pub const WHITE: Color = Color::Rgb(255, 255, 255);

    /// Bright grey - primary text
    pub const GREY_100: Color = Color::Rgb(220, 220, 220);

    /// Light grey - secondary text
    pub const GREY_200: Color = Color::Rgb(180, 180, 180);

    /// Medium grey - muted text
    pub const GREY_300: Color = Color::Rgb(140, 140, 140);

    /// Dark grey - subtle elements
    pub const GREY_400: Color = Color::Rgb(100, 100, 100);

    /// Darker grey - borders, separators
    pub const GREY_500: Color = Color::Rgb(70, 70, 70);

    /// Dark grey - overlay backgrounds
    pub const GREY_700: Color = Color::Rgb(35, 35, 35);

    /// True black - deepest background
    pub const GREY_900: Color = Color::Rgb(18, 18, 18);

    // ─────────────────────────────────────────────────────────────────────
    // Semantic accents
    // ─────────────────────────────────────────────────────────────────────

    pub const GREEN: Color = Color::Rgb(100, 200, 100);
    pub const RED: Color = Color::Rgb(200, 100, 100);
    pub const YELLOW: Color = Color::Rgb(210, 190, 100);

    pub fn text() -> Style {
        Style::default().fg(Self::GREY_100)
    }

    pub fn text_muted() -> Style {
        Style::default().fg(Self::GREY_300)
    }

    pub fn text_dim() -> Style {
        Style::default().fg(Self::GREY_400)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::WHITE)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::GREY_500)
    }

    pub fn border_active() -> Style {
        Style::default().fg(Self::GREY_200)
    }

    pub fn selected() -> Style {
        Style::default()
            .fg(Self::WHITE)
            .bg(Self::GREY_700)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key() -> Style {
        Style::default()
            .fg(Self::GREY_100)
            .add_modifier(Modifier::BOLD)
    }

    /// Score coloring, same thresholds as the reference UI:
    /// 8+ good, 6+ middling, below that bad.
    pub fn score_style(score: f64) -> Style {
        let color = if score >= 8.0 {
            Self::GREEN
        } else if score >= 6.0 {
            Self::YELLOW
        } else {
            Self::RED
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    pub fn severity_style(severity: Severity) -> Style {
        let color = match severity {
            Severity::Error => Self::RED,
            Severity::Warning => Self::YELLOW,
            Severity::Info => Self::GREY_200,
        };
        Style::default().fg(color)
    }

    // Diff accents

    pub fn diff_added() -> Style {
        Style::default().fg(Self::GREEN)
    }

    pub fn diff_removed() -> Style {
        Style::default()
            .fg(Self::RED)
            .add_modifier(Modifier::CROSSED_OUT)
    }

    pub fn diff_modified() -> Style {
        Style::default().fg(Self::YELLOW)
    }
}
