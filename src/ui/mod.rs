//! revue UI - review summary, issue list, and diff preview
//!
//! Layout:
//! ╔══════════════════════════════════════════════════════════════╗
//! ║  R E V U E          senior · llama3.1 · ⠙ reviewing…         ║
//! ╠═══════════════════════════╦══════════════════════════════════╣
//! ║  REVIEW 7.5/10            ║  CHANGES (unified)               ║
//! ║  x L12 unchecked index    ║   11   let total = 0;            ║
//! ║  ! L note: prefer const   ║   12 ~ for (i = 0; ...           ║
//! ║                           ║        for (let i = 0; ...       ║
//! ╠═══════════════════════════╩══════════════════════════════════╣
//! ║  ↵ review  t tone  v view  a/A apply  u reset  ? help  q quit║
//! ╚══════════════════════════════════════════════════════════════╝

pub mod diff_view;
pub mod theme;
mod toast;

use crate::app::{App, DiffViewMode, LoadingState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use theme::Theme;

pub fn render(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, rows[0], app);
    render_body(frame, rows[1], app);
    render_footer(frame, rows[2], app);

    if let Some(toast) = &app.toast {
        toast::render_toast(frame, toast);
    }
    if app.show_help {
        render_help(frame);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut status = vec![
        Span::styled("R E V U E", Theme::title()),
        Span::styled("   ", Theme::text_dim()),
        Span::styled(app.tone.label(), Theme::text_muted()),
        Span::styled(" · ", Theme::text_dim()),
        Span::styled(app.config.model.clone(), Theme::text_muted()),
    ];

    if let Some(path) = &app.source_path {
        status.push(Span::styled(" · ", Theme::text_dim()));
        status.push(Span::styled(path.display().to_string(), Theme::text_dim()));
    }

    if app.loading == LoadingState::Reviewing {
        status.push(Span::styled(" · ", Theme::text_dim()));
        status.push(Span::styled(
            format!("{} reviewing…", app.spinner_frame()),
            Theme::text(),
        ));
    }

    let header = Paragraph::new(Line::from(status))
        .block(Block::default().borders(Borders::BOTTOM).border_style(Theme::border()));
    frame.render_widget(header, area);
}

fn render_body(frame: &mut Frame, area: Rect, app: &App) {
    if app.review.is_none() {
        render_source_preview(frame, area, app);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(42), Constraint::Percentage(58)])
        .split(area);

    render_review_panel(frame, columns[0], app);
    render_diff_panel(frame, columns[1], app);
}

/// Before the first review: show the submitted source with line
/// numbers so the issue line references have something to point at.
fn render_source_preview(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app
        .source
        .split('\n')
        .enumerate()
        .map(|(i, text)| {
            Line::from(vec![
                Span::styled(format!("{:>4} ", i + 1), Theme::text_dim()),
                Span::styled(text.to_string(), Theme::text()),
            ])
        })
        .collect();

    let title = if app.loading.is_loading() {
        " SOURCE (review in progress) "
    } else {
        " SOURCE (press ↵ to review) "
    };

    let scroll = app.diff_scroll.min(lines.len().saturating_sub(1)) as u16;
    let paragraph = Paragraph::new(lines)
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border())
                .title(Span::styled(title, Theme::title())),
        );
    frame.render_widget(paragraph, area);
}

fn render_review_panel(frame: &mut Frame, area: Rect, app: &App) {
    let Some(review) = &app.review else {
        return;
    };

    let mut lines = vec![Line::from(vec![
        Span::styled("score ", Theme::text_muted()),
        Span::styled(format!("{:.1}/10", review.score), Theme::score_style(review.score)),
    ])];
    lines.push(Line::from(Span::styled(review.summary.clone(), Theme::text())));
    lines.push(Line::default());

    if review.issues.is_empty() {
        lines.push(Line::from(Span::styled(
            "No issues found - clean review",
            Theme::text_muted(),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            format!("ISSUES ({})", review.issues.len()),
            Theme::title(),
        )));
        for (i, issue) in review.issues.iter().enumerate() {
            let selected = i == app.selected_issue;
            let applied = app.applied.contains(&i);
            let row_style = if selected { Theme::selected() } else { Theme::text() };

            let mut spans = vec![
                Span::styled(
                    format!(" {} ", issue.severity.glyph()),
                    Theme::severity_style(issue.severity),
                ),
                Span::styled(format!("L{:<4}", issue.line), Theme::text_dim()),
                Span::styled(issue.message.clone(), row_style),
            ];
            if applied {
                spans.push(Span::styled(" ✓", Theme::diff_added()));
            }
            lines.push(Line::from(spans));

            // The selected issue also shows its suggested replacement.
            if selected && !issue.fix.is_empty() {
                lines.push(Line::from(vec![
                    Span::styled("      fix: ", Theme::text_dim()),
                    Span::styled(issue.fix.clone(), Theme::diff_added()),
                ]));
            }
        }
    }

    if !review.suggestions.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("SUGGESTIONS", Theme::title())));
        for suggestion in &review.suggestions {
            lines.push(Line::from(vec![
                Span::styled(" › ", Theme::text_dim()),
                Span::styled(suggestion.clone(), Theme::text_muted()),
            ]));
        }
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border_active())
            .title(Span::styled(" REVIEW ", Theme::title())),
    );
    frame.render_widget(paragraph, area);
}

fn render_diff_panel(frame: &mut Frame, area: Rect, app: &App) {
    let diffs = app.diff_lines();
    let scroll = app.diff_scroll.min(diffs.len().saturating_sub(1)) as u16;
    let title = format!(" CHANGES ({}) ", app.diff_view.label());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(Span::styled(title, Theme::title()));

    match app.diff_view {
        DiffViewMode::Unified => {
            let paragraph = Paragraph::new(diff_view::unified_lines(&diffs))
                .scroll((scroll, 0))
                .block(block);
            frame.render_widget(paragraph, area);
        }
        DiffViewMode::SideBySide => {
            frame.render_widget(block, area);
            let inner = area.inner(ratatui::layout::Margin {
                horizontal: 1,
                vertical: 1,
            });
            let halves = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(inner);

            let (left, right) = diff_view::side_by_side_lines(&diffs);
            let original = Paragraph::new(left).scroll((scroll, 0)).block(
                Block::default()
                    .borders(Borders::RIGHT)
                    .border_style(Theme::border())
                    .title(Span::styled("original", Theme::text_muted())),
            );
            let fixed = Paragraph::new(right)
                .scroll((scroll, 0))
                .block(Block::default().title(Span::styled("fixed", Theme::text_muted())));
            frame.render_widget(original, halves[0]);
            frame.render_widget(fixed, halves[1]);
        }
    }
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let hint = |key: &'static str, label: &'static str| {
        [
            Span::styled(format!("  {}", key), Theme::key()),
            Span::styled(format!(" {}", label), Theme::text_dim()),
        ]
    };

    let mut spans: Vec<Span> = Vec::new();
    if app.loading.is_loading() {
        spans.push(Span::styled("  reviewing…", Theme::text_muted()));
    } else {
        spans.extend(hint("↵", "review"));
    }
    spans.extend(hint("t", "tone"));
    if app.review.is_some() {
        spans.extend(hint("v", app.diff_view.toggle().label()));
        spans.extend(hint("a/A", "apply"));
        spans.extend(hint("u", "reset"));
    }
    if app.source_path.is_some() {
        spans.extend(hint("r", "reload"));
    }
    spans.extend(hint("?", "help"));
    spans.extend(hint("q", "quit"));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help(frame: &mut Frame) {
    let area = centered_rect(46, 14, frame.area());
    frame.render_widget(Clear, area);

    let rows = [
        ("↵", "submit code for review"),
        ("t", "cycle tone (strict / friendly / senior)"),
        ("v", "toggle unified / side-by-side diff"),
        ("j k", "select issue"),
        ("J K", "scroll diff"),
        ("a", "apply selected fix"),
        ("A", "apply all fixes"),
        ("u", "reset applied fixes"),
        ("r", "reload source file"),
        ("q", "quit"),
    ];

    let mut lines = vec![Line::default()];
    for (key, desc) in rows {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<4}", key), Theme::key()),
            Span::styled(desc, Theme::text_muted()),
        ]));
    }

    let help = Paragraph::new(lines).alignment(Alignment::Left).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border_active())
            .title(Span::styled(" KEYS ", Theme::title())),
    );
    frame.render_widget(help, area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.width.saturating_sub(width) / 2;
    let y = area.height.saturating_sub(height) / 2;
    Rect {
        x: area.x + x,
        y: area.y + y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_source_preview_scroll_is_clamped_to_content() {
        let mut app = App::new(Config::default(), "a\nb".to_string(), None);
        app.diff_scroll = usize::MAX;

        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        // Clamped to the last line: "   2 b" stays on screen instead of
        // scrolling into blank space.
        let rendered: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(rendered.contains("   2 b"));
    }
}
