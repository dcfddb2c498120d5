//! Diff renderings: unified and side-by-side.
//!
//! Both views are pure functions of the same `LineDiff` sequence; the
//! caller owns scrolling and panel placement.

use crate::diff::LineDiff;
use crate::ui::theme::Theme;
use ratatui::text::{Line, Span};

/// Width of the line-number gutter for `count` lines.
fn gutter_width(count: usize) -> usize {
    count.max(1).to_string().len().max(3)
}

fn gutter(number: usize, width: usize) -> Span<'static> {
    Span::styled(format!("{:>width$} ", number, width = width), Theme::text_dim())
}

fn blank_gutter(width: usize) -> Span<'static> {
    Span::styled(" ".repeat(width + 1), Theme::text_dim())
}

/// Unified view: one column, `~/-/+` change markers, modified rows
/// rendered as struck-through old text with the replacement beneath.
pub fn unified_lines(diffs: &[LineDiff]) -> Vec<Line<'static>> {
    let width = gutter_width(diffs.len());
    let mut lines = Vec::with_capacity(diffs.len());

    for (i, diff) in diffs.iter().enumerate() {
        let number = i + 1;
        let marker = Span::styled(format!("{} ", diff.marker()), Theme::text_muted());
        match diff {
            LineDiff::Unchanged(text) => {
                lines.push(Line::from(vec![
                    gutter(number, width),
                    marker,
                    Span::styled(text.clone(), Theme::text()),
                ]));
            }
            LineDiff::Modified { old, new } => {
                lines.push(Line::from(vec![
                    gutter(number, width),
                    marker,
                    Span::styled(old.clone(), Theme::diff_removed()),
                ]));
                lines.push(Line::from(vec![
                    blank_gutter(width),
                    Span::styled("  ", Theme::text_muted()),
                    Span::styled(new.clone(), Theme::diff_added()),
                ]));
            }
            LineDiff::Added(text) => {
                lines.push(Line::from(vec![
                    gutter(number, width),
                    marker,
                    Span::styled(text.clone(), Theme::diff_added()),
                ]));
            }
            LineDiff::Removed(text) => {
                lines.push(Line::from(vec![
                    gutter(number, width),
                    marker,
                    Span::styled(text.clone(), Theme::diff_removed()),
                ]));
            }
        }
    }
    lines
}

/// Side-by-side view: original column and fixed column, each row
/// highlighted against the other column's same-index row.
pub fn side_by_side_lines(diffs: &[LineDiff]) -> (Vec<Line<'static>>, Vec<Line<'static>>) {
    let width = gutter_width(diffs.len());
    let mut left = Vec::with_capacity(diffs.len());
    let mut right = Vec::with_capacity(diffs.len());

    for (i, diff) in diffs.iter().enumerate() {
        let number = i + 1;
        match diff {
            LineDiff::Unchanged(text) => {
                left.push(Line::from(vec![
                    gutter(number, width),
                    Span::styled(text.clone(), Theme::text()),
                ]));
                right.push(Line::from(vec![
                    gutter(number, width),
                    Span::styled(text.clone(), Theme::text()),
                ]));
            }
            LineDiff::Modified { old, new } => {
                left.push(Line::from(vec![
                    gutter(number, width),
                    Span::styled(old.clone(), Theme::diff_modified()),
                ]));
                right.push(Line::from(vec![
                    gutter(number, width),
                    Span::styled(new.clone(), Theme::diff_added()),
                ]));
            }
            LineDiff::Added(text) => {
                left.push(Line::from(vec![blank_gutter(width)]));
                right.push(Line::from(vec![
                    gutter(number, width),
                    Span::styled(text.clone(), Theme::diff_added()),
                ]));
            }
            LineDiff::Removed(text) => {
                left.push(Line::from(vec![
                    gutter(number, width),
                    Span::styled(text.clone(), Theme::diff_removed()),
                ]));
                right.push(Line::from(vec![blank_gutter(width)]));
            }
        }
    }
    (left, right)
}
