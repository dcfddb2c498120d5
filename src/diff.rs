//! Line-level diff classification and fix application.
//!
//! The diff is aligned by index position, not by content: line i of the
//! original is compared to line i of the fixed text, so a fix that adds
//! or removes lines shifts everything after it into Modified pairs.
//! That is the intended presentation (a cheap per-line highlight), not
//! a minimal-edit-distance diff.

use crate::review::Issue;
use std::collections::HashMap;

/// Per-line classification used by both diff renderings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineDiff {
    Unchanged(String),
    Modified { old: String, new: String },
    Added(String),
    Removed(String),
}

impl LineDiff {
    pub fn is_change(&self) -> bool {
        !matches!(self, LineDiff::Unchanged(_))
    }

    /// Gutter marker for the unified rendering.
    pub fn marker(&self) -> &'static str {
        match self {
            LineDiff::Unchanged(_) => " ",
            LineDiff::Modified { .. } => "~",
            LineDiff::Added(_) => "+",
            LineDiff::Removed(_) => "-",
        }
    }
}

/// Classify `original` against `fixed` line by line.
///
/// Splits on `\n` without trailing-newline normalization: text ending
/// in a newline contributes a final empty line.
pub fn classify_lines(original: &str, fixed: &str) -> Vec<LineDiff> {
    let old_lines: Vec<&str> = original.split('\n').collect();
    let new_lines: Vec<&str> = fixed.split('\n').collect();
    let max = old_lines.len().max(new_lines.len());

    let mut diffs = Vec::with_capacity(max);
    for i in 0..max {
        let diff = match (old_lines.get(i), new_lines.get(i)) {
            (Some(old), Some(new)) if old == new => LineDiff::Unchanged(old.to_string()),
            (Some(old), Some(new)) => LineDiff::Modified {
                old: old.to_string(),
                new: new.to_string(),
            },
            (Some(old), None) => LineDiff::Removed(old.to_string()),
            (None, Some(new)) => LineDiff::Added(new.to_string()),
            (None, None) => unreachable!("index below max of both lengths"),
        };
        diffs.push(diff);
    }
    diffs
}

/// Apply a single issue's fix: replace the line at `issue.line`
/// (1-based) with `issue.fix`. A line number beyond the end of the
/// text is a no-op; the backend hallucinated a position and dropping
/// the edit is safer than appending.
///
/// Pure: the input text and the issue are left untouched.
pub fn apply_fix(text: &str, issue: &Issue) -> String {
    if issue.line == 0 {
        return text.to_string();
    }
    let mut lines: Vec<&str> = text.split('\n').collect();
    let index = issue.line - 1;
    if index >= lines.len() {
        return text.to_string();
    }
    lines[index] = &issue.fix;
    lines.join("\n")
}

/// Fold every issue's fix over the text in list order, each step
/// feeding the next. Fixes are expressed against original line numbers
/// but applied cumulatively, so a fix that changes the line count
/// misaligns the targets of the issues after it. Reference behavior,
/// kept as the default; see `apply_fixes_by_line` for the drift-free
/// alternative.
pub fn apply_all(text: &str, issues: &[Issue]) -> String {
    issues
        .iter()
        .fold(text.to_string(), |acc, issue| apply_fix(&acc, issue))
}

/// Drift-free fix application: resolve every fix against the original
/// line positions first (first fix per line wins), then rebuild the
/// text in one pass.
pub fn apply_fixes_by_line(original: &str, issues: &[Issue]) -> String {
    let mut replacements: HashMap<usize, &str> = HashMap::new();
    for issue in issues {
        if issue.line > 0 {
            replacements.entry(issue.line - 1).or_insert(&issue.fix);
        }
    }

    original
        .split('\n')
        .enumerate()
        .map(|(i, line)| *replacements.get(&i).unwrap_or(&line))
        .collect::<Vec<_>>()
        .join("\n")
}
