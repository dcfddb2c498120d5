//! Parsing and recovery for model output.
//!
//! Local models routinely wrap JSON in markdown fences, add prose
//! around it, or emit minor syntax damage. The ladder here is: strip
//! fences, extract the outermost object, mechanically repair common
//! damage, then deserialize against the typed `Review` shape. Anything
//! that still fails degrades to `Review::degraded()` - after a
//! successful HTTP exchange the caller always gets a displayable
//! Review, never a parse error.

use super::Review;

/// Strip markdown code fences from a response
fn strip_markdown_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let clean = if trimmed.starts_with("```json") {
        trimmed.strip_prefix("```json").unwrap_or(trimmed)
    } else if trimmed.starts_with("```") {
        trimmed.strip_prefix("```").unwrap_or(trimmed)
    } else {
        trimmed
    };
    let clean = if clean.ends_with("```") {
        clean.strip_suffix("```").unwrap_or(clean)
    } else {
        clean
    };
    clean.trim()
}

/// Extract a JSON fragment between matching delimiters
fn extract_json_fragment(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    if start <= end {
        Some(&text[start..=end])
    } else {
        None
    }
}

/// Try to fix common JSON issues from LLM responses
fn fix_json_issues(json: &str) -> String {
    let mut fixed = json.to_string();

    // Remove trailing commas before ] or }
    fixed = fixed.replace(",]", "]");
    fixed = fixed.replace(",}", "}");

    // Smart quotes to regular quotes
    fixed = fixed.replace('\u{201C}', "\"");
    fixed = fixed.replace('\u{201D}', "\"");
    fixed = fixed.replace('\u{2018}', "'");
    fixed = fixed.replace('\u{2019}', "'");

    // Remove any control characters that might have slipped in
    fixed = fixed
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();

    fixed
}

/// Parse the model's payload into a `Review`, falling back to the
/// degraded placeholder when the payload cannot be recovered or the
/// score is outside [0, 10].
pub fn parse_review(payload: &str) -> Review {
    let clean = strip_markdown_fences(payload);
    let Some(fragment) = extract_json_fragment(clean, '{', '}') else {
        return Review::degraded();
    };

    let review = match serde_json::from_str::<Review>(fragment) {
        Ok(r) => r,
        Err(_) => {
            let repaired = fix_json_issues(fragment);
            match serde_json::from_str::<Review>(&repaired) {
                Ok(r) => r,
                Err(_) => return Review::degraded(),
            }
        }
    };

    // Out-of-range score means the rest of the payload is not trusted
    // either; treat like a parse failure.
    if !review.score_in_range() {
        return Review::degraded();
    }

    review
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::Severity;

    const WELL_FORMED: &str = r#"{
        "summary": "Solid overall",
        "score": 8.5,
        "issues": [
            {"line": 2, "severity": "warning", "message": "prefer const", "fix": "const x = 1;"}
        ],
        "suggestions": ["add tests"]
    }"#;

    #[test]
    fn test_parse_well_formed_review() {
        let review = parse_review(WELL_FORMED);
        assert_eq!(review.score, 8.5);
        assert_eq!(review.issues.len(), 1);
        assert_eq!(review.issues[0].line, 2);
        assert_eq!(review.issues[0].severity, Severity::Warning);
        assert_eq!(review.suggestions, vec!["add tests".to_string()]);
    }

    #[test]
    fn test_parse_not_json_degrades() {
        let review = parse_review("not json");
        assert_eq!(review, Review::degraded());
    }

    #[test]
    fn test_parse_fenced_json() {
        let payload = format!("```json\n{}\n```", WELL_FORMED);
        let review = parse_review(&payload);
        assert_eq!(review.score, 8.5);
    }

    #[test]
    fn test_parse_json_with_surrounding_prose() {
        let payload = format!("Here is my review:\n{}\nHope that helps!", WELL_FORMED);
        let review = parse_review(&payload);
        assert_eq!(review.issues.len(), 1);
    }

    #[test]
    fn test_parse_trailing_comma_is_repaired() {
        let payload = r#"{"summary": "ok", "score": 6.0, "issues": [], "suggestions": ["a",]}"#;
        let review = parse_review(payload);
        assert_eq!(review.score, 6.0);
        assert_eq!(review.suggestions.len(), 1);
    }

    #[test]
    fn test_parse_smart_quotes_are_repaired() {
        let payload = "{\u{201C}summary\u{201D}: \u{201C}ok\u{201D}, \u{201C}score\u{201D}: 5.0}";
        let review = parse_review(payload);
        assert_eq!(review.summary, "ok");
        assert_eq!(review.score, 5.0);
    }

    #[test]
    fn test_parse_missing_issues_defaults_to_empty() {
        let payload = r#"{"summary": "fine", "score": 9.0}"#;
        let review = parse_review(payload);
        assert_eq!(review.score, 9.0);
        assert!(review.issues.is_empty());
        assert!(review.suggestions.is_empty());
    }

    #[test]
    fn test_parse_out_of_range_score_degrades() {
        for score in ["42.0", "-3.0", "1e999"] {
            let payload = format!(r#"{{"summary": "s", "score": {}}}"#, score);
            assert_eq!(parse_review(&payload), Review::degraded(), "score {}", score);
        }
    }

    #[test]
    fn test_parse_wrong_issue_type_degrades() {
        let payload = r#"{"summary": "s", "score": 5.0, "issues": "none"}"#;
        assert_eq!(parse_review(payload), Review::degraded());
    }
}
