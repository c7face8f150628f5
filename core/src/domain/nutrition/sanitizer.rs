use std::sync::LazyLock;

use regex::Regex;

static TRAILING_COMMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").expect("valid trailing comma regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

const FENCE: &str = "```";

/// Best-effort cleanup of collaborator output before JSON parsing.
///
/// Never fails. The rule pass is repeated until the text stops changing, so
/// the function is idempotent. Every pass either shortens the text or turns
/// whitespace into plain spaces, which bounds the loop.
pub fn sanitize(raw: &str) -> String {
    let mut current = raw.to_string();
    loop {
        let next = sanitize_pass(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn sanitize_pass(text: &str) -> String {
    let body = strip_fences(text.trim());
    let body = outermost_json_span(body);
    let body = TRAILING_COMMA_RE.replace_all(body, "$1");
    let body = WHITESPACE_RE.replace_all(&body, " ");
    body.trim().to_string()
}

/// Strips leading and trailing code fence markers, including a language tag
/// on the opening fence.
fn strip_fences(text: &str) -> &str {
    let mut body = text;
    loop {
        let mut changed = false;

        if let Some(rest) = body.strip_prefix(FENCE) {
            let tag_len = rest
                .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+')))
                .unwrap_or(rest.len());
            body = rest[tag_len..].trim_start();
            changed = true;
        }

        if let Some(rest) = body.strip_suffix(FENCE) {
            body = rest.trim_end();
            changed = true;
        }

        if !changed {
            return body;
        }
    }
}

/// Drops prose around a JSON value.
///
/// Candidates are the span from the first `{` to the last `}` and the span
/// from the first `[` to the last `]`. The earliest candidate that parses
/// wins; when none parses, the earliest one is kept. Text without a candidate
/// is left alone.
fn outermost_json_span(text: &str) -> &str {
    let mut spans: Vec<(usize, &str)> = [('{', '}'), ('[', ']')]
        .into_iter()
        .filter_map(|(open, close)| {
            let start = text.find(open)?;
            let end = text.rfind(close)?;
            (end > start).then(|| (start, &text[start..=end]))
        })
        .collect();
    spans.sort_by_key(|(start, _)| *start);

    spans
        .iter()
        .find(|(_, span)| parses_as_json(span))
        .or_else(|| spans.first())
        .map_or(text, |(_, span)| *span)
}

fn parses_as_json(span: &str) -> bool {
    let repaired = TRAILING_COMMA_RE.replace_all(span, "$1");
    serde_json::from_str::<serde_json::Value>(&repaired).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json_is_untouched() {
        let raw = r#"{"meal":"Lunch","items":[]}"#;
        assert_eq!(sanitize(raw), raw);
    }

    #[test]
    fn test_strips_fence_with_language_tag() {
        let raw = "```json\n{\"meal\": \"Lunch\", \"items\": []}\n```";
        assert_eq!(sanitize(raw), r#"{"meal": "Lunch", "items": []}"#);
    }

    #[test]
    fn test_strips_fence_without_language_tag() {
        let raw = "  ```\n[{\"title\": \"a\"}]\n```  ";
        assert_eq!(sanitize(raw), r#"[{"title": "a"}]"#);
    }

    #[test]
    fn test_removes_trailing_commas() {
        let raw = "{\"items\": [1, 2, ], \"meal\": \"Dinner\",\n}";
        assert_eq!(sanitize(raw), r#"{"items": [1, 2], "meal": "Dinner"}"#);
    }

    #[test]
    fn test_collapses_whitespace() {
        let raw = "{\"name\": \"big\n\n   breakfast\",\t\"n\": 1}";
        assert_eq!(sanitize(raw), r#"{"name": "big breakfast", "n": 1}"#);
    }

    #[test]
    fn test_drops_surrounding_prose() {
        let raw = "Sure! Here is the JSON you asked for:\n```json\n{\"meal\": \"Snack\", \"items\": []}\n```\nHope this helps.";
        assert_eq!(sanitize(raw), r#"{"meal": "Snack", "items": []}"#);
    }

    #[test]
    fn test_bracket_in_prose_does_not_split_the_object() {
        let raw = "Here is the log [JSON]:\n{\"meal\": \"Lunch\", \"items\": [{\"name\": \"Soup\", \"estimatedCalories\": 150}]}";
        let value: serde_json::Value = serde_json::from_str(&sanitize(raw)).unwrap();
        assert_eq!(value["meal"], "Lunch");
        assert_eq!(value["items"][0]["name"], "Soup");
    }

    #[test]
    fn test_array_wrapping_objects_is_kept_whole() {
        let raw = "Insights: [{\"title\": \"a\"}, {\"title\": \"b\"}] done";
        assert_eq!(sanitize(raw), r#"[{"title": "a"}, {"title": "b"}]"#);
    }

    #[test]
    fn test_fenced_response_with_trailing_comma_parses() {
        let raw = "```json\n{\n  \"meal\": \"Lunch\",\n  \"items\": [\n    {\"name\": \"Toast\", \"estimatedCalories\": 80},\n  ],\n}\n```";
        let value: serde_json::Value = serde_json::from_str(&sanitize(raw)).unwrap();
        assert_eq!(value["meal"], "Lunch");
        assert_eq!(value["items"][0]["estimatedCalories"], 80);
    }

    #[test]
    fn test_never_panics_on_pathological_input() {
        let inputs = [
            "",
            "   ",
            "\n\t\r",
            "```",
            "``````",
            "```json",
            "I had a lovely day, thanks for asking.",
            "}{",
            "][",
            ",}",
            "{,,,}",
            "```\n```json\n{}\n```\n```",
            "ünïcödé ☕ 🍕 ```",
        ];
        for input in inputs {
            let _ = sanitize(input);
        }
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("   "), "");
        assert_eq!(
            sanitize("I had a lovely day, thanks for asking."),
            "I had a lovely day, thanks for asking."
        );
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "",
            "```json\n{\"a\": [1,2,],}\n```",
            "prose { \"a\" : 1 , } more prose ]",
            "{,,,}",
            "[1,, ]",
            "``` ``` ```",
            "```\n```json\n{}\n```\n```",
            "text\r\n\r\nwith   gaps",
            "{\"a\": \"b ```\"}```",
            "[{\"x\": {\"y\": [1, ], }, }, ]",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "not idempotent for {input:?}");
        }
    }
}
