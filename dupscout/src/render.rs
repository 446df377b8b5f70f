//! Markup rendering of evidence highlights.
//!
//! Spans are byte ranges into the original sentences. Everything outside and
//! inside the marked range is escaped before being emitted.

use crate::results::{PairRecord, Role, Span};

/// Escapes the characters that are significant in HTML
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escapes `original` and wraps `span` in a `<mark>` element.
///
/// The span is clamped to the string; an empty span or one that does not
/// fall on character boundaries yields the escaped text without a mark.
pub fn highlight_html(original: &str, span: Span) -> String {
    let start = span.start.min(original.len());
    let end = span.end.min(original.len());
    if end <= start {
        return escape_html(original);
    }
    match (
        original.get(..start),
        original.get(start..end),
        original.get(end..),
    ) {
        (Some(left), Some(mid), Some(right)) => format!(
            "{}<mark class='hl'>{}</mark>{}",
            escape_html(left),
            escape_html(mid),
            escape_html(right)
        ),
        _ => escape_html(original),
    }
}

/// Marked-up forms of both sentences of a pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairMarkup {
    pub a: String,
    pub b: String,
}

impl PairMarkup {
    /// Marks the matched region of the TEXT and the whole PATTERN.
    ///
    /// Pairs without a highlight come back escaped but unmarked.
    pub fn for_record(record: &PairRecord) -> Self {
        let outcome = &record.outcome;
        let Some(highlight) = outcome.highlight else {
            return Self {
                a: escape_html(&record.a),
                b: escape_html(&record.b),
            };
        };

        match outcome.text_source {
            Role::A => Self {
                a: highlight_html(&record.a, highlight.text),
                b: highlight_html(&record.b, highlight.pattern),
            },
            Role::B => Self {
                a: highlight_html(&record.a, highlight.pattern),
                b: highlight_html(&record.b, highlight.text),
            },
        }
    }
}
