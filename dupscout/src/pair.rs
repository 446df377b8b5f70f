use std::time::Instant;
use tracing::debug;

use crate::normalize::{normalize_with_map, NormalizedText};
use crate::results::{Highlight, MatchOutcome, PairOutcome, Role, Span};
use crate::search::{Algorithm, SearchMode};

/// An input sentence together with its normalized form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub original: String,
    pub normalized: NormalizedText,
}

impl Sentence {
    pub fn new(original: impl Into<String>) -> Self {
        let original = original.into();
        let normalized = normalize_with_map(&original);
        Self {
            original,
            normalized,
        }
    }
}

/// Normalizes both sentences and checks whether the shorter occurs in the longer
pub fn evaluate_pair(
    a: &str,
    b: &str,
    algorithm: Algorithm,
    mode: SearchMode,
    step_budget: usize,
) -> PairOutcome {
    evaluate(
        &Sentence::new(a),
        &Sentence::new(b),
        algorithm,
        mode,
        step_budget,
    )
}

/// Evaluates two already normalized sentences.
///
/// The sentence with the longer normalized form is the TEXT, the other the
/// PATTERN; on equal length `a` is the TEXT.
pub fn evaluate(
    a: &Sentence,
    b: &Sentence,
    algorithm: Algorithm,
    mode: SearchMode,
    step_budget: usize,
) -> PairOutcome {
    let (text, pattern, text_source, pattern_source) = if a.normalized.len() >= b.normalized.len()
    {
        (a, b, Role::A, Role::B)
    } else {
        (b, a, Role::B, Role::A)
    };

    let started = Instant::now();
    let run = algorithm.run(
        mode,
        &text.normalized.text,
        &pattern.normalized.text,
        step_budget,
    );
    let elapsed = started.elapsed();

    let pattern_len = pattern.normalized.len();
    let (matched_normalized, highlight) = match run.outcome {
        MatchOutcome::Found(position) => {
            let matched = text
                .normalized
                .text
                .get(position..position + pattern_len)
                .unwrap_or_default()
                .to_string();
            let highlight = reproject(text, position, pattern_len).map(|span| Highlight {
                text: span,
                pattern: Span::new(0, pattern.original.len()),
            });
            (matched, highlight)
        }
        MatchOutcome::NotFound | MatchOutcome::Truncated => (String::new(), None),
    };

    debug!(
        "Pair evaluated with {}: text={} pattern={} outcome={} comparisons={}",
        algorithm, text_source, pattern_source, run.outcome, run.comparisons
    );

    PairOutcome {
        algorithm,
        text_source,
        pattern_source,
        normalized_a: a.normalized.text.clone(),
        normalized_b: b.normalized.text.clone(),
        text_normalized: text.normalized.text.clone(),
        pattern_normalized: pattern.normalized.text.clone(),
        run,
        matched_normalized,
        highlight,
        elapsed,
    }
}

/// Maps a match at `position` in normalized coordinates onto the original TEXT.
///
/// Returns `None` for an empty pattern, which matches without covering anything.
fn reproject(text: &Sentence, position: usize, pattern_len: usize) -> Option<Span> {
    if pattern_len == 0 {
        return None;
    }
    let map = &text.normalized.map;
    let start = *map.get(position)?;
    let end = *map.get(position + pattern_len - 1)? + 1;
    let limit = text.original.len();
    Some(Span::new(start.min(limit), end.min(limit)))
}
