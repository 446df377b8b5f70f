//! Result types shared by the search engines, the pair evaluator and the batch runner.
//!
//! Everything here is built once and then only read: engines hand back a
//! [`SearchRun`], the pair evaluator wraps it into a [`PairOutcome`], and the
//! batch runner collects those into a [`BatchReport`] that the caller
//! serializes or renders.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use crate::search::{Algorithm, Fidelity, Trace};

/// Terminal state of a single substring search.
///
/// `Truncated` is only produced by traced runs whose step budget ran out
/// before the search resolved; it is neither a match nor a miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "position", rename_all = "snake_case")]
pub enum MatchOutcome {
    /// Start offset of the first occurrence, in normalized coordinates
    Found(usize),
    NotFound,
    Truncated,
}

impl MatchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Truncated)
    }

    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Found(position) => Some(*position),
            Self::NotFound | Self::Truncated => None,
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(position) => write!(f, "found at {}", position),
            Self::NotFound => f.write_str("not found"),
            Self::Truncated => f.write_str("truncated"),
        }
    }
}

/// Algorithm-specific table built during a search
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", content = "entries", rename_all = "snake_case")]
pub enum AuxTable {
    #[default]
    None,
    /// KMP failure function
    Lps(Vec<usize>),
    /// Boyer-Moore rightmost index of every pattern character
    LastOccurrence(BTreeMap<char, usize>),
}

/// Everything an engine reports about one invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRun {
    pub outcome: MatchOutcome,
    pub comparisons: usize,
    pub table: AuxTable,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<String>>,
}

impl SearchRun {
    pub(crate) fn untraced(outcome: MatchOutcome, comparisons: usize, table: AuxTable) -> Self {
        Self {
            outcome,
            comparisons,
            table,
            trace: None,
        }
    }

    pub(crate) fn traced(
        outcome: MatchOutcome,
        comparisons: usize,
        table: AuxTable,
        trace: Trace,
    ) -> Self {
        Self {
            outcome,
            comparisons,
            table,
            trace: Some(trace.into_lines()),
        }
    }
}

/// Which of the two input sentences a role was bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    A,
    B,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::B => f.write_str("B"),
        }
    }
}

/// Half-open `[start, end)` byte range into an original sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The covered part of `original`, or "" when the span does not fit it
    pub fn slice<'a>(&self, original: &'a str) -> &'a str {
        original.get(self.start..self.end).unwrap_or("")
    }
}

/// Evidence marking for a duplicate pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Highlight {
    /// Matched region of the TEXT's original string
    pub text: Span,
    /// The whole PATTERN original string
    pub pattern: Span,
}

/// Verdict for a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PairStatus {
    Duplicate,
    NotDuplicate,
    /// Traced search ran out of budget; not a duplicate, but not a definite miss either
    TraceTruncated,
}

impl PairStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Duplicate => "DUPLICATE",
            Self::NotDuplicate => "NOT DUPLICATE",
            Self::TraceTruncated => "NOT DUPLICATE (trace too long to display in full)",
        }
    }
}

/// Result of evaluating one pair of sentences
#[derive(Debug, Clone, Serialize)]
pub struct PairOutcome {
    pub algorithm: Algorithm,
    pub text_source: Role,
    pub pattern_source: Role,
    pub normalized_a: String,
    pub normalized_b: String,
    pub text_normalized: String,
    pub pattern_normalized: String,
    #[serde(flatten)]
    pub run: SearchRun,
    /// The matched slice of the normalized TEXT, empty when nothing matched
    pub matched_normalized: String,
    pub highlight: Option<Highlight>,
    #[serde(rename = "time_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

impl PairOutcome {
    pub fn is_duplicate(&self) -> bool {
        self.run.outcome.is_found()
    }

    pub fn status(&self) -> PairStatus {
        match self.run.outcome {
            MatchOutcome::Found(_) => PairStatus::Duplicate,
            MatchOutcome::NotFound => PairStatus::NotDuplicate,
            MatchOutcome::Truncated => PairStatus::TraceTruncated,
        }
    }
}

/// One pair inside a batch, with 1-based sentence indices
#[derive(Debug, Clone, Serialize)]
pub struct PairRecord {
    pub first: usize,
    pub second: usize,
    pub a: String,
    pub b: String,
    pub status: PairStatus,
    #[serde(flatten)]
    pub outcome: PairOutcome,
}

/// Summary and per-pair records of a batch check
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub algorithm: Algorithm,
    pub fidelity: Fidelity,
    pub sentence_count: usize,
    pub total_pairs: usize,
    pub duplicate_count: usize,
    pub non_duplicate_count: usize,
    pub truncated_count: usize,
    pub total_comparisons: usize,
    #[serde(rename = "total_time_ms", serialize_with = "serialize_millis")]
    pub total_elapsed: Duration,
    #[serde(rename = "avg_time_ms", serialize_with = "serialize_millis")]
    pub average_elapsed: Duration,
    pub records: Vec<PairRecord>,
}

impl BatchReport {
    /// Creates an empty report for `sentence_count` sentences
    pub fn new(algorithm: Algorithm, fidelity: Fidelity, sentence_count: usize) -> Self {
        Self {
            algorithm,
            fidelity,
            sentence_count,
            total_pairs: 0,
            duplicate_count: 0,
            non_duplicate_count: 0,
            truncated_count: 0,
            total_comparisons: 0,
            total_elapsed: Duration::ZERO,
            average_elapsed: Duration::ZERO,
            records: Vec::new(),
        }
    }

    /// Adds a pair record and updates the summary statistics
    pub fn add_record(&mut self, record: PairRecord) {
        self.total_pairs += 1;
        match record.status {
            PairStatus::Duplicate => self.duplicate_count += 1,
            PairStatus::NotDuplicate => self.non_duplicate_count += 1,
            PairStatus::TraceTruncated => {
                self.non_duplicate_count += 1;
                self.truncated_count += 1;
            }
        }
        self.total_comparisons += record.outcome.run.comparisons;
        self.total_elapsed += record.outcome.elapsed;
        self.average_elapsed = self.total_elapsed / self.total_pairs as u32;
        self.records.push(record);
    }
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    let millis = (duration.as_secs_f64() * 1000.0 * 1000.0).round() / 1000.0;
    serializer.serialize_f64(millis)
}
