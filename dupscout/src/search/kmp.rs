//! Knuth-Morris-Pratt search.
//!
//! The failure function (LPS table) lets the text index move forward only:
//! on a mismatch the pattern index falls back to the longest proper prefix
//! that is also a suffix of what has matched so far.

use super::trace::{BudgetExhausted, Trace};
use crate::results::{AuxTable, MatchOutcome, SearchRun};

/// Builds the longest-proper-prefix-suffix table of `pattern`.
///
/// `lps[k]` is the length of the longest proper prefix of `pattern[..=k]`
/// that is also a suffix of it.
pub fn build_lps(pattern: &str) -> Vec<usize> {
    let pattern: Vec<char> = pattern.chars().collect();
    lps_table(&pattern)
}

fn lps_table(pattern: &[char]) -> Vec<usize> {
    let m = pattern.len();
    let mut lps = vec![0; m];
    let mut length = 0;
    let mut i = 1;
    while i < m {
        if pattern[i] == pattern[length] {
            length += 1;
            lps[i] = length;
            i += 1;
        } else if length != 0 {
            length = lps[length - 1];
        } else {
            lps[i] = 0;
            i += 1;
        }
    }
    lps
}

pub fn locate(text: &str, pattern: &str) -> MatchOutcome {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    let (n, m) = (text.len(), pattern.len());
    if m == 0 {
        return MatchOutcome::Found(0);
    }
    if m > n {
        return MatchOutcome::NotFound;
    }

    let lps = lps_table(&pattern);
    let (mut i, mut j) = (0, 0);
    while i < n {
        if text[i] == pattern[j] {
            i += 1;
            j += 1;
            if j == m {
                return MatchOutcome::Found(i - j);
            }
        } else if j != 0 {
            j = lps[j - 1];
        } else {
            i += 1;
        }
    }
    MatchOutcome::NotFound
}

/// Same as [`locate`], counting one comparison per loop iteration and returning the LPS table
pub fn locate_counted(text: &str, pattern: &str) -> SearchRun {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    let (n, m) = (text.len(), pattern.len());
    if m == 0 {
        return SearchRun::untraced(MatchOutcome::Found(0), 0, AuxTable::Lps(Vec::new()));
    }
    let lps = lps_table(&pattern);
    if m > n {
        return SearchRun::untraced(MatchOutcome::NotFound, 0, AuxTable::Lps(lps));
    }

    let (mut i, mut j) = (0, 0);
    let mut comparisons = 0;
    while i < n {
        comparisons += 1;
        if text[i] == pattern[j] {
            i += 1;
            j += 1;
            if j == m {
                return SearchRun::untraced(
                    MatchOutcome::Found(i - j),
                    comparisons,
                    AuxTable::Lps(lps),
                );
            }
        } else if j != 0 {
            j = lps[j - 1];
        } else {
            i += 1;
        }
    }
    SearchRun::untraced(MatchOutcome::NotFound, comparisons, AuxTable::Lps(lps))
}

/// Traced KMP. Both phases get their own step budget.
///
/// When the table construction runs out of budget the partial table is
/// returned and no comparisons against the text have been made.
pub fn locate_traced(text: &str, pattern: &str, budget: usize) -> SearchRun {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    let mut trace = Trace::new(budget);
    if pattern.is_empty() {
        trace.push("[KMP] Empty pattern -> found at index 0");
        return SearchRun::traced(
            MatchOutcome::Found(0),
            0,
            AuxTable::Lps(Vec::new()),
            trace,
        );
    }
    if pattern.len() > text.len() {
        trace.push("[KMP] Pattern is longer than text -> no match possible");
        return SearchRun::traced(
            MatchOutcome::NotFound,
            0,
            AuxTable::Lps(lps_table(&pattern)),
            trace,
        );
    }

    let mut lps = vec![0; pattern.len()];
    let mut comparisons = 0;
    let outcome = build_lps_traced(&pattern, &mut lps, &mut trace)
        .and_then(|()| search_traced(&text, &pattern, &lps, &mut trace, &mut comparisons))
        .unwrap_or(MatchOutcome::Truncated);
    SearchRun::traced(outcome, comparisons, AuxTable::Lps(lps), trace)
}

fn build_lps_traced(
    pattern: &[char],
    lps: &mut [usize],
    trace: &mut Trace,
) -> Result<(), BudgetExhausted> {
    let m = pattern.len();
    let mut length = 0;
    let mut i = 1;
    trace.push("[KMP] Phase 1: build the LPS table");
    trace.push(format!("Pattern: '{}'", pattern.iter().collect::<String>()));
    while i < m {
        trace.push(format!(
            " i={}, length={} | P[i]='{}' vs P[length]='{}'",
            i, length, pattern[i], pattern[length]
        ));
        if pattern[i] == pattern[length] {
            length += 1;
            lps[i] = length;
            trace.push(format!("  ✓ match -> LPS[{}]={}, i++", i, length));
            i += 1;
        } else if length != 0 {
            trace.push(format!(
                "  ✗ mismatch -> length = LPS[{}] = {}",
                length - 1,
                lps[length - 1]
            ));
            length = lps[length - 1];
        } else {
            lps[i] = 0;
            trace.push(format!("  ✗ mismatch & length==0 -> LPS[{}]=0, i++", i));
            i += 1;
        }
        trace.step()?;
    }
    trace.push(format!("LPS table: {:?}", lps));
    Ok(())
}

fn search_traced(
    text: &[char],
    pattern: &[char],
    lps: &[usize],
    trace: &mut Trace,
    comparisons: &mut usize,
) -> Result<MatchOutcome, BudgetExhausted> {
    let (n, m) = (text.len(), pattern.len());
    trace.push("[KMP] Phase 2: search (i never moves backwards)");
    trace.restart_steps();

    let (mut i, mut j) = (0, 0);
    let mut step = 0;
    while i < n {
        step += 1;
        trace.step()?;

        *comparisons += 1;
        trace.push(format!(
            " Step {}: i={}, j={} | T[i]='{}' vs P[j]='{}'",
            step, i, j, text[i], pattern[j]
        ));
        if text[i] == pattern[j] {
            i += 1;
            j += 1;
            trace.push(format!("  ✓ match -> i={}, j={}", i, j));
            if j == m {
                let position = i - j;
                trace.push(format!("  ✓ FOUND at position {}", position));
                // where a scan for further occurrences would resume
                trace.push(format!("  -> set j = LPS[{}] = {}", j - 1, lps[j - 1]));
                return Ok(MatchOutcome::Found(position));
            }
        } else {
            trace.push("  ✗ mismatch");
            if j != 0 {
                let previous = j;
                j = lps[j - 1];
                trace.push(format!(
                    "  -> move j: {} -> {} (using LPS[{}])",
                    previous,
                    j,
                    previous - 1
                ));
            } else {
                i += 1;
                trace.push(format!("  -> j==0, move i: i -> {}", i));
            }
        }
    }
    trace.push("-> pattern not found");
    Ok(MatchOutcome::NotFound)
}
