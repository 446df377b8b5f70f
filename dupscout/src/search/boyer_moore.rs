//! Boyer-Moore search using the bad-character rule only.
//!
//! There is no good-suffix table, so the worst case is O(n·m). The shift is
//! clamped to at least one position to keep the alignment moving forward.

use std::collections::BTreeMap;

use super::trace::{BudgetExhausted, Trace};
use crate::results::{AuxTable, MatchOutcome, SearchRun};

/// Maps every pattern character to its rightmost index in the pattern
pub fn build_last_occurrence(pattern: &str) -> BTreeMap<char, usize> {
    let pattern: Vec<char> = pattern.chars().collect();
    last_table(&pattern)
}

fn last_table(pattern: &[char]) -> BTreeMap<char, usize> {
    pattern.iter().enumerate().map(|(idx, &c)| (c, idx)).collect()
}

/// Rightmost index of `c` in the pattern, -1 when absent
fn last_index(last: &BTreeMap<char, usize>, c: char) -> isize {
    last.get(&c).map_or(-1, |&idx| idx as isize)
}

/// Alignment shift after a mismatch of text character `bad` at pattern index `j`
fn bad_character_shift(last: &BTreeMap<char, usize>, bad: char, j: usize) -> usize {
    (j as isize - last_index(last, bad)).max(1) as usize
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

    let last = last_table(&pattern);
    let mut s = 0;
    while s <= n - m {
        // j counts pattern characters still unverified
        let mut j = m;
        while j > 0 && pattern[j - 1] == text[s + j - 1] {
            j -= 1;
        }
        if j == 0 {
            return MatchOutcome::Found(s);
        }
        s += bad_character_shift(&last, text[s + j - 1], j - 1);
    }
    MatchOutcome::NotFound
}

/// Same as [`locate`], counting every character test including the mismatching one
pub fn locate_counted(text: &str, pattern: &str) -> SearchRun {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    let (n, m) = (text.len(), pattern.len());
    if m == 0 {
        return SearchRun::untraced(
            MatchOutcome::Found(0),
            0,
            AuxTable::LastOccurrence(BTreeMap::new()),
        );
    }
    let last = last_table(&pattern);
    if m > n {
        return SearchRun::untraced(MatchOutcome::NotFound, 0, AuxTable::LastOccurrence(last));
    }

    let mut s = 0;
    let mut comparisons = 0;
    while s <= n - m {
        let mut j = m;
        while j > 0 {
            comparisons += 1;
            if pattern[j - 1] != text[s + j - 1] {
                break;
            }
            j -= 1;
        }
        if j == 0 {
            return SearchRun::untraced(
                MatchOutcome::Found(s),
                comparisons,
                AuxTable::LastOccurrence(last),
            );
        }
        s += bad_character_shift(&last, text[s + j - 1], j - 1);
    }
    SearchRun::untraced(
        MatchOutcome::NotFound,
        comparisons,
        AuxTable::LastOccurrence(last),
    )
}

/// Traced Boyer-Moore. Every matching character and every mismatch costs one step.
pub fn locate_traced(text: &str, pattern: &str, budget: usize) -> SearchRun {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    let mut trace = Trace::new(budget);
    if pattern.is_empty() {
        trace.push("[Boyer-Moore] Empty pattern -> found at index 0");
        return SearchRun::traced(
            MatchOutcome::Found(0),
            0,
            AuxTable::LastOccurrence(BTreeMap::new()),
            trace,
        );
    }
    let last = last_table(&pattern);
    if pattern.len() > text.len() {
        trace.push("[Boyer-Moore] Pattern is longer than text -> no match possible");
        return SearchRun::traced(
            MatchOutcome::NotFound,
            0,
            AuxTable::LastOccurrence(last),
            trace,
        );
    }

    let mut comparisons = 0;
    let outcome = scan_traced(&text, &pattern, &last, &mut trace, &mut comparisons)
        .unwrap_or(MatchOutcome::Truncated);
    SearchRun::traced(outcome, comparisons, AuxTable::LastOccurrence(last), trace)
}

fn scan_traced(
    text: &[char],
    pattern: &[char],
    last: &BTreeMap<char, usize>,
    trace: &mut Trace,
    comparisons: &mut usize,
) -> Result<MatchOutcome, BudgetExhausted> {
    let (n, m) = (text.len(), pattern.len());
    trace.push("[Boyer-Moore] Bad character rule (compare right to left)");
    trace.push(format!("Last occurrence table: {:?}", last));

    let mut s = 0;
    while s <= n - m {
        let mut j = m;
        trace.push(format!(
            "Alignment s={} | start from the right (j={})",
            s,
            m - 1
        ));
        while j > 0 && pattern[j - 1] == text[s + j - 1] {
            *comparisons += 1;
            trace.push(format!(
                "  ✓ match j={}: P='{}' == T='{}'",
                j - 1,
                pattern[j - 1],
                text[s + j - 1]
            ));
            j -= 1;
            trace.step()?;
        }
        if j == 0 {
            trace.push("  ✓ all characters match -> FOUND");
            return Ok(MatchOutcome::Found(s));
        }

        *comparisons += 1;
        let mismatch = j - 1;
        let bad = text[s + mismatch];
        let shift = bad_character_shift(last, bad, mismatch);
        trace.push(format!(
            "  ✗ mismatch j={}: P='{}' != T='{}'",
            mismatch, pattern[mismatch], bad
        ));
        trace.push(format!(
            "  bad_char='{}', last_occurrence={} -> shift={}",
            bad,
            last_index(last, bad),
            shift
        ));
        s += shift;
        trace.step()?;
    }
    trace.push("-> pattern not found");
    Ok(MatchOutcome::NotFound)
}
