use super::trace::{BudgetExhausted, Trace};
use crate::results::{AuxTable, MatchOutcome, SearchRun};

/// Finds the first occurrence of `pattern` by trying every shift left to right
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

    (0..=n - m)
        .find(|&i| text[i..i + m] == pattern[..])
        .map_or(MatchOutcome::NotFound, MatchOutcome::Found)
}

/// Same as [`locate`], counting every character comparison performed
pub fn locate_counted(text: &str, pattern: &str) -> SearchRun {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    let (n, m) = (text.len(), pattern.len());
    if m == 0 {
        return SearchRun::untraced(MatchOutcome::Found(0), 0, AuxTable::None);
    }
    if m > n {
        return SearchRun::untraced(MatchOutcome::NotFound, 0, AuxTable::None);
    }

    let mut comparisons = 0;
    for i in 0..=n - m {
        let mut matched = true;
        for (j, &p) in pattern.iter().enumerate() {
            comparisons += 1;
            if text[i + j] != p {
                matched = false;
                break;
            }
        }
        if matched {
            return SearchRun::untraced(MatchOutcome::Found(i), comparisons, AuxTable::None);
        }
    }
    SearchRun::untraced(MatchOutcome::NotFound, comparisons, AuxTable::None)
}

/// Same as [`locate_counted`], recording a trace of at most `budget` comparisons
pub fn locate_traced(text: &str, pattern: &str, budget: usize) -> SearchRun {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    let mut trace = Trace::new(budget);
    if pattern.is_empty() {
        trace.push("[Naive] Empty pattern -> found at index 0");
        return SearchRun::traced(MatchOutcome::Found(0), 0, AuxTable::None, trace);
    }
    if pattern.len() > text.len() {
        trace.push("[Naive] Pattern is longer than text -> no match possible");
        return SearchRun::traced(MatchOutcome::NotFound, 0, AuxTable::None, trace);
    }

    let mut comparisons = 0;
    let outcome = scan_traced(&text, &pattern, &mut trace, &mut comparisons)
        .unwrap_or(MatchOutcome::Truncated);
    SearchRun::traced(outcome, comparisons, AuxTable::None, trace)
}

fn scan_traced(
    text: &[char],
    pattern: &[char],
    trace: &mut Trace,
    comparisons: &mut usize,
) -> Result<MatchOutcome, BudgetExhausted> {
    let (n, m) = (text.len(), pattern.len());
    trace.push("[Naive] Shift the pattern one position at a time");
    for i in 0..=n - m {
        trace.push(format!(
            "Shift i={} | compare text[{}..{}] with pattern",
            i,
            i,
            i + m
        ));
        let mut matched = true;
        for (j, &p) in pattern.iter().enumerate() {
            let t = text[i + j];
            *comparisons += 1;
            trace.push(format!(
                "  Compare j={}: T[{}]='{}' vs P[{}]='{}'",
                j,
                i + j,
                t,
                j,
                p
            ));
            trace.step()?;
            if t != p {
                trace.push("  ✗ mismatch -> shift by 1");
                matched = false;
                break;
            }
        }
        if matched {
            trace.push("  ✓ all characters match -> FOUND");
            return Ok(MatchOutcome::Found(i));
        }
    }
    trace.push("-> pattern not found");
    Ok(MatchOutcome::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::trace::TRUNCATION_MARKER;

    #[test]
    fn test_locate() {
        assert_eq!(locate("hello world", "world"), MatchOutcome::Found(6));
        assert_eq!(locate("hello world", "hello"), MatchOutcome::Found(0));
        assert_eq!(locate("hello world", "worlds"), MatchOutcome::NotFound);
        assert_eq!(locate("aaaa", "aa"), MatchOutcome::Found(0));
    }

    #[test]
    fn test_edge_cases() {
        assert_eq!(locate("", ""), MatchOutcome::Found(0));
        assert_eq!(locate("abc", ""), MatchOutcome::Found(0));
        assert_eq!(locate("", "a"), MatchOutcome::NotFound);
        assert_eq!(locate("ab", "abc"), MatchOutcome::NotFound);

        let run = locate_counted("ab", "abc");
        assert_eq!(run.outcome, MatchOutcome::NotFound);
        assert_eq!(run.comparisons, 0);
    }

    #[test]
    fn test_counted_includes_failing_comparison() {
        let run = locate_counted("abab", "ab");
        assert_eq!(run.outcome, MatchOutcome::Found(0));
        assert_eq!(run.comparisons, 2);

        // shift 0: a=a, a!=b; shift 1: a=a, b=b
        let run = locate_counted("aab", "ab");
        assert_eq!(run.outcome, MatchOutcome::Found(1));
        assert_eq!(run.comparisons, 4);
    }

    #[test]
    fn test_counted_not_found_counts_actual_work() {
        let run = locate_counted("xyz", "ab");
        assert_eq!(run.outcome, MatchOutcome::NotFound);
        assert_eq!(run.comparisons, 2);
    }

    #[test]
    fn test_traced_matches_counted() {
        let counted = locate_counted("the cat sat", "sat");
        let traced = locate_traced("the cat sat", "sat", 350);
        assert_eq!(traced.outcome, counted.outcome);
        assert_eq!(traced.comparisons, counted.comparisons);

        let lines = traced.trace.unwrap();
        assert!(lines.first().unwrap().starts_with("[Naive]"));
        assert_eq!(lines.last().unwrap(), "  ✓ all characters match -> FOUND");
    }

    #[test]
    fn test_traced_truncates_at_budget() {
        let text = "a".repeat(200);
        let pattern = format!("{}b", "a".repeat(20));
        let run = locate_traced(&text, &pattern, 350);
        assert_eq!(run.outcome, MatchOutcome::Truncated);
        assert_eq!(run.comparisons, 350);
        assert_eq!(run.trace.unwrap().last().unwrap(), TRUNCATION_MARKER);

        assert_eq!(locate_counted(&text, &pattern).outcome, MatchOutcome::NotFound);
    }

    #[test]
    fn test_traced_edge_messages() {
        let run = locate_traced("abc", "", 350);
        assert_eq!(run.outcome, MatchOutcome::Found(0));
        assert_eq!(run.trace.unwrap().len(), 1);

        let run = locate_traced("a", "abc", 350);
        assert_eq!(run.outcome, MatchOutcome::NotFound);
        assert_eq!(run.trace.unwrap().len(), 1);
    }
}
