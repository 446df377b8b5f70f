use anyhow::Result;
use dupscout::{
    check_batch,
    config::DetectorConfig,
    evaluate_pair,
    results::{AuxTable, PairStatus, Role},
    search::TRUNCATION_MARKER,
    validation::prepare_sentences,
    Algorithm, Fidelity, MatchOutcome, SearchMode,
};
use std::fs;
use std::num::NonZeroUsize;
use tempfile::tempdir;

const SHORT: &str = "Metode KMP untuk pencocokan string.";
const LONG: &str = "Penelitian ini menggunakan metode KMP untuk pencocokan string.";

fn small_config() -> DetectorConfig {
    DetectorConfig {
        thread_count: NonZeroUsize::new(2).unwrap(),
        ..DetectorConfig::default()
    }
}

#[test]
fn test_all_algorithms_agree_on_example() -> Result<()> {
    for algorithm in Algorithm::ALL {
        let outcome = evaluate_pair(SHORT, LONG, algorithm, SearchMode::Counted, 350);
        assert_eq!(outcome.text_source, Role::B, "{}", algorithm);
        assert_eq!(outcome.run.outcome, MatchOutcome::Found(27), "{}", algorithm);
        assert_eq!(
            outcome.matched_normalized,
            "metode kmp untuk pencocokan string"
        );

        let highlight = outcome.highlight.expect("duplicate has a highlight");
        assert_eq!(
            highlight.text.slice(LONG),
            "metode KMP untuk pencocokan string"
        );
        assert_eq!(highlight.pattern.slice(SHORT), SHORT);
    }
    Ok(())
}

#[test]
fn test_aux_tables_follow_algorithm() -> Result<()> {
    let naive = evaluate_pair(SHORT, LONG, Algorithm::Naive, SearchMode::Counted, 350);
    assert_eq!(naive.run.table, AuxTable::None);

    let kmp = evaluate_pair(SHORT, LONG, Algorithm::Kmp, SearchMode::Counted, 350);
    match &kmp.run.table {
        AuxTable::Lps(lps) => assert_eq!(lps.len(), kmp.pattern_normalized.chars().count()),
        other => panic!("expected LPS table, got {:?}", other),
    }

    let bm = evaluate_pair(SHORT, LONG, Algorithm::BoyerMoore, SearchMode::Counted, 350);
    match &bm.run.table {
        AuxTable::LastOccurrence(last) => {
            assert_eq!(last.get(&'m'), Some(&8));
            assert_eq!(last.get(&'g'), Some(&33));
            assert_eq!(last.get(&'x'), None);
        }
        other => panic!("expected last occurrence table, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_locate_mode_reports_position_only() -> Result<()> {
    let outcome = evaluate_pair(SHORT, LONG, Algorithm::Kmp, SearchMode::Locate, 350);
    assert_eq!(outcome.run.outcome, MatchOutcome::Found(27));
    assert_eq!(outcome.run.comparisons, 0);
    assert_eq!(outcome.run.table, AuxTable::None);
    assert!(outcome.run.trace.is_none());
    Ok(())
}

#[test]
fn test_fast_and_traced_agree_when_budget_suffices() -> Result<()> {
    for algorithm in Algorithm::ALL {
        let fast = evaluate_pair(SHORT, LONG, algorithm, SearchMode::Counted, 350);
        let traced = evaluate_pair(SHORT, LONG, algorithm, SearchMode::Traced, 350);
        assert_eq!(fast.run.outcome, traced.run.outcome);
        assert_eq!(fast.run.comparisons, traced.run.comparisons);
        assert_eq!(fast.run.table, traced.run.table);
        assert!(!traced.run.trace.unwrap_or_default().is_empty());
    }
    Ok(())
}

#[test]
fn test_truncation_only_in_traced_mode() -> Result<()> {
    // the leading 'b' keeps every engine busy until the budget runs out
    let text = "a ".repeat(300);
    let pattern = format!("b {}", "a ".repeat(20));

    for algorithm in Algorithm::ALL {
        let fast = evaluate_pair(&text, &pattern, algorithm, SearchMode::Counted, 350);
        assert_eq!(fast.run.outcome, MatchOutcome::NotFound, "{}", algorithm);
        assert_eq!(fast.status(), PairStatus::NotDuplicate);

        let traced = evaluate_pair(&text, &pattern, algorithm, SearchMode::Traced, 350);
        assert_eq!(traced.run.outcome, MatchOutcome::Truncated, "{}", algorithm);
        assert_eq!(traced.status(), PairStatus::TraceTruncated);
        assert!(!traced.is_duplicate());
        assert!(traced.highlight.is_none());
        let trace = traced.run.trace.unwrap_or_default();
        assert_eq!(trace.last().map(String::as_str), Some(TRUNCATION_MARKER));
    }
    Ok(())
}

#[test]
fn test_prepared_file_batch() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("input.txt");
    fs::write(
        &input,
        format!(
            "{}\n   \n{}\nSesuatu yang sama sekali berbeda.\nstring\n",
            SHORT, LONG
        ),
    )?;

    let config = small_config();
    let raw: Vec<String> = fs::read_to_string(&input)?
        .lines()
        .map(str::to_string)
        .collect();
    let sentences = prepare_sentences(&raw, &config)?;
    assert_eq!(sentences.len(), 4);

    let report = check_batch(&sentences, Algorithm::BoyerMoore, Fidelity::Fast, &config);
    assert_eq!(report.total_pairs, 6);
    // "string" occurs in both KMP sentences, and the KMP pair matches
    assert_eq!(report.duplicate_count, 3);
    assert_eq!(report.non_duplicate_count, 3);
    assert_eq!(
        report.total_comparisons,
        report
            .records
            .iter()
            .map(|r| r.outcome.run.comparisons)
            .sum::<usize>()
    );
    Ok(())
}

#[test]
fn test_report_json_shape() -> Result<()> {
    let report = check_batch(&[SHORT, LONG], Algorithm::Kmp, Fidelity::Traced, &small_config());
    let json = serde_json::to_value(&report)?;

    assert_eq!(json["algorithm"], "kmp");
    assert_eq!(json["fidelity"], "traced");
    assert_eq!(json["total_pairs"], 1);
    assert!(json["total_time_ms"].is_number());
    assert!(json["avg_time_ms"].is_number());

    let record = &json["records"][0];
    assert_eq!(record["first"], 1);
    assert_eq!(record["second"], 2);
    assert_eq!(record["status"], "duplicate");
    assert_eq!(record["outcome"]["status"], "found");
    assert_eq!(record["outcome"]["position"], 27);
    assert_eq!(record["pattern_source"], "A");
    assert!(record["trace"].is_array());
    assert!(record["highlight"]["text"]["start"].is_number());
    Ok(())
}

#[test]
fn test_config_file_drives_batch() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("config.yaml");
    fs::write(
        &path,
        "algorithm: kmp\nfidelity: trace\nstep_budget: 5\nthread_count: 1\n",
    )?;

    let config = DetectorConfig::load_from(Some(&path))?;
    assert_eq!(config.algorithm, Algorithm::Kmp);
    assert_eq!(config.fidelity, Fidelity::Traced);

    let report = check_batch(&[SHORT, LONG], config.algorithm, config.fidelity, &config);
    assert_eq!(report.truncated_count, 1);
    assert_eq!(report.records[0].status, PairStatus::TraceTruncated);
    Ok(())
}
