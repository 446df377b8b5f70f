use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

use super::{boyer_moore, kmp, naive};
use crate::results::{AuxTable, MatchOutcome, SearchRun};

/// Default number of trace steps before a traced run gives up
pub const DEFAULT_STEP_BUDGET: usize = 350;

/// The substring search algorithms a check can run with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    #[default]
    Naive,
    Kmp,
    #[serde(
        rename = "bm",
        alias = "boyer_moore",
        alias = "boyer-moore",
        alias = "boyermoore"
    )]
    BoyerMoore,
}

/// How much an engine reports about its work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Position only
    Locate,
    /// Position, comparison count and auxiliary table
    Counted,
    /// Everything `Counted` reports plus a step-by-step trace
    Traced,
}

/// Fidelity requested for a whole batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fidelity {
    #[default]
    Fast,
    #[serde(alias = "trace")]
    Traced,
}

impl Fidelity {
    pub fn mode(self) -> SearchMode {
        match self {
            Self::Fast => SearchMode::Counted,
            Self::Traced => SearchMode::Traced,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Traced => "traced",
        }
    }
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Naive, Algorithm::Kmp, Algorithm::BoyerMoore];

    /// Short identifier, as accepted by [`FromStr`]
    pub fn name(self) -> &'static str {
        match self {
            Self::Naive => "naive",
            Self::Kmp => "kmp",
            Self::BoyerMoore => "bm",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Naive => "Naive String Matching",
            Self::Kmp => "Knuth–Morris–Pratt (KMP)",
            Self::BoyerMoore => "Boyer–Moore (Bad Character)",
        }
    }

    /// One-sentence description for reviewers
    pub fn explain(self) -> &'static str {
        match self {
            Self::Naive => {
                "Naive shifts the pattern one position at a time and compares characters from the left. \
                 Simple, but slower on long texts."
            }
            Self::Kmp => {
                "KMP builds an LPS table so a mismatch never re-reads matched text; \
                 the text index never moves backwards."
            }
            Self::BoyerMoore => {
                "Boyer–Moore compares from right to left and can skip ahead using the bad character rule. \
                 Usually fast on natural language text."
            }
        }
    }

    pub fn locate(self, text: &str, pattern: &str) -> MatchOutcome {
        match self {
            Self::Naive => naive::locate(text, pattern),
            Self::Kmp => kmp::locate(text, pattern),
            Self::BoyerMoore => boyer_moore::locate(text, pattern),
        }
    }

    pub fn locate_counted(self, text: &str, pattern: &str) -> SearchRun {
        match self {
            Self::Naive => naive::locate_counted(text, pattern),
            Self::Kmp => kmp::locate_counted(text, pattern),
            Self::BoyerMoore => boyer_moore::locate_counted(text, pattern),
        }
    }

    pub fn locate_traced(self, text: &str, pattern: &str, budget: usize) -> SearchRun {
        match self {
            Self::Naive => naive::locate_traced(text, pattern, budget),
            Self::Kmp => kmp::locate_traced(text, pattern, budget),
            Self::BoyerMoore => boyer_moore::locate_traced(text, pattern, budget),
        }
    }

    /// Runs the search in the given mode.
    ///
    /// `Locate` reports no comparisons and no table.
    pub fn run(self, mode: SearchMode, text: &str, pattern: &str, budget: usize) -> SearchRun {
        trace!(
            "Running {} in {:?} mode (text {} chars, pattern {} chars)",
            self.name(),
            mode,
            text.len(),
            pattern.len()
        );
        match mode {
            SearchMode::Locate => {
                SearchRun::untraced(self.locate(text, pattern), 0, AuxTable::None)
            }
            SearchMode::Counted => self.locate_counted(text, pattern),
            SearchMode::Traced => self.locate_traced(text, pattern, budget),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "naive" => Ok(Self::Naive),
            "kmp" => Ok(Self::Kmp),
            "bm" | "boyer-moore" | "boyer_moore" | "boyermoore" => Ok(Self::BoyerMoore),
            other => Err(format!(
                "unknown algorithm '{}' (expected naive, kmp or bm)",
                other
            )),
        }
    }
}

impl fmt::Display for Fidelity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Fidelity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "trace" | "traced" => Ok(Self::Traced),
            other => Err(format!(
                "unknown fidelity '{}' (expected fast or trace)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_algorithm() {
        assert_eq!("naive".parse::<Algorithm>(), Ok(Algorithm::Naive));
        assert_eq!("KMP".parse::<Algorithm>(), Ok(Algorithm::Kmp));
        assert_eq!("bm".parse::<Algorithm>(), Ok(Algorithm::BoyerMoore));
        assert_eq!(
            "boyer-moore".parse::<Algorithm>(),
            Ok(Algorithm::BoyerMoore)
        );
        assert!("rabin-karp".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_serde_names_match_display() {
        for algorithm in Algorithm::ALL {
            assert_eq!(
                serde_json::to_value(algorithm).unwrap(),
                serde_json::Value::String(algorithm.to_string())
            );
        }
        let parsed: Algorithm = serde_json::from_str("\"boyer_moore\"").unwrap();
        assert_eq!(parsed, Algorithm::BoyerMoore);
        let parsed: Algorithm = serde_yaml::from_str("bm").unwrap();
        assert_eq!(parsed, Algorithm::BoyerMoore);
    }

    #[test]
    fn test_parse_fidelity() {
        assert_eq!("fast".parse::<Fidelity>(), Ok(Fidelity::Fast));
        assert_eq!("trace".parse::<Fidelity>(), Ok(Fidelity::Traced));
        assert_eq!(Fidelity::Fast.mode(), SearchMode::Counted);
        assert_eq!(Fidelity::Traced.mode(), SearchMode::Traced);
    }

    #[test]
    fn test_all_algorithms_agree() {
        let text = "abcxabcdabxabcdabcdabcy";
        for algorithm in Algorithm::ALL {
            assert_eq!(
                algorithm.locate(text, "abcdabcy"),
                MatchOutcome::Found(15),
                "{} disagrees",
                algorithm
            );
            let counted = algorithm.locate_counted(text, "abcdabcy");
            assert_eq!(counted.outcome, MatchOutcome::Found(15));
            assert!(counted.comparisons > 0);
        }
    }

    #[test]
    fn test_run_modes() {
        let run = Algorithm::Kmp.run(SearchMode::Locate, "abcabd", "abd", DEFAULT_STEP_BUDGET);
        assert_eq!(run.outcome, MatchOutcome::Found(3));
        assert_eq!(run.comparisons, 0);
        assert_eq!(run.table, AuxTable::None);
        assert!(run.trace.is_none());

        let run = Algorithm::Kmp.run(SearchMode::Counted, "abcabd", "abd", DEFAULT_STEP_BUDGET);
        assert_eq!(run.table, AuxTable::Lps(vec![0, 0, 0]));
        assert!(run.trace.is_none());

        let run = Algorithm::BoyerMoore.run(SearchMode::Traced, "abcabd", "abd", DEFAULT_STEP_BUDGET);
        assert_eq!(run.outcome, MatchOutcome::Found(3));
        assert!(run.trace.is_some());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Algorithm::BoyerMoore.label(), "Boyer–Moore (Bad Character)");
        for algorithm in Algorithm::ALL {
            assert!(!algorithm.explain().is_empty());
        }
    }
}
