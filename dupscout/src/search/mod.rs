//! Substring search engines.
//!
//! Three interchangeable algorithms are selected through the closed
//! [`Algorithm`] enum, each callable in three modes:
//!
//! 1. **Locate**: first occurrence only
//! 2. **Counted**: first occurrence, character comparisons performed and the
//!    algorithm's auxiliary table (KMP's LPS table, Boyer-Moore's last
//!    occurrence table)
//! 3. **Traced**: everything above plus a human-readable trace, bounded by a
//!    step budget; a run that exceeds it ends as [`MatchOutcome::Truncated`]
//!
//! ```rust,ignore
//! let run = Algorithm::Kmp.run(SearchMode::Traced, "abcabd", "abd", 350);
//! match run.outcome {
//!     MatchOutcome::Found(pos) => // pos is in normalized coordinates,
//!     MatchOutcome::NotFound => // definite miss,
//!     MatchOutcome::Truncated => // trace too long, no verdict
//! }
//! ```
//!
//! All engines agree on whether and where a pattern occurs. An empty pattern
//! matches at 0 and a pattern longer than the text never matches.
//!
//! [`MatchOutcome::Truncated`]: crate::results::MatchOutcome::Truncated

pub mod boyer_moore;
pub mod engine;
pub mod kmp;
pub mod naive;
pub mod trace;

pub use engine::{Algorithm, Fidelity, SearchMode, DEFAULT_STEP_BUDGET};
pub use trace::{Trace, TRUNCATION_MARKER};
